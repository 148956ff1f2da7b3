//! `ItemImplementor` (§4.C): `collection[index]`, dispatching on the
//! collection operand's type rather than on distinct operators — the
//! registry only has one `SqlOperator::Item` entry for `ARRAY`/`MAP`/`ROW`
//! item access.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs, NullPolicy};
use crate::error::LowerResult;
use crate::expr::Expr;
use crate::operators::SqlOperator;
use crate::scalar::{wrap, CallImplementor, NotNullImplementor};
use crate::translator::Translator;
use crate::types::TypeKind;

#[derive(Debug)]
pub struct ItemNotNull;

impl NotNullImplementor for ItemNotNull {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let collection_ty = call.operand_types()[0];
        let mut args = translator.translate_list(&call.operands, null_as)?.into_iter();
        let receiver = args.next().expect("ITEM always has a collection operand");
        let method = match collection_ty.kind {
            TypeKind::Array => "arrayItem",
            TypeKind::Map => "mapItem",
            _ => "item",
        };
        Ok(Expr::method(Some(receiver), method, args.collect()))
    }
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    reg.insert(SqlOperator::Item, wrap(Arc::new(ItemNotNull), NullPolicy::Strict, false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{Leaf, LeafTranslator};
    use crate::types::SqlType;

    #[test]
    fn array_item_uses_array_item_method() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::Item,
            vec![
                Leaf::new(Expr::Field(None, "arr".into()), SqlType::new(TypeKind::Array)),
                Leaf::new(Expr::Const(crate::expr::Value::Int(1), SqlType::new(TypeKind::Int)), SqlType::new(TypeKind::Int)),
            ],
            SqlType::nullable(TypeKind::Int),
        );
        let e = reg[&SqlOperator::Item].implement(&translator, &call, NullAs::NotPossible).unwrap();
        match e {
            Expr::MethodCall(Some(_), symbol, args) => {
                assert_eq!(&*symbol, "arrayItem");
                assert_eq!(args.len(), 1);
            }
            other => panic!("expected arrayItem method call, got {other:?}"),
        }
    }
}
