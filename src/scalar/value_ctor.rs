//! `ValueConstructorImplementor` (§4.C): `ARRAY[...]`, `MAP[...]`, `ROW(...)`.
//! A constructed value is never itself null, so this bypasses the
//! `NullPolicy` engine and answers the `IS [NOT] NULL` shortcuts directly.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs};
use crate::error::LowerResult;
use crate::expr::{self, Expr};
use crate::operators::SqlOperator;
use crate::scalar::CallImplementor;
use crate::translator::Translator;

#[derive(Debug)]
pub struct ValueConstructorImplementor {
    symbol: &'static str,
}

impl CallImplementor for ValueConstructorImplementor {
    fn implement(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        match null_as {
            NullAs::IsNull => return Ok(expr::false_expr()),
            NullAs::IsNotNull => return Ok(expr::true_expr()),
            _ => {}
        }
        let args = translator.translate_list(&call.operands, NullAs::Null)?;
        Ok(translator.translate_constructor(args, self.symbol))
    }
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    reg.insert(SqlOperator::ArrayValueConstructor, Arc::new(ValueConstructorImplementor { symbol: "array" }));
    reg.insert(SqlOperator::MapValueConstructor, Arc::new(ValueConstructorImplementor { symbol: "map" }));
    reg.insert(SqlOperator::RowConstructor, Arc::new(ValueConstructorImplementor { symbol: "row" }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{Leaf, LeafTranslator};
    use crate::types::{SqlType, TypeKind};

    #[test]
    fn array_constructor_is_never_null() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::ArrayValueConstructor,
            vec![Leaf::new(Expr::Const(expr::Value::Int(1), SqlType::new(TypeKind::Int)), SqlType::new(TypeKind::Int))],
            SqlType::new(TypeKind::Array),
        );
        let e = reg[&SqlOperator::ArrayValueConstructor].implement(&translator, &call, NullAs::IsNull).unwrap();
        assert_eq!(e, expr::false_expr());
    }

    #[test]
    fn row_constructor_emits_constructor_call() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::RowConstructor,
            vec![Leaf::new(Expr::Field(None, "a".into()), SqlType::new(TypeKind::Int))],
            SqlType::new(TypeKind::Row),
        );
        let e = reg[&SqlOperator::RowConstructor].implement(&translator, &call, NullAs::NotPossible).unwrap();
        match e {
            Expr::MethodCall(None, symbol, args) => {
                assert_eq!(&*symbol, "row");
                assert_eq!(args.len(), 1);
            }
            other => panic!("expected row constructor call, got {other:?}"),
        }
    }
}
