//! `ReinterpretImplementor` (§4.C): reinterprets an operand's representation
//! as `result_type` without any runtime conversion — a relabeling, not a
//! cast.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs};
use crate::error::LowerResult;
use crate::expr::Expr;
use crate::operators::SqlOperator;
use crate::scalar::CallImplementor;
use crate::translator::Translator;

#[derive(Debug)]
pub struct ReinterpretImplementor;

impl CallImplementor for ReinterpretImplementor {
    fn implement(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        assert_eq!(call.operands.len(), 1, "REINTERPRET takes exactly one operand");
        translator.translate(call.operands[0].as_ref(), null_as)
    }
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    reg.insert(SqlOperator::Reinterpret, Arc::new(ReinterpretImplementor));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{Leaf, LeafTranslator};
    use crate::types::{SqlType, TypeKind};

    #[test]
    fn reinterpret_passes_the_operand_through_unchanged() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::Reinterpret,
            vec![Leaf::new(Expr::Field(None, "x".into()), SqlType::new(TypeKind::Date))],
            SqlType::new(TypeKind::Int),
        );
        let e = reg[&SqlOperator::Reinterpret].implement(&translator, &call, NullAs::NotPossible).unwrap();
        assert_eq!(e, Expr::Field(None, "x".into()));
    }
}
