//! `IsXxxImplementor` (§4.C): the truth-value tests `IS [NOT] {NULL,TRUE,FALSE}`.
//! These never consult the `NullPolicy` engine — each one already has a
//! closed-form three-valued-logic answer, so it implements `CallImplementor`
//! directly instead of going through a `NotNullImplementor`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs};
use crate::error::LowerResult;
use crate::expr::{self, Expr};
use crate::operators::SqlOperator;
use crate::scalar::CallImplementor;
use crate::translator::Translator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Test {
    IsNull,
    IsNotNull,
    IsTrue,
    IsNotTrue,
    IsFalse,
    IsNotFalse,
}

#[derive(Debug)]
pub struct IsXxxImplementor {
    test: Test,
}

impl CallImplementor for IsXxxImplementor {
    fn implement(&self, translator: &dyn Translator, call: &Call, _null_as: NullAs) -> LowerResult<Expr> {
        let operand = &call.operands[0];
        match self.test {
            Test::IsNull => translator.translate(operand.as_ref(), NullAs::IsNull),
            Test::IsNotNull => translator.translate(operand.as_ref(), NullAs::IsNotNull),
            Test::IsTrue => translator.translate(operand.as_ref(), NullAs::False),
            Test::IsNotTrue => {
                let v = translator.translate(operand.as_ref(), NullAs::False)?;
                Ok(Expr::Not(Box::new(v)))
            }
            Test::IsFalse => {
                let v = translator.translate(operand.as_ref(), NullAs::True)?;
                Ok(expr::condition(v, expr::false_expr(), expr::true_expr()))
            }
            Test::IsNotFalse => translator.translate(operand.as_ref(), NullAs::True),
        }
    }
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    let entries: &[(SqlOperator, Test)] = &[
        (SqlOperator::IsNull, Test::IsNull),
        (SqlOperator::IsNotNull, Test::IsNotNull),
        (SqlOperator::IsTrue, Test::IsTrue),
        (SqlOperator::IsNotTrue, Test::IsNotTrue),
        (SqlOperator::IsFalse, Test::IsFalse),
        (SqlOperator::IsNotFalse, Test::IsNotFalse),
    ];
    for &(op, test) in entries {
        reg.insert(op, Arc::new(IsXxxImplementor { test }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{Leaf, LeafTranslator};
    use crate::types::{SqlType, TypeKind};

    #[test]
    fn is_null_of_constant_null_is_true() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::IsNull,
            vec![Leaf::new(expr::NULL_EXPR, SqlType::nullable(TypeKind::Int))],
            SqlType::new(TypeKind::Boolean),
        );
        let e = reg[&SqlOperator::IsNull].implement(&translator, &call, NullAs::NotPossible).unwrap();
        assert_eq!(e, expr::true_expr());
    }

    #[test]
    fn is_not_true_wraps_false_demand_in_not() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::IsNotTrue,
            vec![Leaf::new(expr::false_expr(), SqlType::new(TypeKind::Boolean))],
            SqlType::new(TypeKind::Boolean),
        );
        let e = reg[&SqlOperator::IsNotTrue].implement(&translator, &call, NullAs::NotPossible).unwrap();
        assert!(matches!(e, Expr::Not(_)));
    }

    #[test]
    fn null_is_not_true_is_true() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::IsNotTrue,
            vec![Leaf::new(expr::NULL_EXPR, SqlType::nullable(TypeKind::Boolean))],
            SqlType::new(TypeKind::Boolean),
        );
        let e = reg[&SqlOperator::IsNotTrue].implement(&translator, &call, NullAs::NotPossible).unwrap();
        assert_eq!(e, Expr::Not(Box::new(expr::false_expr())));
    }

    #[test]
    fn is_null_of_non_nullable_operand_is_false() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::IsNull,
            vec![Leaf::new(Expr::Field(None, "x".into()), SqlType::new(TypeKind::Int))],
            SqlType::new(TypeKind::Boolean),
        );
        let e = reg[&SqlOperator::IsNull].implement(&translator, &call, NullAs::NotPossible).unwrap();
        assert!(matches!(e, Expr::Equal(_, _)));
    }
}
