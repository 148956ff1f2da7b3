//! `UnaryImplementor` (§4.C): lowers a one-operand call to `UnaryOp`.
//! Also registers the boolean operators `AND`/`OR`/`NOT`, since `NOT`'s
//! `NotNullImplementor` lives here and `AND`/`OR` are simple enough to
//! register alongside it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs, NullPolicy};
use crate::error::LowerResult;
use crate::expr::{Expr, UnaryOpKind};
use crate::operators::SqlOperator;
use crate::scalar::{wrap, CallImplementor, NotNullImplementor};
use crate::translator::Translator;

#[derive(Debug)]
pub struct UnaryOpNotNull {
    pub kind: UnaryOpKind,
}

impl NotNullImplementor for UnaryOpNotNull {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let operand = translator.translate(call.operands[0].as_ref(), null_as)?;
        Ok(Expr::UnaryOp(self.kind, Box::new(operand)))
    }
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    reg.insert(
        SqlOperator::UnaryMinus,
        wrap(Arc::new(UnaryOpNotNull { kind: UnaryOpKind::Neg }), NullPolicy::Strict, false),
    );
    reg.insert(
        SqlOperator::UnaryPlus,
        wrap(Arc::new(UnaryOpNotNull { kind: UnaryOpKind::Plus }), NullPolicy::Strict, false),
    );
    reg.insert(
        SqlOperator::BitNot,
        wrap(Arc::new(UnaryOpNotNull { kind: UnaryOpKind::BitNot }), NullPolicy::Strict, false),
    );
    reg.insert(
        SqlOperator::Not,
        wrap(Arc::new(UnaryOpNotNull { kind: UnaryOpKind::Not }), NullPolicy::Not, false),
    );
    // `AND`/`OR` are registered by `crate::scalar::build_registry` directly,
    // since `NullPolicy::Or`'s `explicit_or_3vl` flag comes from
    // `ImpTableConfig`, which isn't in scope here.
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{Leaf, LeafTranslator};
    use crate::types::{SqlType, TypeKind};

    #[test]
    fn unary_minus_is_strict() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::UnaryMinus,
            vec![Leaf::new(crate::expr::NULL_EXPR, SqlType::nullable(TypeKind::Int))],
            SqlType::nullable(TypeKind::Int),
        );
        let e = reg[&SqlOperator::UnaryMinus].implement(&translator, &call, NullAs::Null).unwrap();
        assert_eq!(e, crate::expr::NULL_EXPR);
    }
}
