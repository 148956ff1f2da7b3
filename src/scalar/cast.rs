//! `CastOptimizedImplementor`/`CastImplementor` (§4.C): `CAST(operand AS T)`.
//!
//! The optimized outer layer elides casts that are a complete no-op, type
//! and nullability alike; anything that narrows or widens nullability still
//! needs the cast node, so it falls through to the ordinary
//! `NullPolicy::Strict`-wrapped cast.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs, NullPolicy};
use crate::error::LowerResult;
use crate::expr::Expr;
use crate::operators::SqlOperator;
use crate::scalar::{wrap, CallImplementor, NotNullImplementor};
use crate::translator::Translator;

#[derive(Debug)]
struct CastNotNull;

impl NotNullImplementor for CastNotNull {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let operand = translator.translate(call.operands[0].as_ref(), null_as)?;
        let source = call.operand_types()[0];
        Ok(translator.translate_cast(&source, &call.result_type, operand))
    }
}

#[derive(Debug)]
pub struct CastOptimizedImplementor {
    inner: Arc<dyn CallImplementor>,
}

impl CallImplementor for CastOptimizedImplementor {
    fn implement(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let source = call.operand_types()[0];
        if source == call.result_type {
            return translator.translate(call.operands[0].as_ref(), null_as);
        }
        self.inner.implement(translator, call, null_as)
    }
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    let inner = wrap(Arc::new(CastNotNull), NullPolicy::Strict, false);
    reg.insert(SqlOperator::Cast, Arc::new(CastOptimizedImplementor { inner }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{Leaf, LeafTranslator};
    use crate::types::{SqlType, TypeKind};

    #[test]
    fn cast_to_same_kind_elides_cast() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::Cast,
            vec![Leaf::new(Expr::Field(None, "x".into()), SqlType::new(TypeKind::Int))],
            SqlType::nullable(TypeKind::Int),
        );
        let e = reg[&SqlOperator::Cast].implement(&translator, &call, NullAs::NotPossible).unwrap();
        assert_eq!(e, Expr::Field(None, "x".into()));
    }

    #[test]
    fn cast_narrowing_nullability_is_not_elided() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::Cast,
            vec![Leaf::new(Expr::Field(None, "x".into()), SqlType::nullable(TypeKind::Int))],
            SqlType::new(TypeKind::Int),
        );
        let e = reg[&SqlOperator::Cast].implement(&translator, &call, NullAs::NotPossible).unwrap();
        assert!(matches!(e, Expr::Cast(ty, _) if ty.kind == TypeKind::Int && !ty.nullable));
    }

    #[test]
    fn cast_across_kinds_emits_cast_node() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::Cast,
            vec![Leaf::new(Expr::Field(None, "x".into()), SqlType::new(TypeKind::Int))],
            SqlType::new(TypeKind::Double),
        );
        let e = reg[&SqlOperator::Cast].implement(&translator, &call, NullAs::NotPossible).unwrap();
        assert!(matches!(e, Expr::Cast(ty, _) if ty.kind == TypeKind::Double));
    }
}
