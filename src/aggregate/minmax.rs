//! `MIN`/`MAX` (§4.D): one implementor parameterized by direction, per §9
//! "composition, not inheritance, across families".

use std::sync::Arc;

use crate::aggregate::{AggImplementor, AggInfo, NotNullAggImplementor, StrictAgg};
use crate::expr::{self, BinOpKind, Expr, Value, VarName};
use crate::types::{SqlType, TypeKind};

/// Reset value: for primitive numerics, the type's saturating bound (so the
/// first `add` always wins the comparison); for everything else, `NULL`
/// (the comparison method handles a null accumulator as "no value yet").
fn identity_of(ty: &SqlType, max: bool) -> Expr {
    if !ty.kind.is_numeric() {
        return expr::NULL_EXPR;
    }
    let bound = match (max, ty.kind) {
        (true, TypeKind::TinyInt) => i64::from(i8::MIN),
        (true, TypeKind::SmallInt) => i64::from(i16::MIN),
        (true, TypeKind::Int) => i64::from(i32::MIN),
        (true, _) => i64::MIN,
        (false, TypeKind::TinyInt) => i64::from(i8::MAX),
        (false, TypeKind::SmallInt) => i64::from(i16::MAX),
        (false, TypeKind::Int) => i64::from(i32::MAX),
        (false, _) => i64::MAX,
    };
    Expr::Const(Value::Int(bound), *ty)
}

#[derive(Debug)]
struct MinMaxNotNull {
    max: bool,
}

impl NotNullAggImplementor for MinMaxNotNull {
    fn state_types(&self, info: &AggInfo) -> Vec<SqlType> {
        vec![info.return_type]
    }

    fn reset(&self, info: &AggInfo, state: &[VarName]) -> Expr {
        Expr::Assign(state[0].clone(), Box::new(identity_of(&info.return_type, self.max)))
    }

    fn add_not_null(&self, info: &AggInfo, state: &[VarName], args: &[Expr]) -> Expr {
        let acc = Expr::var(state[0].clone(), info.return_type);
        let arg = args[0].clone();
        let cmp = if self.max { BinOpKind::Gt } else { BinOpKind::Lt };
        let better = Expr::BinOp(cmp, Box::new(arg.clone()), Box::new(acc.clone()));
        let picked = if info.return_type.kind.is_numeric() {
            expr::condition(better, arg, acc)
        } else {
            // Reference types: a `NULL` accumulator always loses the comparison.
            expr::condition(Expr::Equal(Box::new(acc.clone()), Box::new(expr::NULL_EXPR)), arg.clone(), expr::condition(better, arg, acc))
        };
        Expr::Assign(state[0].clone(), Box::new(picked))
    }

    fn result(&self, info: &AggInfo, state: &[VarName]) -> Expr {
        Expr::var(state[0].clone(), info.return_type)
    }
}

pub fn minmax_agg(max: bool) -> Arc<dyn AggImplementor> {
    Arc::new(StrictAgg(Arc::new(MinMaxNotNull { max })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::Aggregation;

    #[test]
    fn max_reset_uses_the_minimum_bound() {
        let agg = minmax_agg(true);
        let info = AggInfo { agg: Aggregation::Max, operand_types: vec![SqlType::new(TypeKind::Int)], return_type: SqlType::new(TypeKind::Int) };
        let state: Vec<VarName> = vec!["acc".into()];
        let e = agg.reset(&info, &state);
        match e {
            Expr::Assign(_, init) => assert_eq!(*init, Expr::Const(Value::Int(i64::from(i32::MIN)), SqlType::new(TypeKind::Int))),
            other => panic!("expected Assign, got {other:?}"),
        }
    }

    #[test]
    fn min_add_picks_the_lesser_value() {
        let agg = minmax_agg(false);
        let info = AggInfo {
            agg: Aggregation::Min,
            operand_types: vec![SqlType::nullable(TypeKind::Int)],
            return_type: SqlType::new(TypeKind::Int),
        };
        let state: Vec<VarName> = vec!["acc".into()];
        let args = vec![Expr::Field(None, "x".into())];
        let e = agg.add(&info, &state, &args);
        assert!(matches!(e, Expr::IfThen(_, _, None)));
    }
}
