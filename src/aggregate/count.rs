//! `COUNT` (§4.D). `COUNT(*)` (no operands) counts every row; `COUNT(x)`
//! skips rows where `x` is null.

use crate::aggregate::{AggImplementor, AggInfo};
use crate::expr::{self, BinOpKind, Expr, Value, VarName};
use crate::types::{SqlType, TypeKind};

#[derive(Debug)]
pub struct CountAgg;

impl AggImplementor for CountAgg {
    fn state_types(&self, _info: &AggInfo) -> Vec<SqlType> {
        vec![SqlType::new(TypeKind::BigInt)]
    }

    fn reset(&self, _info: &AggInfo, state: &[VarName]) -> Expr {
        Expr::Assign(state[0].clone(), Box::new(Expr::Const(Value::Int(0), SqlType::new(TypeKind::BigInt))))
    }

    fn add(&self, info: &AggInfo, state: &[VarName], args: &[Expr]) -> Expr {
        let increment = Expr::Assign(
            state[0].clone(),
            Box::new(Expr::BinOp(
                BinOpKind::Add,
                Box::new(Expr::var(state[0].clone(), SqlType::new(TypeKind::BigInt))),
                Box::new(Expr::Const(Value::Int(1), SqlType::new(TypeKind::BigInt))),
            )),
        );
        if info.operand_types.is_empty() {
            return increment;
        }
        let null_test = expr::fold_or(
            args.iter().map(|a| Expr::Equal(Box::new(a.clone()), Box::new(expr::NULL_EXPR))).collect(),
        );
        Expr::IfThen(Box::new(Expr::Not(Box::new(null_test))), Box::new(increment), None)
    }

    fn result(&self, _info: &AggInfo, state: &[VarName]) -> Expr {
        Expr::var(state[0].clone(), SqlType::new(TypeKind::BigInt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::Aggregation;

    #[test]
    fn count_star_has_no_null_guard() {
        let agg = CountAgg;
        let info = AggInfo { agg: Aggregation::Count, operand_types: vec![], return_type: SqlType::new(TypeKind::BigInt) };
        let state: Vec<VarName> = vec!["acc".into()];
        let e = agg.add(&info, &state, &[]);
        assert!(matches!(e, Expr::Assign(_, _)));
    }

    #[test]
    fn count_of_column_guards_on_null() {
        let agg = CountAgg;
        let info = AggInfo {
            agg: Aggregation::Count,
            operand_types: vec![SqlType::nullable(TypeKind::Int)],
            return_type: SqlType::new(TypeKind::BigInt),
        };
        let state: Vec<VarName> = vec!["acc".into()];
        let args = vec![Expr::Field(None, "x".into())];
        let e = agg.add(&info, &state, &args);
        assert!(matches!(e, Expr::IfThen(_, _, None)));
    }
}
