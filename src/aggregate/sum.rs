//! `SUM`/`SUM0` (§4.D). Both accumulate the same way; they differ only in
//! what an empty group returns: `SUM` is `NULL`, `SUM0` is the additive
//! identity. `SUM` therefore carries an extra `seen` flag; `SUM0` doesn't
//! need one.

use std::sync::Arc;

use crate::aggregate::{seq, AggImplementor, AggInfo, NotNullAggImplementor, StrictAgg};
use crate::expr::{self, BinOpKind, Expr, Value, VarName};
use crate::types::{SqlType, TypeKind};

fn zero_of(ty: &SqlType) -> Expr {
    match ty.kind {
        TypeKind::Decimal => Expr::method(None, "zero", vec![]),
        TypeKind::Double | TypeKind::Real => Expr::Const(Value::Float(0.0), *ty),
        _ => Expr::Const(Value::Int(0), *ty),
    }
}

#[derive(Debug)]
struct SumNotNull {
    sum0: bool,
}

impl NotNullAggImplementor for SumNotNull {
    fn state_types(&self, info: &AggInfo) -> Vec<SqlType> {
        if self.sum0 {
            vec![info.return_type]
        } else {
            vec![SqlType::new(TypeKind::Boolean), info.return_type]
        }
    }

    fn reset(&self, info: &AggInfo, state: &[VarName]) -> Expr {
        if self.sum0 {
            Expr::Assign(state[0].clone(), Box::new(zero_of(&info.return_type)))
        } else {
            seq(vec![
                Expr::Assign(state[0].clone(), Box::new(Expr::Const(Value::Bool(false), SqlType::new(TypeKind::Boolean)))),
                Expr::Assign(state[1].clone(), Box::new(zero_of(&info.return_type))),
            ])
        }
    }

    fn add_not_null(&self, info: &AggInfo, state: &[VarName], args: &[Expr]) -> Expr {
        let value_var = if self.sum0 { &state[0] } else { &state[1] };
        let arg = Expr::Cast(info.return_type, Box::new(args[0].clone()));
        let accumulate = if info.return_type.kind == TypeKind::Decimal {
            Expr::method(Some(Expr::var(value_var.clone(), info.return_type)), "add", vec![arg])
        } else {
            Expr::BinOp(BinOpKind::Add, Box::new(Expr::var(value_var.clone(), info.return_type)), Box::new(arg))
        };
        let update = Expr::Assign(value_var.clone(), Box::new(accumulate));
        if self.sum0 {
            update
        } else {
            seq(vec![Expr::Assign(state[0].clone(), Box::new(expr::true_expr())), update])
        }
    }

    fn result(&self, info: &AggInfo, state: &[VarName]) -> Expr {
        if self.sum0 {
            Expr::var(state[0].clone(), info.return_type)
        } else {
            expr::condition(
                Expr::var(state[0].clone(), SqlType::new(TypeKind::Boolean)),
                Expr::var(state[1].clone(), info.return_type),
                expr::NULL_EXPR,
            )
        }
    }
}

pub fn sum_agg(sum0: bool) -> Arc<dyn AggImplementor> {
    Arc::new(StrictAgg(Arc::new(SumNotNull { sum0 })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::Aggregation;

    #[test]
    fn sum0_result_is_never_wrapped_in_a_null_guard() {
        let agg = sum_agg(true);
        let info =
            AggInfo { agg: Aggregation::Sum0, operand_types: vec![SqlType::new(TypeKind::Int)], return_type: SqlType::new(TypeKind::Int) };
        let state: Vec<VarName> = vec!["acc".into()];
        let e = agg.result(&info, &state);
        assert!(matches!(e, Expr::Param(_, _)));
    }

    #[test]
    fn sum_result_is_null_when_never_seen() {
        let agg = sum_agg(false);
        let info = AggInfo {
            agg: Aggregation::Sum,
            operand_types: vec![SqlType::new(TypeKind::Int)],
            return_type: SqlType::new(TypeKind::Int),
        };
        let state: Vec<VarName> = vec!["seen".into(), "acc".into()];
        let e = agg.result(&info, &state);
        assert!(matches!(e, Expr::Condition(_, _, _)));
    }

    #[test]
    fn add_guards_against_null_argument() {
        let agg = sum_agg(false);
        let info = AggInfo {
            agg: Aggregation::Sum,
            operand_types: vec![SqlType::nullable(TypeKind::Int)],
            return_type: SqlType::new(TypeKind::Int),
        };
        let state: Vec<VarName> = vec!["seen".into(), "acc".into()];
        let args = vec![Expr::Field(None, "x".into())];
        let e = agg.add(&info, &state, &args);
        assert!(matches!(e, Expr::IfThen(_, _, None)));
    }
}
