//! `SINGLE_VALUE` (§4.D, §8 end-to-end scenario): asserts its group
//! contains at most one row. A second `add` embeds `Expr::Throw` carrying
//! [`ImpError::SingleValueMoreThanOne`]'s message — a *runtime* error, never
//! surfaced from code generation itself (§7, §10.2).

use crate::aggregate::{seq, AggImplementor, AggInfo};
use crate::error::ImpError;
use crate::expr::{self, Expr, Value, VarName};
use crate::types::{SqlType, TypeKind};

#[derive(Debug)]
pub struct SingleValueAgg;

impl AggImplementor for SingleValueAgg {
    fn state_types(&self, info: &AggInfo) -> Vec<SqlType> {
        vec![SqlType::new(TypeKind::Boolean), info.return_type]
    }

    fn reset(&self, info: &AggInfo, state: &[VarName]) -> Expr {
        seq(vec![
            Expr::Assign(state[0].clone(), Box::new(Expr::Const(Value::Bool(false), SqlType::new(TypeKind::Boolean)))),
            Expr::Assign(state[1].clone(), Box::new(expr::NULL_EXPR.with_type(info.return_type))),
        ])
    }

    fn add(&self, _info: &AggInfo, state: &[VarName], args: &[Expr]) -> Expr {
        let seen = Expr::var(state[0].clone(), SqlType::new(TypeKind::Boolean));
        let throw = Expr::Throw(ImpError::SingleValueMoreThanOne.to_string().into());
        let record = seq(vec![
            Expr::Assign(state[0].clone(), Box::new(expr::true_expr())),
            Expr::Assign(state[1].clone(), Box::new(args[0].clone())),
        ]);
        Expr::IfThen(Box::new(seen), Box::new(throw), Some(Box::new(record)))
    }

    fn result(&self, info: &AggInfo, state: &[VarName]) -> Expr {
        Expr::var(state[1].clone(), info.return_type)
    }
}

/// Small helper so `reset` can build a correctly-typed `NULL` default
/// without every aggregate re-deriving `Expr::Const(Value::Null, ty)`.
trait WithType {
    fn with_type(self, ty: SqlType) -> Expr;
}

impl WithType for Expr {
    fn with_type(self, ty: SqlType) -> Expr {
        match self {
            Expr::Const(Value::Null, _) => Expr::Const(Value::Null, ty),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::Aggregation;

    #[test]
    fn second_add_throws() {
        let agg = SingleValueAgg;
        let info = AggInfo {
            agg: Aggregation::SingleValue,
            operand_types: vec![SqlType::new(TypeKind::Int)],
            return_type: SqlType::new(TypeKind::Int),
        };
        let state: Vec<VarName> = vec!["seen".into(), "value".into()];
        let args = vec![Expr::Field(None, "x".into())];
        let e = agg.add(&info, &state, &args);
        match e {
            Expr::IfThen(_, then_branch, Some(_)) => assert!(matches!(*then_branch, Expr::Throw(_))),
            other => panic!("expected guarded IfThen, got {other:?}"),
        }
    }
}
