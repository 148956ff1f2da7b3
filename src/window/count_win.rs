//! `COUNT` in window context (§4.G "COUNT-win"): when no operand is
//! nullable, the frame's row count is already the answer and no state is
//! needed; otherwise falls back to regular null-skipping COUNT behavior
//! over the frame.

use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregate::AggInfo;
use crate::expr::{self, BinOpKind, Expr, Value, VarName};
use crate::operators::Aggregation;
use crate::types::{SqlType, TypeKind};
use crate::window::{WinAggContext, WinAggImplementor};

#[derive(Debug)]
pub struct CountWinAgg;

impl WinAggImplementor for CountWinAgg {
    fn state_types(&self, info: &AggInfo) -> Vec<SqlType> {
        if info.operand_types.iter().any(|t| t.nullable) {
            vec![SqlType::new(TypeKind::BigInt)]
        } else {
            vec![]
        }
    }

    fn reset(&self, _info: &AggInfo, state: &[VarName]) -> Expr {
        match state.first() {
            Some(slot) => Expr::Assign(slot.clone(), Box::new(Expr::Const(Value::Int(0), SqlType::new(TypeKind::BigInt)))),
            None => crate::expr::NULL_EXPR,
        }
    }

    fn add(&self, _ctx: &dyn WinAggContext, _info: &AggInfo, state: &[VarName], args: &[Expr]) -> Expr {
        let Some(slot) = state.first() else {
            return crate::expr::NULL_EXPR;
        };
        let increment = Expr::Assign(
            slot.clone(),
            Box::new(Expr::BinOp(
                BinOpKind::Add,
                Box::new(Expr::var(slot.clone(), SqlType::new(TypeKind::BigInt))),
                Box::new(Expr::Const(Value::Int(1), SqlType::new(TypeKind::BigInt))),
            )),
        );
        let null_test =
            expr::fold_or(args.iter().map(|a| Expr::Equal(Box::new(a.clone()), Box::new(expr::NULL_EXPR))).collect());
        Expr::IfThen(Box::new(Expr::Not(Box::new(null_test))), Box::new(increment), None)
    }

    fn result(&self, ctx: &dyn WinAggContext, _info: &AggInfo, state: &[VarName], _args: &[Expr]) -> Expr {
        match state.first() {
            Some(slot) => Expr::var(slot.clone(), SqlType::new(TypeKind::BigInt)),
            None => ctx.frame_row_count(),
        }
    }
}

pub fn register(reg: &mut HashMap<Aggregation, Arc<dyn WinAggImplementor>>) {
    reg.insert(Aggregation::Count, Arc::new(CountWinAgg));
}
