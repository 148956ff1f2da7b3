//! `RANK`/`DENSE_RANK` (§4.G): one implementor parameterized by `dense`,
//! per §9 "DENSE_RANK is RANK with one method overridden -> express as a
//! shared helper parameterized by `computeNewRank`".

use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregate::AggInfo;
use crate::expr::{BinOpKind, Expr, Value, VarName};
use crate::operators::Aggregation;
use crate::types::{SqlType, TypeKind};
use crate::window::{WinAggContext, WinAggImplementor};

#[derive(Debug)]
struct RankLike {
    dense: bool,
}

impl RankLike {
    /// The new accumulator value once a tie-break is detected: `DENSE_RANK`
    /// just increments; plain `RANK` jumps to the 0-based position.
    fn compute_new_rank(&self, state: &VarName, pos: Expr, start: Expr) -> Expr {
        if self.dense {
            Expr::BinOp(
                BinOpKind::Add,
                Box::new(Expr::var(state.clone(), SqlType::new(TypeKind::BigInt))),
                Box::new(Expr::Const(Value::Int(1), SqlType::new(TypeKind::BigInt))),
            )
        } else {
            Expr::BinOp(BinOpKind::Sub, Box::new(pos), Box::new(start))
        }
    }
}

impl WinAggImplementor for RankLike {
    fn state_types(&self, _info: &AggInfo) -> Vec<SqlType> {
        vec![SqlType::new(TypeKind::BigInt)]
    }

    fn reset(&self, _info: &AggInfo, state: &[VarName]) -> Expr {
        Expr::Assign(state[0].clone(), Box::new(Expr::Const(Value::Int(0), SqlType::new(TypeKind::BigInt))))
    }

    fn add(&self, ctx: &dyn WinAggContext, _info: &AggInfo, state: &[VarName], _args: &[Expr]) -> Expr {
        let pos = ctx.current_position();
        let start = ctx.start_index();
        let has_predecessor = Expr::BinOp(BinOpKind::Gt, Box::new(pos.clone()), Box::new(start.clone()));
        let prev = Expr::BinOp(
            BinOpKind::Sub,
            Box::new(pos.clone()),
            Box::new(Expr::Const(Value::Int(1), SqlType::new(TypeKind::BigInt))),
        );
        let differs = Expr::BinOp(
            BinOpKind::Lt,
            Box::new(ctx.compare_rows(prev, pos.clone())),
            Box::new(Expr::Const(Value::Int(0), SqlType::new(TypeKind::Int))),
        );
        let assign = Expr::Assign(state[0].clone(), Box::new(self.compute_new_rank(&state[0], pos, start)));
        let on_tie_break = Expr::IfThen(Box::new(differs), Box::new(assign), None);
        Expr::IfThen(Box::new(has_predecessor), Box::new(on_tie_break), None)
    }

    fn result(&self, _ctx: &dyn WinAggContext, _info: &AggInfo, state: &[VarName], _args: &[Expr]) -> Expr {
        Expr::BinOp(
            BinOpKind::Add,
            Box::new(Expr::var(state[0].clone(), SqlType::new(TypeKind::BigInt))),
            Box::new(Expr::Const(Value::Int(1), SqlType::new(TypeKind::BigInt))),
        )
    }
}

pub fn register(reg: &mut HashMap<Aggregation, Arc<dyn WinAggImplementor>>) {
    reg.insert(Aggregation::Rank, Arc::new(RankLike { dense: false }));
    reg.insert(Aggregation::DenseRank, Arc::new(RankLike { dense: true }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::CodeGenWinAggContext;

    #[test]
    fn result_is_one_based() {
        let rank = RankLike { dense: false };
        let info = AggInfo { agg: Aggregation::Rank, operand_types: vec![], return_type: SqlType::new(TypeKind::BigInt) };
        let ctx = CodeGenWinAggContext;
        let state: Vec<VarName> = vec!["acc".into()];
        let e = rank.result(&ctx, &info, &state, &[]);
        assert!(matches!(e, Expr::BinOp(BinOpKind::Add, _, _)));
    }

    #[test]
    fn dense_rank_increments_by_one_on_tie_break() {
        let rank = RankLike { dense: true };
        let state: Vec<VarName> = vec!["acc".into()];
        let new_rank = rank.compute_new_rank(
            &state[0],
            Expr::Const(Value::Int(3), SqlType::new(TypeKind::BigInt)),
            Expr::Const(Value::Int(0), SqlType::new(TypeKind::BigInt)),
        );
        assert!(matches!(new_rank, Expr::BinOp(BinOpKind::Add, _, _)));
    }
}
