//! `LEAD`/`LAG` (§4.G): stateless, offset from `currentPosition` by `±k`
//! (default 1), falling back to `default` when the destination row falls
//! outside the partition.

use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregate::AggInfo;
use crate::expr::{self, BinOpKind, Expr, UnaryOpKind, Value, VarName};
use crate::operators::Aggregation;
use crate::types::{SqlType, TypeKind};
use crate::window::{WinAggContext, WinAggImplementor};

#[derive(Debug)]
struct LeadLagAgg {
    lead: bool,
}

impl WinAggImplementor for LeadLagAgg {
    fn result(&self, ctx: &dyn WinAggContext, info: &AggInfo, _state: &[VarName], args: &[Expr]) -> Expr {
        let k = args.get(1).cloned().unwrap_or(Expr::Const(Value::Int(1), SqlType::new(TypeKind::BigInt)));
        let default = args.get(2).cloned().unwrap_or(expr::NULL_EXPR);
        let signed_k = if self.lead { k } else { Expr::UnaryOp(UnaryOpKind::Neg, Box::new(k)) };
        let dst_index = Expr::BinOp(BinOpKind::Add, Box::new(ctx.current_position()), Box::new(signed_k));
        let in_partition = ctx.row_in_partition(dst_index.clone());
        let value = ctx.translate_at(dst_index, &args[0], info.return_type);
        expr::condition(in_partition, value, default)
    }
}

pub fn register(reg: &mut HashMap<Aggregation, Arc<dyn WinAggImplementor>>) {
    reg.insert(Aggregation::Lead, Arc::new(LeadLagAgg { lead: true }));
    reg.insert(Aggregation::Lag, Arc::new(LeadLagAgg { lead: false }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::CodeGenWinAggContext;

    #[test]
    fn lag_negates_the_offset() {
        let agg = LeadLagAgg { lead: false };
        let info = AggInfo { agg: Aggregation::Lag, operand_types: vec![SqlType::new(TypeKind::Int)], return_type: SqlType::new(TypeKind::Int) };
        let args = vec![Expr::Field(None, "x".into())];
        let e = agg.result(&CodeGenWinAggContext, &info, &[], &args);
        assert!(matches!(e, Expr::Condition(_, _, _)));
    }

    #[test]
    fn explicit_default_is_used_when_out_of_partition() {
        let agg = LeadLagAgg { lead: true };
        let info = AggInfo { agg: Aggregation::Lead, operand_types: vec![SqlType::new(TypeKind::Int)], return_type: SqlType::new(TypeKind::Int) };
        let default = Expr::Const(Value::Int(-1), SqlType::new(TypeKind::Int));
        let args = vec![Expr::Field(None, "x".into()), Expr::Const(Value::Int(2), SqlType::new(TypeKind::BigInt)), default.clone()];
        let e = agg.result(&CodeGenWinAggContext, &info, &[], &args);
        match e {
            Expr::Condition(_, _, if_false) => assert_eq!(*if_false, default),
            other => panic!("expected Condition, got {other:?}"),
        }
    }
}
