//! `NTILE(n)` (§4.G): stateless, `1 + (n * (position - startIndex)) / partitionRowCount`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregate::AggInfo;
use crate::expr::{BinOpKind, Expr, Value, VarName};
use crate::operators::Aggregation;
use crate::types::{SqlType, TypeKind};
use crate::window::{WinAggContext, WinAggImplementor};

#[derive(Debug)]
pub struct NtileAgg;

impl WinAggImplementor for NtileAgg {
    fn result(&self, ctx: &dyn WinAggContext, _info: &AggInfo, _state: &[VarName], args: &[Expr]) -> Expr {
        let n = args[0].clone();
        let offset = Expr::BinOp(BinOpKind::Sub, Box::new(ctx.current_position()), Box::new(ctx.start_index()));
        let numerator = Expr::BinOp(BinOpKind::Mul, Box::new(n), Box::new(offset));
        let divided = Expr::BinOp(BinOpKind::Div, Box::new(numerator), Box::new(ctx.partition_row_count()));
        Expr::BinOp(BinOpKind::Add, Box::new(Expr::Const(Value::Int(1), SqlType::new(TypeKind::BigInt))), Box::new(divided))
    }
}

pub fn register(reg: &mut HashMap<Aggregation, Arc<dyn WinAggImplementor>>) {
    reg.insert(Aggregation::Ntile, Arc::new(NtileAgg));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::CodeGenWinAggContext;

    #[test]
    fn emits_one_based_bucket_expression() {
        let agg = NtileAgg;
        let info = AggInfo { agg: Aggregation::Ntile, operand_types: vec![SqlType::new(TypeKind::Int)], return_type: SqlType::new(TypeKind::Int) };
        let args = vec![Expr::Const(Value::Int(4), SqlType::new(TypeKind::Int))];
        let e = agg.result(&CodeGenWinAggContext, &info, &[], &args);
        assert!(matches!(e, Expr::BinOp(BinOpKind::Add, _, _)));
    }
}
