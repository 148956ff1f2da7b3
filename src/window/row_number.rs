//! `ROW_NUMBER` (§4.G): stateless, `currentPosition - startIndex + 1`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregate::AggInfo;
use crate::expr::{BinOpKind, Expr, Value, VarName};
use crate::operators::Aggregation;
use crate::types::{SqlType, TypeKind};
use crate::window::{WinAggContext, WinAggImplementor};

#[derive(Debug)]
pub struct RowNumberAgg;

impl WinAggImplementor for RowNumberAgg {
    fn result(&self, ctx: &dyn WinAggContext, _info: &AggInfo, _state: &[VarName], _args: &[Expr]) -> Expr {
        let offset = Expr::BinOp(BinOpKind::Sub, Box::new(ctx.current_position()), Box::new(ctx.start_index()));
        Expr::BinOp(BinOpKind::Add, Box::new(offset), Box::new(Expr::Const(Value::Int(1), SqlType::new(TypeKind::BigInt))))
    }
}

pub fn register(reg: &mut HashMap<Aggregation, Arc<dyn WinAggImplementor>>) {
    reg.insert(Aggregation::RowNumber, Arc::new(RowNumberAgg));
}
