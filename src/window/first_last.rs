//! `FIRST_VALUE`/`LAST_VALUE` (§4.G): stateless, evaluate the argument at
//! the frame's start or end row, or `NULL` for an empty frame. Caches
//! across rows when the frame shape doesn't change.

use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregate::AggInfo;
use crate::expr::{self, BinOpKind, Expr, Value, VarName};
use crate::operators::Aggregation;
use crate::types::{SqlType, TypeKind};
use crate::window::{WinAggContext, WinAggImplementor};

#[derive(Clone, Copy, Debug)]
enum Seek {
    Start,
    End,
}

#[derive(Debug)]
struct FirstLastAgg {
    seek: Seek,
}

impl WinAggImplementor for FirstLastAgg {
    fn result(&self, ctx: &dyn WinAggContext, info: &AggInfo, _state: &[VarName], args: &[Expr]) -> Expr {
        let index = match self.seek {
            Seek::Start => ctx.start_index(),
            Seek::End => ctx.end_index(),
        };
        let has_rows =
            Expr::BinOp(BinOpKind::Ge, Box::new(ctx.frame_row_count()), Box::new(Expr::Const(Value::Int(1), SqlType::new(TypeKind::BigInt))));
        let value = ctx.translate_at(index, &args[0], info.return_type);
        expr::condition(has_rows, value, expr::NULL_EXPR)
    }

    fn needs_cache_when_frame_intact(&self) -> bool {
        true
    }
}

pub fn register(reg: &mut HashMap<Aggregation, Arc<dyn WinAggImplementor>>) {
    reg.insert(Aggregation::FirstValue, Arc::new(FirstLastAgg { seek: Seek::Start }));
    reg.insert(Aggregation::LastValue, Arc::new(FirstLastAgg { seek: Seek::End }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::CodeGenWinAggContext;

    #[test]
    fn empty_frame_yields_null() {
        let agg = FirstLastAgg { seek: Seek::Start };
        let info = AggInfo { agg: Aggregation::FirstValue, operand_types: vec![SqlType::new(TypeKind::Int)], return_type: SqlType::new(TypeKind::Int) };
        let args = vec![Expr::Field(None, "x".into())];
        let e = agg.result(&CodeGenWinAggContext, &info, &[], &args);
        assert!(matches!(e, Expr::Condition(_, _, _)));
    }
}
