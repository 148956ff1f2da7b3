//! Component D/G: window-aggregate registry, `WinAggContext` (the
//! frame/partition capability consumed by implementors), and
//! `WinAggImplementor` (§4.G).

pub mod count_win;
pub mod first_last;
pub mod lead_lag;
pub mod ntile;
pub mod rank;
pub mod row_number;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::aggregate::AggInfo;
use crate::expr::{Expr, VarName};
use crate::operators::Aggregation;
use crate::types::SqlType;

/// Frame/partition positional access (§3 `WinAggContext`). Each accessor
/// returns an `Expr` that calls into the execution engine's per-row context
/// rather than a live value, since this crate only ever generates code.
pub trait WinAggContext: fmt::Debug {
    fn current_position(&self) -> Expr;
    fn start_index(&self) -> Expr;
    fn end_index(&self) -> Expr;
    fn frame_row_count(&self) -> Expr;
    fn partition_row_count(&self) -> Expr;
    fn compare_rows(&self, i: Expr, j: Expr) -> Expr;
    fn row_in_partition(&self, index: Expr) -> Expr;
    /// Lowers `arg`, evaluated as though at the row located at `index`.
    fn translate_at(&self, index: Expr, arg: &Expr, ty: SqlType) -> Expr;
}

/// The generic context used by every implementor below: every accessor is a
/// direct call into the runtime helper of the same name, the window-side
/// analogue of [`crate::translator::LeafTranslator`].
#[derive(Debug, Default)]
pub struct CodeGenWinAggContext;

impl WinAggContext for CodeGenWinAggContext {
    fn current_position(&self) -> Expr {
        Expr::method(None, "currentPosition", vec![])
    }

    fn start_index(&self) -> Expr {
        Expr::method(None, "startIndex", vec![])
    }

    fn end_index(&self) -> Expr {
        Expr::method(None, "endIndex", vec![])
    }

    fn frame_row_count(&self) -> Expr {
        Expr::method(None, "frameRowCount", vec![])
    }

    fn partition_row_count(&self) -> Expr {
        Expr::method(None, "partitionRowCount", vec![])
    }

    fn compare_rows(&self, i: Expr, j: Expr) -> Expr {
        Expr::method(None, "compareRows", vec![i, j])
    }

    fn row_in_partition(&self, index: Expr) -> Expr {
        Expr::method(None, "rowInPartition", vec![index])
    }

    fn translate_at(&self, index: Expr, arg: &Expr, ty: SqlType) -> Expr {
        Expr::Cast(ty, Box::new(Expr::method(None, "rowTranslator", vec![index, arg.clone()])))
    }
}

/// `reset`/`add`/`result` plus `needCacheWhenFrameIntact` (§4.G). Most
/// window aggregates are stateless and need only override `result`; RANK
/// and DENSE_RANK additionally carry state and override `add`.
pub trait WinAggImplementor: fmt::Debug + Send + Sync {
    fn state_types(&self, _info: &AggInfo) -> Vec<SqlType> {
        vec![]
    }

    fn reset(&self, _info: &AggInfo, _state: &[VarName]) -> Expr {
        crate::expr::NULL_EXPR
    }

    fn add(&self, _ctx: &dyn WinAggContext, _info: &AggInfo, _state: &[VarName], _args: &[Expr]) -> Expr {
        crate::expr::NULL_EXPR
    }

    fn result(&self, ctx: &dyn WinAggContext, info: &AggInfo, state: &[VarName], args: &[Expr]) -> Expr;

    fn needs_cache_when_frame_intact(&self) -> bool {
        false
    }
}

/// Populates the window-specialized aggregate registry, per §4.G. Consulted
/// by [`crate::registry::ImpTable::get_agg`] only when `for_window` is set
/// and a specialized entry exists; otherwise the plain aggregate registry
/// (§4.D) is used (regular aggregates are always usable in window context).
pub fn build_registry() -> HashMap<Aggregation, Arc<dyn WinAggImplementor>> {
    let mut reg: HashMap<Aggregation, Arc<dyn WinAggImplementor>> = HashMap::new();
    rank::register(&mut reg);
    row_number::register(&mut reg);
    first_last::register(&mut reg);
    lead_lag::register(&mut reg);
    ntile::register(&mut reg);
    count_win::register(&mut reg);
    tracing::debug!(window_aggregates = reg.len(), "window aggregate registry built");
    reg
}
