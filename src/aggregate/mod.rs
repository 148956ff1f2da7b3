//! Component D/F: the aggregate registry and the `AggImplementor` capability
//! trait (§4.D), driven by the execution engine through `reset`/`add`/
//! `result` rather than looked up per-call like the scalar registry.

pub mod count;
pub mod minmax;
pub mod single_value;
pub mod sum;
pub mod udf;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ImpError;
use crate::expr::{Expr, VarName};
use crate::operators::Aggregation;
use crate::types::SqlType;

/// Static shape of one aggregate call: the operator plus the types involved.
/// Threaded through every `AggImplementor` hook so a single implementor
/// instance (e.g. `MinMaxAgg`) can serve both MIN and MAX.
#[derive(Clone, Debug)]
pub struct AggInfo {
    pub agg: Aggregation,
    pub operand_types: Vec<SqlType>,
    pub return_type: SqlType,
}

/// `reset`/`add`/`result` per §4.D. `state` names the accumulator slots this
/// implementor declared via `state_types`, already bound to variables the
/// execution engine allocated; hooks only ever read/write them by name.
pub trait AggImplementor: fmt::Debug + Send + Sync {
    fn state_types(&self, info: &AggInfo) -> Vec<SqlType>;
    fn reset(&self, info: &AggInfo, state: &[VarName]) -> Expr;
    fn add(&self, info: &AggInfo, state: &[VarName], args: &[Expr]) -> Expr;
    fn result(&self, info: &AggInfo, state: &[VarName]) -> Expr;
}

/// The non-null half of a Strict aggregate (§4.D "A Strict variant
/// automatically skips null arguments and leaves accumulator unchanged on
/// null"), analogous to [`crate::scalar::NotNullImplementor`] on the scalar
/// side.
pub trait NotNullAggImplementor: fmt::Debug + Send + Sync {
    fn state_types(&self, info: &AggInfo) -> Vec<SqlType>;
    fn reset(&self, info: &AggInfo, state: &[VarName]) -> Expr;
    fn add_not_null(&self, info: &AggInfo, state: &[VarName], args: &[Expr]) -> Expr;
    fn result(&self, info: &AggInfo, state: &[VarName]) -> Expr;
}

#[derive(Debug)]
pub struct StrictAgg(pub Arc<dyn NotNullAggImplementor>);

impl AggImplementor for StrictAgg {
    fn state_types(&self, info: &AggInfo) -> Vec<SqlType> {
        self.0.state_types(info)
    }

    fn reset(&self, info: &AggInfo, state: &[VarName]) -> Expr {
        self.0.reset(info, state)
    }

    fn add(&self, info: &AggInfo, state: &[VarName], args: &[Expr]) -> Expr {
        if args.is_empty() {
            return self.0.add_not_null(info, state, args);
        }
        let null_test = crate::expr::fold_or(
            args.iter().map(|a| Expr::Equal(Box::new(a.clone()), Box::new(crate::expr::NULL_EXPR))).collect(),
        );
        let inner = self.0.add_not_null(info, state, args);
        Expr::IfThen(Box::new(Expr::Not(Box::new(null_test))), Box::new(inner), None)
    }

    fn result(&self, info: &AggInfo, state: &[VarName]) -> Expr {
        self.0.result(info, state)
    }
}

/// Sequences effectful `Expr`s (assignments) into one `Block`, collapsing to
/// a single statement when there is only one.
pub(crate) fn seq(mut exprs: Vec<Expr>) -> Expr {
    match exprs.len() {
        0 => crate::expr::NULL_EXPR,
        1 => exprs.pop().unwrap(),
        _ => {
            let last = exprs.pop().unwrap();
            Expr::Block(exprs, Box::new(last))
        }
    }
}

/// Populates the non-UDF aggregate registry, per §4.D. User-defined
/// aggregates are resolved separately through [`udf::build_udf_registry`]
/// and the `ImplementableAggFunction` capability (§4.E).
pub fn build_registry() -> HashMap<Aggregation, Arc<dyn AggImplementor>> {
    let mut reg: HashMap<Aggregation, Arc<dyn AggImplementor>> = HashMap::new();
    reg.insert(Aggregation::Count, Arc::new(count::CountAgg));
    reg.insert(Aggregation::Sum, sum::sum_agg(false));
    reg.insert(Aggregation::Sum0, sum::sum_agg(true));
    reg.insert(Aggregation::Min, minmax::minmax_agg(false));
    reg.insert(Aggregation::Max, minmax::minmax_agg(true));
    reg.insert(Aggregation::SingleValue, Arc::new(single_value::SingleValueAgg));
    tracing::debug!(aggregates = reg.len(), "aggregate registry built");
    reg
}

/// Surfaces `ConstructionFailure` (§9 "Reflective aggregate construction")
/// for a user-defined aggregate whose factory rejects the call shape, rather
/// than modeling it via reflection the way the source does.
pub fn construction_failure(name: impl Into<String>, reason: impl Into<String>) -> ImpError {
    ImpError::ConstructionFailure(name.into(), reason.into())
}
