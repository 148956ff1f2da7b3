//! Component D's dispatch surface and the top-level [`ImpTable`] (§4.E, §6
//! "Registry surface", §9 "The registry is global state").

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::aggregate::{udf::UdfAggRegistry, AggImplementor};
use crate::config::ImpTableConfig;
use crate::error::ImpError;
use crate::operators::{Aggregation, SqlOperator};
use crate::scalar::CallImplementor;
use crate::window::WinAggImplementor;

/// What [`ImpTable::get_agg`] hands back: the window-specialized
/// implementor when one exists and was asked for, otherwise the plain
/// aggregate implementor. Kept as an enum rather than a shared supertrait
/// since `AggImplementor` and `WinAggImplementor` have genuinely different
/// hook signatures (§4.D vs §4.G).
#[derive(Clone, Debug)]
pub enum AggEntry {
    Agg(Arc<dyn AggImplementor>),
    Win(Arc<dyn WinAggImplementor>),
}

/// Both registries (§3 "Registries"), built once and immutable thereafter.
/// Construct a fresh instance for tests or a custom embedding (§9 "For
/// testability, allow construction of a separate ImpTable instance with a
/// custom registry"); use [`global`] for the process-wide shared one.
pub struct ImpTable {
    config: ImpTableConfig,
    scalar: std::collections::HashMap<SqlOperator, Arc<dyn CallImplementor>>,
    aggregate: std::collections::HashMap<Aggregation, Arc<dyn AggImplementor>>,
    window: std::collections::HashMap<Aggregation, Arc<dyn WinAggImplementor>>,
    udf_aggregates: UdfAggRegistry,
}

impl ImpTable {
    pub fn new(config: ImpTableConfig) -> Self {
        let scalar = crate::scalar::build_registry(&config);
        let aggregate = crate::aggregate::build_registry();
        let window = crate::window::build_registry();
        ImpTable { config, scalar, aggregate, window, udf_aggregates: UdfAggRegistry::new() }
    }

    pub fn config(&self) -> &ImpTableConfig {
        &self.config
    }

    /// `get(op) -> CallImplementor` (§4.E). A lookup miss is `None` per
    /// §7.1's `LookupMiss` convention, not an error — `SqlOperator::
    /// UserDefinedFunction` never has an entry here; use [`Self::get_udf`]
    /// for it instead.
    pub fn get(&self, op: SqlOperator) -> Option<Arc<dyn CallImplementor>> {
        tracing::trace!(operator = %op, "scalar dispatch");
        self.scalar.get(&op).cloned()
    }

    /// `SqlOperator::UserDefinedFunction` requires the function itself to
    /// supply its own implementor (§4.E); a missing one is the fatal
    /// `InvalidUdf`, not a lookup miss.
    pub fn get_udf(&self, name: &str, implementor: Option<Arc<dyn CallImplementor>>) -> Result<Arc<dyn CallImplementor>, ImpError> {
        implementor.ok_or_else(|| ImpError::InvalidUdf(name.to_string()))
    }

    /// `get(agg, forWindow) -> AggImplementor?` (§4.E). Prefers the
    /// window-specialized variant when `for_window` and one is registered;
    /// otherwise falls back to the plain aggregate (usable in window
    /// context too). `Aggregation::UserDefined` is never found here; route
    /// it through [`Self::udf_aggregates`] instead.
    pub fn get_agg(&self, agg: &Aggregation, for_window: bool) -> Option<AggEntry> {
        tracing::trace!(aggregate = %agg, for_window, "aggregate dispatch");
        if for_window {
            if let Some(w) = self.window.get(agg) {
                return Some(AggEntry::Win(w.clone()));
            }
        }
        self.aggregate.get(agg).cloned().map(AggEntry::Agg)
    }

    pub fn udf_aggregates(&mut self) -> &mut UdfAggRegistry {
        &mut self.udf_aggregates
    }
}

impl Default for ImpTable {
    fn default() -> Self {
        ImpTable::new(ImpTableConfig::default())
    }
}

static GLOBAL: OnceCell<ImpTable> = OnceCell::new();

/// The process-wide immutable instance (§9 "initialize exactly once at
/// module load; expose as an immutable snapshot"), built from
/// `ImpTableConfig::default()` on first access.
pub fn global() -> &'static ImpTable {
    GLOBAL.get_or_init(ImpTable::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_is_registered() {
        let table = ImpTable::default();
        assert!(table.get(SqlOperator::Plus).is_some());
    }

    #[test]
    fn udf_operator_is_not_in_the_scalar_registry() {
        let table = ImpTable::default();
        assert!(table.get(SqlOperator::UserDefinedFunction).is_none());
        assert!(table.get_udf("my_fn", None).is_err());
    }

    #[test]
    fn count_prefers_window_variant_when_asked() {
        let table = ImpTable::default();
        assert!(matches!(table.get_agg(&Aggregation::Count, true), Some(AggEntry::Win(_))));
        assert!(matches!(table.get_agg(&Aggregation::Count, false), Some(AggEntry::Agg(_))));
    }

    #[test]
    fn global_is_stable_across_calls() {
        let a = global() as *const ImpTable;
        let b = global() as *const ImpTable;
        assert_eq!(a, b);
    }
}
