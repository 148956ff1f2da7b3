//! User-defined aggregates (§4.D "UserDefined (reflective)", §9 "Reflective
//! aggregate construction"). The source instantiates an aggregate
//! implementor by zero-arg-constructor reflection and turns a missing
//! constructor into a caught exception; here that's a registry of factory
//! closures keyed by aggregate name, and a missing/failing factory just
//! returns `ConstructionFailure` as a plain `Err`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregate::{construction_failure, AggImplementor, AggInfo};
use crate::error::ImpError;

pub type AggFactory = Arc<dyn Fn(&AggInfo) -> Result<Arc<dyn AggImplementor>, ImpError> + Send + Sync>;

/// Registry of user-defined aggregate factories, populated by the embedding
/// planner (outside this crate's scope, §1) and consulted only through
/// `get(agg, ...)`'s UDF fallback (§4.E).
#[derive(Default, Clone)]
pub struct UdfAggRegistry {
    factories: HashMap<String, AggFactory>,
}

impl UdfAggRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, factory: AggFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn build(&self, name: &str, info: &AggInfo) -> Result<Arc<dyn AggImplementor>, ImpError> {
        match self.factories.get(name) {
            Some(factory) => factory(info),
            None => Err(construction_failure(name, "no factory registered for user-defined aggregate")),
        }
    }
}
