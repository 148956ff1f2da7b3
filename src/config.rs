//! Ambient configuration (SPEC_FULL.md §10.3).
//!
//! Not a file- or env-driven configuration layer — per §6 there is none —
//! just the two implementation-defined knobs the spec leaves to the
//! embedder, threaded through a plain struct the way a planner context
//! struct would be.

use std::env;

/// Config passed to [`crate::ImpTable::new`].
#[derive(Clone, Debug)]
pub struct ImpTableConfig {
    /// Value returned by `SYSTEM_USER` (§4.C `SystemFunctionImplementor`).
    /// Defaults to the `USER`/`USERNAME` environment variable, falling back
    /// to `"sa"` when neither is set.
    pub system_user: String,
    /// Whether `OR`'s explicit three-valued-logic tree (§4.B) is emitted
    /// for `NullAs::Null` over two nullable operands, versus always using
    /// the simpler fold-based lowering. Default: `true`, matching the
    /// source.
    pub explicit_or_three_valued_logic: bool,
}

impl Default for ImpTableConfig {
    fn default() -> Self {
        let system_user = env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| "sa".to_string());
        ImpTableConfig { system_user, explicit_or_three_valued_logic: true }
    }
}
