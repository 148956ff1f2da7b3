//! Error kinds per §7. Mirrors the role `EvalError` plays in the sibling
//! scalar-function crate: a flat, matchable enum rather than an opaque
//! `anyhow::Error`, because the planner needs to distinguish fatal
//! code-generation failures from the one runtime error we embed verbatim
//! into the generated tree.

use thiserror::Error;

/// Fatal code-generation errors. `LookupMiss` is intentionally absent here:
/// per §7.1 a missed lookup returns `None` and the caller decides, matching
/// the source's own `null`-return convention.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ImpError {
    #[error("user-defined function `{0}` does not implement its own call implementor")]
    InvalidUdf(String),

    #[error("cannot construct aggregate implementor for `{0}`: {1}")]
    ConstructionFailure(String, String),

    /// Raised only as a logged, never-propagated diagnostic: a
    /// `PolicyWrapped` was registered without the `NotNullImplementor` its
    /// `NullPolicy` requires. Since every scalar lowering function's error
    /// channel is fixed to [`AlwaysNull`] (see below), this never actually
    /// travels up as an `Err` — `policy::implement_call` formats it through
    /// `tracing::error!` and falls back to [`AlwaysNull`], exactly like any
    /// other internal invariant the lowering boundary collapses to `NULL`.
    #[error("unreachable null policy encountered while implementing `{0}`")]
    UnreachableNullPolicy(String),

    /// Never returned from a code-generation function: embedded verbatim as
    /// an `Expr::Throw` payload and raised by the execution engine at
    /// runtime when `SINGLE_VALUE` sees a second input row.
    #[error("more than one value in agg SINGLE_VALUE")]
    SingleValueMoreThanOne,
}

/// Sentinel signalling that a translated sub-expression has been proven to
/// be the constant `NULL`. Modeled as the `Err` arm of
/// `Result<Expr, AlwaysNull>` per Design Note "`AlwaysNull` control-flow
/// sentinel" — never stored inside [`ImpError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlwaysNull;

pub type LowerResult<T> = Result<T, AlwaysNull>;
