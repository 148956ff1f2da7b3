//! Component C: the scalar operator registry, and the two capability
//! traits (§4.B, §9 "Polymorphism over `CallImplementor`…") every scalar
//! implementor is built from.

pub mod binary;
pub mod case;
pub mod cast;
pub mod datetime;
pub mod is_xxx;
pub mod item;
pub mod method;
pub mod reinterpret;
pub mod system_fn;
pub mod trim;
pub mod unary;
pub mod value_ctor;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::call::{Call, NullAs, NullPolicy};
use crate::error::LowerResult;
use crate::expr::Expr;
use crate::operators::SqlOperator;
use crate::translator::Translator;

/// The uniform interface the registry stores one of per operator (§3
/// "Registries"). Every scalar operator, regardless of family, is reached
/// through this trait.
pub trait CallImplementor: fmt::Debug + Send + Sync {
    fn implement(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr>;
}

/// The "per-operator property" an operator's family-specific logic is
/// written against, *before* the `NullPolicy` engine (component B) wraps
/// it into a full `CallImplementor`. Per Design Note "Nested anonymous
/// implementors with captured state": this is the `NotNullImpl` half of
/// the `{NotNullImpl, NullPolicy, harmonize}` tuple.
pub trait NotNullImplementor: fmt::Debug + Send + Sync {
    fn implement_not_null(
        &self,
        translator: &dyn Translator,
        call: &Call,
        null_as: NullAs,
    ) -> LowerResult<Expr>;
}

/// The tagged-variant `CallImplementor` carrying `{NotNullImpl, NullPolicy,
/// harmonize}`, per Design Note "Nested anonymous implementors…". This is
/// how the vast majority of scalar operators end up registered: a thin
/// family-specific [`NotNullImplementor`] plus one of the six null
/// strategies from component B.
///
/// `not_null` is `None` only for `NullPolicy::{And,Or}`: those two
/// policies fold operand values directly and never consult a family
/// implementor (§4.B). `explicit_or_3vl` is consulted only by
/// `NullPolicy::Or`.
#[derive(Debug)]
pub struct PolicyWrapped {
    pub not_null: Option<Arc<dyn NotNullImplementor>>,
    pub policy: NullPolicy,
    pub harmonize: bool,
    pub explicit_or_3vl: bool,
}

impl CallImplementor for PolicyWrapped {
    fn implement(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        crate::policy::implement_call(
            self.not_null.as_deref(),
            self.policy,
            self.harmonize,
            self.explicit_or_3vl,
            translator,
            call,
            null_as,
        )
    }
}

pub fn wrap(
    not_null: Arc<dyn NotNullImplementor>,
    policy: NullPolicy,
    harmonize: bool,
) -> Arc<dyn CallImplementor> {
    Arc::new(PolicyWrapped { not_null: Some(not_null), policy, harmonize, explicit_or_3vl: false })
}

/// Builds the `CallImplementor` for `NullPolicy::{And,Or}`, where there is
/// no family-specific implementor to wrap.
pub fn wrap_boolean(policy: NullPolicy, harmonize: bool, explicit_or_3vl: bool) -> Arc<dyn CallImplementor> {
    debug_assert!(matches!(policy, NullPolicy::And | NullPolicy::Or));
    Arc::new(PolicyWrapped { not_null: None, policy, harmonize, explicit_or_3vl })
}

/// Populates the scalar operator registry with every entry enumerated in
/// §4.C, per the "Registry surface" contract (§6): called once at
/// [`crate::ImpTable::new`] and never mutated afterward.
pub fn build_registry(config: &crate::config::ImpTableConfig) -> HashMap<SqlOperator, Arc<dyn CallImplementor>> {
    let mut reg: HashMap<SqlOperator, Arc<dyn CallImplementor>> = HashMap::new();

    binary::register(&mut reg);
    unary::register(&mut reg);
    reg.insert(SqlOperator::And, wrap_boolean(NullPolicy::And, true, false));
    reg.insert(
        SqlOperator::Or,
        wrap_boolean(NullPolicy::Or, true, config.explicit_or_three_valued_logic),
    );
    method::register(&mut reg);
    is_xxx::register(&mut reg);
    case::register(&mut reg);
    cast::register(&mut reg);
    item::register(&mut reg);
    value_ctor::register(&mut reg);
    trim::register(&mut reg);
    datetime::register(&mut reg);
    reinterpret::register(&mut reg);
    system_fn::register(&mut reg, config);

    tracing::debug!(operators = reg.len(), "scalar registry built");
    reg
}
