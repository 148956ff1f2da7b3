//! Component B: the NullPolicy engine. Given a family-specific
//! [`NotNullImplementor`](crate::scalar::NotNullImplementor), a
//! [`NullPolicy`], and a `harmonize` flag, builds the behavior a
//! [`CallImplementor`](crate::scalar::CallImplementor) must have, per §4.B.

use crate::call::{Call, NullAs, NullPolicy};
use crate::error::{AlwaysNull, LowerResult};
use crate::expr::{self, Expr};
use crate::scalar::NotNullImplementor;
use crate::translator::{collapse_always_null, Translator};
use crate::types::{harmonize_types, SqlType};

/// Entry point used by `PolicyWrapped::implement`. Dispatches by
/// `nullPolicy` per §4.B and applies the `AlwaysNull` collapse rule once,
/// at the boundary, regardless of which branch raised it.
pub fn implement_call(
    not_null: Option<&dyn NotNullImplementor>,
    policy: NullPolicy,
    harmonize: bool,
    explicit_or_3vl: bool,
    translator: &dyn Translator,
    call: &Call,
    null_as: NullAs,
) -> LowerResult<Expr> {
    let result = match (policy, not_null) {
        (NullPolicy::Any | NullPolicy::Strict, Some(not_null)) => {
            implement_null_semantics0(not_null, policy, harmonize, translator, call, null_as)
        }
        (NullPolicy::Not, Some(not_null)) => {
            let flipped = null_as.flip_false_true();
            implement_null_semantics0(not_null, NullPolicy::Strict, harmonize, translator, call, flipped)
        }
        (NullPolicy::And, _) => implement_and(harmonize, translator, call, null_as),
        (NullPolicy::Or, _) => implement_or(harmonize, translator, call, null_as, explicit_or_3vl),
        (NullPolicy::None, Some(not_null)) => {
            let inner = not_null.implement_not_null(translator, call, NullAs::Null)?;
            Ok(null_as.handle(inner))
        }
        (NullPolicy::Any | NullPolicy::Strict | NullPolicy::Not | NullPolicy::None, None) => {
            Err(unreachable_null_policy(call.op.to_string().as_str()))
        }
    };
    collapse_always_null(result, null_as)
}

/// Rewrites `call`'s operands to their least-restrictive common type, per
/// §4.B. Operands with a common type are cast up; when no common type
/// exists, or all operands already share one, the call is returned
/// unchanged (harmonization is a fixed point, §8 invariant 4).
fn harmonize_call(_translator: &dyn Translator, call: &Call) -> Call {
    let types = call.operand_types();
    let harmonized = harmonize_types(&types);
    if harmonized == types {
        return call.clone();
    }
    let mut new_call = call.clone();
    for (i, (orig_ty, target_ty)) in types.iter().zip(harmonized.iter()).enumerate() {
        if orig_ty.equals_sans_nullability(target_ty) {
            continue;
        }
        new_call.operands[i] = std::sync::Arc::new(crate::translator::CastView {
            inner: new_call.operands[i].clone(),
            target: *target_ty,
        });
    }
    new_call
}

fn implement_null_semantics0(
    not_null: &dyn NotNullImplementor,
    policy: NullPolicy,
    harmonize: bool,
    translator: &dyn Translator,
    call: &Call,
    null_as: NullAs,
) -> LowerResult<Expr> {
    let call_owned;
    let call = if harmonize {
        call_owned = harmonize_call(translator, call);
        &call_owned
    } else {
        call
    };

    if policy == NullPolicy::Strict && null_as == NullAs::IsNotNull {
        let tests = translator.translate_list(&call.operands, NullAs::IsNotNull)?;
        return Ok(expr::fold_and(tests));
    }
    if policy == NullPolicy::Strict && null_as == NullAs::IsNull {
        let tests = translator.translate_list(&call.operands, NullAs::IsNull)?;
        return Ok(expr::fold_or(tests));
    }

    if null_as == NullAs::NotPossible {
        return not_null.implement_not_null(translator, call, NullAs::NotPossible);
    }

    let operand_types = call.operand_types();
    let nullable_idxs: Vec<usize> =
        operand_types.iter().enumerate().filter(|(_, t)| t.nullable).map(|(i, _)| i).collect();

    let mut call_inner = call.clone();
    for &i in &nullable_idxs {
        call_inner = call_inner.with_operand_forced_non_null(i);
    }
    let inner = not_null.implement_not_null(translator, &call_inner, NullAs::NotPossible)?;

    if null_as == NullAs::False {
        let mut parts = Vec::with_capacity(nullable_idxs.len() + 1);
        for &i in &nullable_idxs {
            parts.push(translator.translate(call.operands[i].as_ref(), NullAs::IsNotNull)?);
        }
        parts.push(inner);
        return Ok(expr::fold_and(parts));
    }

    if nullable_idxs.is_empty() {
        return Ok(null_as.handle(inner));
    }

    let mut null_tests = Vec::with_capacity(nullable_idxs.len());
    for &i in &nullable_idxs {
        null_tests.push(translator.translate(call.operands[i].as_ref(), NullAs::IsNull)?);
    }
    let guarded = expr::condition(expr::fold_or(null_tests), expr::NULL_EXPR, inner);
    Ok(null_as.handle(guarded))
}

/// `NullPolicy::AND`: short-circuits under `{NOT_POSSIBLE, TRUE}`, else
/// translates each operand and folds their handled values, per §4.B.
fn implement_and(harmonize: bool, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
    let call_owned;
    let call = if harmonize {
        call_owned = harmonize_call(translator, call);
        &call_owned
    } else {
        call
    };
    if matches!(null_as, NullAs::NotPossible | NullAs::True) {
        let translated = translator.translate_list(&call.operands, null_as)?;
        return Ok(expr::fold_and(translated));
    }
    let inner_demand = if null_as == NullAs::True { NullAs::Null } else { null_as };
    let mut parts = Vec::with_capacity(call.operands.len());
    for operand in &call.operands {
        let v = translator.translate(operand.as_ref(), inner_demand)?;
        parts.push(inner_demand.handle(v));
    }
    Ok(expr::fold_and(parts))
}

/// `NullPolicy::OR`: dual of AND over `foldOr`, with the explicit 3-VL tree
/// for `NullAs::NULL` over two nullable operands, per §4.B.
fn implement_or(
    harmonize: bool,
    translator: &dyn Translator,
    call: &Call,
    null_as: NullAs,
    explicit_3vl: bool,
) -> LowerResult<Expr> {
    let call_owned;
    let call = if harmonize {
        call_owned = harmonize_call(translator, call);
        &call_owned
    } else {
        call
    };

    if explicit_3vl && null_as == NullAs::Null && call.operands.len() == 2 {
        let t0 = translator.translate(call.operands[0].as_ref(), NullAs::Null)?;
        let t1 = translator.translate(call.operands[1].as_ref(), NullAs::Null)?;
        if translator.is_nullable(call.operands[0].as_ref()) && translator.is_nullable(call.operands[1].as_ref()) {
            let tree = expr::condition(
                Expr::Equal(Box::new(t0.clone()), Box::new(expr::NULL_EXPR)),
                expr::condition(
                    expr::fold_or(vec![
                        Expr::Equal(Box::new(t1.clone()), Box::new(expr::NULL_EXPR)),
                        Expr::Not(Box::new(t1.clone())),
                    ]),
                    expr::NULL_EXPR,
                    expr::true_expr(),
                ),
                expr::condition(Expr::Not(Box::new(t0.clone())), t1, expr::true_expr()),
            );
            return Ok(expr::optimize(tree));
        }
        return Ok(expr::fold_or(vec![t0, t1]));
    }

    if matches!(null_as, NullAs::NotPossible | NullAs::False) {
        let translated = translator.translate_list(&call.operands, null_as)?;
        return Ok(expr::fold_or(translated));
    }
    let inner_demand = if null_as == NullAs::False { NullAs::Null } else { null_as };
    let mut parts = Vec::with_capacity(call.operands.len());
    for operand in &call.operands {
        let v = translator.translate(operand.as_ref(), inner_demand)?;
        parts.push(inner_demand.handle(v));
    }
    Ok(expr::fold_or(parts))
}

fn unreachable_null_policy(op: &str) -> AlwaysNull {
    let err = crate::error::ImpError::UnreachableNullPolicy(op.to_string());
    tracing::error!(%err, "unreachable null policy");
    AlwaysNull
}
