//! `MethodImplementor`/`MethodNameImplementor` (§4.C): the two "just call a
//! runtime helper" families that cover most string and numeric functions.
//!
//! `MethodImplementor` treats the first operand as the method's receiver;
//! `MethodNameImplementor` calls a free function named after the operator,
//! passing every operand as an argument. Both are thin over
//! [`NotNullImplementor`] and get their null handling from `NullPolicy`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs, NullPolicy};
use crate::error::LowerResult;
use crate::expr::Expr;
use crate::operators::SqlOperator;
use crate::scalar::{wrap, CallImplementor, NotNullImplementor};
use crate::translator::Translator;

/// `receiver.method(rest...)`, e.g. `UPPER(s)` -> `s.upper()`.
#[derive(Debug)]
pub struct MethodImplementor {
    pub method: &'static str,
}

impl NotNullImplementor for MethodImplementor {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let receiver = translator.translate(call.operands[0].as_ref(), null_as)?;
        let rest = translator.translate_list(&call.operands[1..], null_as)?;
        Ok(Expr::method(Some(receiver), self.method, rest))
    }
}

/// `SqlFunctions.name(operands...)`: every operand is a plain argument, no
/// distinguished receiver.
#[derive(Debug)]
pub struct MethodNameImplementor {
    pub name: &'static str,
}

impl NotNullImplementor for MethodNameImplementor {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let args = translator.translate_list(&call.operands, null_as)?;
        Ok(Expr::method(None, self.name, args))
    }
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    let methods: &[(SqlOperator, &'static str)] = &[
        (SqlOperator::Upper, "upper"),
        (SqlOperator::Lower, "lower"),
        (SqlOperator::Initcap, "initcap"),
        (SqlOperator::CharLength, "length"),
        (SqlOperator::OctetLength, "octetLength"),
    ];
    for &(op, method) in methods {
        reg.insert(op, wrap(Arc::new(MethodImplementor { method }), NullPolicy::Strict, false));
    }

    let names: &[(SqlOperator, &'static str)] = &[
        (SqlOperator::Substring, "substring"),
        (SqlOperator::Overlay, "overlay"),
        (SqlOperator::Position, "position"),
        (SqlOperator::Replace, "replace"),
        (SqlOperator::Like, "like"),
        (SqlOperator::NotLike, "like"),
        (SqlOperator::Similar, "similar"),
        (SqlOperator::Abs, "abs"),
        (SqlOperator::Power, "power"),
        (SqlOperator::Sqrt, "sqrt"),
        (SqlOperator::Exp, "exp"),
        (SqlOperator::Ln, "ln"),
        (SqlOperator::Log10, "log10"),
        (SqlOperator::Floor, "floor"),
        (SqlOperator::Ceil, "ceil"),
        (SqlOperator::Sign, "sign"),
        (SqlOperator::Round, "round"),
        (SqlOperator::Truncate, "truncate"),
    ];
    for &(op, name) in names {
        reg.insert(op, wrap(Arc::new(MethodNameImplementor { name }), NullPolicy::Strict, false));
    }

    // NOT LIKE shares LIKE's runtime helper; the negation happens around the
    // call rather than inside it.
    reg.insert(
        SqlOperator::NotLike,
        wrap(Arc::new(NegatedNotNull { inner: Arc::new(MethodNameImplementor { name: "like" }) }), NullPolicy::Strict, false),
    );
}

#[derive(Debug)]
struct NegatedNotNull {
    inner: Arc<dyn NotNullImplementor>,
}

impl NotNullImplementor for NegatedNotNull {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let inner = self.inner.implement_not_null(translator, call, null_as)?;
        Ok(Expr::Not(Box::new(inner)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{Leaf, LeafTranslator};
    use crate::types::{SqlType, TypeKind};

    #[test]
    fn upper_emits_instance_method_call() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let call = Call::new(
            SqlOperator::Upper,
            vec![Leaf::new(Expr::Field(None, "s".into()), SqlType::new(TypeKind::Varchar))],
            SqlType::new(TypeKind::Varchar),
        );
        let e = reg[&SqlOperator::Upper].implement(&translator, &call, NullAs::NotPossible).unwrap();
        match e {
            Expr::MethodCall(Some(_), symbol, args) => {
                assert_eq!(&*symbol, "upper");
                assert!(args.is_empty());
            }
            other => panic!("expected instance method call, got {other:?}"),
        }
    }

    #[test]
    fn not_like_negates_like() {
        let translator = LeafTranslator;
        let mut reg = HashMap::new();
        register(&mut reg);
        let ty = SqlType::new(TypeKind::Varchar);
        let call = Call::new(
            SqlOperator::NotLike,
            vec![
                Leaf::new(Expr::Field(None, "s".into()), ty),
                Leaf::new(Expr::Field(None, "p".into()), ty),
            ],
            SqlType::new(TypeKind::Boolean),
        );
        let e = reg[&SqlOperator::NotLike].implement(&translator, &call, NullAs::NotPossible).unwrap();
        assert!(matches!(e, Expr::Not(_)));
    }
}
