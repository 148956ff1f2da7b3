//! `BinaryImplementor` (§4.C): lowers a two-operand call to `BinOp`, with a
//! "backup method name" fallback for operand types the generated primitive
//! operator can't handle directly.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs, NullPolicy};
use crate::error::LowerResult;
use crate::expr::{BinOpKind, Expr};
use crate::operators::SqlOperator;
use crate::scalar::{wrap, CallImplementor, NotNullImplementor};
use crate::translator::Translator;
use crate::types::TypeKind;

/// The subset of `SqlOperator` this module implements, factored out so
/// tests and the registry can both name a binary op without matching on
/// the full `SqlOperator` enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitOr,
    BitXor,
    Concat,
}

impl BinaryOp {
    fn kind(self) -> BinOpKind {
        match self {
            BinaryOp::Add => BinOpKind::Add,
            BinaryOp::Sub => BinOpKind::Sub,
            BinaryOp::Mul => BinOpKind::Mul,
            BinaryOp::Div => BinOpKind::Div,
            BinaryOp::Mod => BinOpKind::Mod,
            BinaryOp::Lt => BinOpKind::Lt,
            BinaryOp::Le => BinOpKind::Le,
            BinaryOp::Gt => BinOpKind::Gt,
            BinaryOp::Ge => BinOpKind::Ge,
            BinaryOp::Eq => BinOpKind::Eq,
            BinaryOp::Ne => BinOpKind::Ne,
            BinaryOp::BitAnd => BinOpKind::BitAnd,
            BinaryOp::BitOr => BinOpKind::BitOr,
            BinaryOp::BitXor => BinOpKind::BitXor,
            BinaryOp::Concat => BinOpKind::Concat,
        }
    }

    fn is_comparison(self) -> bool {
        matches!(self, BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Ne)
    }

    /// `SqlFunctions.<name>` used when the backup path is taken.
    fn backup_method_name(self) -> &'static str {
        match self {
            BinaryOp::Add => "plus",
            BinaryOp::Sub => "minus",
            BinaryOp::Mul => "multiply",
            BinaryOp::Div => "divide",
            BinaryOp::Mod => "mod",
            BinaryOp::Lt => "lt",
            BinaryOp::Le => "le",
            BinaryOp::Gt => "gt",
            BinaryOp::Ge => "ge",
            BinaryOp::Eq => "eq",
            BinaryOp::Ne => "ne",
            BinaryOp::BitAnd => "bitAnd",
            BinaryOp::BitOr => "bitOr",
            BinaryOp::BitXor => "bitXor",
            BinaryOp::Concat => "concat",
        }
    }
}

/// The comparable-primitive set named in §4.C: outside of it, comparisons
/// fall back to the runtime helper (e.g. to compare strings or decimals).
fn is_comparable_primitive(kind: TypeKind) -> bool {
    matches!(
        kind,
        TypeKind::TinyInt
            | TypeKind::SmallInt
            | TypeKind::Int
            | TypeKind::BigInt
            | TypeKind::Real
            | TypeKind::Double
    )
}

#[derive(Debug)]
pub struct BinOpNotNull {
    pub op: BinaryOp,
}

impl NotNullImplementor for BinOpNotNull {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let a = translator.translate(call.operands[0].as_ref(), null_as)?;
        let b = translator.translate(call.operands[1].as_ref(), null_as)?;
        let types = call.operand_types();
        let needs_backup = !types[0].is_primitive_representable()
            || !types[1].is_primitive_representable()
            || (self.op.is_comparison()
                && (!is_comparable_primitive(types[0].kind) || !is_comparable_primitive(types[1].kind)));
        if needs_backup {
            Ok(Expr::method(None, self.op.backup_method_name(), vec![a, b]))
        } else {
            Ok(Expr::BinOp(self.op.kind(), Box::new(a), Box::new(b)))
        }
    }
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    let entries: &[(SqlOperator, BinaryOp)] = &[
        (SqlOperator::Plus, BinaryOp::Add),
        (SqlOperator::Minus, BinaryOp::Sub),
        (SqlOperator::Multiply, BinaryOp::Mul),
        (SqlOperator::Divide, BinaryOp::Div),
        (SqlOperator::Mod, BinaryOp::Mod),
        (SqlOperator::LessThan, BinaryOp::Lt),
        (SqlOperator::LessThanOrEqual, BinaryOp::Le),
        (SqlOperator::GreaterThan, BinaryOp::Gt),
        (SqlOperator::GreaterThanOrEqual, BinaryOp::Ge),
        (SqlOperator::Equals, BinaryOp::Eq),
        (SqlOperator::NotEquals, BinaryOp::Ne),
        (SqlOperator::BitAnd, BinaryOp::BitAnd),
        (SqlOperator::BitOr, BinaryOp::BitOr),
        (SqlOperator::BitXor, BinaryOp::BitXor),
        (SqlOperator::Concat, BinaryOp::Concat),
    ];
    for &(op, bin_op) in entries {
        reg.insert(op, wrap(Arc::new(BinOpNotNull { op: bin_op }), NullPolicy::Strict, true));
    }

    // IS [NOT] DISTINCT FROM never propagates nulls the ordinary way: it is
    // defined to be a total comparison, so it is registered with
    // `NullPolicy::None` and implements its own null handling directly.
    reg.insert(SqlOperator::IsDistinctFrom, wrap(Arc::new(DistinctFromNotNull { negate: false }), NullPolicy::None, true));
    reg.insert(
        SqlOperator::IsNotDistinctFrom,
        wrap(Arc::new(DistinctFromNotNull { negate: true }), NullPolicy::None, true),
    );
}

#[derive(Debug)]
struct DistinctFromNotNull {
    negate: bool,
}

impl NotNullImplementor for DistinctFromNotNull {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, _null_as: NullAs) -> LowerResult<Expr> {
        let a_null = translator.translate(call.operands[0].as_ref(), NullAs::IsNull)?;
        let b_null = translator.translate(call.operands[1].as_ref(), NullAs::IsNull)?;
        let a = translator.translate(call.operands[0].as_ref(), NullAs::Null)?;
        let b = translator.translate(call.operands[1].as_ref(), NullAs::Null)?;
        let both_null = crate::expr::fold_and(vec![a_null.clone(), b_null.clone()]);
        let either_null = crate::expr::fold_or(vec![a_null, b_null]);
        let values_equal = Expr::Equal(Box::new(a), Box::new(b));
        // DISTINCT FROM: true unless (both null) or (neither null and equal).
        let equivalent = crate::expr::condition(both_null, crate::expr::true_expr(), {
            crate::expr::condition(either_null, crate::expr::false_expr(), values_equal)
        });
        if self.negate {
            Ok(equivalent)
        } else {
            Ok(Expr::Not(Box::new(equivalent)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{Leaf, LeafTranslator};
    use crate::types::SqlType;

    #[test]
    fn backup_method_used_for_char_operands() {
        let translator = LeafTranslator;
        let ty = SqlType::new(TypeKind::Char);
        let call = Call::new(
            SqlOperator::LessThan,
            vec![
                Leaf::new(Expr::Field(None, "a".into()), ty),
                Leaf::new(Expr::Field(None, "b".into()), ty),
            ],
            SqlType::new(TypeKind::Boolean),
        );
        let not_null = BinOpNotNull { op: BinaryOp::Lt };
        let e = not_null.implement_not_null(&translator, &call, NullAs::NotPossible).unwrap();
        match e {
            Expr::MethodCall(None, symbol, _) => assert_eq!(&*symbol, "lt"),
            other => panic!("char is not primitive-representable, expected backup method call, got {other:?}"),
        }
    }

    #[test]
    fn backup_method_used_for_decimal_like_object_operands() {
        let translator = LeafTranslator;
        let ty = SqlType::decimal(10, 2);
        let call = Call::new(
            SqlOperator::LessThan,
            vec![
                Leaf::new(Expr::Field(None, "a".into()), ty),
                Leaf::new(Expr::Field(None, "b".into()), ty),
            ],
            SqlType::new(TypeKind::Boolean),
        );
        let not_null = BinOpNotNull { op: BinaryOp::Lt };
        let e = not_null.implement_not_null(&translator, &call, NullAs::NotPossible).unwrap();
        match e {
            Expr::MethodCall(None, symbol, _) => assert_eq!(&*symbol, "lt"),
            other => panic!("expected backup method call, got {other:?}"),
        }
    }

    #[test]
    fn primitive_add_emits_raw_binop() {
        let translator = LeafTranslator;
        let ty = SqlType::new(TypeKind::Int);
        let call = Call::new(
            SqlOperator::Plus,
            vec![
                Leaf::new(Expr::Field(None, "a".into()), ty),
                Leaf::new(Expr::Field(None, "b".into()), ty),
            ],
            ty,
        );
        let not_null = BinOpNotNull { op: BinaryOp::Add };
        let e = not_null.implement_not_null(&translator, &call, NullAs::NotPossible).unwrap();
        assert!(matches!(e, Expr::BinOp(BinOpKind::Add, _, _)));
    }
}
