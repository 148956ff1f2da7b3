//! Component A: `ExprAlgebra`. The intermediate executable expression tree
//! (IET) and the pure constructors / optimizer pass over it.
//!
//! The IET itself is consumed by a back-end outside this crate's scope; we
//! only need enough structure to compose and locally simplify it.

use std::sync::Arc;

use crate::types::SqlType;

/// A literal value embedded in a `Const` node.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
}

/// Binary operator kinds lowered by `BinaryImplementor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOpKind {
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

/// Unary operator kinds lowered by `UnaryImplementor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
    Not,
    BitNot,
    Plus,
}

/// A local variable/parameter name in the generated tree.
pub type VarName = Arc<str>;

/// The intermediate executable expression tree described by §3.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Const(Value, SqlType),
    Field(Option<Box<Expr>>, Arc<str>),
    BinOp(BinOpKind, Box<Expr>, Box<Expr>),
    UnaryOp(UnaryOpKind, Box<Expr>),
    Condition(Box<Expr>, Box<Expr>, Box<Expr>),
    FoldAnd(Vec<Expr>),
    FoldOr(Vec<Expr>),
    MethodCall(Option<Box<Expr>>, Arc<str>, Vec<Expr>),
    Cast(SqlType, Box<Expr>),
    Block(Vec<Expr>, Box<Expr>),
    Declare(VarName, Option<Box<Expr>>),
    Assign(VarName, Box<Expr>),
    IfThen(Box<Expr>, Box<Expr>, Option<Box<Expr>>),
    Throw(Arc<str>),
    Param(VarName, SqlType),
    Not(Box<Expr>),
    Equal(Box<Expr>, Box<Expr>),
    NotEqual(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<Arc<str>>, ty: SqlType) -> Expr {
        Expr::Param(name.into(), ty)
    }

    pub fn method(
        target: Option<Expr>,
        symbol: impl Into<Arc<str>>,
        args: Vec<Expr>,
    ) -> Expr {
        Expr::MethodCall(target.map(Box::new), symbol.into(), args)
    }
}

pub const NULL_EXPR: Expr = Expr::Const(Value::Null, SqlType::new(crate::types::TypeKind::Any));

pub fn false_expr() -> Expr {
    Expr::Const(Value::Bool(false), SqlType::new(crate::types::TypeKind::Boolean))
}

pub fn true_expr() -> Expr {
    Expr::Const(Value::Bool(true), SqlType::new(crate::types::TypeKind::Boolean))
}

/// The nullable-boxed counterpart of [`false_expr`]/[`true_expr`], per the
/// "distinguish primitive boolean from nullable-boxed boolean" requirement.
pub fn boxed_false_expr() -> Expr {
    Expr::Const(Value::Bool(false), SqlType::nullable(crate::types::TypeKind::Boolean))
}

pub fn boxed_true_expr() -> Expr {
    Expr::Const(Value::Bool(true), SqlType::nullable(crate::types::TypeKind::Boolean))
}

pub fn is_constant_null(e: &Expr) -> bool {
    matches!(e, Expr::Const(Value::Null, _))
}

fn is_constant_true(e: &Expr) -> bool {
    matches!(e, Expr::Const(Value::Bool(true), _))
}

fn is_constant_false(e: &Expr) -> bool {
    matches!(e, Expr::Const(Value::Bool(false), _))
}

/// `condition(test, ifTrue, ifFalse)`, optimized eagerly for the trivial
/// cases so callers don't have to remember to call [`optimize`] afterward.
pub fn condition(test: Expr, if_true: Expr, if_false: Expr) -> Expr {
    optimize(Expr::Condition(Box::new(test), Box::new(if_true), Box::new(if_false)))
}

/// `AND` over a list, dropping tautologies and collapsing singletons, per
/// §4.A. An empty list folds to `TRUE` (the identity for AND).
pub fn fold_and(exprs: Vec<Expr>) -> Expr {
    let mut kept: Vec<Expr> = exprs.into_iter().filter(|e| !is_constant_true(e)).collect();
    if kept.iter().any(is_constant_false) {
        return false_expr();
    }
    match kept.len() {
        0 => true_expr(),
        1 => kept.pop().unwrap(),
        _ => Expr::FoldAnd(kept),
    }
}

/// Dual of [`fold_and`] over `OR`. An empty list folds to `FALSE`.
pub fn fold_or(exprs: Vec<Expr>) -> Expr {
    let mut kept: Vec<Expr> = exprs.into_iter().filter(|e| !is_constant_false(e)).collect();
    if kept.iter().any(is_constant_true) {
        return true_expr();
    }
    match kept.len() {
        0 => false_expr(),
        1 => kept.pop().unwrap(),
        _ => Expr::FoldOr(kept),
    }
}

/// Sound (not necessarily complete) local simplification pass, per §4.A.
pub fn optimize(e: Expr) -> Expr {
    match e {
        Expr::Condition(test, if_true, if_false) => {
            let test = optimize(*test);
            let if_true = optimize(*if_true);
            let if_false = optimize(*if_false);
            if is_constant_true(&test) {
                return if_true;
            }
            if is_constant_false(&test) {
                return if_false;
            }
            if if_true == if_false {
                return if_true;
            }
            Expr::Condition(Box::new(test), Box::new(if_true), Box::new(if_false))
        }
        Expr::Not(inner) => {
            let inner = optimize(*inner);
            if let Expr::Not(doubly) = inner {
                return *doubly;
            }
            Expr::Not(Box::new(inner))
        }
        Expr::UnaryOp(UnaryOpKind::Not, inner) => {
            let inner = optimize(*inner);
            if let Expr::UnaryOp(UnaryOpKind::Not, doubly) = inner {
                return *doubly;
            }
            Expr::UnaryOp(UnaryOpKind::Not, Box::new(inner))
        }
        Expr::Equal(l, r) => {
            let l = optimize(*l);
            let r = optimize(*r);
            if is_constant_null(&l) && is_constant_null(&r) {
                return true_expr();
            }
            Expr::Equal(Box::new(l), Box::new(r))
        }
        Expr::FoldAnd(items) => fold_and(items.into_iter().map(optimize).collect()),
        Expr::FoldOr(items) => fold_or(items.into_iter().map(optimize).collect()),
        Expr::BinOp(k, l, r) => Expr::BinOp(k, Box::new(optimize(*l)), Box::new(optimize(*r))),
        Expr::UnaryOp(k, inner) => Expr::UnaryOp(k, Box::new(optimize(*inner))),
        Expr::NotEqual(l, r) => Expr::NotEqual(Box::new(optimize(*l)), Box::new(optimize(*r))),
        Expr::Cast(ty, inner) => Expr::Cast(ty, Box::new(optimize(*inner))),
        other => other,
    }
}

/// `optimize2` from §4.A: lifts a scalar expression `e` computed from
/// `operand` to null-propagating form, unless `operand`'s type is
/// primitive (in which case nulls cannot occur and the lift is a no-op).
pub fn optimize2(operand: &Expr, operand_ty: &SqlType, e: Expr) -> Expr {
    if operand_ty.is_primitive_representable() {
        optimize(e)
    } else {
        optimize(condition(Expr::Equal(Box::new(operand.clone()), Box::new(NULL_EXPR)), NULL_EXPR, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKind;

    #[test]
    fn fold_and_drops_tautologies_and_collapses_singleton() {
        let e = fold_and(vec![true_expr(), Expr::Field(None, "x".into())]);
        assert_eq!(e, Expr::Field(None, "x".into()));
    }

    #[test]
    fn fold_and_short_circuits_on_false() {
        let e = fold_and(vec![Expr::Field(None, "x".into()), false_expr()]);
        assert_eq!(e, false_expr());
    }

    #[test]
    fn fold_or_collapses_singleton() {
        let e = fold_or(vec![false_expr(), Expr::Field(None, "x".into())]);
        assert_eq!(e, Expr::Field(None, "x".into()));
    }

    #[test]
    fn condition_with_constant_test_collapses() {
        let a = Expr::Field(None, "a".into());
        let b = Expr::Field(None, "b".into());
        assert_eq!(condition(true_expr(), a.clone(), b.clone()), a);
        assert_eq!(condition(false_expr(), a.clone(), b.clone()), b);
    }

    #[test]
    fn condition_with_equal_branches_collapses() {
        let x = Expr::Field(None, "x".into());
        let test = Expr::Field(None, "p".into());
        assert_eq!(condition(test, x.clone(), x.clone()), x);
    }

    #[test]
    fn double_not_cancels() {
        let x = Expr::Field(None, "x".into());
        let doubled = Expr::Not(Box::new(Expr::Not(Box::new(x.clone()))));
        assert_eq!(optimize(doubled), x);
    }

    #[test]
    fn equal_null_null_is_true() {
        let e = Expr::Equal(Box::new(NULL_EXPR), Box::new(NULL_EXPR));
        assert_eq!(optimize(e), true_expr());
    }

    #[test]
    fn optimize2_is_noop_for_primitive_operand() {
        let operand = Expr::Field(None, "x".into());
        let ty = SqlType::new(TypeKind::Int);
        let e = Expr::Field(None, "y".into());
        assert_eq!(optimize2(&operand, &ty, e.clone()), e);
    }

    #[test]
    fn optimize2_lifts_nullable_operand() {
        let operand = Expr::Field(None, "x".into());
        let ty = SqlType::nullable(TypeKind::Int);
        let e = Expr::Field(None, "y".into());
        let lifted = optimize2(&operand, &ty, e.clone());
        match lifted {
            Expr::Condition(test, if_true, if_false) => {
                assert_eq!(*test, Expr::Equal(Box::new(operand), Box::new(NULL_EXPR)));
                assert_eq!(*if_true, NULL_EXPR);
                assert_eq!(*if_false, e);
            }
            other => panic!("expected Condition, got {other:?}"),
        }
    }
}
