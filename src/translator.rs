//! The `Translator`/`ExprBuilder` capabilities consumed by implementors
//! (§6). These are named interfaces onto the excluded planner/back-end; the
//! ImpTable never constructs one itself, only calls through it.

use std::fmt;
use std::sync::Arc;

use crate::call::NullAs;
use crate::error::{AlwaysNull, LowerResult};
use crate::expr::Expr;
use crate::types::SqlType;

/// A relational-algebra sub-expression node, opaque to this crate beyond
/// what it declares about its own type. The real planner's expression type
/// lives outside this crate's scope (§1); implementors only ever see one
/// through the `Translator`.
pub trait RexNode: fmt::Debug + Send + Sync {
    fn sql_type(&self) -> SqlType;

    /// Downcasting hook so a `Translator` implementation can recover the
    /// concrete node type it produced, without this trait having to name
    /// every possible planner node kind.
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Wraps another `RexNode`, overriding its declared type to be
/// non-nullable without touching the underlying node. Used by
/// `Call::with_operand_forced_non_null` (§4.B) and understood generically
/// by [`Translator::translate`]'s default implementation, so planners don't
/// need to special-case it.
#[derive(Debug)]
pub struct NonNullView(pub Arc<dyn RexNode>);

impl RexNode for NonNullView {
    fn sql_type(&self) -> SqlType {
        self.0.sql_type().with_nullable(false)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Wraps another `RexNode`, recording that `harmonize` (§4.B) promoted its
/// declared type to `target`. Like [`NonNullView`], handled generically by
/// [`Translator::translate`]'s default implementation.
#[derive(Debug)]
pub struct CastView {
    pub inner: Arc<dyn RexNode>,
    pub target: SqlType,
}

impl RexNode for CastView {
    fn sql_type(&self) -> SqlType {
        self.target
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Capability used to recursively lower sub-expressions, query their
/// nullability, and emit casts/constructors, per §6.
///
/// Implementors only ever need to supply [`Translator::translate_leaf`] for
/// their own concrete `RexNode` kinds; [`Translator::translate`]'s default
/// implementation already knows how to unwrap the generic [`NonNullView`]
/// and [`CastView`] wrappers this crate introduces.
pub trait Translator {
    /// Lowers a planner-native leaf/call node. Never sees a [`NonNullView`]
    /// or [`CastView`] — those are peeled off by [`Translator::translate`].
    fn translate_leaf(&self, node: &dyn RexNode, null_as: NullAs) -> LowerResult<Expr>;

    /// Lowers `node` under demand `null_as`, returning `Err(AlwaysNull)` if
    /// the sub-expression is provably the constant `NULL` (§4.B, §7.4).
    fn translate(&self, node: &dyn RexNode, null_as: NullAs) -> LowerResult<Expr> {
        if let Some(view) = node.as_any().downcast_ref::<NonNullView>() {
            // The guard that forced this non-null has already run; ask the
            // wrapped node for unboxed code.
            return self.translate(view.0.as_ref(), NullAs::NotPossible);
        }
        if let Some(view) = node.as_any().downcast_ref::<CastView>() {
            let inner = self.translate(view.inner.as_ref(), null_as)?;
            return Ok(self.translate_cast(&view.inner.sql_type(), &view.target, inner));
        }
        self.translate_leaf(node, null_as)
    }

    fn translate_list(&self, nodes: &[Arc<dyn RexNode>], null_as: NullAs) -> LowerResult<Vec<Expr>> {
        nodes.iter().map(|n| self.translate(n.as_ref(), null_as)).collect()
    }

    fn is_nullable(&self, node: &dyn RexNode) -> bool {
        node.sql_type().nullable
    }

    fn ensure_type(&self, target: &SqlType, node: Expr, match_nullability: bool) -> Expr {
        if match_nullability {
            Expr::Cast(*target, Box::new(node))
        } else {
            Expr::Cast(target.with_nullable(false), Box::new(node))
        }
    }

    fn translate_cast(&self, _source: &SqlType, target: &SqlType, expr: Expr) -> Expr {
        Expr::Cast(*target, Box::new(expr))
    }

    fn translate_constructor(&self, args: Vec<Expr>, symbol: &str) -> Expr {
        Expr::method(None, symbol.to_string(), args)
    }

    fn nullify_type(&self, ty: SqlType, nullable: bool) -> SqlType {
        ty.with_nullable(nullable)
    }
}

/// Returns `Expr::Const(Value::Null, …)` unless `AlwaysNull` needs to be
/// re-raised, per the `implementNullSemantics0` collapse rules in §4.B.
pub fn collapse_always_null(result: LowerResult<Expr>, null_as: NullAs) -> LowerResult<Expr> {
    match result {
        Ok(e) => Ok(e),
        Err(AlwaysNull) => match null_as {
            NullAs::Null => Ok(crate::expr::NULL_EXPR),
            NullAs::False => Ok(crate::expr::false_expr()),
            NullAs::True => Ok(crate::expr::true_expr()),
            NullAs::NotPossible => Err(AlwaysNull),
            NullAs::IsNull => Ok(crate::expr::true_expr()),
            NullAs::IsNotNull => Ok(crate::expr::false_expr()),
        },
    }
}

/// A leaf `RexNode` that already carries its lowered form. Useful for
/// constructing `Call`s in tests and for implementors (e.g. CASE) that need
/// to feed an already-translated `Expr` back through a `Translator`-shaped
/// API.
#[derive(Debug, Clone)]
pub struct Leaf {
    pub expr: Expr,
    pub ty: SqlType,
}

impl Leaf {
    pub fn new(expr: Expr, ty: SqlType) -> Arc<dyn RexNode> {
        Arc::new(Leaf { expr, ty })
    }
}

impl RexNode for Leaf {
    fn sql_type(&self) -> SqlType {
        self.ty
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// The simplest possible `Translator`: every `Leaf` node already holds its
/// lowered `Expr`, so `translate_leaf` only needs to apply the requested
/// `NullAs` demand. Exercised by this crate's own unit/integration tests;
/// a real planner supplies a richer implementation that recurses into
/// actual relational sub-trees.
#[derive(Debug, Default)]
pub struct LeafTranslator;

impl Translator for LeafTranslator {
    fn translate_leaf(&self, node: &dyn RexNode, null_as: NullAs) -> LowerResult<Expr> {
        let Some(leaf) = node.as_any().downcast_ref::<Leaf>() else {
            panic!("LeafTranslator only supports Leaf nodes (plus the generic NonNullView/CastView wrappers)");
        };
        if crate::expr::is_constant_null(&leaf.expr) && null_as != NullAs::NotPossible {
            return collapse_always_null(Err(AlwaysNull), null_as);
        }
        Ok(null_as.handle(leaf.expr.clone()))
    }
}
