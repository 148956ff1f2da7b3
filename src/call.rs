//! Call and NullAs/NullPolicy data model (§3).

use std::sync::Arc;

use crate::expr::{self, Expr};
use crate::operators::SqlOperator;
use crate::translator::RexNode;
use crate::types::SqlType;

/// `(op, operands, resultType)` per §3. `operands` are the *relational*
/// operand nodes, not yet lowered — implementors lower them through the
/// `Translator` capability (§6), which is why `Call` hands out `RexNode`s
/// rather than `Expr`s: the IET `Expr` (component A) is strictly this
/// crate's output, never its input.
#[derive(Clone)]
pub struct Call {
    pub op: SqlOperator,
    pub operands: Vec<Arc<dyn RexNode>>,
    pub result_type: SqlType,
}

impl Call {
    pub fn new(op: SqlOperator, operands: Vec<Arc<dyn RexNode>>, result_type: SqlType) -> Self {
        Call { op, operands, result_type }
    }

    pub fn operand_types(&self) -> Vec<SqlType> {
        self.operands.iter().map(|o| o.sql_type()).collect()
    }

    /// A copy of this call with operand `index` replaced by a node whose
    /// declared type is forced non-nullable — used by `implementNullSemantics0`
    /// to "mark the operand as non-null for the inner call" after the
    /// surrounding null guard has already ruled out `NULL` at that position.
    pub fn with_operand_forced_non_null(&self, index: usize) -> Call {
        let mut operands = self.operands.clone();
        operands[index] = Arc::new(crate::translator::NonNullView(operands[index].clone()));
        Call { op: self.op, operands, result_type: self.result_type }
    }
}

/// The caller's demand on how the lowering should behave in the presence of
/// nulls, per §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullAs {
    Null,
    False,
    True,
    NotPossible,
    IsNull,
    IsNotNull,
}

impl NullAs {
    /// Applies this demand to an already-lowered, possibly-null `Expr`.
    /// This is the `nullAs.handle(·)` operation referenced throughout §4.
    pub fn handle(self, value: Expr) -> Expr {
        match self {
            NullAs::Null | NullAs::NotPossible => value,
            NullAs::False => {
                if expr::is_constant_null(&value) {
                    expr::false_expr()
                } else {
                    expr::condition(
                        Expr::Equal(Box::new(value.clone()), Box::new(expr::NULL_EXPR)),
                        expr::false_expr(),
                        value,
                    )
                }
            }
            NullAs::True => {
                if expr::is_constant_null(&value) {
                    expr::true_expr()
                } else {
                    expr::condition(
                        Expr::Equal(Box::new(value.clone()), Box::new(expr::NULL_EXPR)),
                        expr::true_expr(),
                        value,
                    )
                }
            }
            NullAs::IsNull => Expr::Equal(Box::new(value), Box::new(expr::NULL_EXPR)),
            NullAs::IsNotNull => Expr::NotEqual(Box::new(value), Box::new(expr::NULL_EXPR)),
        }
    }

    /// Demand flip used by `NOT`'s NullPolicy: `{FALSE<->TRUE}`.
    pub fn flip_false_true(self) -> NullAs {
        match self {
            NullAs::False => NullAs::True,
            NullAs::True => NullAs::False,
            other => other,
        }
    }
}

/// Per-operator null-handling strategy, per §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullPolicy {
    Any,
    Strict,
    And,
    Or,
    Not,
    None,
}
