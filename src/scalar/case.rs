//! `CaseImplementor` (§4.C): recursive lowering of `CASE WHEN … THEN … ELSE
//! … END`, operand list `[when0, then0, when1, then1, …, else]`.
//!
//! CASE doesn't go through the `NullPolicy` engine: each branch controls its
//! own null behavior (a `WHEN` test is always treated as `FALSE` when it
//! would otherwise be `NULL`), so this implements `CallImplementor` directly.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs};
use crate::error::LowerResult;
use crate::expr::{self, Expr};
use crate::operators::SqlOperator;
use crate::scalar::CallImplementor;
use crate::translator::{collapse_always_null, RexNode, Translator};

#[derive(Debug)]
pub struct CaseImplementor;

impl CallImplementor for CaseImplementor {
    fn implement(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let result = build(translator, &call.operands, null_as);
        collapse_always_null(result, null_as)
    }
}

fn build(translator: &dyn Translator, operands: &[Arc<dyn RexNode>], null_as: NullAs) -> LowerResult<Expr> {
    if operands.len() == 1 {
        return translator.translate(operands[0].as_ref(), null_as);
    }
    let when = collapse_always_null(translator.translate(operands[0].as_ref(), NullAs::False), NullAs::False)?;
    let then = collapse_always_null(translator.translate(operands[1].as_ref(), null_as), null_as)?;
    let otherwise = collapse_always_null(build(translator, &operands[2..], null_as), null_as)?;
    Ok(expr::condition(when, then, otherwise))
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    reg.insert(SqlOperator::Case, Arc::new(CaseImplementor));
}
