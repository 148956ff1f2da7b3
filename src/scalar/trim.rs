//! `TrimImplementor` (§4.C): `TRIM({BOTH|LEADING|TRAILING} chars FROM s)`,
//! operands `[flag, chars, source]`. The flag is a constant at this point in
//! the pipeline, so it's decoded eagerly into the runtime helper's name
//! rather than passed through as a live operand.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs, NullPolicy};
use crate::error::LowerResult;
use crate::expr::{Expr, Value};
use crate::operators::SqlOperator;
use crate::scalar::{wrap, CallImplementor, NotNullImplementor};
use crate::translator::Translator;
use crate::types::{SqlType, TypeKind};

#[derive(Debug)]
pub struct TrimNotNull;

impl NotNullImplementor for TrimNotNull {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let flag = translator.translate(call.operands[0].as_ref(), NullAs::NotPossible)?;
        let (leading, trailing) = match &flag {
            Expr::Const(Value::Int(1), _) => (true, false),
            Expr::Const(Value::Int(2), _) => (false, true),
            _ => (true, true),
        };
        let chars = translator.translate(call.operands[1].as_ref(), null_as)?;
        let source = translator.translate(call.operands[2].as_ref(), null_as)?;
        let leading_const = Expr::Const(Value::Bool(leading), SqlType::new(TypeKind::Boolean));
        let trailing_const = Expr::Const(Value::Bool(trailing), SqlType::new(TypeKind::Boolean));
        Ok(Expr::method(None, "trim", vec![leading_const, trailing_const, source, chars]))
    }
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    reg.insert(SqlOperator::Trim, wrap(Arc::new(TrimNotNull), NullPolicy::Strict, false));
}
