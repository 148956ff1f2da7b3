//! `DatetimeArithmeticImplementor` (§4.C): `DATE/TIME/TIMESTAMP ± INTERVAL`
//! and `EXTRACT`. Intervals are represented as a millisecond count (§3); a
//! `TIME` result is wrapped modulo one day so time-of-day arithmetic rolls
//! over instead of overflowing.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs, NullPolicy};
use crate::error::LowerResult;
use crate::expr::{BinOpKind, Expr, Value};
use crate::operators::SqlOperator;
use crate::scalar::{wrap, CallImplementor, NotNullImplementor};
use crate::translator::Translator;
use crate::types::{SqlType, TypeKind};

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug)]
pub struct DatetimeArithmeticNotNull {
    op: BinOpKind,
}

impl NotNullImplementor for DatetimeArithmeticNotNull {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let dt = translator.translate(call.operands[0].as_ref(), null_as)?;
        let mut interval = translator.translate(call.operands[1].as_ref(), null_as)?;
        if call.result_type.kind == TypeKind::Date {
            let day_ms = Expr::Const(Value::Int(MILLIS_PER_DAY), SqlType::new(TypeKind::BigInt));
            interval = Expr::BinOp(BinOpKind::Div, Box::new(interval), Box::new(day_ms));
        }
        let sum = Expr::BinOp(self.op, Box::new(dt), Box::new(interval));
        if call.result_type.kind == TypeKind::Time {
            let day_ms = Expr::Const(Value::Int(MILLIS_PER_DAY), SqlType::new(TypeKind::BigInt));
            return Ok(Expr::BinOp(BinOpKind::Mod, Box::new(sum), Box::new(day_ms)));
        }
        Ok(sum)
    }
}

#[derive(Debug)]
pub struct ExtractNotNull;

impl NotNullImplementor for ExtractNotNull {
    fn implement_not_null(&self, translator: &dyn Translator, call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        let part = translator.translate(call.operands[0].as_ref(), NullAs::NotPossible)?;
        let dt = translator.translate(call.operands[1].as_ref(), null_as)?;
        Ok(Expr::method(Some(dt), "extract", vec![part]))
    }
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>) {
    reg.insert(
        SqlOperator::DatetimePlusInterval,
        wrap(Arc::new(DatetimeArithmeticNotNull { op: BinOpKind::Add }), NullPolicy::Strict, false),
    );
    reg.insert(
        SqlOperator::DatetimeMinusInterval,
        wrap(Arc::new(DatetimeArithmeticNotNull { op: BinOpKind::Sub }), NullPolicy::Strict, false),
    );
    reg.insert(SqlOperator::ExtractDatePart, wrap(Arc::new(ExtractNotNull), NullPolicy::Strict, false));
}
