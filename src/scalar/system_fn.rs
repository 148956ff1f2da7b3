//! `SystemFunctionImplementor` (§4.C): niladic context functions. Every
//! result is a guaranteed-non-null constant or runtime-clock call, so this
//! answers the `IS [NOT] NULL` shortcuts directly instead of going through
//! `NullPolicy`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::{Call, NullAs};
use crate::config::ImpTableConfig;
use crate::error::LowerResult;
use crate::expr::{self, Expr, Value};
use crate::operators::SqlOperator;
use crate::scalar::CallImplementor;
use crate::translator::Translator;
use crate::types::{SqlType, TypeKind};

#[derive(Debug)]
enum SystemValue {
    Literal(String),
    HelperCall(&'static str),
}

#[derive(Debug)]
pub struct SystemFunctionImplementor {
    value: SystemValue,
}

impl CallImplementor for SystemFunctionImplementor {
    fn implement(&self, _translator: &dyn Translator, _call: &Call, null_as: NullAs) -> LowerResult<Expr> {
        match null_as {
            NullAs::IsNull => return Ok(expr::false_expr()),
            NullAs::IsNotNull => return Ok(expr::true_expr()),
            _ => {}
        }
        let e = match &self.value {
            SystemValue::Literal(s) => Expr::Const(Value::Str(s.as_str().into()), SqlType::new(TypeKind::Varchar)),
            SystemValue::HelperCall(name) => Expr::method(None, *name, vec![]),
        };
        Ok(e)
    }
}

fn literal(s: impl Into<String>) -> Arc<dyn CallImplementor> {
    Arc::new(SystemFunctionImplementor { value: SystemValue::Literal(s.into()) })
}

fn helper(name: &'static str) -> Arc<dyn CallImplementor> {
    Arc::new(SystemFunctionImplementor { value: SystemValue::HelperCall(name) })
}

pub fn register(reg: &mut HashMap<SqlOperator, Arc<dyn CallImplementor>>, config: &ImpTableConfig) {
    reg.insert(SqlOperator::CurrentUser, literal("sa"));
    reg.insert(SqlOperator::SessionUser, literal("sa"));
    reg.insert(SqlOperator::User, literal("sa"));
    reg.insert(SqlOperator::SystemUser, literal(config.system_user.clone()));
    reg.insert(SqlOperator::CurrentPath, literal(""));
    reg.insert(SqlOperator::CurrentRole, literal(""));
    reg.insert(SqlOperator::CurrentTime, helper("currentTime"));
    reg.insert(SqlOperator::CurrentDate, helper("currentDate"));
    reg.insert(SqlOperator::CurrentTimestamp, helper("currentTimestamp"));
    reg.insert(SqlOperator::LocalTime, helper("localTime"));
    reg.insert(SqlOperator::LocalTimestamp, helper("localTimestamp"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::LeafTranslator;
    use crate::types::SqlType;

    #[test]
    fn system_user_reads_from_config() {
        let translator = LeafTranslator;
        let config = ImpTableConfig { system_user: "alice".to_string(), explicit_or_three_valued_logic: true };
        let mut reg = HashMap::new();
        register(&mut reg, &config);
        let call = Call::new(SqlOperator::SystemUser, vec![], SqlType::new(TypeKind::Varchar));
        let e = reg[&SqlOperator::SystemUser].implement(&translator, &call, NullAs::NotPossible).unwrap();
        assert_eq!(e, Expr::Const(Value::Str("alice".into()), SqlType::new(TypeKind::Varchar)));
    }

    #[test]
    fn system_functions_are_never_null() {
        let translator = LeafTranslator;
        let config = ImpTableConfig::default();
        let mut reg = HashMap::new();
        register(&mut reg, &config);
        let call = Call::new(SqlOperator::CurrentUser, vec![], SqlType::new(TypeKind::Varchar));
        let e = reg[&SqlOperator::CurrentUser].implement(&translator, &call, NullAs::IsNull).unwrap();
        assert_eq!(e, expr::false_expr());
    }
}
