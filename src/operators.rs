//! The SQL operator and aggregation symbol vocabulary the registries (§4.C,
//! §4.D) are keyed by.

use std::fmt;

/// Every scalar SQL operator the registry knows how to lower. Grouped the
/// way §4.C groups the implementor families that handle them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SqlOperator {
    // Arithmetic (BinaryImplementor)
    Plus,
    Minus,
    Multiply,
    Divide,
    Mod,
    UnaryMinus,
    UnaryPlus,

    // Bitwise (BinaryImplementor / UnaryImplementor)
    BitAnd,
    BitOr,
    BitXor,
    BitNot,

    // Comparison (BinaryImplementor, with backup-method fallback)
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    IsDistinctFrom,
    IsNotDistinctFrom,

    // Boolean (NullPolicy::{And,Or,Not})
    And,
    Or,
    Not,

    // Null / truth tests (IsXxxImplementor)
    IsNull,
    IsNotNull,
    IsTrue,
    IsNotTrue,
    IsFalse,
    IsNotFalse,

    // CASE / CAST
    Case,
    Cast,
    Reinterpret,

    // Item access (ItemImplementor)
    Item,

    // Value constructors (ValueConstructorImplementor)
    ArrayValueConstructor,
    MapValueConstructor,
    RowConstructor,

    // String functions (MethodImplementor / MethodNameImplementor)
    Upper,
    Lower,
    Initcap,
    CharLength,
    OctetLength,
    Concat,
    Substring,
    Overlay,
    Position,
    Replace,
    Trim,
    Like,
    NotLike,
    Similar,

    // Numeric functions (MethodNameImplementor)
    Abs,
    Power,
    Sqrt,
    Exp,
    Ln,
    Log10,
    Floor,
    Ceil,
    Sign,
    Round,
    Truncate,

    // Datetime arithmetic (DatetimeArithmeticImplementor)
    DatetimePlusInterval,
    DatetimeMinusInterval,
    ExtractDatePart,

    // System functions (SystemFunctionImplementor)
    CurrentUser,
    SessionUser,
    User,
    SystemUser,
    CurrentPath,
    CurrentRole,
    CurrentTime,
    CurrentDate,
    CurrentTimestamp,
    LocalTime,
    LocalTimestamp,

    /// A function the planner has resolved to a user-defined implementor.
    /// See the `Dispatch API` (§4.E): lookups for this variant require the
    /// function to supply its own `CallImplementor`.
    UserDefinedFunction,
}

impl fmt::Display for SqlOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SqlOperator::Plus => "+",
            SqlOperator::Minus => "-",
            SqlOperator::Multiply => "*",
            SqlOperator::Divide => "/",
            SqlOperator::Mod => "MOD",
            SqlOperator::UnaryMinus => "-",
            SqlOperator::UnaryPlus => "+",
            SqlOperator::BitAnd => "&",
            SqlOperator::BitOr => "|",
            SqlOperator::BitXor => "#",
            SqlOperator::BitNot => "~",
            SqlOperator::Equals => "=",
            SqlOperator::NotEquals => "<>",
            SqlOperator::LessThan => "<",
            SqlOperator::LessThanOrEqual => "<=",
            SqlOperator::GreaterThan => ">",
            SqlOperator::GreaterThanOrEqual => ">=",
            SqlOperator::IsDistinctFrom => "IS DISTINCT FROM",
            SqlOperator::IsNotDistinctFrom => "IS NOT DISTINCT FROM",
            SqlOperator::And => "AND",
            SqlOperator::Or => "OR",
            SqlOperator::Not => "NOT",
            SqlOperator::IsNull => "IS NULL",
            SqlOperator::IsNotNull => "IS NOT NULL",
            SqlOperator::IsTrue => "IS TRUE",
            SqlOperator::IsNotTrue => "IS NOT TRUE",
            SqlOperator::IsFalse => "IS FALSE",
            SqlOperator::IsNotFalse => "IS NOT FALSE",
            SqlOperator::Case => "CASE",
            SqlOperator::Cast => "CAST",
            SqlOperator::Reinterpret => "REINTERPRET",
            SqlOperator::Item => "ITEM",
            SqlOperator::ArrayValueConstructor => "ARRAY",
            SqlOperator::MapValueConstructor => "MAP",
            SqlOperator::RowConstructor => "ROW",
            SqlOperator::Upper => "UPPER",
            SqlOperator::Lower => "LOWER",
            SqlOperator::Initcap => "INITCAP",
            SqlOperator::CharLength => "CHAR_LENGTH",
            SqlOperator::OctetLength => "OCTET_LENGTH",
            SqlOperator::Concat => "||",
            SqlOperator::Substring => "SUBSTRING",
            SqlOperator::Overlay => "OVERLAY",
            SqlOperator::Position => "POSITION",
            SqlOperator::Replace => "REPLACE",
            SqlOperator::Trim => "TRIM",
            SqlOperator::Like => "LIKE",
            SqlOperator::NotLike => "NOT LIKE",
            SqlOperator::Similar => "SIMILAR TO",
            SqlOperator::Abs => "ABS",
            SqlOperator::Power => "POWER",
            SqlOperator::Sqrt => "SQRT",
            SqlOperator::Exp => "EXP",
            SqlOperator::Ln => "LN",
            SqlOperator::Log10 => "LOG10",
            SqlOperator::Floor => "FLOOR",
            SqlOperator::Ceil => "CEIL",
            SqlOperator::Sign => "SIGN",
            SqlOperator::Round => "ROUND",
            SqlOperator::Truncate => "TRUNCATE",
            SqlOperator::DatetimePlusInterval => "DATETIME_PLUS",
            SqlOperator::DatetimeMinusInterval => "DATETIME_MINUS",
            SqlOperator::ExtractDatePart => "EXTRACT",
            SqlOperator::CurrentUser => "CURRENT_USER",
            SqlOperator::SessionUser => "SESSION_USER",
            SqlOperator::User => "USER",
            SqlOperator::SystemUser => "SYSTEM_USER",
            SqlOperator::CurrentPath => "CURRENT_PATH",
            SqlOperator::CurrentRole => "CURRENT_ROLE",
            SqlOperator::CurrentTime => "CURRENT_TIME",
            SqlOperator::CurrentDate => "CURRENT_DATE",
            SqlOperator::CurrentTimestamp => "CURRENT_TIMESTAMP",
            SqlOperator::LocalTime => "LOCALTIME",
            SqlOperator::LocalTimestamp => "LOCALTIMESTAMP",
            SqlOperator::UserDefinedFunction => "<UDF>",
        };
        f.write_str(s)
    }
}

/// Every aggregation symbol the registry knows how to lower, plain and
/// windowed (§4.D, §4.G).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Aggregation {
    Count,
    Sum,
    Sum0,
    Min,
    Max,
    SingleValue,

    // Window-only symbols (§4.G); a handful (Count) double as plain
    // aggregates and are listed above instead.
    Rank,
    DenseRank,
    RowNumber,
    FirstValue,
    LastValue,
    Lead,
    Lag,
    Ntile,

    /// A user-defined aggregate; requires `ImplementableAggFunction` at the
    /// dispatch boundary (§4.E).
    UserDefined(String),
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &str = match self {
            Aggregation::Count => "COUNT",
            Aggregation::Sum => "SUM",
            Aggregation::Sum0 => "SUM0",
            Aggregation::Min => "MIN",
            Aggregation::Max => "MAX",
            Aggregation::SingleValue => "SINGLE_VALUE",
            Aggregation::Rank => "RANK",
            Aggregation::DenseRank => "DENSE_RANK",
            Aggregation::RowNumber => "ROW_NUMBER",
            Aggregation::FirstValue => "FIRST_VALUE",
            Aggregation::LastValue => "LAST_VALUE",
            Aggregation::Lead => "LEAD",
            Aggregation::Lag => "LAG",
            Aggregation::Ntile => "NTILE",
            Aggregation::UserDefined(name) => name,
        };
        f.write_str(s)
    }
}
