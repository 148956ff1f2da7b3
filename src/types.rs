//! The SQL type system the rest of the crate reasons about.
//!
//! This is a deliberately small stand-in for the planner's real type
//! factory (out of scope per the purpose statement): just enough structure
//! to support harmonization, cast-elision, and the primitive/boxed
//! distinction the `NullAs` machinery depends on.

use std::fmt;

/// The shape of a SQL value, independent of nullability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKind {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Decimal,
    Real,
    Double,
    Varchar,
    Char,
    Date,
    Time,
    Timestamp,
    Interval,
    Array,
    Map,
    Row,
    Any,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeKind::Boolean => "BOOLEAN",
            TypeKind::TinyInt => "TINYINT",
            TypeKind::SmallInt => "SMALLINT",
            TypeKind::Int => "INTEGER",
            TypeKind::BigInt => "BIGINT",
            TypeKind::Decimal => "DECIMAL",
            TypeKind::Real => "REAL",
            TypeKind::Double => "DOUBLE",
            TypeKind::Varchar => "VARCHAR",
            TypeKind::Char => "CHAR",
            TypeKind::Date => "DATE",
            TypeKind::Time => "TIME",
            TypeKind::Timestamp => "TIMESTAMP",
            TypeKind::Interval => "INTERVAL",
            TypeKind::Array => "ARRAY",
            TypeKind::Map => "MAP",
            TypeKind::Row => "ROW",
            TypeKind::Any => "ANY",
        };
        f.write_str(s)
    }
}

impl TypeKind {
    /// Numeric types ordered from narrowest to widest, used by [`least_restrictive`].
    const NUMERIC_RANK: &'static [TypeKind] = &[
        TypeKind::TinyInt,
        TypeKind::SmallInt,
        TypeKind::Int,
        TypeKind::BigInt,
        TypeKind::Decimal,
        TypeKind::Real,
        TypeKind::Double,
    ];

    fn numeric_rank(self) -> Option<usize> {
        Self::NUMERIC_RANK.iter().position(|k| *k == self)
    }

    pub fn is_numeric(self) -> bool {
        self.numeric_rank().is_some()
    }

    pub fn is_character(self) -> bool {
        matches!(self, TypeKind::Varchar | TypeKind::Char)
    }

    pub fn is_datetime(self) -> bool {
        matches!(self, TypeKind::Date | TypeKind::Time | TypeKind::Timestamp)
    }
}

/// A nameable SQL type: a [`TypeKind`] plus nullability and, for DECIMAL,
/// precision/scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SqlType {
    pub kind: TypeKind,
    pub nullable: bool,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl SqlType {
    pub const fn new(kind: TypeKind) -> Self {
        SqlType { kind, nullable: false, precision: None, scale: None }
    }

    pub const fn nullable(kind: TypeKind) -> Self {
        SqlType { kind, nullable: true, precision: None, scale: None }
    }

    pub fn with_nullable(self, nullable: bool) -> Self {
        SqlType { nullable, ..self }
    }

    pub fn decimal(precision: u32, scale: u32) -> Self {
        SqlType { kind: TypeKind::Decimal, nullable: false, precision: Some(precision), scale: Some(scale) }
    }

    /// Equality ignoring nullability: used by `CastOptimizedImplementor` to
    /// decide whether a cast is a no-op (§4.C).
    pub fn equals_sans_nullability(&self, other: &SqlType) -> bool {
        self.kind == other.kind && self.precision == other.precision && self.scale == other.scale
    }

    /// Whether values of this type are represented unboxed (no null channel)
    /// absent the `nullable` flag. Mirrors the Primitive/Box/Object split in
    /// Design Note "Boxed-vs-primitive dichotomy".
    pub fn is_primitive_representable(&self) -> bool {
        !self.nullable
            && matches!(
                self.kind,
                TypeKind::Boolean
                    | TypeKind::TinyInt
                    | TypeKind::SmallInt
                    | TypeKind::Int
                    | TypeKind::BigInt
                    | TypeKind::Real
                    | TypeKind::Double
            )
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let (Some(p), Some(s)) = (self.precision, self.scale) {
            write!(f, "({p}, {s})")?;
        }
        if self.nullable {
            f.write_str(" NULL")?;
        }
        Ok(())
    }
}

/// Least-restrictive common type of two operand types, used by `harmonize`
/// (§4.B). Returns `None` when no common type exists (e.g. INTERVAL × INT),
/// in which case the caller leaves operands unchanged.
pub fn least_restrictive(a: &SqlType, b: &SqlType) -> Option<SqlType> {
    if a.kind == b.kind {
        return Some(SqlType {
            kind: a.kind,
            nullable: a.nullable || b.nullable,
            precision: a.precision.max(b.precision),
            scale: a.scale.max(b.scale),
        });
    }
    if a.kind == TypeKind::Any {
        return Some(*b);
    }
    if b.kind == TypeKind::Any {
        return Some(*a);
    }
    if a.kind.is_numeric() && b.kind.is_numeric() {
        let ra = a.kind.numeric_rank().unwrap();
        let rb = b.kind.numeric_rank().unwrap();
        let wider = if ra >= rb { a.kind } else { b.kind };
        return Some(SqlType { kind: wider, nullable: a.nullable || b.nullable, precision: None, scale: None });
    }
    if a.kind.is_character() && b.kind.is_character() {
        return Some(SqlType::new(TypeKind::Varchar).with_nullable(a.nullable || b.nullable));
    }
    None
}

/// Apply `least_restrictive` across a whole operand list. Operands that
/// cannot be harmonized with the rest (no common type) are left as-is,
/// matching the per-pair fallback described in §4.B.
pub fn harmonize_types(types: &[SqlType]) -> Vec<SqlType> {
    let Some(common) = types.iter().copied().reduce(|acc, t| least_restrictive(&acc, &t).unwrap_or(acc))
    else {
        return types.to_vec();
    };
    types
        .iter()
        .map(|t| match least_restrictive(t, &common) {
            Some(_) if t.kind == common.kind || common.kind == TypeKind::Any => {
                common.with_nullable(t.nullable)
            }
            _ => *t,
        })
        .collect()
}
