
/// Postgres object identifier.
///
/// The oid type is implemented as an unsigned four-byte integer.
///
/// <https://www.postgresql.org/docs/current/datatype-oid.html>
pub type Oid = u32;

/// A type that have corresponding postgres oid.
pub trait PgType {
    const OID: Oid;
}

/// A type that can be the element of a builtin postgres range type.
pub trait RangeElement: PgType {
    /// Oid of the range type over `Self`.
    const RANGE_OID: Oid;
}

impl<T> PgType for &T where T: PgType + ?Sized {
    const OID: Oid = T::OID;
}

macro_rules! oid {
    ($ty:ty, $oid:literal $(, $doc:literal)? ) => {
        impl PgType for $ty {
            $(#[doc = $doc])?
            const OID: Oid = $oid;
        }
    };
    ($ty:ty, $oid:literal, $doc:literal, range $range:literal) => {
        oid!($ty, $oid, $doc);
        impl RangeElement for $ty {
            const RANGE_OID: Oid = $range;
        }
    };
}

oid!(bool, 16);
oid!(i64, 20, "`int8` ~18 digit integer, 8-byte storage", range 3926);
oid!(i16, 21, "`int2` -32 thousand to 32 thousand, 2-byte storage");
oid!(i32, 23, "`int4` -2 billion to 2 billion integer, 4-byte storage", range 3904);
oid!(str, 25, "`text` variable-length string, no limit specified");
oid!(String, 25, "`text` variable-length string, no limit specified");
oid!(f32, 700, "`float4` single-precision floating point number, 4-byte storage");
oid!(f64, 701, "`float8` double-precision floating point number, 8-byte storage");
oid!(time::Date, 1082, "`date` date", range 3912);
oid!(time::PrimitiveDateTime, 1114, "`timestamp` date and time", range 3908);
oid!(time::UtcDateTime, 1184, "`timestamptz` date and time with timezone", range 3910);

/// Builtin postgres types known to the registry.
///
/// Anything outside this table is passed through as raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeId {
    Bool,
    Int8,
    Int2,
    Int4,
    Text,
    Point,
    Float4,
    Float8,
    Date,
    Timestamp,
    Timestamptz,
    Interval,
    Numeric,
    Int4Range,
    NumRange,
    TsRange,
    TstzRange,
    DateRange,
    Int8Range,
}

// <https://github.com/postgres/postgres/blob/master/src/include/catalog/pg_type.dat>
// <https://github.com/postgres/postgres/blob/master/src/include/catalog/pg_range.dat>

impl TypeId {
    /// Every builtin type, in oid order.
    pub const ALL: [TypeId; 19] = [
        TypeId::Bool,
        TypeId::Int8,
        TypeId::Int2,
        TypeId::Int4,
        TypeId::Text,
        TypeId::Point,
        TypeId::Float4,
        TypeId::Float8,
        TypeId::Date,
        TypeId::Timestamp,
        TypeId::Timestamptz,
        TypeId::Interval,
        TypeId::Numeric,
        TypeId::Int4Range,
        TypeId::NumRange,
        TypeId::TsRange,
        TypeId::TstzRange,
        TypeId::DateRange,
        TypeId::Int8Range,
    ];

    /// Returns the corresponding [`TypeId`] if the oid is in the builtin table.
    pub const fn from_oid(oid: Oid) -> Option<TypeId> {
        Some(match oid {
            16 => TypeId::Bool,
            20 => TypeId::Int8,
            21 => TypeId::Int2,
            23 => TypeId::Int4,
            25 => TypeId::Text,
            600 => TypeId::Point,
            700 => TypeId::Float4,
            701 => TypeId::Float8,
            1082 => TypeId::Date,
            1114 => TypeId::Timestamp,
            1184 => TypeId::Timestamptz,
            1186 => TypeId::Interval,
            1700 => TypeId::Numeric,
            3904 => TypeId::Int4Range,
            3906 => TypeId::NumRange,
            3908 => TypeId::TsRange,
            3910 => TypeId::TstzRange,
            3912 => TypeId::DateRange,
            3926 => TypeId::Int8Range,
            _ => return None,
        })
    }

    /// Returns the postgres oid.
    pub const fn oid(self) -> Oid {
        match self {
            TypeId::Bool => 16,
            TypeId::Int8 => 20,
            TypeId::Int2 => 21,
            TypeId::Int4 => 23,
            TypeId::Text => 25,
            TypeId::Point => 600,
            TypeId::Float4 => 700,
            TypeId::Float8 => 701,
            TypeId::Date => 1082,
            TypeId::Timestamp => 1114,
            TypeId::Timestamptz => 1184,
            TypeId::Interval => 1186,
            TypeId::Numeric => 1700,
            TypeId::Int4Range => 3904,
            TypeId::NumRange => 3906,
            TypeId::TsRange => 3908,
            TypeId::TstzRange => 3910,
            TypeId::DateRange => 3912,
            TypeId::Int8Range => 3926,
        }
    }

    /// Returns the element type if `self` is a range type.
    pub const fn range_element(self) -> Option<TypeId> {
        Some(match self {
            TypeId::Int4Range => TypeId::Int4,
            TypeId::Int8Range => TypeId::Int8,
            TypeId::NumRange => TypeId::Numeric,
            TypeId::TsRange => TypeId::Timestamp,
            TypeId::TstzRange => TypeId::Timestamptz,
            TypeId::DateRange => TypeId::Date,
            _ => return None,
        })
    }

    /// Returns the range type over `self`, if postgres has a builtin one.
    pub const fn range_of(self) -> Option<TypeId> {
        Some(match self {
            TypeId::Int4 => TypeId::Int4Range,
            TypeId::Int8 => TypeId::Int8Range,
            TypeId::Numeric => TypeId::NumRange,
            TypeId::Timestamp => TypeId::TsRange,
            TypeId::Timestamptz => TypeId::TstzRange,
            TypeId::Date => TypeId::DateRange,
            _ => return None,
        })
    }

    /// Returns the postgres type name.
    pub const fn name(self) -> &'static str {
        match self {
            TypeId::Bool => "bool",
            TypeId::Int8 => "int8",
            TypeId::Int2 => "int2",
            TypeId::Int4 => "int4",
            TypeId::Text => "text",
            TypeId::Point => "point",
            TypeId::Float4 => "float4",
            TypeId::Float8 => "float8",
            TypeId::Date => "date",
            TypeId::Timestamp => "timestamp",
            TypeId::Timestamptz => "timestamptz",
            TypeId::Interval => "interval",
            TypeId::Numeric => "numeric",
            TypeId::Int4Range => "int4range",
            TypeId::NumRange => "numrange",
            TypeId::TsRange => "tsrange",
            TypeId::TstzRange => "tstzrange",
            TypeId::DateRange => "daterange",
            TypeId::Int8Range => "int8range",
        }
    }
}

impl From<TypeId> for Oid {
    fn from(value: TypeId) -> Self {
        value.oid()
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn oid_table_is_bijective() {
        for oid in 0..5000 {
            if let Some(ty) = TypeId::from_oid(oid) {
                assert_eq!(ty.oid(), oid, "{ty}");
            }
        }
    }

    #[test]
    fn range_pairs() {
        assert_eq!(TypeId::Int4Range.range_element(), Some(TypeId::Int4));
        assert_eq!(TypeId::Int4.range_of(), Some(TypeId::Int4Range));
        assert_eq!(TypeId::Point.range_of(), None);
        assert_eq!(<i32 as RangeElement>::RANGE_OID, TypeId::Int4Range.oid());
        assert_eq!(<time::Date as RangeElement>::RANGE_OID, TypeId::DateRange.oid());
    }
}
