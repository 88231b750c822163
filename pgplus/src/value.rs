//! Dynamically typed decoded value.
use time::{Date, PrimitiveDateTime, UtcDateTime};

use crate::{
    encode::{Encode, Encoded},
    postgres::{Oid, TypeId},
    types::{self, Interval, Point, Range},
};

/// Value produced by [`Registry`][crate::Registry] decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value, also produced for point text that is not a point.
    Null,
    Bool(bool),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Float8(f64),
    /// Arbitrary precision `numeric`, kept as text.
    Numeric(String),
    Text(String),
    Date(Date),
    /// Naive `timestamp` read as an UTC instant.
    Timestamp(UtcDateTime),
    /// Naive `timestamp` as is.
    LocalTimestamp(PrimitiveDateTime),
    Timestamptz(UtcDateTime),
    /// `infinity` date or timestamp.
    Infinity,
    /// `-infinity` date or timestamp.
    NegInfinity,
    Point(Point),
    Interval(Interval),
    Range(Box<Range<Value>>),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the builtin type of this value, if known.
    ///
    /// Range type is derived from its present elements.
    pub fn type_id(&self) -> Option<TypeId> {
        Some(match self {
            Value::Null | Value::Infinity | Value::NegInfinity => return None,
            Value::Bool(_) => TypeId::Bool,
            Value::Int2(_) => TypeId::Int2,
            Value::Int4(_) => TypeId::Int4,
            Value::Int8(_) => TypeId::Int8,
            Value::Float4(_) => TypeId::Float4,
            Value::Float8(_) => TypeId::Float8,
            Value::Numeric(_) => TypeId::Numeric,
            Value::Text(_) => TypeId::Text,
            Value::Date(_) => TypeId::Date,
            Value::Timestamp(_) | Value::LocalTimestamp(_) => TypeId::Timestamp,
            Value::Timestamptz(_) => TypeId::Timestamptz,
            Value::Point(_) => TypeId::Point,
            Value::Interval(_) => TypeId::Interval,
            Value::Range(range) => {
                let element = [&range.start, &range.end]
                    .into_iter()
                    .flatten()
                    .find_map(Value::type_id)?;
                return element.range_of();
            },
        })
    }

    /// Returns the oid of [`Value::type_id`], `0` (unspecified) when unknown.
    pub fn oid(&self) -> Oid {
        self.type_id().map(TypeId::oid).unwrap_or(0)
    }

    /// Format to postgres text input, [`None`] for [`Value::Null`].
    pub fn to_text(&self) -> Option<String> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(true) => "t".into(),
            Value::Bool(false) => "f".into(),
            Value::Int2(v) => itoa::Buffer::new().format(*v).into(),
            Value::Int4(v) => itoa::Buffer::new().format(*v).into(),
            Value::Int8(v) => itoa::Buffer::new().format(*v).into(),
            Value::Float4(v) => v.to_string(),
            Value::Float8(v) => v.to_string(),
            Value::Numeric(v) | Value::Text(v) => v.clone(),
            Value::Date(v) => types::format_date(v),
            Value::Timestamp(v) => types::format_timestamp(&PrimitiveDateTime::new(v.date(), v.time())),
            Value::LocalTimestamp(v) => types::format_timestamp(v),
            Value::Timestamptz(v) => types::format_utc(v),
            Value::Infinity => "infinity".into(),
            Value::NegInfinity => "-infinity".into(),
            Value::Point(v) => v.to_text(),
            Value::Interval(v) => v.to_text(),
            Value::Range(range) => {
                let start = range.start.as_ref().and_then(Value::to_text);
                let end = range.end.as_ref().and_then(Value::to_text);
                types::write_range(range.bounds, start.as_deref(), end.as_deref())
            },
        })
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int2(v) => Some(v.into()),
            Value::Int4(v) => Some(v.into()),
            Value::Int8(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float4(v) => Some(v.into()),
            Value::Float8(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) | Value::Numeric(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Value::Point(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_interval(&self) -> Option<&Interval> {
        match self {
            Value::Interval(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&Range<Value>> {
        match self {
            Value::Range(v) => Some(v),
            _ => None,
        }
    }
}

impl Encode<'static> for Value {
    fn encode(self) -> Encoded<'static> {
        let oid = self.oid();
        match self.to_text() {
            Some(text) => Encoded::new(text, oid),
            None => Encoded::null(oid),
        }
    }
}

macro_rules! from {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value.into())
            }
        }
    )*};
}

from! {
    bool => Bool,
    i16 => Int2,
    i32 => Int4,
    i64 => Int8,
    f32 => Float4,
    f64 => Float8,
    String => Text,
    &str => Text,
    Date => Date,
    PrimitiveDateTime => LocalTimestamp,
    UtcDateTime => Timestamptz,
    Point => Point,
    Interval => Interval,
    Range<Value> => Range,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::Bounds;

    #[test]
    fn range_type_follow_element() {
        let range = Value::from(Range::new(None, Some(Value::Int8(5)), Bounds::Inclusive));
        assert_eq!(range.type_id(), Some(TypeId::Int8Range));
        assert_eq!(range.to_text().as_deref(), Some("[,5]"));

        let range = Value::from(Range::<Value>::new(None, None, Bounds::Exclusive));
        assert_eq!(range.oid(), 0);
    }

    #[test]
    fn encode_value() {
        let e = Value::from(Point::new(1.0, 2.5)).encode();
        assert_eq!((e.as_str(), e.oid()), ("(1,2.5)", 600));

        let e = Value::from(None::<i32>).encode();
        assert!(e.is_null());

        let e = Value::from("a,b").encode();
        assert_eq!(e.as_str(), "a,b");

        let range = Range::new(Some(Value::from("a,b")), Some(Value::from("c")), Bounds::default());
        assert_eq!(Value::from(range).to_text().as_deref(), Some(r#"["a,b",c)"#));
    }
}
