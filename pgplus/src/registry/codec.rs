use std::{fmt, sync::Arc};
use time::{Date, PrimitiveDateTime, UtcDateTime};

use crate::{
    decode::{DecodeError, FromText},
    postgres::TypeId,
    types::{self, Interval, Point, Range},
    value::Value,
};

/// User provided decoder.
pub type DecodeFn = Arc<dyn Fn(&str) -> Result<Value, DecodeError> + Send + Sync>;

/// Text decoder bound to a type oid in [`Registry`][super::Registry].
#[derive(Clone)]
pub enum Codec {
    /// Pass the raw text through as [`Value::Text`].
    Text,
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    /// `numeric` kept as text, without losing precision.
    Numeric,
    /// `numeric` read as `f64`, trading precision for a number.
    NumericAsFloat,
    Date,
    /// Naive `timestamp` as is.
    Timestamp,
    /// Naive `timestamp` read as an UTC instant.
    TimestampAsUtc,
    Timestamptz,
    /// `point`, text that is not a point decode to [`Value::Null`].
    Point,
    Interval,
    /// Range decoding each present side with the element codec.
    Range(Arc<Codec>),
    Custom(DecodeFn),
}

impl Codec {
    /// Codec the driver use for a builtin type when nothing is overridden.
    ///
    /// Returns [`None`] for types the driver would pass through as text.
    pub fn builtin(ty: TypeId) -> Option<Codec> {
        Some(match ty {
            TypeId::Bool => Codec::Bool,
            TypeId::Int2 => Codec::Int2,
            TypeId::Int4 => Codec::Int4,
            TypeId::Int8 => Codec::Int8,
            TypeId::Float4 => Codec::Float4,
            TypeId::Float8 => Codec::Float8,
            TypeId::Numeric => Codec::Numeric,
            TypeId::Text => Codec::Text,
            TypeId::Date => Codec::Date,
            TypeId::Timestamp => Codec::Timestamp,
            TypeId::Timestamptz => Codec::Timestamptz,
            _ => return None,
        })
    }

    /// Range codec over `element`.
    pub fn range(element: Codec) -> Codec {
        Codec::Range(Arc::new(element))
    }

    /// Wrap a closure as [`Codec::Custom`].
    pub fn custom<F>(f: F) -> Codec
    where
        F: Fn(&str) -> Result<Value, DecodeError> + Send + Sync + 'static,
    {
        Codec::Custom(Arc::new(f))
    }

    /// Decode raw text.
    pub fn decode(&self, text: &str) -> Result<Value, DecodeError> {
        match self {
            Codec::Text => Ok(Value::Text(text.to_owned())),
            Codec::Bool => bool::from_text(text).map(Value::Bool),
            Codec::Int2 => i16::from_text(text).map(Value::Int2),
            Codec::Int4 => i32::from_text(text).map(Value::Int4),
            Codec::Int8 => i64::from_text(text).map(Value::Int8),
            Codec::Float4 => f32::from_text(text).map(Value::Float4),
            Codec::Float8 => f64::from_text(text).map(Value::Float8),
            Codec::Numeric => Ok(Value::Numeric(text.to_owned())),
            Codec::NumericAsFloat => f64::from_text(text)
                .map_err(|_| DecodeError::invalid("numeric", text))
                .map(Value::Float8),
            Codec::Date => infinity(text)
                .map_or_else(|| Date::from_text(text).map(Value::Date), Ok),
            Codec::Timestamp => infinity(text)
                .map_or_else(|| PrimitiveDateTime::from_text(text).map(Value::LocalTimestamp), Ok),
            Codec::TimestampAsUtc => infinity(text)
                .map_or_else(|| types::timestamp_as_utc(text).map(Value::Timestamp), Ok),
            Codec::Timestamptz => infinity(text)
                .map_or_else(|| UtcDateTime::from_text(text).map(Value::Timestamptz), Ok),
            Codec::Point => Ok(Point::from_text(text).map_or(Value::Null, Value::Point)),
            Codec::Interval => Interval::from_text(text).map(Value::Interval),
            Codec::Range(element) => Range::from_text(text, |e| element.decode(e))
                .map(|range| Value::Range(Box::new(range))),
            Codec::Custom(f) => f(text),
        }
    }
}

/// `infinity` and `-infinity` special date/time values.
fn infinity(text: &str) -> Option<Value> {
    match text {
        "infinity" => Some(Value::Infinity),
        "-infinity" => Some(Value::NegInfinity),
        _ => None,
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Range(element) => f.debug_tuple("Range").field(element).finish(),
            Codec::Custom(_) => f.write_str("Custom(..)"),
            Codec::Text => f.write_str("Text"),
            Codec::Bool => f.write_str("Bool"),
            Codec::Int2 => f.write_str("Int2"),
            Codec::Int4 => f.write_str("Int4"),
            Codec::Int8 => f.write_str("Int8"),
            Codec::Float4 => f.write_str("Float4"),
            Codec::Float8 => f.write_str("Float8"),
            Codec::Numeric => f.write_str("Numeric"),
            Codec::NumericAsFloat => f.write_str("NumericAsFloat"),
            Codec::Date => f.write_str("Date"),
            Codec::Timestamp => f.write_str("Timestamp"),
            Codec::TimestampAsUtc => f.write_str("TimestampAsUtc"),
            Codec::Timestamptz => f.write_str("Timestamptz"),
            Codec::Point => f.write_str("Point"),
            Codec::Interval => f.write_str("Interval"),
        }
    }
}
