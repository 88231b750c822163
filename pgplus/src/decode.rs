//! Column value decoding.
//!
//! - [`Decode`] construct a type from a [`Column`], checking its oid
//! - [`FromText`] construct a type from raw postgres text output
use crate::column::Column;

mod error;

pub use error::DecodeError;

/// Type that can be decoded from column value.
pub trait Decode: Sized {
    /// Construct self from a column.
    fn decode(col: Column) -> Result<Self, DecodeError>;
}

/// Type that can be parsed from postgres text output.
pub trait FromText: Sized {
    /// Parse self from text.
    fn from_text(text: &str) -> Result<Self, DecodeError>;
}

/// Implement [`Decode`] by checking [`PgType::OID`] then delegating to [`FromText`].
macro_rules! decode_text {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::decode::Decode for $ty {
            fn decode(col: $crate::column::Column) -> Result<Self, $crate::decode::DecodeError> {
                if col.oid() != <$ty as $crate::postgres::PgType>::OID {
                    return Err($crate::decode::DecodeError::OidMissmatch);
                }
                <$ty as $crate::decode::FromText>::from_text(col.try_text()?)
            }
        }
    )*};
}

pub(crate) use decode_text;

impl Decode for Column {
    fn decode(col: Column) -> Result<Self, DecodeError> {
        Ok(col)
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(col: Column) -> Result<Self, DecodeError> {
        match col.is_null() {
            true => Ok(None),
            false => col.decode().map(Some),
        }
    }
}

impl Decode for () {
    fn decode(_: Column) -> Result<Self, DecodeError> {
        Ok(())
    }
}

impl FromText for bool {
    fn from_text(text: &str) -> Result<Self, DecodeError> {
        match text {
            "t" | "true" => Ok(true),
            "f" | "false" => Ok(false),
            _ => Err(DecodeError::invalid("bool", text)),
        }
    }
}

macro_rules! from_str {
    ($($ty:ty => $name:literal),*) => {$(
        impl FromText for $ty {
            fn from_text(text: &str) -> Result<Self, DecodeError> {
                text.parse().map_err(|_| DecodeError::invalid($name, text))
            }
        }
    )*};
}

// float parsing accept `NaN`, `Infinity` and `-Infinity` as postgres output them
from_str!(i16 => "int2", i32 => "int4", i64 => "int8", f32 => "float4", f64 => "float8");

impl FromText for String {
    fn from_text(text: &str) -> Result<Self, DecodeError> {
        Ok(text.to_owned())
    }
}

decode_text!(bool, i16, i32, i64, f32, f64, String);

#[cfg(test)]
mod test {
    use super::*;
    use crate::postgres::TypeId;

    #[test]
    fn decode_scalar() {
        let col = Column::from_text("id", TypeId::Int4, "420");
        assert_eq!(col.decode::<i32>().unwrap(), 420);

        let col = Column::from_text("ok", TypeId::Bool, "t");
        assert!(col.decode::<bool>().unwrap());

        let col = Column::from_text("f", TypeId::Float8, "-Infinity");
        assert_eq!(col.decode::<f64>().unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn decode_errors() {
        let col = Column::from_text("id", TypeId::Int8, "420");
        assert!(matches!(col.decode::<i32>(), Err(DecodeError::OidMissmatch)));

        let col = Column::null("id", TypeId::Int4);
        assert!(matches!(col.clone().decode::<i32>(), Err(DecodeError::Null)));
        assert_eq!(col.decode::<Option<i32>>().unwrap(), None);

        let col = Column::from_text("id", TypeId::Int4, "4x");
        let err = col.decode::<i32>().unwrap_err();
        assert_eq!(err.to_string(), "failed to decode value, invalid int4: \"4x\"");

        let col = Column::new("t", TypeId::Text, Some(bytes::Bytes::from_static(b"\xff")));
        assert!(matches!(col.decode::<String>(), Err(DecodeError::Utf8(_))));
    }
}
