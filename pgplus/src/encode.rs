//! Parameter encoding.
//!
//! Values are encoded to postgres text input format. The text is meant to be
//! bound as a query parameter by the driver, it is **not** quoted as a sql
//! literal.
use std::{borrow::Cow, fmt};

use crate::postgres::{Oid, PgType};

/// Value that can be encoded to be bound to sql parameter.
pub trait Encode<'q> {
    fn encode(self) -> Encoded<'q>;
}

/// Postgres encoded value.
#[derive(Clone, PartialEq, Eq)]
pub struct Encoded<'q> {
    text: Cow<'q, str>,
    is_null: bool,
    oid: Oid,
}

impl<'q> Encoded<'q> {
    /// Create encoded value from its text representation.
    pub fn new(text: impl Into<Cow<'q, str>>, oid: Oid) -> Self {
        Self { text: text.into(), oid, is_null: false }
    }

    /// Create encoded `NULL`.
    pub fn null(oid: Oid) -> Self {
        Self { text: Cow::Borrowed(""), oid, is_null: true }
    }

    /// Returns the encoded text, empty for `NULL`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume self into the encoded text.
    pub fn into_text(self) -> Cow<'q, str> {
        self.text
    }

    /// Returns `true` if value is `NULL`.
    pub fn is_null(&self) -> bool {
        self.is_null
    }

    /// Returns the parameter type oid.
    pub fn oid(&self) -> Oid {
        self.oid
    }
}

impl fmt::Debug for Encoded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.is_null {
            true => write!(f, "NULL::{}", self.oid),
            false => write!(f, "{:?}::{}", self.text, self.oid),
        }
    }
}

impl<'q, T> Encode<'q> for Option<T>
where
    T: Encode<'q> + PgType,
{
    fn encode(self) -> Encoded<'q> {
        match self {
            Some(value) => value.encode(),
            None => Encoded::null(T::OID),
        }
    }
}

macro_rules! encode {
    (<$lf:tt>$ty:ty) => {
        impl<$lf> Encode<$lf> for &$lf $ty {
            fn encode(self) -> Encoded<$lf> {
                Encoded::new(&self[..], <$ty>::OID)
            }
        }
    };
    (itoa $ty:ty) => {
        impl Encode<'static> for $ty {
            fn encode(self) -> Encoded<'static> {
                Encoded::new(itoa::Buffer::new().format(self).to_owned(), Self::OID)
            }
        }
    };
    ($ty:ty) => {
        impl Encode<'static> for $ty {
            fn encode(self) -> Encoded<'static> {
                Encoded::new(self.to_string(), Self::OID)
            }
        }
    };
}

encode!(itoa i16);
encode!(itoa i32);
encode!(itoa i64);
encode!(f32);
encode!(f64);
encode!(<'a> str);
encode!(<'a> String);

impl Encode<'static> for bool {
    fn encode(self) -> Encoded<'static> {
        Encoded::new(if self { "t" } else { "f" }, Self::OID)
    }
}

impl Encode<'static> for String {
    fn encode(self) -> Encoded<'static> {
        Encoded::new(self, Self::OID)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_scalar() {
        let e = 420i32.encode();
        assert_eq!((e.as_str(), e.oid()), ("420", 23));

        let e = (-7i64).encode();
        assert_eq!((e.as_str(), e.oid()), ("-7", 20));

        let e = "foo".encode();
        assert_eq!((e.as_str(), e.oid()), ("foo", 25));

        let e = true.encode();
        assert_eq!(e.as_str(), "t");
    }

    #[test]
    fn encode_null() {
        let e = None::<i32>.encode();
        assert!(e.is_null());
        assert_eq!(e.oid(), 23);
        assert_eq!(format!("{e:?}"), "NULL::23");
    }
}
