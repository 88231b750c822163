use std::{fmt, str::Utf8Error, string::FromUtf8Error};

/// An error when decoding column value.
pub enum DecodeError {
    /// Postgres return non utf8 string.
    Utf8(Utf8Error),
    /// Oid requested missmatch.
    OidMissmatch,
    /// Column is null.
    Null,
    /// Text is not a valid representation of `ty`.
    Invalid {
        ty: &'static str,
        text: String,
    },
    /// Error from user registered decoder.
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl DecodeError {
    /// Create [`DecodeError::Invalid`] by copying `text`.
    pub fn invalid(ty: &'static str, text: &str) -> DecodeError {
        DecodeError::Invalid { ty, text: text.to_owned() }
    }

    /// Wrap any error as [`DecodeError::Custom`].
    pub fn custom(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> DecodeError {
        DecodeError::Custom(err.into())
    }
}

impl std::error::Error for DecodeError { }

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failed to decode value, ")?;
        match self {
            Self::Utf8(e) => write!(f, "{e}"),
            Self::OidMissmatch => write!(f, "data type missmatch"),
            Self::Null => write!(f, "unexpected NULL value"),
            Self::Invalid { ty, text } => write!(f, "invalid {ty}: {text:?}"),
            Self::Custom(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Debug for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

macro_rules! from {
    (<$ty:ty>$pat:pat => $body:expr) => {
        impl From<$ty> for DecodeError {
            fn from($pat: $ty) -> Self {
                $body
            }
        }
    };
}

from!(<Utf8Error>e => Self::Utf8(e));
from!(<FromUtf8Error>e => Self::Utf8(e.utf8_error()));
