//! Text format column as handed over by the query layer.
use bytes::Bytes;
use std::fmt;

use crate::{
    decode::{Decode, DecodeError},
    ext::FmtExt,
    postgres::Oid,
};

/// Postgres column in text format.
///
/// The query layer reads the column type oid from `RowDescription` and the raw
/// payload from `DataRow`, this type only carry those two with the field name.
#[derive(Clone)]
pub struct Column {
    oid: Oid,
    value: Option<Bytes>,
    name: String,
}

impl Column {
    /// Create new column from its raw payload, `None` for `NULL`.
    pub fn new(name: impl Into<String>, oid: impl Into<Oid>, value: Option<Bytes>) -> Self {
        Self { name: name.into(), oid: oid.into(), value }
    }

    /// Create non null column by copying `text`.
    pub fn from_text(name: impl Into<String>, oid: impl Into<Oid>, text: &str) -> Self {
        Self::new(name, oid, Some(Bytes::copy_from_slice(text.as_bytes())))
    }

    /// Create `NULL` column.
    pub fn null(name: impl Into<String>, oid: impl Into<Oid>) -> Self {
        Self::new(name, oid, None)
    }

    /// Returns column [`Oid`].
    pub const fn oid(&self) -> Oid {
        self.oid
    }

    /// Returns column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return `true` if value is NULL.
    pub const fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Extract the inner bytes as slice.
    ///
    /// Returns [`None`] if value is `NULL`.
    pub fn as_slice(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// Try to read the payload as utf8 text.
    ///
    /// Return [`DecodeError::Null`] if value is `NULL`.
    pub fn try_text(&self) -> Result<&str, DecodeError> {
        let bytes = self.value.as_deref().ok_or(DecodeError::Null)?;
        Ok(std::str::from_utf8(bytes)?)
    }

    /// Consume self into the inner [`Bytes`].
    pub fn into_value(self) -> Option<Bytes> {
        self.value
    }

    /// Try decode type using [`Decode`] implementation.
    pub fn decode<D: Decode>(self) -> Result<D, DecodeError> {
        D::decode(self)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Column");
        dbg.field("name", &self.name).field("oid", &self.oid);
        match &self.value {
            Some(value) => dbg.field("value", &value.lossy()),
            None => dbg.field("value", &format_args!("NULL")),
        };
        dbg.finish()
    }
}
