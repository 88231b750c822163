//! Postgres composite type codecs.
//!
//! Decode and encode postgres types that a driver hands over as raw text:
//! ranges, geometric points and intervals. Decoders are looked up by type oid
//! in a [`Registry`], which is configured once at startup.
//!
//! # Examples
//!
//! Install the default overrides and decode column:
//!
//! ```
//! use pgplus::{Column, Registry, Value, postgres::TypeId, types::Interval};
//!
//! pgplus::setup_type_overrides();
//!
//! let col = Column::from_text("every", TypeId::Interval, "14 days");
//! let value = Registry::global().decode_column(&col).unwrap();
//!
//! assert_eq!(value, Value::Interval(Interval::weeks(2)));
//! ```
//!
//! Typed decoding and encoding:
//!
//! ```
//! use pgplus::{Column, Encode, types::{Bounds, Range}};
//!
//! let col = Column::from_text("during", 3904u32, "[1,10)");
//! let range: Range<i32> = col.decode().unwrap();
//!
//! assert_eq!(range, Range::new(Some(1), Some(10), Bounds::InclusiveExclusive));
//! assert_eq!(range.encode().as_str(), "[1,10)");
//! ```
mod common;
mod ext;

// Protocol
pub mod postgres;

// Encoding
pub mod column;
pub mod decode;
pub mod encode;
pub mod types;
mod value;

// Registry
pub mod registry;

mod error;

pub use column::Column;
pub use decode::{Decode, DecodeError, FromText};
pub use encode::{Encode, Encoded};
pub use value::Value;
pub use registry::{Codec, Registry, RegistryBuilder, RegistryConfig, setup_type_overrides};
pub use postgres::{Oid, PgType, TypeId};
pub use error::{Error, ErrorKind, Result};
