//! Postgres type identifiers.
mod pg_type;

pub use pg_type::{Oid, PgType, RangeElement, TypeId};
