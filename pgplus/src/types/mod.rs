//! Postgres composite and extended types.
//!
//! Text codecs for types the driver does not decode on its own:
//!
//! - [`Range`] generic over its element, with [`Bounds`] inclusivity
//! - [`Point`] geometric point read as a coordinate
//! - [`Interval`] coarse interval of whole hours, days or weeks
//!
//! Additionally, [`FromText`][f] and [`Encode`][e] are implemented for
//! [`time`][::time]'s [`Date`][d], [`PrimitiveDateTime`][tp] and [`UtcDateTime`][tu].
//!
//! With `serde` feature enabled, [`Range`], [`Point`] and [`Interval`] implement
//! [`Serialize`][ss] and [`Deserialize`][sd].
//!
//! [f]: crate::FromText
//! [e]: crate::Encode
//! [d]: ::time::Date
//! [tp]: ::time::PrimitiveDateTime
//! [tu]: ::time::UtcDateTime
//! [sd]: https://docs.rs/serde/latest/serde/trait.Deserialize.html
//! [ss]: https://docs.rs/serde/latest/serde/trait.Serialize.html
mod bound;
mod range;
mod point;
mod interval;
mod time;

pub use bound::format_bound;
pub use range::{Bounds, Range, RangeText};
pub use point::Point;
pub use interval::{Interval, TimeUnit};

pub(crate) use range::write_range;
pub(crate) use self::time::{format_date, format_timestamp, format_utc, timestamp_as_utc};
