use std::fmt;

use crate::{
    decode::{DecodeError, FromText, decode_text},
    encode::{Encode, Encoded},
    ext::StrExt,
    postgres::{Oid, PgType},
};

/// Unit of an approximate [`Interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeUnit {
    Hour,
    Day,
    Week,
}

impl TimeUnit {
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse postgres interval, a whole number of hours, days or weeks.
///
/// This is a lossy approximation of postgres `interval`, it only support
/// interval that fit in a single unit. Parsing `1 day 03:00:00` yields one day,
/// and `05:30:00` yields five hours.
///
/// ```
/// use pgplus::types::{Interval, TimeUnit};
///
/// assert_eq!(Interval::from_text("14 days").unwrap(), Interval::new(2, TimeUnit::Week));
/// assert_eq!(Interval::from_text("05:00:00").unwrap(), Interval::new(5, TimeUnit::Hour));
/// assert_eq!(Interval::new(2, TimeUnit::Week).to_text(), "2 week");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub quantity: i64,
    pub unit: TimeUnit,
}

impl Interval {
    pub const fn new(quantity: i64, unit: TimeUnit) -> Interval {
        Interval { quantity, unit }
    }

    pub const fn hours(quantity: i64) -> Interval {
        Interval::new(quantity, TimeUnit::Hour)
    }

    pub const fn days(quantity: i64) -> Interval {
        Interval::new(quantity, TimeUnit::Day)
    }

    pub const fn weeks(quantity: i64) -> Interval {
        Interval::new(quantity, TimeUnit::Week)
    }

    /// Parse postgres interval output in `postgres` style.
    ///
    /// Text containing `day` must be `<n> day[s]` with an optional trailing
    /// `HH:MM:SS` which is ignored, a non zero multiple of 7 collapse into
    /// weeks. Otherwise text must be `HH:MM:SS` and the leading integer before
    /// the first `:` is read as hour count. Any other unit is an error.
    pub fn from_text(text: &str) -> Result<Interval, DecodeError> {
        let text = text.trim();
        let invalid = || DecodeError::invalid("interval", text);

        if text.contains("day") {
            let mut tokens = text.split_whitespace();
            let days = integer(tokens.next().unwrap_or_default(), text)?;
            if !matches!(tokens.next(), Some("day" | "days")) {
                return Err(invalid());
            }
            if let Some(clock) = tokens.next() {
                let clock = clock.strip_prefix('+').unwrap_or(clock);
                if !is_clock(clock) {
                    return Err(invalid());
                }
            }
            if tokens.next().is_some() {
                return Err(invalid());
            }
            if days != 0 && days % 7 == 0 {
                return Ok(Interval::weeks(days / 7));
            }
            return Ok(Interval::days(days));
        }

        if !is_clock(text) {
            return Err(invalid());
        }
        let hours = integer(text.leading_token(':'), text)?;
        Ok(Interval::hours(hours))
    }

    /// Format to `<quantity> <unit>`, e.g. `3 week`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Convert to [`time::Duration`], a week is exactly 7 days.
    ///
    /// Returns [`None`] if the number of seconds overflow `i64`.
    pub fn to_duration(&self) -> Option<time::Duration> {
        let unit: i64 = match self.unit {
            TimeUnit::Hour => 3_600,
            TimeUnit::Day => 86_400,
            TimeUnit::Week => 604_800,
        };
        self.quantity.checked_mul(unit).map(time::Duration::seconds)
    }
}

/// `-?\d+:\d{2}:\d{2}(\.\d+)?`
fn is_clock(text: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let mut parts = text.strip_prefix('-').unwrap_or(text).split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let (s, frac) = s.split_once('.').unwrap_or((s, "0"));
    digits(h) && m.len() == 2 && digits(m) && s.len() == 2 && digits(s) && digits(frac)
}

fn integer(token: &str, text: &str) -> Result<i64, DecodeError> {
    if !token.is_integer() {
        return Err(DecodeError::invalid("interval", text));
    }
    token.parse().map_err(|_| DecodeError::invalid("interval", text))
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", itoa::Buffer::new().format(self.quantity), self.unit)
    }
}

impl PgType for Interval {
    /// `interval` time interval
    const OID: Oid = 1186;
}

impl FromText for Interval {
    fn from_text(text: &str) -> Result<Self, DecodeError> {
        Interval::from_text(text)
    }
}

decode_text!(Interval);

impl Encode<'static> for Interval {
    fn encode(self) -> Encoded<'static> {
        Encoded::new(self.to_text(), Self::OID)
    }
}
