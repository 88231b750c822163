use time::{
    Date, Duration, PrimitiveDateTime, UtcDateTime, UtcOffset,
    format_description::{BorrowedFormatItem as I, Component as C, modifier},
};

use crate::{
    decode::{DecodeError, FromText, decode_text},
    encode::{Encode, Encoded},
    postgres::PgType,
};

impl FromText for Date {
    fn from_text(text: &str) -> Result<Self, DecodeError> {
        Date::parse(text, DATE).map_err(|_| DecodeError::invalid("date", text))
    }
}

impl FromText for PrimitiveDateTime {
    fn from_text(text: &str) -> Result<Self, DecodeError> {
        PrimitiveDateTime::parse(text, TIMESTAMP).map_err(|_| DecodeError::invalid("timestamp", text))
    }
}

impl FromText for UtcDateTime {
    /// Parse `timestamptz` output, e.g. `2020-01-02 03:04:05.123+05:30`.
    fn from_text(text: &str) -> Result<Self, DecodeError> {
        let invalid = || DecodeError::invalid("timestamptz", text);

        // date part contains `-`, offset sign can only appear after it
        let split = text
            .get(DATE_LEN..)
            .and_then(|e| e.rfind(['+', '-']))
            .ok_or_else(invalid)?;
        let (datetime, offset) = text.split_at(DATE_LEN + split);

        let datetime = PrimitiveDateTime::parse(datetime, TIMESTAMP).map_err(|_| invalid())?;
        let offset = parse_offset(offset).ok_or_else(invalid)?;
        let utc = datetime
            .checked_sub(Duration::seconds(offset.whole_seconds().into()))
            .ok_or_else(invalid)?;

        Ok(UtcDateTime::new(utc.date(), utc.time()))
    }
}

/// Read a naive `timestamp` as an UTC instant.
pub(crate) fn timestamp_as_utc(text: &str) -> Result<UtcDateTime, DecodeError> {
    let local = PrimitiveDateTime::from_text(text)?;
    Ok(UtcDateTime::new(local.date(), local.time()))
}

/// `+HH`, `+HH:MM` or `+HH:MM:SS`
fn parse_offset(text: &str) -> Option<UtcOffset> {
    let (sign, rest) = match text.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let mut parts = rest.split(':').map(|e| e.parse::<i8>().ok());
    let hours = parts.next()??;
    let minutes = parts.next().unwrap_or(Some(0))?;
    let seconds = parts.next().unwrap_or(Some(0))?;
    if parts.next().is_some() {
        return None;
    }
    UtcOffset::from_hms(sign * hours, sign * minutes, sign * seconds).ok()
}

decode_text!(Date, PrimitiveDateTime, UtcDateTime);

impl Encode<'static> for Date {
    fn encode(self) -> Encoded<'static> {
        Encoded::new(self.format(DATE).expect("format is statically known"), Self::OID)
    }
}

impl Encode<'static> for PrimitiveDateTime {
    fn encode(self) -> Encoded<'static> {
        Encoded::new(self.format(TIMESTAMP).expect("format is statically known"), Self::OID)
    }
}

impl Encode<'static> for UtcDateTime {
    fn encode(self) -> Encoded<'static> {
        Encoded::new(format_utc(&self), Self::OID)
    }
}

pub(crate) fn format_utc(datetime: &UtcDateTime) -> String {
    let mut text = datetime.format(TIMESTAMP).expect("format is statically known");
    text.push_str("+00");
    text
}

pub(crate) fn format_timestamp(datetime: &PrimitiveDateTime) -> String {
    datetime.format(TIMESTAMP).expect("format is statically known")
}

pub(crate) fn format_date(date: &Date) -> String {
    date.format(DATE).expect("format is statically known")
}

/// `YYYY-MM-DD`
const DATE_LEN: usize = 10;

const DATE: &[I<'static>] = &[
    I::Component(C::Year(modifier::Year::default())),
    I::Literal(b"-"),
    I::Component(C::Month(modifier::Month::default())),
    I::Literal(b"-"),
    I::Component(C::Day(modifier::Day::default())),
];

const SUBSECOND: &[I<'static>] = &[
    I::Literal(b"."),
    I::Component(C::Subsecond(modifier::Subsecond::default())),
];

const TIMESTAMP: &[I<'static>] = &[
    I::Compound(DATE),
    I::Literal(b" "),
    I::Component(C::Hour(modifier::Hour::default())),
    I::Literal(b":"),
    I::Component(C::Minute(modifier::Minute::default())),
    I::Literal(b":"),
    I::Component(C::Second(modifier::Second::default())),
    I::Optional(&I::Compound(SUBSECOND)),
];
