use std::{borrow::Cow, fmt};

use super::bound::write_bound;
use crate::{
    common::verbose,
    decode::{DecodeError, FromText, decode_text},
    encode::{Encode, Encoded},
    postgres::{Oid, PgType, RangeElement},
};

/// Inclusivity of both side of a range.
///
/// <https://www.postgresql.org/docs/current/rangetypes.html#RANGETYPES-INCLUSIVITY>
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bounds {
    /// `[]`, both side inclusive.
    #[cfg_attr(feature = "serde", serde(rename = "[]"))]
    Inclusive,
    /// `()`, both side exclusive.
    #[cfg_attr(feature = "serde", serde(rename = "()"))]
    Exclusive,
    /// `[)`, inclusive start and exclusive end, the postgres canonical form.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "[)"))]
    InclusiveExclusive,
    /// `(]`, exclusive start and inclusive end.
    #[cfg_attr(feature = "serde", serde(rename = "(]"))]
    ExclusiveInclusive,
}

impl Bounds {
    /// Construct from start and end inclusivity.
    pub const fn new(start_inclusive: bool, end_inclusive: bool) -> Bounds {
        match (start_inclusive, end_inclusive) {
            (true, true) => Bounds::Inclusive,
            (false, false) => Bounds::Exclusive,
            (true, false) => Bounds::InclusiveExclusive,
            (false, true) => Bounds::ExclusiveInclusive,
        }
    }

    /// Construct from the opening and closing bracket characters.
    pub const fn from_chars(open: char, close: char) -> Option<Bounds> {
        let start = match open {
            '[' => true,
            '(' => false,
            _ => return None,
        };
        let end = match close {
            ']' => true,
            ')' => false,
            _ => return None,
        };
        Some(Bounds::new(start, end))
    }

    pub const fn is_start_inclusive(self) -> bool {
        matches!(self, Bounds::Inclusive | Bounds::InclusiveExclusive)
    }

    pub const fn is_end_inclusive(self) -> bool {
        matches!(self, Bounds::Inclusive | Bounds::ExclusiveInclusive)
    }

    /// Opening bracket, `[` or `(`.
    pub const fn open_char(self) -> char {
        if self.is_start_inclusive() { '[' } else { '(' }
    }

    /// Closing bracket, `]` or `)`.
    pub const fn close_char(self) -> char {
        if self.is_end_inclusive() { ']' } else { ')' }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Bounds::Inclusive => "[]",
            Bounds::Exclusive => "()",
            Bounds::InclusiveExclusive => "[)",
            Bounds::ExclusiveInclusive => "(]",
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postgres range value.
///
/// `None` on either side means the range is unbounded on that side.
///
/// <https://www.postgresql.org/docs/current/rangetypes.html>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range<T> {
    pub start: Option<T>,
    pub end: Option<T>,
    pub bounds: Bounds,
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Result of parsing range text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeText<T> {
    /// Text matched the range syntax.
    Parsed(Range<T>),
    /// The `empty` literal postgres output for empty range.
    Empty,
    /// Text did not match the range syntax.
    Unrecognized,
}

impl<T> RangeText<T> {
    /// Returns the parsed range, or canonical empty range otherwise.
    pub fn into_range(self) -> Range<T> {
        match self {
            RangeText::Parsed(range) => range,
            RangeText::Empty | RangeText::Unrecognized => Range::empty(),
        }
    }

    /// Returns `true` if the text did not match the range syntax.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, RangeText::Unrecognized)
    }
}

impl<T> Range<T> {
    pub const fn new(start: Option<T>, end: Option<T>, bounds: Bounds) -> Self {
        Self { start, end, bounds }
    }

    /// The canonical empty range, both side absent with `[)` bounds.
    pub const fn empty() -> Self {
        Self { start: None, end: None, bounds: Bounds::InclusiveExclusive }
    }

    /// Returns `true` if both side are absent.
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Map both side of the range.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Range<U> {
        Range {
            start: self.start.map(&mut f),
            end: self.end.map(&mut f),
            bounds: self.bounds,
        }
    }

    /// Format range to postgres text input, `render` is used for each present side.
    ///
    /// ```
    /// use pgplus::types::{Bounds, Range};
    ///
    /// let range = Range::new(Some(1), Some(5), Bounds::InclusiveExclusive);
    /// assert_eq!(range.to_text(|e| e.to_string()), "[1,5)");
    /// ```
    pub fn to_text(&self, mut render: impl FnMut(&T) -> String) -> String {
        let start = self.start.as_ref().map(&mut render);
        let end = self.end.as_ref().map(&mut render);
        write_range(self.bounds, start.as_deref(), end.as_deref())
    }

    /// Parse postgres range text output, `parse` is called for each present side.
    ///
    /// Error returned by `parse` is propagated as is.
    pub fn parse_text<E>(
        text: &str,
        mut parse: impl FnMut(&str) -> Result<T, E>,
    ) -> Result<RangeText<T>, E> {
        let Some(raw) = RawRange::parse(text) else {
            return Ok(match text.trim() {
                "empty" => RangeText::Empty,
                _ => {
                    #[cfg(feature = "log")]
                    log::warn!("unrecognized range text {text:?}, treated as empty range");
                    RangeText::Unrecognized
                },
            });
        };

        verbose!(bounds = raw.bounds.as_str(), "range parsed");

        let start = raw.start.as_deref().map(&mut parse).transpose()?;
        let end = raw.end.as_deref().map(&mut parse).transpose()?;
        Ok(RangeText::Parsed(Range::new(start, end, raw.bounds)))
    }

    /// Lenient form of [`parse_text`][Range::parse_text].
    ///
    /// Text that does not match the range syntax produce the canonical empty range.
    ///
    /// ```
    /// use pgplus::types::{Bounds, Range};
    ///
    /// let range = Range::from_text("[1,5)", str::parse::<i32>).unwrap();
    /// assert_eq!(range, Range::new(Some(1), Some(5), Bounds::InclusiveExclusive));
    ///
    /// let range = Range::from_text("empty", str::parse::<i32>).unwrap();
    /// assert_eq!(range, Range::empty());
    /// ```
    pub fn from_text<E>(text: &str, parse: impl FnMut(&str) -> Result<T, E>) -> Result<Self, E> {
        Self::parse_text(text, parse).map(RangeText::into_range)
    }
}

pub(crate) fn write_range(bounds: Bounds, start: Option<&str>, end: Option<&str>) -> String {
    let mut buf = String::new();
    buf.push(bounds.open_char());
    write_bound(&mut buf, start);
    buf.push(',');
    write_bound(&mut buf, end);
    buf.push(bounds.close_char());
    buf
}

/// Range text split into its unquoted segments.
struct RawRange<'a> {
    bounds: Bounds,
    start: Option<Cow<'a, str>>,
    end: Option<Cow<'a, str>>,
}

impl<'a> RawRange<'a> {
    fn parse(text: &'a str) -> Option<RawRange<'a>> {
        let text = text.trim();
        let mut chars = text.chars();
        let open = chars.next()?;
        let close = chars.next_back()?;
        let bounds = Bounds::from_chars(open, close)?;

        let inner = &text[open.len_utf8()..text.len() - close.len_utf8()];
        let (start, rest) = segment(inner)?;
        let rest = rest.strip_prefix(',')?;
        let (end, rest) = segment(rest)?;
        if !rest.is_empty() {
            return None;
        }

        Some(RawRange { bounds, start, end })
    }
}

/// Read one bound segment, returns the unquoted value and the remaining input.
///
/// Bare empty segment is absent, while quoted empty string is present.
fn segment(input: &str) -> Option<(Option<Cow<'_, str>>, &str)> {
    let Some(quoted) = input.strip_prefix('"') else {
        let end = input
            .find([',', '"', '(', ')', '[', ']'])
            .unwrap_or(input.len());
        let (bare, rest) = input.split_at(end);
        let value = (!bare.is_empty()).then_some(Cow::Borrowed(bare));
        return Some((value, rest));
    };

    let mut value = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => value.push(chars.next()?.1),
            '"' => {
                // postgres escape quote by doubling it
                if quoted[i + 1..].starts_with('"') {
                    chars.next();
                    value.push('"');
                } else {
                    return Some((Some(Cow::Owned(value)), &quoted[i + 1..]));
                }
            },
            _ => value.push(ch),
        }
    }

    // unterminated quote
    None
}

impl<T: FromText> FromText for Range<T> {
    fn from_text(text: &str) -> Result<Self, DecodeError> {
        Range::from_text(text, T::from_text)
    }
}

impl<T: RangeElement> PgType for Range<T> {
    const OID: Oid = T::RANGE_OID;
}

decode_text!(Range<i32>, Range<i64>, Range<time::Date>, Range<time::PrimitiveDateTime>, Range<time::UtcDateTime>);

impl<T> Encode<'static> for Range<T>
where
    T: RangeElement + Encode<'static>,
{
    fn encode(self) -> Encoded<'static> {
        let start = self.start.map(T::encode);
        let end = self.end.map(T::encode);
        let text = write_range(
            self.bounds,
            start.as_ref().map(Encoded::as_str),
            end.as_ref().map(Encoded::as_str),
        );
        Encoded::new(text, T::RANGE_OID)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{column::Column, decode::Decode, postgres::TypeId};

    fn int(text: &str) -> Result<i32, std::num::ParseIntError> {
        text.parse()
    }

    fn string(text: &str) -> Result<String, std::convert::Infallible> {
        Ok(text.to_owned())
    }

    #[test]
    fn parse_basic() {
        let range = Range::from_text("[1,5)", int).unwrap();
        assert_eq!(range, Range::new(Some(1), Some(5), Bounds::InclusiveExclusive));

        let range = Range::from_text("(-3,]", int).unwrap();
        assert_eq!(range, Range::new(Some(-3), None, Bounds::ExclusiveInclusive));

        let range = Range::from_text("(,)", int).unwrap();
        assert_eq!(range, Range::new(None, None, Bounds::Exclusive));
    }

    #[test]
    fn format_basic() {
        let range = Range::new(Some(1), Some(5), Bounds::InclusiveExclusive);
        assert_eq!(range.to_text(|e| e.to_string()), "[1,5)");

        let range = Range::<i32>::new(None, Some(5), Bounds::Inclusive);
        assert_eq!(range.to_text(|e| e.to_string()), "[,5]");
    }

    #[test]
    fn empty_and_unrecognized() {
        assert_eq!(Range::parse_text("empty", int).unwrap(), RangeText::Empty);
        assert!(Range::parse_text("1,5", int).unwrap().is_unrecognized());
        assert!(Range::parse_text("[1,5", int).unwrap().is_unrecognized());
        assert!(Range::parse_text("[1,5)x", int).unwrap().is_unrecognized());
        assert!(Range::parse_text("[\"1,5)", int).unwrap().is_unrecognized());
        // brackets inside a bound must be quoted
        assert!(Range::parse_text("[a(b,c]", string).unwrap().is_unrecognized());
        assert!(!Range::parse_text(r#"["a(b",c]"#, string).unwrap().is_unrecognized());

        let range = Range::from_text("not a range", int).unwrap();
        assert_eq!(range, Range::empty());
        assert_eq!(range.bounds.as_str(), "[)");
    }

    #[test]
    fn element_error_propagates() {
        let err = Range::from_text("[1,x)", int).unwrap_err();
        assert_eq!(err, "x".parse::<i32>().unwrap_err());
    }

    #[test]
    fn quoted_segments() {
        let range = Range::from_text(r#"["2020-01-01 00:00:00","2020-01-02 00:00:00")"#, string).unwrap();
        assert_eq!(range.start.as_deref(), Some("2020-01-01 00:00:00"));
        assert_eq!(range.end.as_deref(), Some("2020-01-02 00:00:00"));

        let range = Range::from_text(r#"["a\"b\\c","x""y"]"#, string).unwrap();
        assert_eq!(range.start.as_deref(), Some(r#"a"b\c"#));
        assert_eq!(range.end.as_deref(), Some(r#"x"y"#));
    }

    #[test]
    fn quoted_empty_is_present() {
        let range = Range::from_text(r#"["",)"#, string).unwrap();
        assert_eq!(range.start.as_deref(), Some(""));
        assert_eq!(range.end, None);
    }

    #[test]
    fn round_trip() {
        for bounds in [Bounds::Inclusive, Bounds::Exclusive, Bounds::InclusiveExclusive, Bounds::ExclusiveInclusive] {
            let range = Range::new(Some(-10), Some(42), bounds);
            let text = range.to_text(|e| e.to_string());
            assert_eq!(Range::from_text(&text, int).unwrap(), range);
        }

        let range = Range::new(Some(r#"a"b\c"#.to_owned()), Some("(x, y]".to_owned()), Bounds::Inclusive);
        let text = range.to_text(|e| e.clone());
        assert_eq!(Range::from_text(&text, string).unwrap(), range);

        let range = Range::new(Some(String::new()), Some("b".to_owned()), Bounds::InclusiveExclusive);
        let text = range.to_text(|e| e.clone());
        assert_eq!(text, r#"["",b)"#);
        assert_eq!(Range::from_text(&text, string).unwrap(), range);
    }

    #[test]
    fn bounds_chars() {
        for bounds in [Bounds::Inclusive, Bounds::Exclusive, Bounds::InclusiveExclusive, Bounds::ExclusiveInclusive] {
            let mut chars = bounds.as_str().chars();
            let (open, close) = (chars.next().unwrap(), chars.next().unwrap());
            assert_eq!(Bounds::from_chars(open, close), Some(bounds));
        }
        assert_eq!(Bounds::from_chars('{', ')'), None);
        assert_eq!(Bounds::default().as_str(), "[)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_shape() {
        let range = Range::new(Some(1), None, Bounds::ExclusiveInclusive);
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"start":1,"end":null,"bounds":"(]"}"#);
        assert_eq!(serde_json::from_str::<Range<i32>>(&json).unwrap(), range);
    }

    #[test]
    fn typed_decode_encode() {
        let col = Column::from_text("r", TypeId::Int4Range, "[1,5)");
        let range = Range::<i32>::decode(col).unwrap();
        assert_eq!(range, Range::new(Some(1), Some(5), Bounds::InclusiveExclusive));

        let col = Column::from_text("r", TypeId::Int8Range, "[1,5)");
        assert!(matches!(Range::<i32>::decode(col), Err(DecodeError::OidMissmatch)));

        let encoded = range.encode();
        assert_eq!(encoded.as_str(), "[1,5)");
        assert_eq!(encoded.oid(), TypeId::Int4Range.oid());
    }
}
