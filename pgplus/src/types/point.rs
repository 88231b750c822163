use std::fmt;

use crate::{
    decode::{DecodeError, FromText, decode_text},
    encode::{Encode, Encoded},
    postgres::{Oid, PgType},
};

/// Postgres geometric point, read as a coordinate.
///
/// <https://www.postgresql.org/docs/current/datatype-geometric.html#DATATYPE-GEOMETRIC-POINTS>
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub const fn new(lat: f64, lon: f64) -> Point {
        Point { lat, lon }
    }

    /// Parse `(<lat>,<lon>)`.
    ///
    /// Returns [`None`] when text is not a point, which is how a `NULL` that
    /// reached the parser as literal text is represented.
    ///
    /// ```
    /// use pgplus::types::Point;
    ///
    /// assert_eq!(Point::from_text("(1.5,-2)"), Some(Point::new(1.5, -2.0)));
    /// assert_eq!(Point::from_text("not-a-point"), None);
    /// ```
    pub fn from_text(text: &str) -> Option<Point> {
        let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;
        let (lat, lon) = inner.split_once(',')?;
        Some(Point {
            lat: number(lat)?,
            lon: number(lon)?,
        })
    }

    /// Format to `(<lat>,<lon>)`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

/// `-?\d+(\.\d*)?([eE][+-]?\d+)?`
fn number(text: &str) -> Option<f64> {
    let digits = |s: &str| s.bytes().take_while(u8::is_ascii_digit).count();

    let rest = text.strip_prefix('-').unwrap_or(text);
    let int = digits(rest);
    if int == 0 {
        return None;
    }
    let mut rest = &rest[int..];
    if let Some(frac) = rest.strip_prefix('.') {
        rest = &frac[digits(frac)..];
    }
    if let Some(exp) = rest.strip_prefix(['e', 'E']) {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        let n = digits(exp);
        if n == 0 {
            return None;
        }
        rest = &exp[n..];
    }
    if !rest.is_empty() {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.lat, self.lon)
    }
}

impl PgType for Point {
    /// `point` geometric point '(x, y)'
    const OID: Oid = 600;
}

impl FromText for Point {
    fn from_text(text: &str) -> Result<Self, DecodeError> {
        Point::from_text(text).ok_or_else(|| DecodeError::invalid("point", text))
    }
}

decode_text!(Point);

impl Encode<'static> for Point {
    fn encode(self) -> Encoded<'static> {
        Encoded::new(self.to_text(), Self::OID)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{column::Column, decode::Decode};

    #[test]
    fn parse() {
        assert_eq!(Point::from_text("(1.5,2.5)"), Some(Point::new(1.5, 2.5)));
        assert_eq!(Point::from_text("(-1,-0.25)"), Some(Point::new(-1.0, -0.25)));
        assert_eq!(Point::from_text("(3.,4)"), Some(Point::new(3.0, 4.0)));
        assert_eq!(Point::from_text("(1e+20,2)"), Some(Point::new(1e20, 2.0)));
    }

    #[test]
    fn not_a_point_is_absent() {
        for text in ["not-a-point", "", "(1,2", "1,2", "(1;2)", "(.5,1)", "(1,2,3)", "(NaN,1)"] {
            assert_eq!(Point::from_text(text), None, "{text:?}");
        }
    }

    #[test]
    fn format() {
        assert_eq!(Point::new(1.5, -2.0).to_text(), "(1.5,-2)");
    }

    #[test]
    fn round_trip() {
        for (lat, lon) in [(0.0, 0.0), (51.5074, -0.1278), (-33.8688, 151.2093), (1e-7, 123456789.125)] {
            let point = Point::new(lat, lon);
            assert_eq!(Point::from_text(&point.to_text()), Some(point));
        }
    }

    #[test]
    fn typed_decode() {
        let col = Column::from_text("p", 600u32, "(1.5,2.5)");
        assert_eq!(Point::decode(col).unwrap(), Point::new(1.5, 2.5));

        let col = Column::from_text("p", 600u32, "garbage");
        assert!(matches!(Point::decode(col), Err(DecodeError::Invalid { ty: "point", .. })));

        let col = Column::null("p", 600u32);
        assert_eq!(Option::<Point>::decode(col).unwrap(), None);
    }
}
