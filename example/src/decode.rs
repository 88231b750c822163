use pgplus::{
    Column, Registry, Result, TypeId, Value,
    types::{Bounds, Interval, Point, Range},
};
use time::macros::datetime;

pub fn main() -> Result<()> {
    let registry = Registry::global();

    // Composite types

    let geo = Column::from_text("geo", TypeId::Point, "(-6.2088,106.8456)");
    let geo = registry.decode_column(&geo).map_err(|e| pgplus::Error::from(e).context("geo"))?;

    assert_eq!(geo, Value::Point(Point::new(-6.2088, 106.8456)));

    let every = registry.decode(TypeId::Interval, "21 days")?;

    assert_eq!(every, Value::Interval(Interval::weeks(3)));

    let during = registry.decode(TypeId::Int4Range, "[1,10)")?;
    let during = during.as_range().unwrap();

    assert_eq!(during.start, Some(Value::Int4(1)));
    assert_eq!(during.bounds, Bounds::InclusiveExclusive);

    // NULL and garbage

    let null = Column::null("geo", TypeId::Point);

    assert!(registry.decode_column(&null)?.is_null());
    assert!(registry.decode(TypeId::Point, "not-a-point")?.is_null());
    assert!(registry.decode(TypeId::Interval, "1 mon").is_err());

    // Typed

    let col = Column::from_text("during", TypeId::TsRange, r#"["2020-01-01 00:00:00",)"#);
    let range: Range<time::PrimitiveDateTime> = col.decode()?;

    assert_eq!(range.start, Some(datetime!(2020-01-01 00:00:00)));
    assert_eq!(range.end, None);

    let json = serde_json::to_string(&range.map(|e| e.to_string())).unwrap();
    tracing::info!("{json}");

    Ok(())
}
