use pgplus::{
    Encode, Result, Value,
    types::{Bounds, Interval, Point, Range, format_bound},
};

pub fn main() -> Result<()> {
    let range = Range::new(Some(1i64), Some(100), Bounds::Inclusive);
    let encoded = range.encode();

    assert_eq!(encoded.as_str(), "[1,100]");
    assert_eq!(encoded.oid(), 3926);

    let range = Range::new(Some(Value::from("a,b")), None, Bounds::default());

    assert_eq!(Value::from(range).to_text().as_deref(), Some(r#"["a,b",)"#));

    assert_eq!(format_bound(Some(&r#"say "hi""#), |e| e.to_string()), r#""say \"hi\"""#);
    assert_eq!(format_bound(None::<&i32>, |e| e.to_string()), "");

    assert_eq!(Point::new(1.5, 2.0).encode().as_str(), "(1.5,2)");
    assert_eq!(Interval::weeks(2).encode().as_str(), "2 week");

    tracing::info!("{:?}", pgplus::Value::from(Some(42)).encode());

    Ok(())
}
