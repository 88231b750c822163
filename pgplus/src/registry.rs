//! Type oid to codec registry.
//!
//! A [`Registry`] is built once with [`RegistryBuilder`] before any query is
//! executed, after which it is immutable and can be shared freely.
//!
//! ```
//! use pgplus::{Registry, Value, postgres::TypeId, types::Point};
//!
//! let registry = Registry::with_default_overrides();
//! let value = registry.decode(TypeId::Point.oid(), "(1.5,2.5)").unwrap();
//!
//! assert_eq!(value, Value::Point(Point::new(1.5, 2.5)));
//! ```
use std::{collections::HashMap, sync::OnceLock};

use crate::{
    column::Column,
    common::{span, verbose},
    decode::DecodeError,
    postgres::{Oid, TypeId},
    value::Value,
};

mod codec;
mod config;

pub use codec::{Codec, DecodeFn};
pub use config::{ConfigError, RegistryConfig, NUMERIC_AS_FLOAT_ENV, TIMESTAMP_AS_UTC_ENV};

/// Builtin range types and their element, installed by
/// [`RegistryBuilder::install_default_overrides`].
pub const DEFAULT_RANGES: [(TypeId, TypeId); 6] = [
    (TypeId::Int4Range, TypeId::Int4),
    (TypeId::Int8Range, TypeId::Int8),
    (TypeId::NumRange, TypeId::Numeric),
    (TypeId::TsRange, TypeId::Timestamp),
    (TypeId::TstzRange, TypeId::Timestamptz),
    (TypeId::DateRange, TypeId::Date),
];

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Install the default type overrides into the process wide registry.
///
/// Configuration is read from environment, see [`RegistryConfig::from_env`].
/// Calling this more than once is a no-op.
pub fn setup_type_overrides() {
    Registry::global();
}

/// Mutable registry, used during initialization.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    codecs: HashMap<Oid, Codec>,
    config: RegistryConfig,
}

impl RegistryBuilder {
    /// Create builder with the driver builtin codecs, and default config.
    pub fn new() -> RegistryBuilder {
        Self::with_config(RegistryConfig::default())
    }

    /// Create builder with the driver builtin codecs.
    pub fn with_config(config: RegistryConfig) -> RegistryBuilder {
        let mut me = Self::empty(config);
        for ty in TypeId::ALL {
            if let Some(codec) = Codec::builtin(ty) {
                me.codecs.insert(ty.oid(), codec);
            }
        }
        me
    }

    /// Create builder without any codec, every type pass through as text.
    pub fn empty(config: RegistryConfig) -> RegistryBuilder {
        Self { codecs: HashMap::new(), config }
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns codec currently registered for `oid`.
    pub fn codec(&self, oid: impl Into<Oid>) -> Option<&Codec> {
        self.codecs.get(&oid.into())
    }

    /// Register `codec` for `oid`.
    ///
    /// Registering the same oid again replace the previous codec.
    pub fn register(&mut self, oid: impl Into<Oid>, codec: Codec) -> &mut Self {
        let oid = oid.into();
        verbose!(oid, ?codec, "register");
        if let Some(_old) = self.codecs.insert(oid, codec) {
            #[cfg(feature = "log")]
            log::debug!("codec for oid {oid} replaced, previously {_old:?}");
        }
        self
    }

    /// Register closure as [`Codec::Custom`] for `oid`.
    pub fn register_fn<F>(&mut self, oid: impl Into<Oid>, f: F) -> &mut Self
    where
        F: Fn(&str) -> Result<Value, DecodeError> + Send + Sync + 'static,
    {
        self.register(oid, Codec::custom(f))
    }

    /// Register range codec for `range`, decoding its sides with codec currently
    /// registered for `element`.
    ///
    /// When `element` have no codec, sides are passed through as text. Later
    /// registration for `element` does not affect the installed range.
    pub fn install_range_type(&mut self, range: impl Into<Oid>, element: impl Into<Oid>) -> &mut Self {
        let element = self.codec(element).cloned().unwrap_or(Codec::Text);
        self.register(range, Codec::range(element))
    }

    /// Install the default overrides.
    ///
    /// - ranges in [`DEFAULT_RANGES`], bound to the element codec registered before
    ///   this call
    /// - `point` as [`Codec::Point`]
    /// - `numeric` as [`Codec::NumericAsFloat`], if [`RegistryConfig::numeric_as_float`]
    /// - `timestamp` as [`Codec::TimestampAsUtc`], if [`RegistryConfig::timestamp_as_utc`]
    /// - `interval` as [`Codec::Interval`]
    pub fn install_default_overrides(&mut self) -> &mut Self {
        span!("install_default_overrides");

        for (range, element) in DEFAULT_RANGES {
            self.install_range_type(range, element);
        }

        self.register(TypeId::Point, Codec::Point);

        if self.config.numeric_as_float {
            self.register(TypeId::Numeric, Codec::NumericAsFloat);
        }

        if self.config.timestamp_as_utc {
            self.register(TypeId::Timestamp, Codec::TimestampAsUtc);
        }

        self.register(TypeId::Interval, Codec::Interval)
    }

    /// Freeze into immutable [`Registry`].
    pub fn build(self) -> Registry {
        Registry { codecs: self.codecs }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable type oid to codec mapping.
#[derive(Debug, Clone)]
pub struct Registry {
    codecs: HashMap<Oid, Codec>,
}

impl Registry {
    /// Create new [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry with the driver builtin codecs and the default overrides.
    pub fn with_default_overrides() -> Registry {
        Self::from_config(RegistryConfig::default())
    }

    /// Same as [`with_default_overrides`][Registry::with_default_overrides] with
    /// given configuration.
    pub fn from_config(config: RegistryConfig) -> Registry {
        let mut builder = RegistryBuilder::with_config(config);
        builder.install_default_overrides();
        builder.build()
    }

    /// Same as [`from_config`][Registry::from_config] with
    /// [`RegistryConfig::try_from_env`], failing on invalid variable.
    pub fn try_from_env() -> crate::Result<Registry> {
        let config = RegistryConfig::try_from_env()?;
        Ok(Self::from_config(config))
    }

    /// Returns the process wide registry, initializing it on first call.
    ///
    /// Unless [`set_global`][Registry::set_global] is called first, it is built
    /// by [`from_config`][Registry::from_config] with [`RegistryConfig::from_env`].
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(|| Registry::from_config(RegistryConfig::from_env()))
    }

    /// Set the process wide registry.
    ///
    /// Returns the given registry back if global registry is already initialized.
    pub fn set_global(registry: Registry) -> Result<(), Registry> {
        GLOBAL.set(registry)
    }

    /// Returns codec registered for `oid`.
    pub fn get(&self, oid: impl Into<Oid>) -> Option<&Codec> {
        self.codecs.get(&oid.into())
    }

    /// Returns `true` if a codec is registered for `oid`.
    pub fn contains(&self, oid: impl Into<Oid>) -> bool {
        self.codecs.contains_key(&oid.into())
    }

    /// Decode raw text of type `oid`.
    ///
    /// Unknown oid is passed through as [`Value::Text`].
    pub fn decode(&self, oid: impl Into<Oid>, text: &str) -> Result<Value, DecodeError> {
        let oid = oid.into();
        match self.codecs.get(&oid) {
            Some(codec) => codec.decode(text),
            None => {
                verbose!(oid, "no codec, passthrough");
                Ok(Value::Text(text.to_owned()))
            },
        }
    }

    /// Decode column, `NULL` yields [`Value::Null`] without invoking any codec.
    pub fn decode_column(&self, column: &Column) -> Result<Value, DecodeError> {
        if column.is_null() {
            return Ok(Value::Null);
        }
        self.decode(column.oid(), column.try_text()?)
    }
}

impl From<RegistryBuilder> for Registry {
    fn from(builder: RegistryBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{Bounds, Interval, Point, Range};

    #[test]
    fn point_override() {
        let registry = Registry::with_default_overrides();
        let value = registry.decode(TypeId::Point, "(1.5,2.5)").unwrap();
        assert_eq!(value, Value::Point(Point::new(1.5, 2.5)));
    }

    #[test]
    fn default_overrides() {
        let registry = Registry::with_default_overrides();

        assert_eq!(registry.decode(TypeId::Numeric, "12.75").unwrap(), Value::Float8(12.75));
        assert_eq!(registry.decode(TypeId::Interval, "14 days").unwrap(), Value::Interval(Interval::weeks(2)));

        let Value::Timestamp(utc) = registry.decode(TypeId::Timestamp, "2020-01-02 03:04:05").unwrap() else {
            panic!("timestamp is not read as utc");
        };
        assert_eq!(utc.hour(), 3);

        let range = registry.decode(TypeId::Int4Range, "[1,5)").unwrap();
        let expected = Range::new(Some(Value::Int4(1)), Some(Value::Int4(5)), Bounds::InclusiveExclusive);
        assert_eq!(range, Value::Range(Box::new(expected)));
    }

    #[test]
    fn ranges_bind_element_codec_at_install() {
        let registry = Registry::with_default_overrides();

        // numeric override is installed after the ranges
        let range = registry.decode(TypeId::NumRange, "[1.5,2.5]").unwrap();
        let range = range.as_range().unwrap();
        assert_eq!(range.start, Some(Value::Numeric("1.5".into())));

        let range = registry.decode(TypeId::TsRange, r#"["2020-01-01 00:00:00",)"#).unwrap();
        assert!(matches!(range.as_range().unwrap().start, Some(Value::LocalTimestamp(_))));
    }

    #[test]
    fn every_default_range_decodes_its_element() {
        let registry = Registry::with_default_overrides();

        let range = registry.decode(TypeId::Int8Range, "[-5,9000000000)").unwrap();
        let range = range.as_range().unwrap();
        assert_eq!(range.start, Some(Value::Int8(-5)));
        assert_eq!(range.end, Some(Value::Int8(9_000_000_000)));

        let range = registry
            .decode(TypeId::TstzRange, r#"["2020-01-01 05:00:00+05",infinity)"#)
            .unwrap();
        let range = range.as_range().unwrap();
        let Some(Value::Timestamptz(start)) = &range.start else {
            panic!("tstzrange element is not timestamptz: {range:?}");
        };
        assert_eq!((start.day(), start.hour()), (1, 0));
        assert_eq!(range.end, Some(Value::Infinity));

        let range = registry.decode(TypeId::DateRange, "[2020-01-01,2020-02-01)").unwrap();
        let range = range.as_range().unwrap();
        assert!(matches!(&range.start, Some(Value::Date(date)) if date.month() == time::Month::January));
        assert!(matches!(&range.end, Some(Value::Date(date)) if date.month() == time::Month::February));
    }

    #[test]
    fn config_disable_overrides() {
        let config = RegistryConfig::default().numeric_as_float(false).timestamp_as_utc(false);
        let registry = Registry::from_config(config);

        assert_eq!(registry.decode(TypeId::Numeric, "12.75").unwrap(), Value::Numeric("12.75".into()));
        assert!(matches!(
            registry.decode(TypeId::Timestamp, "2020-01-02 03:04:05").unwrap(),
            Value::LocalTimestamp(_)
        ));
    }

    #[test]
    fn unknown_oid_passthrough() {
        let registry = Registry::with_default_overrides();
        assert!(!registry.contains(TypeId::Text.oid() + 100_000));
        assert_eq!(registry.decode(999_999u32, "{1,2}").unwrap(), Value::Text("{1,2}".into()));
    }

    #[test]
    fn without_overrides_composite_is_text() {
        let registry = Registry::builder().build();
        assert_eq!(registry.decode(TypeId::Point, "(1,2)").unwrap(), Value::Text("(1,2)".into()));
        assert_eq!(registry.decode(TypeId::Int4, "7").unwrap(), Value::Int4(7));
    }

    #[test]
    fn register_overwrite_is_idempotent() {
        let mut builder = Registry::builder();
        builder.install_default_overrides();
        builder.install_default_overrides();
        builder.register_fn(TypeId::Point, |_| Ok(Value::Null));
        builder.register(TypeId::Point, Codec::Point);

        let registry = builder.build();
        assert!(matches!(registry.get(TypeId::Point), Some(Codec::Point)));
        assert_eq!(registry.decode(TypeId::Point, "(0,0)").unwrap(), Value::Point(Point::new(0.0, 0.0)));
    }

    #[test]
    fn install_custom_range() {
        const MONEY: Oid = 790;
        const MONEY_RANGE: Oid = 900_001;

        let mut builder = RegistryBuilder::empty(RegistryConfig::default());
        builder.register_fn(MONEY, |text| {
            let cents = text.trim_start_matches('$').replace(['.', ','], "");
            cents.parse().map(Value::Int8).map_err(DecodeError::custom)
        });
        builder.install_range_type(MONEY_RANGE, MONEY);
        // element without codec pass through as text
        builder.install_range_type(MONEY_RANGE + 1, 12345u32);

        let registry = builder.build();
        let range = registry.decode(MONEY_RANGE, r#"["$1.50","$1,000.00")"#).unwrap();
        let range = range.as_range().unwrap();
        assert_eq!(range.start, Some(Value::Int8(150)));
        assert_eq!(range.end, Some(Value::Int8(100000)));

        let err = registry.decode(MONEY_RANGE, "[$x,)").unwrap_err();
        assert!(matches!(err, DecodeError::Custom(_)));

        let range = registry.decode(MONEY_RANGE + 1, "[a,b]").unwrap();
        assert_eq!(range.as_range().unwrap().end, Some(Value::Text("b".into())));
    }

    #[test]
    fn decode_column() {
        let registry = Registry::with_default_overrides();

        let col = Column::null("p", TypeId::Point);
        assert_eq!(registry.decode_column(&col).unwrap(), Value::Null);

        let col = Column::from_text("p", TypeId::Point, "not-a-point");
        assert_eq!(registry.decode_column(&col).unwrap(), Value::Null);

        let col = Column::from_text("i", TypeId::Interval, "1 mon");
        assert!(registry.decode_column(&col).is_err());
    }

    #[test]
    fn global_is_initialized_once() {
        setup_type_overrides();
        setup_type_overrides();
        let first = Registry::global() as *const Registry;
        assert_eq!(first, Registry::global() as *const Registry);
        assert!(Registry::global().contains(TypeId::Interval));
        assert!(Registry::set_global(Registry::builder().build()).is_err());
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}
