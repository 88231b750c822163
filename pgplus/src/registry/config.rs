//! Registry configuration.
use std::{env::var, fmt};

/// Environment variable for [`RegistryConfig::numeric_as_float`].
pub const NUMERIC_AS_FLOAT_ENV: &str = "PGPLUS_NUMERIC_AS_FLOAT";

/// Environment variable for [`RegistryConfig::timestamp_as_utc`].
pub const TIMESTAMP_AS_UTC_ENV: &str = "PGPLUS_TIMESTAMP_AS_UTC";

/// Which default overrides [`install_default_overrides`][1] installs.
///
/// Both overrides are enabled by default.
///
/// [1]: super::RegistryBuilder::install_default_overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    pub(crate) numeric_as_float: bool,
    pub(crate) timestamp_as_utc: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { numeric_as_float: true, timestamp_as_utc: true }
    }
}

impl RegistryConfig {
    /// Retrieve configuration from environment variable.
    ///
    /// It reads:
    /// - `PGPLUS_NUMERIC_AS_FLOAT`
    /// - `PGPLUS_TIMESTAMP_AS_UTC`
    ///
    /// Accepted values are `1`, `true`, `yes`, `on` and `0`, `false`, `no`, `off`.
    /// Missing or invalid value fallback to default value.
    pub fn from_env() -> RegistryConfig {
        Self::from_lookup(|name| var(name).ok(), false).unwrap_or_default()
    }

    /// Same as [`from_env`][RegistryConfig::from_env], but returns error on invalid value.
    pub fn try_from_env() -> Result<RegistryConfig, ConfigError> {
        Self::from_lookup(|name| var(name).ok(), true)
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        strict: bool,
    ) -> Result<RegistryConfig, ConfigError> {
        let mut config = RegistryConfig::default();

        macro_rules! env {
            ($name:ident, $field:ident) => {
                if let Some(value) = lookup($name) {
                    match parse_flag($name, &value) {
                        Ok(ok) => config.$field = ok,
                        Err(err) if strict => return Err(err),
                        Err(_err) => {
                            #[cfg(feature = "log")]
                            log::warn!("{_err}, using default");
                        },
                    }
                }
            };
        }

        env!(NUMERIC_AS_FLOAT_ENV, numeric_as_float);
        env!(TIMESTAMP_AS_UTC_ENV, timestamp_as_utc);

        Ok(config)
    }

    /// Decode `numeric` as `f64` instead of text.
    ///
    /// This loses precision for large or very precise numbers.
    pub fn numeric_as_float(mut self, value: bool) -> Self {
        self.numeric_as_float = value;
        self
    }

    /// Read naive `timestamp` as an UTC instant.
    pub fn timestamp_as_utc(mut self, value: bool) -> Self {
        self.timestamp_as_utc = value;
        self
    }

    pub fn is_numeric_as_float(&self) -> bool {
        self.numeric_as_float
    }

    pub fn is_timestamp_as_utc(&self) -> bool {
        self.timestamp_as_utc
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError { name, value: value.to_owned() }),
    }
}

/// Error when reading configuration.
pub struct ConfigError {
    name: &'static str,
    value: String,
}

impl ConfigError {
    /// Returns the offending variable name.
    pub fn name(&self) -> &str {
        self.name
    }
}

impl std::error::Error for ConfigError { }

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for `{}`: {:?}, expected boolean", self.name, self.value)
    }
}

impl fmt::Debug for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
    }

    #[test]
    fn defaults() {
        let config = RegistryConfig::from_lookup(lookup(&[]), true).unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert!(config.is_numeric_as_float());
        assert!(config.is_timestamp_as_utc());
    }

    #[test]
    fn read_flags() {
        let vars = [(NUMERIC_AS_FLOAT_ENV, "off"), (TIMESTAMP_AS_UTC_ENV, " TRUE ")];
        let config = RegistryConfig::from_lookup(lookup(&vars), true).unwrap();
        assert!(!config.is_numeric_as_float());
        assert!(config.is_timestamp_as_utc());
    }

    #[test]
    fn invalid_flag() {
        let vars = [(NUMERIC_AS_FLOAT_ENV, "maybe")];
        let err = RegistryConfig::from_lookup(lookup(&vars), true).unwrap_err();
        assert_eq!(err.name(), NUMERIC_AS_FLOAT_ENV);
        assert_eq!(
            err.to_string(),
            "invalid value for `PGPLUS_NUMERIC_AS_FLOAT`: \"maybe\", expected boolean",
        );

        let config = RegistryConfig::from_lookup(lookup(&vars), false).unwrap();
        assert!(config.is_numeric_as_float());
    }

    #[test]
    fn builder() {
        let config = RegistryConfig::default().numeric_as_float(false).timestamp_as_utc(false);
        assert!(!config.is_numeric_as_float());
        assert!(!config.is_timestamp_as_utc());
    }
}
