//! # Configuration
//!
//! Runtime knobs for the cart system. Everything has a sensible default, and
//! [`CartConfig::from_env`] overlays values from the environment:
//!
//! | Variable              | Field                   | Default         |
//! |-----------------------|-------------------------|-----------------|
//! | `CART_CHANNEL_BUFFER` | `channel_buffer`        | `32`            |
//! | `CART_MAX_QUANTITY`   | `max_quantity_per_item` | `99`            |
//! | `CART_LATENCY_MS`     | `latency`               | none            |
//! | `CART_ADD_POLICY`     | `add_policy`            | `merge`         |
//!
//! Log verbosity is not configured here; it follows `RUST_LOG` (see
//! [`setup_tracing`](crate::lifecycle::setup_tracing)).

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// How the store incorporates a successful add into its local item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddPolicy {
    /// Merge the item returned by the remote store into `items` by id.
    #[default]
    MergeReturned,
    /// Treat the add as "write succeeded" and run a full fetch afterwards. The add stays
    /// in flight until that fetch settles, so `loading` covers both calls.
    Refetch,
}

impl FromStr for AddPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" | "merge-returned" => Ok(AddPolicy::MergeReturned),
            "refetch" => Ok(AddPolicy::Refetch),
            other => Err(ConfigError::Invalid {
                key: "CART_ADD_POLICY",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Capacity of the request channel into the cart actor.
    pub channel_buffer: usize,
    /// Largest quantity the remote store accepts for a single line.
    pub max_quantity_per_item: u32,
    /// Simulated round-trip delay applied by the in-memory remote store.
    pub latency: Option<Duration>,
    pub add_policy: AddPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            max_quantity_per_item: 99,
            latency: None,
            add_policy: AddPolicy::default(),
        }
    }
}

impl CartConfig {
    /// Builds a config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Missing keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("CART_CHANNEL_BUFFER") {
            config.channel_buffer = parse_positive("CART_CHANNEL_BUFFER", &value)?;
        }
        if let Some(value) = lookup("CART_MAX_QUANTITY") {
            config.max_quantity_per_item = parse_positive("CART_MAX_QUANTITY", &value)?;
        }
        if let Some(value) = lookup("CART_LATENCY_MS") {
            let millis: u64 = value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "CART_LATENCY_MS",
                value: value.clone(),
            })?;
            config.latency = (millis > 0).then(|| Duration::from_millis(millis));
        }
        if let Some(value) = lookup("CART_ADD_POLICY") {
            config.add_policy = value.parse()?;
        }

        Ok(config)
    }
}

fn parse_positive<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}
