//! Configuration management for the booking wizard.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unset variables fall back to their default; set but malformed variables are
//! reported instead of being silently ignored.

use crate::error::ConfigError;
use crate::pricing::DEFAULT_COMMISSION_BPS;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default QR-code image service
pub const DEFAULT_QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Booking configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Commission in basis points (500 = 5 %)
    pub commission_bps: u32,
    /// Latency simulated by the mock payment gateway, in milliseconds
    pub processing_delay_ms: u64,
    /// Numbers starting with this prefix are declined by the mock gateway
    pub decline_prefix: Option<String>,
    /// QR-code image settings
    pub qr: QrConfig,
}

/// QR-code image service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrConfig {
    /// Image service URL, without query string
    pub endpoint: String,
    /// Image edge in pixels
    pub size: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            commission_bps: DEFAULT_COMMISSION_BPS,
            processing_delay_ms: 1800,
            decline_prefix: None,
            qr: QrConfig::default(),
        }
    }
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_QR_ENDPOINT.to_string(),
            size: 200,
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `BOOKING_COMMISSION_BPS` | `500` |
    /// | `BOOKING_PROCESSING_DELAY_MS` | `1800` |
    /// | `BOOKING_DECLINE_PREFIX` | unset |
    /// | `BOOKING_QR_ENDPOINT` | `https://api.qrserver.com/v1/create-qr-code/` |
    /// | `BOOKING_QR_SIZE` | `200` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to a value that
    /// cannot be parsed or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// See [`BookingConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let commission_bps = parse_or(&lookup, "BOOKING_COMMISSION_BPS", defaults.commission_bps)?;
        if commission_bps > 10_000 {
            return Err(ConfigError::Invalid {
                var: "BOOKING_COMMISSION_BPS",
                value: commission_bps.to_string(),
                reason: "must not exceed 10000 (100 %)".to_string(),
            });
        }

        let qr_size = parse_or(&lookup, "BOOKING_QR_SIZE", defaults.qr.size)?;
        if qr_size == 0 {
            return Err(ConfigError::Invalid {
                var: "BOOKING_QR_SIZE",
                value: qr_size.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            commission_bps,
            processing_delay_ms: parse_or(
                &lookup,
                "BOOKING_PROCESSING_DELAY_MS",
                defaults.processing_delay_ms,
            )?,
            decline_prefix: lookup("BOOKING_DECLINE_PREFIX").filter(|prefix| !prefix.is_empty()),
            qr: QrConfig {
                endpoint: lookup("BOOKING_QR_ENDPOINT").unwrap_or(defaults.qr.endpoint),
                size: qr_size,
            },
        })
    }

    /// Mock gateway latency
    #[must_use]
    pub const fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: err.to_string(),
        }),
    }
}
