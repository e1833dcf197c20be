//! System configuration parameters
//!
//! All tunable parameters for the SmartLight controller.  Thresholds are
//! fixed for the lifetime of a run; network settings come from the build
//! environment (`SMARTLIGHT_*`) so credentials never live in the source.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::app::state::ThresholdConfig;
use crate::sensors::distance::CM_PER_US;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Thresholds ---
    /// Raw CdS ADC value below which the low-light indicator turns on.
    pub brightness_threshold: u16,
    /// Distance (cm) below which the near-proximity indicator turns on.
    pub distance_threshold_cm: f32,

    // --- Timing ---
    /// Sampling + automatic decision cadence (milliseconds)
    pub sample_interval_ms: u32,
    /// Sensor / actuator report cadence (milliseconds)
    pub report_interval_ms: u32,
    /// Upper bound on each echo-line wait (microseconds)
    pub echo_timeout_us: u32,

    // --- Network ---
    pub wifi_ssid: heapless::String<32>,
    pub wifi_password: heapless::String<64>,
    pub mqtt_url: heapless::String<96>,
    /// Prepended to every topic as `<prefix>/<topic>`.
    pub topic_prefix: heapless::String<48>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            brightness_threshold: 800,
            distance_threshold_cm: 10.0,

            // Timing
            sample_interval_ms: 100,   // 10 Hz
            report_interval_ms: 5_000, // every 5 s
            echo_timeout_us: 25_000,   // ~4.25 m

            // Network
            wifi_ssid: bounded(option_env!("SMARTLIGHT_WIFI_SSID").unwrap_or("")),
            wifi_password: bounded(option_env!("SMARTLIGHT_WIFI_PASSWORD").unwrap_or("")),
            mqtt_url: bounded(option_env!("SMARTLIGHT_MQTT_URL").unwrap_or("mqtt://broker.local:1883")),
            topic_prefix: bounded(option_env!("SMARTLIGHT_TOPIC_PREFIX").unwrap_or("smartlight")),
        }
    }
}

/// Copy as much of `s` as fits, stopping on a char boundary.
fn bounded<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Errors from [`SystemConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

impl SystemConfig {
    /// Thresholds handed to the decision engine.
    pub fn thresholds(&self) -> ThresholdConfig {
        ThresholdConfig {
            brightness_threshold: self.brightness_threshold,
            distance_threshold: self.distance_threshold_cm,
        }
    }

    /// Distance reported when no echo arrives: the farthest target the
    /// bounded wait could have resolved.
    pub fn distance_sentinel_cm(&self) -> f32 {
        self.echo_timeout_us as f32 * CM_PER_US
    }

    /// Reject values that would stall or starve the control loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("sample_interval_ms must be > 0"));
        }
        if self.report_interval_ms <= self.sample_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "report_interval_ms must exceed sample_interval_ms",
            ));
        }
        if self.echo_timeout_us == 0 {
            return Err(ConfigError::ValidationFailed("echo_timeout_us must be > 0"));
        }
        if !self.distance_threshold_cm.is_finite() || self.distance_threshold_cm <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "distance_threshold_cm must be finite and positive",
            ));
        }
        if self.topic_prefix.is_empty() {
            return Err(ConfigError::ValidationFailed("topic_prefix must not be empty"));
        }
        Ok(())
    }
}
