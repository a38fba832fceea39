//! # Configuration Management
//!
//! Centralized configuration for a node's radio stack.
//!
//! The envelope layout itself is fixed at compile time and is not
//! configurable. What is configured here is the identity the active-message
//! layer writes into outgoing headers, how received frames are checked, and
//! where logs go.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`

use crate::core::header::BROADCAST_ADDR;
use crate::error::{constants, EnvelopeError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

/// Default node address
pub const DEFAULT_NODE_ADDRESS: u16 = 1;

/// Default active-message group (doubles as PAN id)
pub const DEFAULT_GROUP: u16 = 0x22;

/// Highest transmit power setting the radio accepts
pub const MAX_TX_POWER: u8 = 31;

/// Main stack configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StackConfig {
    /// Node identity
    #[serde(default)]
    pub node: NodeConfig,

    /// Frame handling
    #[serde(default)]
    pub radio: RadioConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StackConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| EnvelopeError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            EnvelopeError::ConfigError(format!("Failed to read config file: {e}"))
        })?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| EnvelopeError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(address) = std::env::var("RADIO_ENVELOPE_NODE_ADDRESS") {
            config.node.address = parse_u16(&address).ok_or_else(|| {
                EnvelopeError::ConfigError(format!("Invalid node address: '{address}'"))
            })?;
        }

        if let Ok(group) = std::env::var("RADIO_ENVELOPE_GROUP") {
            config.node.group = parse_u16(&group).ok_or_else(|| {
                EnvelopeError::ConfigError(format!("Invalid group: '{group}'"))
            })?;
        }

        if let Ok(verify) = std::env::var("RADIO_ENVELOPE_VERIFY_FCS") {
            config.radio.verify_fcs = verify.trim().parse::<bool>().map_err(|_| {
                EnvelopeError::ConfigError(format!("Invalid FCS verification flag: '{verify}'"))
            })?;
        }

        if let Ok(interval) = std::env::var("RADIO_ENVELOPE_LPL_INTERVAL_MS") {
            let millis = interval.trim().parse::<u64>().map_err(|_| {
                EnvelopeError::ConfigError(format!("Invalid LPL interval: '{interval}'"))
            })?;
            config.radio.lpl_interval = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            EnvelopeError::ConfigError(format!("Failed to serialize config: {e}"))
        })?;

        std::fs::write(path, content).map_err(|e| {
            EnvelopeError::ConfigError(format!("Failed to write config file: {e}"))
        })?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        errors.extend(self.node.validate());
        errors.extend(self.radio.validate());
        errors.extend(self.logging.validate());

        errors
    }

    /// Advisories for settings that are valid but weaken frame handling
    ///
    /// These never fail [`validate_strict`](Self::validate_strict).
    pub fn warnings(&self) -> Vec<String> {
        self.radio.warnings()
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(EnvelopeError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Accepts decimal or `0x`-prefixed hexadecimal
fn parse_u16(value: &str) -> Option<u16> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => value.parse::<u16>().ok(),
    }
}

/// Node identity written into outgoing headers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Short address of this node
    pub address: u16,

    /// Active-message group / PAN id
    pub group: u16,

    /// Transmit power setting recorded in outgoing metadata
    pub tx_power: u8,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_NODE_ADDRESS,
            group: DEFAULT_GROUP,
            tx_power: MAX_TX_POWER,
        }
    }
}

impl NodeConfig {
    /// Validate node configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.address == BROADCAST_ADDR {
            errors.push(format!(
                "{} (0x{:04X})",
                constants::ERR_BROADCAST_ADDRESS,
                BROADCAST_ADDR
            ));
        }

        if self.group == BROADCAST_ADDR {
            errors.push("Group cannot be the broadcast PAN (0xFFFF)".to_string());
        }

        if self.tx_power > MAX_TX_POWER {
            errors.push(format!(
                "Transmit power too high: {} (maximum: {MAX_TX_POWER})",
                self.tx_power
            ));
        }

        errors
    }
}

/// Frame handling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RadioConfig {
    /// Check the frame check sequence of every received frame
    pub verify_fcs: bool,

    /// Accept frames addressed to other nodes or groups (snooping)
    pub promiscuous: bool,

    /// Receiver low-power-listening interval recorded in outgoing metadata
    #[serde(with = "duration_serde")]
    pub lpl_interval: Duration,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            verify_fcs: true,
            promiscuous: false,
            lpl_interval: Duration::ZERO,
        }
    }
}

impl RadioConfig {
    /// Validate radio configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        // Stored in a 16-bit metadata field
        if self.lpl_interval.as_millis() > u128::from(u16::MAX) {
            errors.push(format!(
                "LPL interval too long: {}ms (maximum: {}ms)",
                self.lpl_interval.as_millis(),
                u16::MAX
            ));
        }

        errors
    }

    /// Non-fatal advisories
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.verify_fcs {
            warnings.push(
                "Frame check verification is disabled: corrupt frames will be accepted"
                    .to_string(),
            );
        }

        warnings
    }

    /// LPL interval as stored in metadata, saturated to the field width
    pub fn lpl_interval_ms(&self) -> u16 {
        u16::try_from(self.lpl_interval.as_millis()).unwrap_or(u16::MAX)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to log to file
    pub log_to_file: bool,

    /// Path to log file (if log_to_file is true)
    pub log_file_path: Option<String>,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("radio-envelope"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        if self.log_to_file {
            if let Some(ref path) = self.log_file_path {
                if let Some(parent) = Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(format!(
                            "Log file directory does not exist: {}",
                            parent.display()
                        ));
                    }
                }
            } else {
                errors.push("log_file_path must be specified when log_to_file is true".to_string());
            }
        }

        if !self.log_to_console && !self.log_to_file {
            errors
                .push("At least one logging output (console or file) must be enabled".to_string());
        }

        errors
    }
}

/// Helper module for Duration serialization/deserialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = duration.as_millis() as u64;
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
