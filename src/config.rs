//! Configuration for the VahanaBase daemon
//!
//! Loads configuration from a TOML file with the minimal parameters needed
//! for chassis bridging and odometry publication.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level daemon configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub base: BaseConfig,
    pub odometry: OdometryConfig,
    pub control: ControlConfig,
    pub logging: LoggingConfig,
}

/// Chassis selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BaseConfig {
    /// Chassis driver type (currently only "mock")
    pub driver: String,
    /// Run against the simulated command buffer instead of a chassis driver
    pub simulated: bool,
}

/// Odometry frame naming
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OdometryConfig {
    /// Parent frame id for odometry output
    pub odom_frame: String,
    /// Child (robot body) frame id
    pub base_frame: String,
}

/// Control/publish loop rates
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlConfig {
    /// State publish rate in Hz (real mode)
    pub publish_rate: f64,
    /// Simulated control loop rate in Hz
    ///
    /// Simulated integration uses a fixed dt of `1 / sim_control_rate`
    /// rather than measured wall-clock time.
    pub sim_control_rate: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log output (stdout, stderr, or file path)
    pub output: String,
}

impl Config {
    /// Load configuration from TOML file
    ///
    /// # Arguments
    /// - `path`: Path to TOML configuration file
    ///
    /// # Returns
    /// Parsed configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Built-in defaults
    ///
    /// Suitable for testing and simulated operation. Production deployments
    /// should use a proper TOML configuration file.
    pub fn defaults() -> Self {
        Self {
            base: BaseConfig {
                driver: "mock".to_string(),
                simulated: false,
            },
            odometry: OdometryConfig {
                odom_frame: "odom".to_string(),
                base_frame: "base_link".to_string(),
            },
            control: ControlConfig {
                publish_rate: 50.0,
                sim_control_rate: 50.0,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                output: "stdout".to_string(),
            },
        }
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}
