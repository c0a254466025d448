//! Chassis driver implementations

pub mod mock;

use crate::config::Config;
use crate::drivers::ChassisDriver;
use crate::error::{Error, Result};
use mock::MockChassisDriver;

/// Create a chassis driver based on configuration
pub fn create_driver(config: &Config) -> Result<Box<dyn ChassisDriver>> {
    match config.base.driver.as_str() {
        "mock" => Ok(Box::new(MockChassisDriver::new())),
        other => Err(Error::UnknownDriver(other.to_string())),
    }
}
