//! Command bridge between the transport layer and the chassis
//!
//! Velocity commands arrive at arbitrary rates from the transport layer.
//! Where they go is fixed at construction: a [`DirectDriverSink`] forwards
//! each command synchronously to the chassis driver, while a
//! [`BufferedSimSink`] keeps only the latest command in a single slot for
//! the simulated control loop to sample at its own rate.

use crate::drivers::ChassisDriver;
use crate::error::Result;
use crate::types::Velocity;
use parking_lot::Mutex;
use std::sync::Arc;

/// Destination for velocity commands, chosen once at construction
pub trait CommandSink: Send + Sync {
    /// Route one (linear, angular) command pair.
    ///
    /// No validation or clamping is performed; command limits are the
    /// producing layer's concern.
    fn submit(&self, linear: f64, angular: f64) -> Result<()>;
}

/// Forwards commands straight to the chassis driver (real mode)
pub struct DirectDriverSink {
    driver: Arc<Mutex<Box<dyn ChassisDriver>>>,
}

impl DirectDriverSink {
    /// Create a sink forwarding to the given driver
    pub fn new(driver: Arc<Mutex<Box<dyn ChassisDriver>>>) -> Self {
        Self { driver }
    }
}

impl CommandSink for DirectDriverSink {
    fn submit(&self, linear: f64, angular: f64) -> Result<()> {
        self.driver.lock().set_motion_command(linear, angular)
    }
}

/// Buffers the latest command for the simulated control loop
///
/// Single-slot, last-write-wins: each submit overwrites the previous pair,
/// and a slow consumer silently skips intermediate commands. The lock is
/// held only for the overwrite or the copy, never across integration or
/// publishing.
#[derive(Clone)]
pub struct BufferedSimSink {
    current: Arc<Mutex<Velocity>>,
}

impl BufferedSimSink {
    /// Create an empty buffer (zero velocity until the first submit)
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Velocity::zero())),
        }
    }

    /// Copy out the most recently submitted command
    pub fn sample(&self) -> Velocity {
        *self.current.lock()
    }
}

impl Default for BufferedSimSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSink for BufferedSimSink {
    fn submit(&self, linear: f64, angular: f64) -> Result<()> {
        *self.current.lock() = Velocity::new(linear, angular);
        Ok(())
    }
}
