//! Chassis driver trait

use crate::error::Result;
use crate::types::ChassisState;

/// Chassis driver trait for actuator abstraction
///
/// Implementations wrap whatever link drives the physical base (CAN bus,
/// serial protocol, vendor SDK). They are expected to accept calls from an
/// arbitrary caller thread without blocking it meaningfully; real-mode
/// command submission goes through this trait synchronously.
pub trait ChassisDriver: Send {
    /// Send a motion command
    ///
    /// # Arguments
    /// * `linear` - Linear velocity in m/s
    /// * `angular` - Angular velocity in rad/s
    fn set_motion_command(&mut self, linear: f64, angular: f64) -> Result<()>;

    /// Read the latest chassis state
    ///
    /// Returns measured velocity plus telemetry (battery, fault code,
    /// per-motor metrics). Telemetry fields are passed through to the
    /// status stream without interpretation.
    fn chassis_state(&mut self) -> Result<ChassisState>;
}
