//! Chassis status and telemetry types
//!
//! Telemetry fields are passed through from the chassis driver without
//! interpretation; their encoding is hardware-specific.

use serde::{Deserialize, Serialize};

/// Per-motor telemetry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotorState {
    /// Motor current in amps
    pub current: f64,
    /// Motor speed in RPM
    pub rpm: f64,
    /// Driver temperature in degrees Celsius
    pub temperature: f64,
}

/// Chassis state reported by the driver
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChassisState {
    /// Measured linear velocity in m/s
    pub linear_velocity: f64,
    /// Measured angular velocity in rad/s
    pub angular_velocity: f64,
    /// Base state code
    pub base_state: u8,
    /// Control mode code
    pub control_mode: u8,
    /// Fault code (0 = no fault)
    pub fault_code: u16,
    /// Battery voltage in volts
    pub battery_voltage: f64,
    /// Per-motor telemetry (left, right)
    pub motor_states: [MotorState; 2],
}
