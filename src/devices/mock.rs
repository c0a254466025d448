//! Mock chassis driver for testing and simulated operation

use crate::drivers::ChassisDriver;
use crate::error::Result;
use crate::types::ChassisState;
use parking_lot::Mutex;
use std::sync::Arc;

/// Nominal battery voltage reported by the mock (volts)
const MOCK_BATTERY_VOLTAGE: f64 = 29.5;

/// Control mode code reported by the mock
const MOCK_CONTROL_MODE: u8 = 0x01;

/// Mock chassis driver
///
/// Stores the last motion command and echoes it back as the measured
/// velocity, with nominal telemetry. Clones share state, which lets tests
/// inspect what the bridge forwarded.
#[derive(Clone)]
pub struct MockChassisDriver {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Clone)]
struct MockState {
    linear: f64,
    angular: f64,
    command_count: u64,
}

impl MockChassisDriver {
    /// Create new mock chassis driver
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                linear: 0.0,
                angular: 0.0,
                command_count: 0,
            })),
        }
    }

    /// Last commanded (linear, angular) pair
    pub fn last_command(&self) -> (f64, f64) {
        let state = self.state.lock();
        (state.linear, state.angular)
    }

    /// Number of motion commands received
    pub fn command_count(&self) -> u64 {
        self.state.lock().command_count
    }
}

impl Default for MockChassisDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ChassisDriver for MockChassisDriver {
    fn set_motion_command(&mut self, linear: f64, angular: f64) -> Result<()> {
        let mut state = self.state.lock();
        state.linear = linear;
        state.angular = angular;
        state.command_count += 1;
        Ok(())
    }

    fn chassis_state(&mut self) -> Result<ChassisState> {
        let state = self.state.lock();
        Ok(ChassisState {
            linear_velocity: state.linear,
            angular_velocity: state.angular,
            base_state: 0x00,
            control_mode: MOCK_CONTROL_MODE,
            fault_code: 0x00,
            battery_voltage: MOCK_BATTERY_VOLTAGE,
            motor_states: Default::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_echoes_last_command() {
        let mut driver = MockChassisDriver::new();
        driver.set_motion_command(0.2, -0.1).unwrap();

        let state = driver.chassis_state().unwrap();
        assert_eq!(state.linear_velocity, 0.2);
        assert_eq!(state.angular_velocity, -0.1);
        assert_eq!(state.battery_voltage, MOCK_BATTERY_VOLTAGE);
        assert_eq!(state.fault_code, 0);
    }

    #[test]
    fn test_clones_share_state() {
        let mut driver = MockChassisDriver::new();
        let observer = driver.clone();

        driver.set_motion_command(1.5, 0.0).unwrap();
        assert_eq!(observer.last_command(), (1.5, 0.0));
    }
}
