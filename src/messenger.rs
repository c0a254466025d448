//! Command bridging and periodic state publication
//!
//! [`BaseMessenger`] owns the odometry integrator and the wall-clock timing
//! state of the periodic publish loop. Commands and reset requests arrive
//! from the transport layer through a cloneable [`CommandHandle`]; state
//! flows out through a [`StatePublisher`].

use crate::bridge::{BufferedSimSink, CommandSink, DirectDriverSink};
use crate::config::Config;
use crate::drivers::ChassisDriver;
use crate::error::{Error, Result};
use crate::odometry::OdometryIntegrator;
use crate::streaming::{
    OdometryRecord, StatePublisher, StatusRecord, TransformRecord, now_micros,
};
use crate::types::{ChassisState, Pose2D, Quaternion};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Battery voltage reported on the simulated status path (volts)
const SIM_BATTERY_VOLTAGE: f64 = 29.5;

/// Control mode code reported on the simulated status path
const SIM_CONTROL_MODE: u8 = 0x01;

/// Producer-side handle for the command-arrival context
///
/// Cloneable and safe to call from any thread at any rate, including
/// bursts and long gaps. Commands route through the sink fixed at
/// messenger construction; reset requests are edge-triggered on `true`
/// and consumed by the next periodic tick.
#[derive(Clone)]
pub struct CommandHandle {
    sink: Arc<dyn CommandSink>,
    reset_requested: Arc<AtomicBool>,
}

impl CommandHandle {
    /// Submit a velocity command
    ///
    /// # Arguments
    /// * `linear` - Linear velocity in m/s
    /// * `angular` - Angular velocity in rad/s
    pub fn submit_motion_command(&self, linear: f64, angular: f64) -> Result<()> {
        self.sink.submit(linear, angular)
    }

    /// Request a pose re-zero
    ///
    /// Only `true` triggers a reset; `false` is a no-op, not a "stop
    /// resetting" instruction. The reset is applied by the next periodic
    /// tick, before anything is integrated.
    pub fn request_odometry_reset(&self, reset: bool) {
        if reset {
            self.reset_requested.store(true, Ordering::Relaxed);
        }
    }
}

/// Bridges commands to the chassis and publishes pose/status snapshots
///
/// Constructed once per process in one of two modes:
/// - [`with_driver`](Self::with_driver): commands go straight to the
///   chassis driver, periodic state comes back from it.
/// - [`simulated`](Self::simulated): commands land in a single-slot
///   buffer that the periodic loop samples; no driver is involved.
pub struct BaseMessenger {
    driver: Option<Arc<Mutex<Box<dyn ChassisDriver>>>>,
    sim_commands: Option<BufferedSimSink>,
    sink: Arc<dyn CommandSink>,
    reset_requested: Arc<AtomicBool>,

    integrator: OdometryIntegrator,
    publisher: Box<dyn StatePublisher>,

    odom_frame: String,
    base_frame: String,
    sim_control_rate: f64,

    /// Baseline for dt computation; None until the first real-mode tick
    last_time: Option<Instant>,
}

impl BaseMessenger {
    /// Create a messenger driving a real chassis
    pub fn with_driver(
        driver: Arc<Mutex<Box<dyn ChassisDriver>>>,
        config: &Config,
        publisher: Box<dyn StatePublisher>,
    ) -> Self {
        log::info!("BaseMessenger: Real mode - commands forwarded to chassis driver");

        let sink: Arc<dyn CommandSink> = Arc::new(DirectDriverSink::new(Arc::clone(&driver)));
        Self {
            driver: Some(driver),
            sim_commands: None,
            sink,
            reset_requested: Arc::new(AtomicBool::new(false)),
            integrator: OdometryIntegrator::new(),
            publisher,
            odom_frame: config.odometry.odom_frame.clone(),
            base_frame: config.odometry.base_frame.clone(),
            sim_control_rate: config.control.sim_control_rate,
            last_time: None,
        }
    }

    /// Create a messenger for simulated operation
    pub fn simulated(config: &Config, publisher: Box<dyn StatePublisher>) -> Self {
        log::info!(
            "BaseMessenger: Simulated mode - buffering commands, {}Hz control rate",
            config.control.sim_control_rate
        );

        let buffer = BufferedSimSink::new();
        let sink: Arc<dyn CommandSink> = Arc::new(buffer.clone());
        Self {
            driver: None,
            sim_commands: Some(buffer),
            sink,
            reset_requested: Arc::new(AtomicBool::new(false)),
            integrator: OdometryIntegrator::new(),
            publisher,
            odom_frame: config.odometry.odom_frame.clone(),
            base_frame: config.odometry.base_frame.clone(),
            sim_control_rate: config.control.sim_control_rate,
            last_time: None,
        }
    }

    /// Handle for the command-arrival context
    pub fn command_handle(&self) -> CommandHandle {
        CommandHandle {
            sink: Arc::clone(&self.sink),
            reset_requested: Arc::clone(&self.reset_requested),
        }
    }

    /// Current pose estimate
    pub fn pose(&self) -> Pose2D {
        self.integrator.pose()
    }

    /// Re-zero the accumulated pose immediately
    ///
    /// Velocity state and the dt baseline are untouched.
    pub fn reset_odometry(&mut self) {
        log::info!("BaseMessenger: Odometry reset");
        self.integrator.reset();
    }

    /// Publish one real-mode snapshot
    ///
    /// The first call only records the timestamp baseline - no valid dt
    /// exists yet, so nothing is integrated or published. Subsequent calls
    /// read the driver state, pass its telemetry through to the status
    /// stream, and integrate the measured velocity over the measured dt.
    pub fn publish_chassis_state(&mut self) -> Result<()> {
        let driver = Arc::clone(
            self.driver
                .as_ref()
                .ok_or(Error::ComponentNotAvailable("chassis driver"))?,
        );

        let now = Instant::now();
        let Some(last) = self.last_time else {
            self.last_time = Some(now);
            return Ok(());
        };
        let dt = now.duration_since(last).as_secs_f64();

        self.apply_pending_reset();

        let state = driver.lock().chassis_state()?;

        let status = StatusRecord {
            timestamp_us: now_micros(),
            state,
        };
        self.publisher.publish_status(&status)?;

        self.publish_odometry(state.linear_velocity, state.angular_velocity, dt)?;

        // Record time for next integration
        self.last_time = Some(now);
        Ok(())
    }

    /// Publish one simulated-mode snapshot
    ///
    /// Samples the buffered command, reports it as the measured state with
    /// nominal telemetry, and integrates over the fixed sim control period.
    /// No warm-up tick is needed on this path - dt never derives from the
    /// clock.
    pub fn publish_sim_state(&mut self) -> Result<()> {
        let cmd = self
            .sim_commands
            .as_ref()
            .ok_or(Error::ComponentNotAvailable("simulated command buffer"))?
            .sample();

        self.apply_pending_reset();

        let dt = 1.0 / self.sim_control_rate;

        let state = ChassisState {
            linear_velocity: cmd.linear,
            angular_velocity: cmd.angular,
            base_state: 0x00,
            control_mode: SIM_CONTROL_MODE,
            fault_code: 0x00,
            battery_voltage: SIM_BATTERY_VOLTAGE,
            motor_states: Default::default(),
        };
        let status = StatusRecord {
            timestamp_us: now_micros(),
            state,
        };
        self.publisher.publish_status(&status)?;

        self.publish_odometry(cmd.linear, cmd.angular, dt)
    }

    /// Consume a pending reset request, if any
    fn apply_pending_reset(&mut self) {
        if self.reset_requested.swap(false, Ordering::Relaxed) {
            self.reset_odometry();
        }
    }

    /// Integrate one velocity sample and publish transform + odometry
    fn publish_odometry(&mut self, linear: f64, angular: f64, dt: f64) -> Result<()> {
        let pose = self.integrator.integrate(linear, angular, dt);
        let orientation = Quaternion::from_yaw(pose.theta);
        let timestamp_us = now_micros();

        let tf = TransformRecord {
            timestamp_us,
            frame_id: self.odom_frame.clone(),
            child_frame_id: self.base_frame.clone(),
            translation: [pose.x, pose.y, 0.0],
            rotation: orientation,
        };
        self.publisher.publish_transform(&tf)?;

        let odom = OdometryRecord {
            timestamp_us,
            frame_id: self.odom_frame.clone(),
            child_frame_id: self.base_frame.clone(),
            pose,
            orientation,
            velocity: self.integrator.velocity(),
        };
        self.publisher.publish_odometry(&odom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::MockChassisDriver;
    use crate::streaming::{ChannelPublisher, StreamMessage};
    use crossbeam_channel::Receiver;
    use std::thread;
    use std::time::Duration;

    fn sim_messenger() -> (BaseMessenger, Receiver<StreamMessage>) {
        let mut config = Config::defaults();
        config.base.simulated = true;
        let (publisher, rx) = ChannelPublisher::new();
        (BaseMessenger::simulated(&config, Box::new(publisher)), rx)
    }

    fn real_messenger() -> (BaseMessenger, MockChassisDriver, Receiver<StreamMessage>) {
        let config = Config::defaults();
        let driver = MockChassisDriver::new();
        let boxed: Box<dyn ChassisDriver> = Box::new(driver.clone());
        let (publisher, rx) = ChannelPublisher::new();
        let messenger =
            BaseMessenger::with_driver(Arc::new(Mutex::new(boxed)), &config, Box::new(publisher));
        (messenger, driver, rx)
    }

    #[test]
    fn test_first_tick_records_baseline_only() {
        let (mut messenger, _driver, rx) = real_messenger();

        let handle = messenger.command_handle();
        handle.submit_motion_command(1.0, 0.5).unwrap();

        messenger.publish_chassis_state().unwrap();
        assert_eq!(messenger.pose(), Pose2D::zero());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_second_tick_integrates_driver_state() {
        let (mut messenger, _driver, rx) = real_messenger();

        let handle = messenger.command_handle();
        handle.submit_motion_command(1.0, 0.0).unwrap();

        messenger.publish_chassis_state().unwrap();
        thread::sleep(Duration::from_millis(20));
        messenger.publish_chassis_state().unwrap();

        assert!(messenger.pose().x > 0.0);
        assert_eq!(messenger.pose().theta, 0.0);

        // Status, transform, and odometry for the second tick
        let msgs: Vec<_> = rx.try_iter().collect();
        assert_eq!(msgs.len(), 3);
    }

    #[test]
    fn test_status_passes_telemetry_through() {
        let (mut messenger, _driver, rx) = real_messenger();

        messenger.publish_chassis_state().unwrap();
        messenger.publish_chassis_state().unwrap();

        let status = rx
            .try_iter()
            .find_map(|msg| match msg {
                StreamMessage::Status(s) => Some(s),
                _ => None,
            })
            .expect("status record published");
        assert_eq!(status.state.battery_voltage, 29.5);
        assert_eq!(status.state.control_mode, 0x01);
        assert_eq!(status.state.fault_code, 0);
    }

    #[test]
    fn test_sim_tick_uses_fixed_dt() {
        let (mut messenger, _rx) = sim_messenger();

        let handle = messenger.command_handle();
        handle.submit_motion_command(1.0, 0.0).unwrap();

        messenger.publish_sim_state().unwrap();
        assert_eq!(messenger.pose().x, 1.0 / 50.0);
    }

    #[test]
    fn test_sim_commands_are_last_write_wins() {
        let (mut messenger, rx) = sim_messenger();

        let handle = messenger.command_handle();
        handle.submit_motion_command(1.0, 0.0).unwrap();
        handle.submit_motion_command(2.0, 0.0).unwrap();

        messenger.publish_sim_state().unwrap();

        let odom = rx
            .try_iter()
            .find_map(|msg| match msg {
                StreamMessage::Odometry(o) => Some(o),
                _ => None,
            })
            .expect("odometry record published");
        assert_eq!(odom.velocity.linear, 2.0);
    }

    #[test]
    fn test_odometry_velocity_matches_integrated_values() {
        let (mut messenger, rx) = sim_messenger();

        let handle = messenger.command_handle();
        handle.submit_motion_command(0.5, 0.3872).unwrap();
        messenger.publish_sim_state().unwrap();

        let odom = rx
            .try_iter()
            .find_map(|msg| match msg {
                StreamMessage::Odometry(o) => Some(o),
                _ => None,
            })
            .expect("odometry record published");
        assert_eq!(odom.velocity.linear, 0.5);
        assert_eq!(odom.velocity.angular, 0.3872);
        assert_eq!(odom.pose, messenger.pose());
    }

    #[test]
    fn test_reset_request_is_edge_triggered() {
        let (mut messenger, _rx) = sim_messenger();

        let handle = messenger.command_handle();
        handle.submit_motion_command(1.0, 0.0).unwrap();
        let dt = 1.0 / 50.0;

        messenger.publish_sim_state().unwrap();
        messenger.publish_sim_state().unwrap();
        assert!((messenger.pose().x - 2.0 * dt).abs() < 1e-12);

        // false is a no-op
        handle.request_odometry_reset(false);
        messenger.publish_sim_state().unwrap();
        assert!((messenger.pose().x - 3.0 * dt).abs() < 1e-12);

        // true re-zeroes before the next integration step
        handle.request_odometry_reset(true);
        messenger.publish_sim_state().unwrap();
        assert_eq!(messenger.pose().x, dt);
    }

    #[test]
    fn test_reset_does_not_rearm_warmup() {
        let (mut messenger, _driver, rx) = real_messenger();

        let handle = messenger.command_handle();
        handle.submit_motion_command(1.0, 0.0).unwrap();

        messenger.publish_chassis_state().unwrap();
        thread::sleep(Duration::from_millis(10));
        messenger.publish_chassis_state().unwrap();
        let _ = rx.try_iter().count();

        // After a reset the next tick must integrate, not re-baseline
        handle.request_odometry_reset(true);
        thread::sleep(Duration::from_millis(10));
        messenger.publish_chassis_state().unwrap();

        assert_eq!(rx.try_iter().count(), 3);
        assert!(messenger.pose().x > 0.0);
    }

    #[test]
    fn test_sim_messenger_has_no_chassis_path() {
        let (mut messenger, _rx) = sim_messenger();
        assert!(matches!(
            messenger.publish_chassis_state(),
            Err(Error::ComponentNotAvailable(_))
        ));
    }

    #[test]
    fn test_real_messenger_has_no_sim_path() {
        let (mut messenger, _driver, _rx) = real_messenger();
        assert!(matches!(
            messenger.publish_sim_state(),
            Err(Error::ComponentNotAvailable(_))
        ));
    }
}
