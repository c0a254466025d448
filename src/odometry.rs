//! Dead-reckoning odometry from velocity samples
//!
//! Integrates successive (linear, angular) velocity pairs into a running
//! pose estimate using the differential-drive unicycle model.

use crate::types::{Pose2D, Velocity};

/// Accumulates a 2D pose estimate from velocity samples.
///
/// Each call to [`integrate`](Self::integrate) advances the pose by one
/// first-order (Euler) step: the instantaneous velocity is applied over the
/// elapsed time `dt`. The heading accumulates without wrapping, so
/// downstream consumers see continuous yaw across full turns.
///
/// The integrator has no failure conditions: every finite input produces a
/// deterministic pose update, and no allocation happens on the update path.
pub struct OdometryIntegrator {
    position_x: f64,
    position_y: f64,
    heading: f64,

    /// Most recently integrated velocity pair
    velocity: Velocity,
}

impl OdometryIntegrator {
    /// Create an integrator at the origin
    pub fn new() -> Self {
        Self {
            position_x: 0.0,
            position_y: 0.0,
            heading: 0.0,
            velocity: Velocity::zero(),
        }
    }

    /// Advance the pose by one Euler step and return the updated estimate.
    ///
    /// # Arguments
    /// * `linear` - Linear velocity in m/s (negative = backward)
    /// * `angular` - Angular velocity in rad/s (positive = CCW)
    /// * `dt` - Elapsed time in seconds since the previous step
    ///
    /// `dt` is not validated: zero produces no displacement, and a negative
    /// value integrates backward in time - avoiding that is the caller's
    /// responsibility. Non-finite velocities propagate into the pose.
    pub fn integrate(&mut self, linear: f64, angular: f64, dt: f64) -> Pose2D {
        let d_x = linear * self.heading.cos() * dt;
        let d_y = linear * self.heading.sin() * dt;
        let d_theta = angular * dt;

        self.position_x += d_x;
        self.position_y += d_y;
        self.heading += d_theta;

        self.velocity = Velocity::new(linear, angular);

        self.pose()
    }

    /// Re-zero the accumulated pose.
    ///
    /// Velocity state is left untouched. Idempotent.
    pub fn reset(&mut self) {
        log::debug!("OdometryIntegrator: Reset - re-zeroing pose");

        self.position_x = 0.0;
        self.position_y = 0.0;
        self.heading = 0.0;
    }

    /// Current pose estimate
    #[inline]
    pub fn pose(&self) -> Pose2D {
        Pose2D {
            x: self.position_x,
            y: self.position_y,
            theta: self.heading,
        }
    }

    /// Most recently integrated velocity pair
    #[inline]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }
}

impl Default for OdometryIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line() {
        let mut integrator = OdometryIntegrator::new();

        let pose = integrator.integrate(1.0, 0.0, 1.0);
        assert_eq!(pose.x, 1.0);
        assert_eq!(pose.y, 0.0);
        assert_eq!(pose.theta, 0.0);
    }

    #[test]
    fn test_pure_rotation() {
        let mut integrator = OdometryIntegrator::new();

        let pose = integrator.integrate(0.0, 1.0, 1.0);
        assert_eq!(pose.x, 0.0);
        assert_eq!(pose.y, 0.0);
        assert_eq!(pose.theta, 1.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut integrator = OdometryIntegrator::new();
        integrator.integrate(2.0, -1.0, 0.5);

        let before = integrator.pose();
        let after = integrator.integrate(5.0, 3.0, 0.0);
        assert_eq!(before, after);
    }

    #[test]
    fn test_negative_dt_integrates_backward() {
        let mut integrator = OdometryIntegrator::new();
        integrator.integrate(1.0, 0.0, 1.0);

        let pose = integrator.integrate(1.0, 0.0, -1.0);
        assert_eq!(pose.x, 0.0);
    }

    #[test]
    fn test_heading_is_not_wrapped() {
        let mut integrator = OdometryIntegrator::new();

        for _ in 0..4 {
            integrator.integrate(0.0, 2.0, 1.0);
        }
        // Two full turns and change - stays unwrapped
        assert_eq!(integrator.pose().theta, 8.0);
    }

    #[test]
    fn test_reset_zeroes_pose_exactly() {
        let mut integrator = OdometryIntegrator::new();
        integrator.integrate(0.7, 0.3, 0.1);
        integrator.integrate(-0.2, 1.1, 0.1);
        integrator.integrate(0.5, -0.4, 0.1);

        integrator.reset();
        assert_eq!(integrator.pose(), Pose2D::zero());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut integrator = OdometryIntegrator::new();
        integrator.integrate(1.0, 1.0, 1.0);

        integrator.reset();
        let once = integrator.pose();
        integrator.reset();
        assert_eq!(once, integrator.pose());
    }

    #[test]
    fn test_reset_keeps_velocity_state() {
        let mut integrator = OdometryIntegrator::new();
        integrator.integrate(0.4, -0.2, 0.02);

        integrator.reset();
        assert_eq!(integrator.velocity(), Velocity::new(0.4, -0.2));
    }

    #[test]
    fn test_velocity_state_overwritten_each_step() {
        let mut integrator = OdometryIntegrator::new();
        integrator.integrate(1.0, 0.5, 0.02);
        integrator.integrate(0.3, -0.1, 0.02);

        assert_eq!(integrator.velocity(), Velocity::new(0.3, -0.1));
    }

    #[test]
    fn test_heading_affects_translation() {
        let mut integrator = OdometryIntegrator::new();

        // Quarter turn in place, then drive "forward"
        integrator.integrate(0.0, std::f64::consts::FRAC_PI_2, 1.0);
        let pose = integrator.integrate(1.0, 0.0, 1.0);

        assert!(pose.x.abs() < 1e-12);
        assert!((pose.y - 1.0).abs() < 1e-12);
    }
}
