//! Motion and pose types

use serde::{Deserialize, Serialize};

/// Robot velocity (linear and angular)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Linear velocity in m/s
    pub linear: f64,
    /// Angular velocity in rad/s
    pub angular: f64,
}

impl Velocity {
    /// Create new velocity
    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    /// Zero velocity
    pub fn zero() -> Self {
        Self {
            linear: 0.0,
            angular: 0.0,
        }
    }
}

/// 2D pose (position and orientation)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Heading angle in radians
    ///
    /// Not wrapped to [-π, π]; accumulates continuously with integration.
    pub theta: f64,
}

impl Pose2D {
    /// Pose at the origin
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }
}

/// Orientation quaternion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    /// Identity rotation
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }

    /// Quaternion for a pure yaw rotation (about +Z)
    pub fn from_yaw(yaw: f64) -> Self {
        let half = yaw * 0.5;
        Self {
            x: 0.0,
            y: 0.0,
            z: half.sin(),
            w: half.cos(),
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quaternion_from_zero_yaw() {
        assert_eq!(Quaternion::from_yaw(0.0), Quaternion::identity());
    }

    #[test]
    fn test_quaternion_from_yaw() {
        let q = Quaternion::from_yaw(std::f64::consts::FRAC_PI_2);
        assert!((q.z - std::f64::consts::FRAC_PI_4.sin()).abs() < 1e-12);
        assert!((q.w - std::f64::consts::FRAC_PI_4.cos()).abs() < 1e-12);
        assert_eq!(q.x, 0.0);
        assert_eq!(q.y, 0.0);
    }
}
