//! Published record types
//!
//! Wire encoding is the transport layer's concern; these records carry the
//! numeric fields it publishes.

use crate::types::{ChassisState, Pose2D, Quaternion, Velocity};
use serde::{Deserialize, Serialize};

/// Chassis status record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Capture time in microseconds since the Unix epoch
    pub timestamp_us: u64,
    /// Driver-reported state, passed through uninterpreted
    pub state: ChassisState,
}

/// Pose-plus-twist record for odometry publication
///
/// The velocity fields always match the values the pose was just
/// integrated with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdometryRecord {
    /// Capture time in microseconds since the Unix epoch
    pub timestamp_us: u64,
    /// Parent frame id
    pub frame_id: String,
    /// Child (robot body) frame id
    pub child_frame_id: String,
    /// Accumulated pose since the last reset
    pub pose: Pose2D,
    /// Heading as a quaternion (pure yaw)
    pub orientation: Quaternion,
    /// Velocity pair behind the latest integration step
    pub velocity: Velocity,
}

/// Relative transform record (parent frame -> child frame)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformRecord {
    /// Capture time in microseconds since the Unix epoch
    pub timestamp_us: u64,
    /// Parent frame id
    pub frame_id: String,
    /// Child frame id
    pub child_frame_id: String,
    /// Translation (x, y, z) in meters
    pub translation: [f64; 3],
    /// Rotation quaternion
    pub rotation: Quaternion,
}

/// Current time in microseconds since the Unix epoch
pub fn now_micros() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
