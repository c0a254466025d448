//! Core data types shared across the crate

pub mod motion;
pub mod status;

pub use motion::{Pose2D, Quaternion, Velocity};
pub use status::{ChassisState, MotorState};
