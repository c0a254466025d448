//! VahanaBase - chassis driver core for tracked mobile bases
//!
//! Converts a stream of velocity commands and raw chassis state into a
//! continuously updated pose estimate, and hands commands from the
//! transport layer to either a real chassis driver or a simulated
//! command buffer.

pub mod bridge;
pub mod config;
pub mod devices;
pub mod drivers;
pub mod error;
pub mod messenger;
pub mod odometry;
pub mod streaming;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use messenger::{BaseMessenger, CommandHandle};
pub use odometry::OdometryIntegrator;
