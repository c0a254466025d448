//! State publication seam
//!
//! Each periodic snapshot is handed to a [`StatePublisher`]; the transport
//! layer decides the wire encoding and delivery. [`ChannelPublisher`] is
//! the in-process implementation used by the daemon and tests.

pub mod messages;

pub use messages::{OdometryRecord, StatusRecord, TransformRecord, now_micros};

use crate::error::Result;
use crossbeam_channel::{Receiver, Sender};

/// Messages carried on the stream channel
#[derive(Debug, Clone)]
pub enum StreamMessage {
    Status(StatusRecord),
    Odometry(OdometryRecord),
    Transform(TransformRecord),
}

/// Consumer of periodic state snapshots
pub trait StatePublisher: Send {
    /// Publish a chassis status record
    fn publish_status(&mut self, status: &StatusRecord) -> Result<()>;

    /// Publish an odometry record
    fn publish_odometry(&mut self, odom: &OdometryRecord) -> Result<()>;

    /// Publish a transform record
    fn publish_transform(&mut self, tf: &TransformRecord) -> Result<()>;
}

/// Publisher that fans records into a crossbeam channel
pub struct ChannelPublisher {
    tx: Sender<StreamMessage>,
}

impl ChannelPublisher {
    /// Create a publisher and the receiving end of its channel
    pub fn new() -> (Self, Receiver<StreamMessage>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }

    fn send(&self, msg: StreamMessage) -> Result<()> {
        // A disconnected consumer means shutdown is underway; drop silently
        let _ = self.tx.send(msg);
        Ok(())
    }
}

impl StatePublisher for ChannelPublisher {
    fn publish_status(&mut self, status: &StatusRecord) -> Result<()> {
        self.send(StreamMessage::Status(status.clone()))
    }

    fn publish_odometry(&mut self, odom: &OdometryRecord) -> Result<()> {
        self.send(StreamMessage::Odometry(odom.clone()))
    }

    fn publish_transform(&mut self, tf: &TransformRecord) -> Result<()> {
        self.send(StreamMessage::Transform(tf.clone()))
    }
}
