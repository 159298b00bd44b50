//! Outbound device plumbing
//!
//! Everything that talks to the two embedded devices: the command
//! forwarder (actuator), the stream relay (camera), and the
//! reachability prober (both).

mod forwarder;
mod relay;
mod status;

pub use forwarder::Forwarder;
pub use relay::StreamRelay;
pub use status::{DeviceStatus, Reachability, StatusReporter};
