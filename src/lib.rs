//! # espbridge
//!
//! A bridge between a chat command interface and two networked embedded
//! devices: an ESP8266 actuator controller (lights, motors, cooler) and
//! an ESP32-CAM module serving a continuous MJPEG stream.
//!
//! ```text
//!  Telegram ──long poll──┐                       ┌──GET /?State=<cmd>──▶ ESP8266
//!                        ├─▶ validate ─▶ forward ┤
//!  POST /comando ────────┘        │              └──poll GET /nextCommand◀─ ESP8266
//!                                 └─▶ mailbox ──────────────┘
//!
//!  GET /cam/* ──rewrite──▶ ESP32-CAM /stream (pass-through streaming)
//!  GET /status ──probes──▶ both devices
//! ```
//!
//! Commands are short fixed tokens (`f`, `b`, `s`, digits, `encender
//! luces`, ...). Anything outside the vocabulary is rejected before a
//! single byte goes to a device. Accepted commands are pushed directly
//! to the actuator and also parked in a single-slot mailbox so a device
//! behind NAT can poll for the latest one instead.
//!
//! ## Modules
//!
//! - [`command`]: the fixed command vocabulary and validation
//! - [`device`]: forwarder, stream relay, and reachability probes
//! - [`mailbox`]: single-slot pending-command store
//! - [`channels`]: chat channel adapters (Telegram long polling)
//! - [`processor`]: chat-side command flow
//! - [`api`]: axum HTTP surface
//! - [`config`]: environment-derived configuration
//! - [`bootstrap`]: startup wiring

pub mod api;
pub mod bootstrap;
pub mod channels;
pub mod command;
pub mod config;
pub mod device;
pub mod error;
pub mod mailbox;
pub mod processor;

pub use api::{build_app, AppState};
pub use command::Vocabulary;
pub use config::BridgeConfig;
pub use device::{DeviceStatus, Forwarder, Reachability, StatusReporter, StreamRelay};
pub use error::{Error, Result};
pub use mailbox::Mailbox;
pub use processor::MessageProcessor;
