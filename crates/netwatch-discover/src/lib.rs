//! netwatch-discover: Periodic LAN device inventory monitor.
//!
//! Enumerates devices on the local segment (and optionally the Tailscale
//! mesh), reconciles them against the known-device cache and posts webhook
//! notifications: one inventory snapshot on the first cycle, then one alert
//! per newly observed device.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod notify;
pub mod probe;
pub mod scheduler;
pub mod vendor;
