//! netwatch-core: Shared types for the netwatch device inventory monitor.
//!
//! This crate provides the foundational types used across the workspace:
//! - The `Device` record persisted in the known-device cache
//! - MAC address normalization
//! - Discovery source labels and display placeholders

pub mod error;
pub mod types;

pub use error::CoreError;
pub use types::{Device, DeviceSource};
