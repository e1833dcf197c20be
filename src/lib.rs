//! SmartLight street-light controller firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; on other targets
//! the drivers fall back to simulation stubs.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod inbox;
pub mod runtime;
pub mod scheduler;

pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;

/// Firmware identifier announced in the boot banner.
pub const FIRMWARE_VERSION: &str = "smartLgt_0.92";
