//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the SmartLight controller:
//! threshold decisions, mode-gated remote control and state reporting.
//! All interaction with hardware and the broker happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod commands;
pub mod decision;
pub mod events;
pub mod handler;
pub mod ports;
pub mod report;
pub mod router;
pub mod service;
pub mod state;
