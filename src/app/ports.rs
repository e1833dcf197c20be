//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, indicators, event sinks, transport) implement
//! these traits.  The [`AppService`](super::service::AppService) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::error::CommsError;

use super::events::AppEvent;
use super::state::ActuatorId;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain one fresh sample.
pub trait SensorPort {
    /// Raw brightness sample.  Always available.
    fn read_brightness(&mut self) -> u16;

    /// Distance in centimetres.  Blocks for at most the configured echo
    /// bound; on timeout the implementation returns its sentinel distance
    /// instead of failing.
    fn measure_distance_cm(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive the indicators.
pub trait ActuatorPort {
    /// Switch one sensor-driven indicator.
    fn set_indicator(&mut self, id: ActuatorId, on: bool);

    /// Mode indicator: on for Automatic, off for Manual.
    fn set_mode_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log, MQTT).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

/// Fan an event out to two sinks, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

// ───────────────────────────────────────────────────────────────
// Transport ports (driven adapter: domain ↔ message broker)
// ───────────────────────────────────────────────────────────────

/// Outbound half of the message transport.
///
/// Delivery is at-most-once; callers do not retry.
pub trait Publisher {
    fn publish(&mut self, topic: &str, key: &str, value: &str) -> Result<(), CommsError>;
}

/// Inbound half of the message transport.  The adapter subscribes and
/// forwards each arriving message into the [`inbox`](crate::inbox).
pub trait Subscriber {
    fn subscribe(&mut self, topic: &str) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic microsecond clock used for echo pulse timing and cadences.
pub trait MicrosClock {
    fn now_us(&self) -> u64;

    fn now_ms(&self) -> u64 {
        self.now_us() / 1_000
    }
}

impl<C: MicrosClock + ?Sized> MicrosClock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the run loop)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the scheduler invokes when a cadence comes due.
pub trait SchedulerDelegate {
    fn on_cadence(&mut self, cadence: Cadence);
}

/// The periodic steps of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Fast tick: sample sensors, run the automatic decision.
    Sample,
    /// Slow tick: transmit sensor and indicator reports.
    Report,
}
