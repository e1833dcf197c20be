//! Mock adapters for integration tests.
//!
//! Records every actuator call and every emitted event so tests can
//! assert on the full history without touching real GPIO registers.

use smartlight::app::events::AppEvent;
use smartlight::app::ports::{ActuatorPort, EventSink, Publisher, SensorPort};
use smartlight::app::state::{ActuatorId, ActuatorState};
use smartlight::error::CommsError;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    Indicator { id: ActuatorId, on: bool },
    ModeIndicator(bool),
}

// ── MockHardware ──────────────────────────────────────────────

/// Scripted sensors plus recording actuators.
pub struct MockHardware {
    pub brightness: u16,
    pub distance: f32,
    pub calls: Vec<ActuatorCall>,
    pub samples: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(brightness: u16, distance: f32) -> Self {
        Self {
            brightness,
            distance,
            calls: Vec::new(),
            samples: 0,
        }
    }

    /// Physical level of each indicator after the recorded writes.
    pub fn indicators(&self) -> ActuatorState {
        let mut state = ActuatorState::all_off();
        for call in &self.calls {
            if let ActuatorCall::Indicator { id, on } = *call {
                state.set(id, on);
            }
        }
        state
    }

    pub fn mode_indicator(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match *c {
            ActuatorCall::ModeIndicator(on) => Some(on),
            ActuatorCall::Indicator { .. } => None,
        })
    }

    pub fn writes_to(&self, id: ActuatorId) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Indicator { id: i, .. } if *i == id))
            .count()
    }
}

impl SensorPort for MockHardware {
    fn read_brightness(&mut self) -> u16 {
        self.samples += 1;
        self.brightness
    }

    fn measure_distance_cm(&mut self) -> f32 {
        self.distance
    }
}

impl ActuatorPort for MockHardware {
    fn set_indicator(&mut self, id: ActuatorId, on: bool) {
        self.calls.push(ActuatorCall::Indicator { id, on });
    }

    fn set_mode_indicator(&mut self, on: bool) {
        self.calls.push(ActuatorCall::ModeIndicator(on));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── MockPublisher ─────────────────────────────────────────────

/// Records `(topic, key, value)` publishes; can be told to fail.
#[derive(Default)]
pub struct MockPublisher {
    pub sent: Vec<(String, String, String)>,
    pub fail: bool,
}

#[allow(dead_code)]
impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, topic: &str, key: &str) -> Vec<&str> {
        self.sent
            .iter()
            .filter(|(t, k, _)| t == topic && k == key)
            .map(|(_, _, v)| v.as_str())
            .collect()
    }
}

impl Publisher for MockPublisher {
    fn publish(&mut self, topic: &str, key: &str, value: &str) -> Result<(), CommsError> {
        if self.fail {
            return Err(CommsError::MqttPublishFailed);
        }
        self.sent.push((topic.to_owned(), key.to_owned(), value.to_owned()));
        Ok(())
    }
}
