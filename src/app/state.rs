//! Control state: the single owned "blackboard" of the controller.
//!
//! [`ControlState`] holds the operation mode, the fixed thresholds, the
//! latest sensor reading and the last commanded indicator states.  It is
//! owned by [`AppService`](super::service::AppService) for the lifetime
//! of the run loop and passed explicitly to the decision engine and the
//! command handler; nothing here is global.

use core::fmt;

// ---------------------------------------------------------------------------
// Operation mode
// ---------------------------------------------------------------------------

/// Which writer is authoritative over the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationMode {
    /// Indicators follow the sensor thresholds; remote indicator writes are dropped.
    #[default]
    Automatic,
    /// Indicators follow the last accepted remote command; readings are ignored.
    Manual,
}

impl OperationMode {
    /// Token used on the wire for the automatic mode.
    pub const AUTOMATIC_TOKEN: &'static str = "automatic";
    /// Token reported for the manual mode.
    pub const MANUAL_TOKEN: &'static str = "manual";

    /// Any value other than the automatic token switches to manual.
    pub fn from_token(token: &str) -> Self {
        if token == Self::AUTOMATIC_TOKEN {
            Self::Automatic
        } else {
            Self::Manual
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Automatic => Self::AUTOMATIC_TOKEN,
            Self::Manual => Self::MANUAL_TOKEN,
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

// ---------------------------------------------------------------------------
// Sensor reading / thresholds
// ---------------------------------------------------------------------------

/// Latest-value sample from both sensors.  No history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReading {
    /// Raw CdS ADC sample (sensor-native range).
    pub brightness: u16,
    /// Echo-derived distance in centimetres (sentinel on timeout).
    pub distance: f32,
}

/// Comparison values for the decision engine.  Fixed at run time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdConfig {
    pub brightness_threshold: u16,
    pub distance_threshold: f32,
}

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

/// The two sensor-driven indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActuatorId {
    /// Blue LED, lit when something is closer than the distance threshold.
    NearProximity,
    /// Green LED, lit when ambient light is below the brightness threshold.
    LowLight,
}

impl ActuatorId {
    pub const ALL: [Self; 2] = [Self::NearProximity, Self::LowLight];

    /// Topic name used both for inbound commands and outbound state reports.
    pub fn topic(self) -> &'static str {
        match self {
            Self::NearProximity => "blue_led",
            Self::LowLight => "green_led",
        }
    }

    pub fn from_topic(topic: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.topic() == topic)
    }
}

/// On/off state of both indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorState {
    pub near_proximity: bool,
    pub low_light: bool,
}

impl ActuatorState {
    /// Both indicators off: the startup state.
    pub const fn all_off() -> Self {
        Self {
            near_proximity: false,
            low_light: false,
        }
    }

    pub fn get(&self, id: ActuatorId) -> bool {
        match id {
            ActuatorId::NearProximity => self.near_proximity,
            ActuatorId::LowLight => self.low_light,
        }
    }

    pub fn set(&mut self, id: ActuatorId, on: bool) {
        match id {
            ActuatorId::NearProximity => self.near_proximity = on,
            ActuatorId::LowLight => self.low_light = on,
        }
    }
}

// ---------------------------------------------------------------------------
// ControlState
// ---------------------------------------------------------------------------

/// Process-wide controller state, owned by the run loop.
#[derive(Debug, Clone)]
pub struct ControlState {
    pub mode: OperationMode,
    pub thresholds: ThresholdConfig,
    pub reading: SensorReading,
    pub actuators: ActuatorState,
}

impl ControlState {
    /// Startup state: Automatic, no reading yet, both indicators off.
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self {
            mode: OperationMode::Automatic,
            thresholds,
            reading: SensorReading::default(),
            actuators: ActuatorState::all_off(),
        }
    }

    pub fn is_automatic(&self) -> bool {
        self.mode == OperationMode::Automatic
    }
}
