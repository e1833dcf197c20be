//! Decision engine: thresholds to indicator states.
//!
//! Pure and I/O-free: the caller applies the result to the drivers and
//! decides whether to announce the changes.

use super::state::{ActuatorId, ActuatorState, OperationMode, SensorReading, ThresholdConfig};

/// Which indicators differ from the previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Changed {
    pub near_proximity: bool,
    pub low_light: bool,
}

impl Changed {
    pub fn any(&self) -> bool {
        self.near_proximity || self.low_light
    }

    pub fn get(&self, id: ActuatorId) -> bool {
        match id {
            ActuatorId::NearProximity => self.near_proximity,
            ActuatorId::LowLight => self.low_light,
        }
    }
}

/// Output of one [`decide`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub states: ActuatorState,
    pub changed: Changed,
}

/// Compute indicator states for `reading`.
///
/// Outside Automatic mode the previous states come back untouched.
/// Comparisons are strict: a reading equal to its threshold is "off".
/// A timeout sentinel distance is just a large distance here.
pub fn decide(
    mode: OperationMode,
    reading: &SensorReading,
    thresholds: &ThresholdConfig,
    previous: ActuatorState,
) -> Decision {
    if mode != OperationMode::Automatic {
        return Decision {
            states: previous,
            changed: Changed::default(),
        };
    }

    let states = ActuatorState {
        low_light: reading.brightness < thresholds.brightness_threshold,
        near_proximity: reading.distance < thresholds.distance_threshold,
    };

    Decision {
        states,
        changed: Changed {
            near_proximity: states.near_proximity != previous.near_proximity,
            low_light: states.low_light != previous.low_light,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TH: ThresholdConfig = ThresholdConfig {
        brightness_threshold: 800,
        distance_threshold: 10.0,
    };

    fn reading(brightness: u16, distance: f32) -> SensorReading {
        SensorReading { brightness, distance }
    }

    #[test]
    fn dark_turns_low_light_on() {
        let d = decide(OperationMode::Automatic, &reading(500, 50.0), &TH, ActuatorState::all_off());
        assert!(d.states.low_light);
        assert!(d.changed.low_light);
        assert!(!d.changed.near_proximity);

        let d = decide(OperationMode::Automatic, &reading(900, 50.0), &TH, d.states);
        assert!(!d.states.low_light);
        assert!(d.changed.low_light);
    }

    #[test]
    fn close_object_turns_near_proximity_on() {
        let d = decide(OperationMode::Automatic, &reading(900, 5.0), &TH, ActuatorState::all_off());
        assert!(d.states.near_proximity);

        let d = decide(OperationMode::Automatic, &reading(900, 15.0), &TH, d.states);
        assert!(!d.states.near_proximity);
    }

    #[test]
    fn equality_is_off() {
        let d = decide(OperationMode::Automatic, &reading(800, 10.0), &TH, ActuatorState::all_off());
        assert_eq!(d.states, ActuatorState::all_off());
        assert!(!d.changed.any());
    }

    #[test]
    fn manual_mode_is_a_no_op() {
        let prev = ActuatorState {
            near_proximity: false,
            low_light: true,
        };
        let d = decide(OperationMode::Manual, &reading(5000, 1.0), &TH, prev);
        assert_eq!(d.states, prev);
        assert!(!d.changed.any());
    }

    #[test]
    fn sentinel_distance_reads_as_far() {
        let d = decide(OperationMode::Automatic, &reading(900, 425.0), &TH, ActuatorState::all_off());
        assert!(!d.states.near_proximity);
    }
}
