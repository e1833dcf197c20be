//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns both drivers and produces a [`SensorReading`] each sampling
//! tick.  Neither read can fail from the caller's point of view: the light
//! sensor always yields a count and the rangefinder substitutes its
//! sentinel distance on timeout.

pub mod distance;
pub mod light;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::MicrosClock;
use crate::app::state::SensorReading;
use distance::DistanceSensor;
use light::LightSensor;

/// Anything that can produce a distance in centimetres without failing.
pub trait Rangefinder {
    fn distance_cm(&mut self) -> f32;
}

impl<T, E, D, C> Rangefinder for DistanceSensor<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: MicrosClock,
{
    fn distance_cm(&mut self) -> f32 {
        self.measure_or_sentinel()
    }
}

/// Aggregates the sensor drivers.
pub struct SensorHub<R> {
    pub light: LightSensor,
    pub range: R,
}

impl<R: Rangefinder> SensorHub<R> {
    /// Pass in pre-built drivers (built in main where peripheral ownership
    /// is established).
    pub fn new(light: LightSensor, range: R) -> Self {
        Self { light, range }
    }

    pub fn read_brightness(&mut self) -> u16 {
        self.light.read()
    }

    pub fn measure_distance_cm(&mut self) -> f32 {
        self.range.distance_cm()
    }

    /// Brightness first, then distance.
    pub fn read_all(&mut self) -> SensorReading {
        SensorReading {
            brightness: self.read_brightness(),
            distance: self.measure_distance_cm(),
        }
    }
}
