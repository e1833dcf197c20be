//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the three indicator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module
//! in the system that touches actual hardware.  On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::app::state::ActuatorId;
use crate::drivers::indicator_led::IndicatorLed;
use crate::sensors::{Rangefinder, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<R> {
    sensor_hub: SensorHub<R>,
    near_proximity: IndicatorLed,
    low_light: IndicatorLed,
    mode: IndicatorLed,
}

impl<R: Rangefinder> HardwareAdapter<R> {
    pub fn new(
        sensor_hub: SensorHub<R>,
        near_proximity: IndicatorLed,
        low_light: IndicatorLed,
        mode: IndicatorLed,
    ) -> Self {
        Self {
            sensor_hub,
            near_proximity,
            low_light,
            mode,
        }
    }

    /// Current level of a sensor-driven indicator as last written.
    pub fn indicator(&self, id: ActuatorId) -> bool {
        self.led(id).is_lit()
    }

    pub fn mode_indicator(&self) -> bool {
        self.mode.is_lit()
    }

    fn led(&self, id: ActuatorId) -> &IndicatorLed {
        match id {
            ActuatorId::NearProximity => &self.near_proximity,
            ActuatorId::LowLight => &self.low_light,
        }
    }

    fn led_mut(&mut self, id: ActuatorId) -> &mut IndicatorLed {
        match id {
            ActuatorId::NearProximity => &mut self.near_proximity,
            ActuatorId::LowLight => &mut self.low_light,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<R: Rangefinder> SensorPort for HardwareAdapter<R> {
    fn read_brightness(&mut self) -> u16 {
        self.sensor_hub.read_brightness()
    }

    fn measure_distance_cm(&mut self) -> f32 {
        self.sensor_hub.measure_distance_cm()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<R: Rangefinder> ActuatorPort for HardwareAdapter<R> {
    fn set_indicator(&mut self, id: ActuatorId, on: bool) {
        self.led_mut(id).set(on);
    }

    fn set_mode_indicator(&mut self, on: bool) {
        self.mode.set(on);
    }
}
