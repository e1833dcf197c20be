//! HC-SR04 ultrasonic rangefinder driver.
//!
//! One measurement: hold the trigger low to settle, pulse it high for
//! 10 µs, then time the echo line's high pulse.  Sound covers the
//! round trip, so `distance_cm = elapsed_us × 17 / 1000`.
//!
//! Both echo waits (rising edge, then falling edge) are bounded by
//! `timeout_us`, so a measurement blocks for at most roughly twice that
//! plus the trigger pulse.  When either wait expires the driver reports
//! its sentinel distance instead of an error: downstream logic only ever
//! sees a non-negative distance.
//!
//! Generic over `embedded-hal` 1.0 pins and delay plus a [`MicrosClock`],
//! so the timing logic runs unchanged against scripted pins on the host.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::MicrosClock;
use crate::error::SensorError;

/// Centimetres per microsecond of round-trip echo time (343 m/s ÷ 2).
pub const CM_PER_US: f32 = 17.0 / 1000.0;

/// Low time before the trigger pulse.
const SETTLE_US: u32 = 2;
/// Trigger pulse width required by the module.
const TRIGGER_PULSE_US: u32 = 10;

pub struct DistanceSensor<T, E, D, C> {
    trigger: T,
    echo: E,
    delay: D,
    clock: C,
    timeout_us: u32,
    sentinel_cm: f32,
    /// Consecutive failed measurements (reset on success).
    misses: u32,
}

impl<T, E, D, C> DistanceSensor<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: MicrosClock,
{
    /// `timeout_us` bounds each echo wait; `sentinel_cm` is returned by
    /// [`measure_or_sentinel`](Self::measure_or_sentinel) when it expires.
    pub fn new(trigger: T, echo: E, delay: D, clock: C, timeout_us: u32, sentinel_cm: f32) -> Self {
        Self {
            trigger,
            echo,
            delay,
            clock,
            timeout_us,
            sentinel_cm,
            misses: 0,
        }
    }

    /// Run one trigger/echo cycle and return the distance in centimetres.
    pub fn measure(&mut self) -> Result<f32, SensorError> {
        self.trigger.set_low().map_err(|_| SensorError::GpioFailed)?;
        self.delay.delay_us(SETTLE_US);
        self.trigger.set_high().map_err(|_| SensorError::GpioFailed)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low().map_err(|_| SensorError::GpioFailed)?;

        let rise = self.wait_for_level(true, SensorError::EchoTimeout)?;
        let fall = self.wait_for_level(false, SensorError::EchoStuckHigh)?;

        Ok(fall.saturating_sub(rise) as f32 * CM_PER_US)
    }

    /// [`measure`](Self::measure), substituting the sentinel on any failure.
    pub fn measure_or_sentinel(&mut self) -> f32 {
        match self.measure() {
            Ok(cm) => {
                self.misses = 0;
                cm
            }
            Err(e) => {
                self.misses = self.misses.saturating_add(1);
                warn!(
                    "distance: {} (miss #{}), reporting {:.1} cm",
                    e, self.misses, self.sentinel_cm
                );
                self.sentinel_cm
            }
        }
    }

    /// Consecutive failed measurements.
    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn sentinel_cm(&self) -> f32 {
        self.sentinel_cm
    }

    /// Spin until the echo line reads `high`, or `timeout` once the bound
    /// expires.  Returns the clock time at which the level was observed.
    fn wait_for_level(&mut self, high: bool, timeout: SensorError) -> Result<u64, SensorError> {
        let start = self.clock.now_us();
        let bound = u64::from(self.timeout_us);
        loop {
            let level = self.echo.is_high().map_err(|_| SensorError::GpioFailed)?;
            let now = self.clock.now_us();
            if level == high {
                return Ok(now);
            }
            if now.saturating_sub(start) >= bound {
                return Err(timeout);
            }
        }
    }
}
