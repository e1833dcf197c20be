//! `embedded-hal` pin and delay implementations over the raw register
//! helpers in [`hw_init`](super::hw_init).
//!
//! Lets the generic HC-SR04 driver run on the board pins configured at
//! boot.  Register access cannot fail once configured, so the error type
//! is `Infallible`.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use super::hw_init;

/// Push-pull output configured by `hw_init`.
pub struct RawOutput {
    gpio: i32,
}

impl RawOutput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for RawOutput {
    type Error = Infallible;
}

impl OutputPin for RawOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, true);
        Ok(())
    }
}

/// Floating input configured by `hw_init`.
pub struct RawInput {
    gpio: i32,
}

impl RawInput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for RawInput {
    type Error = Infallible;
}

impl InputPin for RawInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}

/// Busy-wait microsecond delay for the trigger pulse (ROM `ets_delay_us`).
#[cfg(target_os = "espidf")]
pub type BusyDelay = esp_idf_hal::delay::Ets;

/// Host stand-in for the ROM busy-wait.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct BusyDelay;

#[cfg(not(target_os = "espidf"))]
impl embedded_hal::delay::DelayNs for BusyDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}
