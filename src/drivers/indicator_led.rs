//! Discrete indicator LED driver.
//!
//! One GPIO output per LED, active HIGH.  The driver caches the last
//! written level so adapters can answer "is it lit" without reading the
//! output register back.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the GPIO level register via hw_init.
//! On host/test: writes the simulated pin bank.

use crate::drivers::hw_init;

pub struct IndicatorLed {
    gpio: i32,
    lit: bool,
}

impl IndicatorLed {
    /// Starts dark; `hw_init` has already driven every output low.
    pub fn new(gpio: i32) -> Self {
        Self { gpio, lit: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.lit = on;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}
