//! Indicator drivers, hardware initialisation, and embedded-hal pin glue.

pub mod gpio;
pub mod hw_init;
pub mod indicator_led;
