//! CdS photoresistor driver.
//!
//! The photoresistor sits in a divider on an ADC1 input; the raw 12-bit
//! count rises with ambient light.  No calibration is applied: the
//! threshold in [`SystemConfig`](crate::config::SystemConfig) is compared
//! against raw counts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the CdS channel via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.
//!
//! A failed conversion repeats the previous sample.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use log::warn;

use crate::error::SensorError;

#[cfg(not(target_os = "espidf"))]
static SIM_BRIGHTNESS_ADC: AtomicU16 = AtomicU16::new(0);

/// Inject the raw ADC count returned by the next host-side read.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_brightness_adc(raw: u16) {
    SIM_BRIGHTNESS_ADC.store(raw, Ordering::Relaxed);
}

/// Full-scale count of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

pub struct LightSensor {
    channel: u32,
    last: u16,
    total_reads: u32,
    failed_reads: u32,
}

impl LightSensor {
    pub fn new(adc1_channel: u32) -> Self {
        Self {
            channel: adc1_channel,
            last: 0,
            total_reads: 0,
            failed_reads: 0,
        }
    }

    /// Take one raw sample.
    pub fn read(&mut self) -> u16 {
        self.total_reads = self.total_reads.wrapping_add(1);
        match self.read_adc() {
            Ok(raw) => self.last = raw.min(ADC_MAX),
            Err(e) => {
                self.failed_reads = self.failed_reads.wrapping_add(1);
                warn!("CdS: {}, repeating last sample {}", e, self.last);
            }
        }
        self.last
    }

    /// Most recent sample without touching the ADC.
    pub fn last(&self) -> u16 {
        self.last
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        crate::drivers::hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        let _ = self.channel;
        Ok(SIM_BRIGHTNESS_ADC.load(Ordering::Relaxed))
    }
}
