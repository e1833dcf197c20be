//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART in production).  Paired with the publishing
//! sink so every event leaves a trace on the console, including those
//! that never go on the wire.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | mode={}", mode);
            }
            AppEvent::SensorBatch(r) => {
                info!("SENSE | cds={} | distance={:.1}cm", r.brightness, r.distance);
            }
            AppEvent::ActuatorReport { id, on } => {
                debug!("REPORT | {}={}", id.topic(), on_off(*on));
            }
            AppEvent::ModeReport(mode) => {
                info!("MODE | {}", mode);
            }
            AppEvent::IndicatorChanged { id, on } => {
                info!("AUTO | {} -> {}", id.topic(), on_off(*on));
            }
            AppEvent::CommandRejected { id } => {
                debug!("REJECT | {} (automatic mode)", id.topic());
            }
            AppEvent::SensorTypes => {
                info!("TYPES | sensor descriptors requested");
            }
        }
    }
}
