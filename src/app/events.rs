//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, MQTT publish).

use super::state::{ActuatorId, OperationMode, SensorReading};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The service has started with the given mode.
    Started(OperationMode),

    /// Current state of one indicator, for transmission.
    ActuatorReport { id: ActuatorId, on: bool },

    /// Current operation mode, for transmission.
    ModeReport(OperationMode),

    /// Both sensor values as one batch, for transmission.
    SensorBatch(SensorReading),

    /// Descriptors of the attached sensors were requested.
    SensorTypes,

    /// The decision engine flipped an indicator.
    IndicatorChanged { id: ActuatorId, on: bool },

    /// A remote indicator command arrived in Automatic mode and was dropped.
    CommandRejected { id: ActuatorId },
}
