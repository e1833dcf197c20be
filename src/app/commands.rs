//! Inbound commands to the application service.
//!
//! The transport hands over raw `(topic, payload)` pairs as
//! [`PendingCommand`]s; the [`CommandRouter`](super::router::CommandRouter)
//! turns them into typed [`AppCommand`]s that the
//! [`AppService`](super::service::AppService) acts upon.

use crate::error::CommsError;

use super::state::{ActuatorId, OperationMode};

/// Mode-control topic.
pub const TOPIC_OPERATION_MODE: &str = "operation_mode";
/// Sensor descriptor request topic (payload ignored).
pub const TOPIC_GET_SENSOR_TYPE: &str = "get_sensor_type";

/// Longest topic suffix accepted after the transport strips its prefix.
pub const MAX_TOPIC_LEN: usize = 32;
/// Longest payload kept verbatim.  Every recognised token is far shorter,
/// so a longer payload is stored as the empty token.
pub const MAX_PAYLOAD_LEN: usize = 64;

/// A raw inbound message, copied out of the transport's buffers.
/// Transient: consumed synchronously by the control loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub topic: heapless::String<MAX_TOPIC_LEN>,
    pub payload: heapless::String<MAX_PAYLOAD_LEN>,
}

impl PendingCommand {
    /// Only an oversized topic is an error.  An oversized payload cannot
    /// be a recognised token and becomes the empty token, which every
    /// handler treats as its permissive default.
    pub fn new(topic: &str, payload: &str) -> Result<Self, CommsError> {
        let topic = heapless::String::try_from(topic).map_err(|_| CommsError::PayloadTooLong)?;
        let payload = heapless::String::try_from(payload).unwrap_or_default();
        Ok(Self { topic, payload })
    }

    /// Build from raw bytes as delivered by the transport.  Tokens are
    /// matched exactly; non-UTF-8 payloads become the empty token.
    pub fn from_bytes(topic: &str, payload: &[u8]) -> Result<Self, CommsError> {
        Self::new(topic, core::str::from_utf8(payload).unwrap_or(""))
    }
}

/// Commands that the transport can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Switch operation mode.  Always applied.
    SetMode(OperationMode),

    /// Drive one indicator.  Honoured only in Manual mode.
    SetActuator { id: ActuatorId, on: bool },

    /// Publish the sensor type descriptors.
    QuerySensorTypes,
}

impl AppCommand {
    /// `"1"` means on; any other token means off.
    pub fn actuator(id: ActuatorId, payload: &str) -> Self {
        Self::SetActuator {
            id,
            on: payload == "1",
        }
    }

    pub fn mode(payload: &str) -> Self {
        Self::SetMode(OperationMode::from_token(payload))
    }
}
