//! Wire formatting for outbound reports.
//!
//! Every transmitted [`AppEvent`] becomes one or more `(topic, key, value)`
//! triples, the shape the transport's `publish` takes.  Log-only events
//! render to nothing.
//!
//! | event            | topic            | key          | value                          |
//! |------------------|------------------|--------------|--------------------------------|
//! | `ActuatorReport` | `blue_led` / `green_led` | `state` | `"0"` / `"1"`              |
//! | `ModeReport`     | `operation_mode` | `mode`       | `automatic` / `manual`         |
//! | `SensorBatch`    | `sensor_data`    | `values`     | `{"cds":500,"distance":12.5}`  |
//! | `SensorTypes`    | `sensor_types`   | `cds` / `distance` | ASCII-escaped descriptor JSON |

use serde::Serialize;

use super::commands::TOPIC_OPERATION_MODE;
use super::events::AppEvent;
use super::state::SensorReading;

pub const TOPIC_SENSOR_DATA: &str = "sensor_data";
pub const TOPIC_SENSOR_TYPES: &str = "sensor_types";

/// Longest rendered value.  The descriptor JSON is the largest at ~120 bytes.
pub const MAX_VALUE_LEN: usize = 256;

pub type Value = heapless::String<MAX_VALUE_LEN>;

/// One `publish(topic, key, value)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub topic: &'static str,
    pub key: &'static str,
    pub value: Value,
}

impl OutboundMessage {
    fn new(topic: &'static str, key: &'static str, value: &str) -> Option<Self> {
        Some(Self {
            topic,
            key,
            value: heapless::String::try_from(value).ok()?,
        })
    }
}

#[derive(Serialize)]
struct SensorBatch {
    cds: u16,
    distance: f32,
}

/// Static description of one attached sensor.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorDescriptor {
    pub sensor_id: &'static str,
    pub sensor_type: &'static str,
    pub sensor_nic_nm: &'static str,
    pub channel_code: &'static str,
    pub collect_unit: &'static str,
}

pub const SENSOR_DESCRIPTORS: [SensorDescriptor; 2] = [
    SensorDescriptor {
        sensor_id: "cds",
        sensor_type: "cds",
        sensor_nic_nm: "조도",
        channel_code: "01",
        collect_unit: "",
    },
    SensorDescriptor {
        sensor_id: "distance",
        sensor_type: "distance",
        sensor_nic_nm: "거리",
        channel_code: "01",
        collect_unit: "cm",
    },
];

/// Render `event` into the messages to publish, in order.
pub fn render(event: &AppEvent) -> heapless::Vec<OutboundMessage, 2> {
    let mut out = heapless::Vec::new();
    match event {
        AppEvent::ActuatorReport { id, on } => {
            push(&mut out, OutboundMessage::new(id.topic(), "state", if *on { "1" } else { "0" }));
        }
        AppEvent::ModeReport(mode) => {
            push(&mut out, OutboundMessage::new(TOPIC_OPERATION_MODE, "mode", mode.as_token()));
        }
        AppEvent::SensorBatch(reading) => {
            push(&mut out, sensor_batch(reading));
        }
        AppEvent::SensorTypes => {
            for d in &SENSOR_DESCRIPTORS {
                push(&mut out, descriptor(d));
            }
        }
        AppEvent::Started(_)
        | AppEvent::IndicatorChanged { .. }
        | AppEvent::CommandRejected { .. } => {}
    }
    out
}

fn push(out: &mut heapless::Vec<OutboundMessage, 2>, msg: Option<OutboundMessage>) {
    match msg {
        Some(m) => {
            let _ = out.push(m);
        }
        None => log::warn!("report: rendered value exceeds {} bytes, dropped", MAX_VALUE_LEN),
    }
}

fn sensor_batch(reading: &SensorReading) -> Option<OutboundMessage> {
    let json = serde_json::to_string(&SensorBatch {
        cds: reading.brightness,
        distance: reading.distance,
    })
    .ok()?;
    OutboundMessage::new(TOPIC_SENSOR_DATA, "values", &json)
}

fn descriptor(d: &SensorDescriptor) -> Option<OutboundMessage> {
    let json = serde_json::to_string(d).ok()?;
    let mut value = Value::new();
    escape_non_ascii(&json, &mut value).ok()?;
    Some(OutboundMessage {
        topic: TOPIC_SENSOR_TYPES,
        key: d.sensor_id,
        value,
    })
}

/// Copy `s` into `out`, replacing every non-ASCII character with a JSON
/// `\uXXXX` escape (UTF-16 surrogate pairs above the BMP).
pub fn escape_non_ascii(s: &str, out: &mut impl core::fmt::Write) -> core::fmt::Result {
    for c in s.chars() {
        if c.is_ascii() {
            out.write_char(c)?;
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(out, "\\u{:04x}", unit)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{ActuatorId, OperationMode};

    #[test]
    fn actuator_report_uses_zero_one() {
        let msgs = render(&AppEvent::ActuatorReport { id: ActuatorId::NearProximity, on: true });
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].topic, "blue_led");
        assert_eq!(msgs[0].key, "state");
        assert_eq!(msgs[0].value.as_str(), "1");

        let msgs = render(&AppEvent::ActuatorReport { id: ActuatorId::LowLight, on: false });
        assert_eq!(msgs[0].topic, "green_led");
        assert_eq!(msgs[0].value.as_str(), "0");
    }

    #[test]
    fn mode_report_uses_tokens() {
        let msgs = render(&AppEvent::ModeReport(OperationMode::Manual));
        assert_eq!(msgs[0].topic, "operation_mode");
        assert_eq!(msgs[0].key, "mode");
        assert_eq!(msgs[0].value.as_str(), "manual");
    }

    #[test]
    fn sensor_batch_is_one_json_object() {
        let msgs = render(&AppEvent::SensorBatch(SensorReading {
            brightness: 500,
            distance: 12.5,
        }));
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].topic, TOPIC_SENSOR_DATA);
        assert_eq!(msgs[0].value.as_str(), r#"{"cds":500,"distance":12.5}"#);
    }

    #[test]
    fn descriptors_are_pure_ascii() {
        let msgs = render(&AppEvent::SensorTypes);
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].key, "cds");
        assert_eq!(
            msgs[0].value.as_str(),
            r#"{"sensorId":"cds","sensorType":"cds","sensorNicNm":"\uc870\ub3c4","channelCode":"01","collectUnit":""}"#
        );
        assert_eq!(msgs[1].key, "distance");
        assert!(msgs[1].value.contains(r#""sensorNicNm":"\uac70\ub9ac""#));
        assert!(msgs[1].value.contains(r#""collectUnit":"cm""#));
        assert!(msgs.iter().all(|m| m.value.is_ascii()));
    }

    #[test]
    fn escape_handles_astral_plane() {
        let mut out = String::new();
        escape_non_ascii("a😀", &mut out).unwrap();
        assert_eq!(out, "a\\ud83d\\ude00");
    }

    #[test]
    fn log_only_events_render_nothing() {
        assert!(render(&AppEvent::Started(OperationMode::Automatic)).is_empty());
        assert!(render(&AppEvent::IndicatorChanged { id: ActuatorId::LowLight, on: true }).is_empty());
        assert!(render(&AppEvent::CommandRejected { id: ActuatorId::LowLight }).is_empty());
    }
}
