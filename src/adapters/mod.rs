//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements              | Connects to               |
//! |----------------|-------------------------|---------------------------|
//! | `hardware`     | SensorPort, ActuatorPort| ESP32 ADC, GPIO           |
//! | `log_sink`     | EventSink               | Serial log output         |
//! | `mqtt`         | Publisher, Subscriber   | ESP-IDF MQTT client       |
//! | `publish_sink` | EventSink               | any `Publisher`           |
//! | `time`         | MicrosClock             | ESP32 high-res timer      |
//! | `wifi`         | (bootstrap, supervision)| ESP-IDF WiFi STA          |

pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod publish_sink;
pub mod time;
pub mod wifi;
