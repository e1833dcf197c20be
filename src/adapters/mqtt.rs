//! MQTT transport adapter.
//!
//! Implements [`Publisher`] and [`Subscriber`] over the ESP-IDF MQTT
//! client.  Wire topics are namespaced: `publish(topic, key, value)` goes
//! out on `<prefix>/<topic>/<key>`, and a subscription to `topic` listens
//! on `<prefix>/<topic>`.
//!
//! Inbound messages arrive on the client's own task.  The callback strips
//! the prefix, copies topic and payload into a [`PendingCommand`] and
//! posts it to the [`inbox`]; it never touches control state.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `EspMqttClient` with a connection-tracking
//!   callback.
//! - **all other targets**: an in-memory loopback that records publishes
//!   and lets tests inject inbound messages through the same path.

use core::fmt::Write as _;
use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use crate::app::commands::PendingCommand;
use crate::app::ports::{Publisher, Subscriber};
use crate::error::CommsError;
use crate::inbox;

#[cfg(target_os = "espidf")]
use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};

/// Full wire topic buffer: prefix + topic + key + separators.
pub type WireTopic = heapless::String<128>;

/// Most inbound topics tracked for re-subscription.
const MAX_SUBSCRIPTIONS: usize = 8;

/// Set by the client callback on every (re)connect; cleared once the
/// subscriptions have been re-issued by [`MqttTransport::poll`].
static RESUBSCRIBE: AtomicBool = AtomicBool::new(false);
static CONNECTED: AtomicBool = AtomicBool::new(false);

// ───────────────────────────────────────────────────────────────
// Topic mapping (pure, shared by both targets)
// ───────────────────────────────────────────────────────────────

/// `<prefix>/<topic>/<key>`.
pub fn outbound_topic(prefix: &str, topic: &str, key: &str) -> Result<WireTopic, CommsError> {
    let mut t = WireTopic::new();
    write!(t, "{}/{}/{}", prefix, topic, key).map_err(|_| CommsError::PayloadTooLong)?;
    Ok(t)
}

/// `<prefix>/<topic>`.
pub fn inbound_topic(prefix: &str, topic: &str) -> Result<WireTopic, CommsError> {
    let mut t = WireTopic::new();
    write!(t, "{}/{}", prefix, topic).map_err(|_| CommsError::PayloadTooLong)?;
    Ok(t)
}

/// Strip `<prefix>/` from a wire topic.  `None` for foreign topics.
pub fn strip_prefix<'a>(prefix: &str, wire_topic: &'a str) -> Option<&'a str> {
    wire_topic
        .strip_prefix(prefix)?
        .strip_prefix('/')
        .filter(|t| !t.is_empty())
}

/// Inbound path: map a delivered message to a [`PendingCommand`] and post
/// it.  Returns `false` if the message was dropped.
pub fn deliver(prefix: &str, wire_topic: &str, data: &[u8]) -> bool {
    let Some(topic) = strip_prefix(prefix, wire_topic) else {
        debug!("mqtt: ignoring foreign topic '{}'", wire_topic);
        return false;
    };
    match PendingCommand::from_bytes(topic, data) {
        Ok(cmd) => inbox::post(cmd),
        Err(e) => {
            warn!("mqtt: dropping '{}': {}", wire_topic, e);
            false
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Transport
// ───────────────────────────────────────────────────────────────

pub struct MqttTransport {
    prefix: heapless::String<48>,
    subscriptions: heapless::Vec<WireTopic, MAX_SUBSCRIPTIONS>,
    #[cfg(target_os = "espidf")]
    client: EspMqttClient<'static>,
    /// Loopback record of every publish: `(wire topic, payload)`.
    #[cfg(not(target_os = "espidf"))]
    sent: Vec<(String, String)>,
}

impl MqttTransport {
    /// Connect to `broker_url` and wait up to 5 s for the session.
    #[cfg(target_os = "espidf")]
    pub fn connect(broker_url: &str, prefix: &str) -> Result<Self, CommsError> {
        use esp_idf_hal::delay::FreeRtos;

        let prefix: heapless::String<48> =
            heapless::String::try_from(prefix).map_err(|_| CommsError::PayloadTooLong)?;

        let mqtt_config = MqttClientConfiguration {
            client_id: None,
            keep_alive_interval: Some(core::time::Duration::from_secs(30)),
            network_timeout: core::time::Duration::from_secs(2),
            buffer_size: 1024,
            out_buffer_size: 1024,
            ..Default::default()
        };

        let cb_prefix = prefix.clone();
        let client = EspMqttClient::new_cb(broker_url, &mqtt_config, move |event| {
            match event.payload() {
                EventPayload::Connected(_) => {
                    info!("MQTT: connected");
                    CONNECTED.store(true, Ordering::SeqCst);
                    RESUBSCRIBE.store(true, Ordering::SeqCst);
                }
                EventPayload::Disconnected => {
                    warn!("MQTT: disconnected");
                    CONNECTED.store(false, Ordering::SeqCst);
                }
                EventPayload::Received { topic, data, .. } => {
                    if let Some(topic) = topic {
                        deliver(&cb_prefix, topic, data);
                    }
                }
                EventPayload::Error(e) => {
                    warn!("MQTT: error event: {:?}", e);
                }
                _ => {}
            }
        })
        .map_err(|e| {
            warn!("MQTT: client create failed: {:?}", e);
            CommsError::MqttConnectFailed
        })?;

        info!("MQTT: waiting for broker {} (up to 5s)", broker_url);
        // SAFETY: esp_timer_get_time reads a free-running counter.
        let start = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        while !CONNECTED.load(Ordering::SeqCst) {
            let elapsed = unsafe { esp_idf_svc::sys::esp_timer_get_time() } - start;
            if elapsed > 5_000_000 {
                warn!("MQTT: connection timed out");
                return Err(CommsError::MqttConnectFailed);
            }
            FreeRtos::delay_ms(100);
        }
        // First-connect subscriptions are issued by subscribe().
        RESUBSCRIBE.store(false, Ordering::SeqCst);

        Ok(Self {
            prefix,
            subscriptions: heapless::Vec::new(),
            client,
        })
    }

    /// Host loopback "connection": always succeeds.
    #[cfg(not(target_os = "espidf"))]
    pub fn connect(broker_url: &str, prefix: &str) -> Result<Self, CommsError> {
        let prefix: heapless::String<48> =
            heapless::String::try_from(prefix).map_err(|_| CommsError::PayloadTooLong)?;
        info!("MQTT(sim): loopback for {}", broker_url);
        CONNECTED.store(true, Ordering::SeqCst);
        Ok(Self {
            prefix,
            subscriptions: heapless::Vec::new(),
            sent: Vec::new(),
        })
    }

    pub fn is_connected(&self) -> bool {
        CONNECTED.load(Ordering::SeqCst)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Re-issue subscriptions after the client reconnected.  Call once per
    /// loop iteration.
    pub fn poll(&mut self) {
        if !RESUBSCRIBE.swap(false, Ordering::SeqCst) {
            return;
        }
        info!("MQTT: reconnected, restoring {} subscriptions", self.subscriptions.len());
        for i in 0..self.subscriptions.len() {
            let topic = self.subscriptions[i].clone();
            if let Err(e) = self.platform_subscribe(&topic) {
                warn!("MQTT: resubscribe '{}' failed: {}", topic, e);
            }
        }
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_publish(&mut self, wire_topic: &str, value: &str) -> Result<(), CommsError> {
        self.client
            .enqueue(wire_topic, QoS::AtMostOnce, false, value.as_bytes())
            .map(|_| ())
            .map_err(|_| CommsError::MqttPublishFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_publish(&mut self, wire_topic: &str, value: &str) -> Result<(), CommsError> {
        if !self.is_connected() {
            return Err(CommsError::MqttPublishFailed);
        }
        self.sent.push((wire_topic.into(), value.into()));
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_subscribe(&mut self, wire_topic: &str) -> Result<(), CommsError> {
        self.client
            .subscribe(wire_topic, QoS::AtMostOnce)
            .map(|_| ())
            .map_err(|_| CommsError::MqttSubscribeFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_subscribe(&mut self, _wire_topic: &str) -> Result<(), CommsError> {
        Ok(())
    }
}

// ── Host loopback helpers ─────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl MqttTransport {
    /// Everything published so far, as `(wire topic, payload)`.
    pub fn sent(&self) -> &[(String, String)] {
        &self.sent
    }

    /// Subscribed wire topics.
    pub fn subscriptions(&self) -> impl Iterator<Item = &str> {
        self.subscriptions.iter().map(heapless::String::as_str)
    }

    /// Simulate a broker delivery on `wire_topic`, if subscribed.
    pub fn inject(&self, wire_topic: &str, payload: &[u8]) -> bool {
        if !self.subscriptions.iter().any(|s| s == wire_topic) {
            return false;
        }
        deliver(&self.prefix, wire_topic, payload)
    }

    /// Simulate a broker drop (`false`) or a reconnect (`true`).
    pub fn sim_set_connected(&self, connected: bool) {
        CONNECTED.store(connected, Ordering::SeqCst);
        if connected {
            RESUBSCRIBE.store(true, Ordering::SeqCst);
        }
    }
}

impl Publisher for MqttTransport {
    fn publish(&mut self, topic: &str, key: &str, value: &str) -> Result<(), CommsError> {
        let wire = outbound_topic(&self.prefix, topic, key)?;
        self.platform_publish(&wire, value)
    }
}

impl Subscriber for MqttTransport {
    fn subscribe(&mut self, topic: &str) -> Result<(), CommsError> {
        let wire = inbound_topic(&self.prefix, topic)?;
        self.platform_subscribe(&wire)?;
        if !self.subscriptions.contains(&wire) {
            self.subscriptions
                .push(wire.clone())
                .map_err(|_| CommsError::MqttSubscribeFailed)?;
        }
        info!("MQTT: subscribed to {}", wire);
        Ok(())
    }
}
