//! Fuzz target: MQTT delivery callback
//!
//! Feeds arbitrary wire topics and payloads through `deliver`, which
//! strips the prefix and posts to the inbox.  Every accepted message must
//! come back out of the inbox with the prefix removed.
//!
//! cargo fuzz run fuzz_mqtt_inbound

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartlight::adapters::mqtt::{deliver, strip_prefix};
use smartlight::inbox;

const PREFIX: &str = "lamp";

fuzz_target!(|data: &[u8]| {
    let (topic, payload) = match data.iter().position(|&b| b == 0) {
        Some(i) => (&data[..i], &data[i + 1..]),
        None => (data, &[][..]),
    };
    let Ok(wire_topic) = core::str::from_utf8(topic) else {
        return;
    };

    let posted = deliver(PREFIX, wire_topic, payload);
    let mut drained = 0;
    inbox::drain(|msg| {
        drained += 1;
        assert_eq!(Some(msg.topic.as_str()), strip_prefix(PREFIX, wire_topic));
    });
    assert_eq!(drained, usize::from(posted));
});
