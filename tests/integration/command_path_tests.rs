//! Inbound path without the transport: raw (topic, payload) pairs go
//! through `PendingCommand`, the router and the service.

use crate::mock_hw::{MockHardware, RecordingSink};

use smartlight::app::commands::{MAX_PAYLOAD_LEN, PendingCommand};
use smartlight::app::events::AppEvent;
use smartlight::app::router::CommandRouter;
use smartlight::app::service::AppService;
use smartlight::app::state::{ActuatorId, ActuatorState, OperationMode};
use smartlight::config::SystemConfig;

struct Bench {
    app: AppService,
    router: CommandRouter,
    hw: MockHardware,
    sink: RecordingSink,
}

impl Bench {
    fn new() -> Self {
        let mut b = Self {
            app: AppService::new(&SystemConfig::default()),
            router: CommandRouter::standard(),
            hw: MockHardware::new(2_000, 100.0),
            sink: RecordingSink::new(),
        };
        b.app.start(&mut b.hw, &mut b.sink);
        b.sink.events.clear();
        b
    }

    fn deliver(&mut self, topic: &str, payload: &[u8]) {
        let msg = PendingCommand::from_bytes(topic, payload).unwrap();
        if let Some(cmd) = self.router.route(&msg) {
            self.app.handle_command(cmd, &mut self.hw, &mut self.sink);
        }
    }
}

#[test]
fn blue_led_in_automatic_is_ignored() {
    let mut b = Bench::new();
    b.deliver("blue_led", b"1");
    assert_eq!(b.app.actuators(), ActuatorState::all_off());
    assert_eq!(b.sink.events, [AppEvent::CommandRejected { id: ActuatorId::NearProximity }]);
}

#[test]
fn manual_then_green_led_on() {
    let mut b = Bench::new();
    b.deliver("operation_mode", b"manual");
    b.deliver("green_led", b"1");
    assert!(b.app.actuators().low_light);
    assert!(!b.app.actuators().near_proximity);
    assert!(b.sink.events.contains(&AppEvent::ActuatorReport { id: ActuatorId::LowLight, on: true }));
}

#[test]
fn padded_tokens_take_the_default() {
    let mut b = Bench::new();
    b.deliver("operation_mode", b"manual");
    b.deliver("blue_led", b"1");
    b.deliver("blue_led", b" 1 ");
    assert!(!b.app.actuators().near_proximity);

    b.deliver("operation_mode", b"automatic\n");
    assert_eq!(b.app.mode(), OperationMode::Manual);
}

#[test]
fn oversized_payload_takes_the_default() {
    let mut b = Bench::new();
    b.deliver("operation_mode", &[b'x'; MAX_PAYLOAD_LEN + 1]);
    assert_eq!(b.app.mode(), OperationMode::Manual);
    assert_eq!(b.hw.mode_indicator(), Some(false));

    b.deliver("green_led", b"1");
    b.deliver("green_led", &[b'1'; MAX_PAYLOAD_LEN + 1]);
    assert!(!b.app.actuators().low_light);
    assert_eq!(
        b.sink.events.last(),
        Some(&AppEvent::ActuatorReport { id: ActuatorId::LowLight, on: false })
    );
}

#[test]
fn invalid_utf8_payload_takes_permissive_default() {
    let mut b = Bench::new();
    b.deliver("operation_mode", &[0xff, 0xfe]);
    assert_eq!(b.app.mode(), OperationMode::Manual);
    b.deliver("green_led", b"1");
    b.deliver("green_led", &[0xc3]);
    assert!(!b.app.actuators().low_light);
}

#[test]
fn unknown_topic_changes_nothing() {
    let mut b = Bench::new();
    b.deliver("red_led", b"1");
    b.deliver("operation_mode/extra", b"manual");
    assert_eq!(b.app.mode(), OperationMode::Automatic);
    assert!(b.sink.events.is_empty());
    assert_eq!(b.hw.calls.len(), 3, "only the startup writes");
}

#[test]
fn get_sensor_type_works_in_any_mode() {
    let mut b = Bench::new();
    b.deliver("get_sensor_type", b"");
    b.deliver("operation_mode", b"manual");
    b.deliver("get_sensor_type", b"whatever");
    let queries = b.sink.events.iter().filter(|e| **e == AppEvent::SensorTypes).count();
    assert_eq!(queries, 2);
}
