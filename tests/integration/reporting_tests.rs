//! Reporting path: AppService → PublishSink → Publisher wire triples.

use crate::mock_hw::{MockHardware, MockPublisher};

use smartlight::adapters::log_sink::LogEventSink;
use smartlight::adapters::publish_sink::PublishSink;
use smartlight::app::commands::AppCommand;
use smartlight::app::service::AppService;
use smartlight::app::state::{ActuatorId, OperationMode};
use smartlight::config::SystemConfig;

type Sink = (LogEventSink, PublishSink<MockPublisher>);

fn make() -> (AppService, MockHardware, Sink) {
    let app = AppService::new(&SystemConfig::default());
    let hw = MockHardware::new(500, 12.5);
    let sink = (LogEventSink::new(), PublishSink::new(MockPublisher::new()));
    (app, hw, sink)
}

fn wire(sink: &Sink) -> &MockPublisher {
    sink.1.publisher()
}

#[test]
fn startup_publishes_indicators_then_mode() {
    let (mut app, mut hw, mut sink) = make();
    app.start(&mut hw, &mut sink);

    let sent: Vec<_> = wire(&sink)
        .sent
        .iter()
        .map(|(t, k, v)| format!("{t}/{k}={v}"))
        .collect();
    assert_eq!(
        sent,
        ["blue_led/state=0", "green_led/state=0", "operation_mode/mode=automatic"]
    );
}

#[test]
fn periodic_report_is_batch_then_each_indicator() {
    let (mut app, mut hw, mut sink) = make();
    app.tick(&mut hw, &mut sink);
    app.report(&mut sink);

    let sent = &wire(&sink).sent;
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].0, "sensor_data");
    assert_eq!(sent[0].2, r#"{"cds":500,"distance":12.5}"#);
    assert_eq!(sent[1], ("blue_led".into(), "state".into(), "0".into()));
    assert_eq!(sent[2], ("green_led".into(), "state".into(), "1".into()));
}

#[test]
fn automatic_transitions_wait_for_the_periodic_report() {
    let (mut app, mut hw, mut sink) = make();
    app.tick(&mut hw, &mut sink);
    assert!(app.actuators().low_light);
    assert!(wire(&sink).sent.is_empty());
}

#[test]
fn sensor_type_query_publishes_ascii_descriptors() {
    let (mut app, mut hw, mut sink) = make();
    app.handle_command(AppCommand::QuerySensorTypes, &mut hw, &mut sink);

    let cds = wire(&sink).on("sensor_types", "cds");
    let distance = wire(&sink).on("sensor_types", "distance");
    assert_eq!(cds.len(), 1);
    assert_eq!(distance.len(), 1);
    assert!(cds[0].is_ascii());
    assert!(cds[0].contains(r#""sensorNicNm":"\uc870\ub3c4""#));
    assert!(distance[0].contains(r#""collectUnit":"cm""#));
    assert_eq!(app.mode(), OperationMode::Automatic, "query changes nothing");
}

#[test]
fn publish_failure_does_not_disturb_control() {
    let (mut app, mut hw, mut sink) = make();
    sink.1.publisher_mut().fail = true;

    app.start(&mut hw, &mut sink);
    app.handle_command(AppCommand::SetMode(OperationMode::Manual), &mut hw, &mut sink);
    app.handle_command(AppCommand::actuator(ActuatorId::NearProximity, "1"), &mut hw, &mut sink);
    app.report(&mut sink);

    assert!(app.actuators().near_proximity);
    assert_eq!(sink.1.failed(), 3 + 1 + 1 + 3);
    assert_eq!(sink.1.published(), 0);
}
