//! Integration tests for the AppService → decision → actuators pipeline.
//!
//! Drives the service through the port traits exactly as the run loop
//! does and checks the end-to-end scenarios: threshold switching, mode
//! gating of remote commands, and the startup announcement.

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

use smartlight::app::commands::AppCommand;
use smartlight::app::decision::decide;
use smartlight::app::events::AppEvent;
use smartlight::app::handler::CommandOutcome;
use smartlight::app::service::AppService;
use smartlight::app::state::{ActuatorId, ActuatorState, OperationMode};
use smartlight::config::SystemConfig;

fn make_app(brightness: u16, distance: f32) -> (AppService, MockHardware, RecordingSink) {
    let mut app = AppService::new(&SystemConfig::default());
    let mut hw = MockHardware::new(brightness, distance);
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    hw.calls.clear();
    sink.events.clear();
    (app, hw, sink)
}

fn set_manual(app: &mut AppService, hw: &mut MockHardware, sink: &mut RecordingSink) {
    app.handle_command(AppCommand::SetMode(OperationMode::Manual), hw, sink);
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_reports_initial_defaults() {
    let mut app = AppService::new(&SystemConfig::default());
    let mut hw = MockHardware::new(0, 0.0);
    let mut sink = RecordingSink::new();

    app.start(&mut hw, &mut sink);

    assert_eq!(
        sink.events,
        [
            AppEvent::Started(OperationMode::Automatic),
            AppEvent::ActuatorReport { id: ActuatorId::NearProximity, on: false },
            AppEvent::ActuatorReport { id: ActuatorId::LowLight, on: false },
            AppEvent::ModeReport(OperationMode::Automatic),
        ]
    );
    assert_eq!(hw.indicators(), ActuatorState::all_off());
    assert_eq!(hw.mode_indicator(), Some(true));
}

// ── Threshold scenarios ───────────────────────────────────────

#[test]
fn dim_light_turns_low_light_indicator_on() {
    let (mut app, mut hw, mut sink) = make_app(500, 100.0);
    app.tick(&mut hw, &mut sink);
    assert!(app.actuators().low_light);

    hw.brightness = 900;
    app.tick(&mut hw, &mut sink);
    assert!(!app.actuators().low_light);
    assert!(!hw.indicators().low_light);
}

#[test]
fn near_object_turns_proximity_indicator_on() {
    let (mut app, mut hw, mut sink) = make_app(2_000, 5.0);
    app.tick(&mut hw, &mut sink);
    assert!(app.actuators().near_proximity);
    assert!(hw.indicators().near_proximity);

    hw.distance = 15.0;
    app.tick(&mut hw, &mut sink);
    assert!(!app.actuators().near_proximity);
}

#[test]
fn equality_with_threshold_is_off() {
    let config = SystemConfig::default();
    let (mut app, mut hw, mut sink) =
        make_app(config.brightness_threshold, config.distance_threshold_cm);
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.actuators(), ActuatorState::all_off());
}

#[test]
fn automatic_flips_are_announced_once() {
    let (mut app, mut hw, mut sink) = make_app(100, 100.0);
    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);
    assert_eq!(
        sink.events,
        [AppEvent::IndicatorChanged { id: ActuatorId::LowLight, on: true }]
    );
}

// ── Mode gating ───────────────────────────────────────────────

#[test]
fn remote_write_in_automatic_is_dropped() {
    let (mut app, mut hw, mut sink) = make_app(2_000, 5.0);
    app.tick(&mut hw, &mut sink);
    let computed = app.actuators();
    hw.calls.clear();
    sink.events.clear();

    let outcome = app.handle_command(
        AppCommand::SetActuator { id: ActuatorId::NearProximity, on: false },
        &mut hw,
        &mut sink,
    );

    assert_eq!(outcome, CommandOutcome::Rejected { id: ActuatorId::NearProximity });
    assert_eq!(app.actuators(), computed);
    assert!(hw.calls.is_empty(), "no driver write on rejection");
    assert!(
        !sink.events.iter().any(|e| matches!(e, AppEvent::ActuatorReport { .. })),
        "nothing reported on rejection"
    );
}

#[test]
fn manual_write_applies_and_echoes_immediately() {
    let (mut app, mut hw, mut sink) = make_app(2_000, 100.0);
    set_manual(&mut app, &mut hw, &mut sink);
    sink.events.clear();

    app.handle_command(AppCommand::actuator(ActuatorId::LowLight, "1"), &mut hw, &mut sink);

    assert!(app.actuators().low_light);
    assert_eq!(hw.calls.last(), Some(&ActuatorCall::Indicator { id: ActuatorId::LowLight, on: true }));
    assert_eq!(sink.events, [AppEvent::ActuatorReport { id: ActuatorId::LowLight, on: true }]);
}

#[test]
fn manual_state_survives_sensor_changes() {
    let (mut app, mut hw, mut sink) = make_app(2_000, 100.0);
    set_manual(&mut app, &mut hw, &mut sink);
    app.handle_command(AppCommand::actuator(ActuatorId::LowLight, "1"), &mut hw, &mut sink);

    // Bright and far would switch everything off in Automatic.
    hw.brightness = 4_000;
    hw.distance = 300.0;
    for _ in 0..5 {
        app.tick(&mut hw, &mut sink);
    }
    assert!(app.actuators().low_light);
    assert_eq!(app.reading().brightness, 4_000, "sampling continues in Manual");
}

#[test]
fn manual_write_leaves_other_outputs_alone() {
    let (mut app, mut hw, mut sink) = make_app(2_000, 100.0);
    set_manual(&mut app, &mut hw, &mut sink);
    hw.calls.clear();

    app.handle_command(AppCommand::actuator(ActuatorId::NearProximity, "1"), &mut hw, &mut sink);

    assert_eq!(hw.writes_to(ActuatorId::LowLight), 0);
    assert!(!hw.calls.iter().any(|c| matches!(c, ActuatorCall::ModeIndicator(_))));
}

#[test]
fn non_one_payload_switches_off() {
    let (mut app, mut hw, mut sink) = make_app(2_000, 100.0);
    set_manual(&mut app, &mut hw, &mut sink);
    app.handle_command(AppCommand::actuator(ActuatorId::NearProximity, "1"), &mut hw, &mut sink);
    for payload in ["0", "on", "true", "", " 1"] {
        app.handle_command(AppCommand::actuator(ActuatorId::NearProximity, "1"), &mut hw, &mut sink);
        app.handle_command(AppCommand::actuator(ActuatorId::NearProximity, payload), &mut hw, &mut sink);
        assert!(!app.actuators().near_proximity, "payload {:?}", payload);
    }
}

#[test]
fn unknown_mode_token_means_manual() {
    let (mut app, mut hw, mut sink) = make_app(2_000, 100.0);
    app.handle_command(AppCommand::mode("AUTO"), &mut hw, &mut sink);
    assert_eq!(app.mode(), OperationMode::Manual);
    assert_eq!(hw.mode_indicator(), Some(false));
    assert_eq!(sink.events.last(), Some(&AppEvent::ModeReport(OperationMode::Manual)));
}

#[test]
fn returning_to_automatic_recomputes_on_next_tick() {
    let (mut app, mut hw, mut sink) = make_app(100, 100.0);
    set_manual(&mut app, &mut hw, &mut sink);
    app.handle_command(AppCommand::actuator(ActuatorId::NearProximity, "1"), &mut hw, &mut sink);

    app.handle_command(AppCommand::mode("automatic"), &mut hw, &mut sink);
    assert_eq!(hw.mode_indicator(), Some(true));
    app.tick(&mut hw, &mut sink);

    assert_eq!(app.actuators(), ActuatorState { near_proximity: false, low_light: true });
    assert_eq!(hw.indicators(), app.actuators());
}

#[test]
fn returning_to_automatic_recomputes_immediately() {
    let (mut app, mut hw, mut sink) = make_app(100, 100.0);
    app.tick(&mut hw, &mut sink);
    set_manual(&mut app, &mut hw, &mut sink);
    app.handle_command(AppCommand::actuator(ActuatorId::NearProximity, "1"), &mut hw, &mut sink);
    app.handle_command(AppCommand::actuator(ActuatorId::LowLight, "0"), &mut hw, &mut sink);
    sink.events.clear();
    let ticks = app.tick_count();

    app.handle_command(AppCommand::mode("automatic"), &mut hw, &mut sink);

    let expected = decide(
        OperationMode::Automatic,
        &app.reading(),
        &SystemConfig::default().thresholds(),
        ActuatorState::all_off(),
    )
    .states;
    assert_eq!(app.tick_count(), ticks, "no sampling tick in between");
    assert_eq!(app.actuators(), expected);
    assert_eq!(expected, ActuatorState { near_proximity: false, low_light: true });
    assert_eq!(hw.indicators(), expected);
    assert_eq!(
        sink.events,
        [
            AppEvent::ModeReport(OperationMode::Automatic),
            AppEvent::IndicatorChanged { id: ActuatorId::NearProximity, on: false },
            AppEvent::IndicatorChanged { id: ActuatorId::LowLight, on: true },
        ]
    );
}

#[test]
fn repeated_command_is_idempotent() {
    let (mut app, mut hw, mut sink) = make_app(2_000, 100.0);
    set_manual(&mut app, &mut hw, &mut sink);
    app.handle_command(AppCommand::actuator(ActuatorId::LowLight, "1"), &mut hw, &mut sink);
    let once = (app.actuators(), hw.indicators());
    app.handle_command(AppCommand::actuator(ActuatorId::LowLight, "1"), &mut hw, &mut sink);
    assert_eq!((app.actuators(), hw.indicators()), once);
    assert_eq!(hw.writes_to(ActuatorId::LowLight), 2, "driver write still issued");
}
