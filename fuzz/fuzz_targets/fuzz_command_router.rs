//! Fuzz target: inbound command path
//!
//! Splits the input at the first NUL into a topic and a payload, then
//! runs parse → route → handle against a fresh control state.  Asserts
//! that nothing panics and that Automatic mode never lets a remote
//! indicator write through.
//!
//! cargo fuzz run fuzz_command_router

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartlight::app::commands::PendingCommand;
use smartlight::app::handler::{CommandOutcome, handle};
use smartlight::app::router::CommandRouter;
use smartlight::app::state::{ActuatorState, ControlState, ThresholdConfig};

fuzz_target!(|data: &[u8]| {
    let (topic, payload) = match data.iter().position(|&b| b == 0) {
        Some(i) => (&data[..i], &data[i + 1..]),
        None => (data, &[][..]),
    };
    let Ok(topic) = core::str::from_utf8(topic) else {
        return;
    };
    let Ok(msg) = PendingCommand::from_bytes(topic, payload) else {
        return;
    };

    let router = CommandRouter::standard();
    let Some(cmd) = router.route(&msg) else {
        return;
    };

    let mut state = ControlState::new(ThresholdConfig {
        brightness_threshold: 800,
        distance_threshold: 10.0,
    });
    match handle(&mut state, cmd) {
        CommandOutcome::ActuatorSet { .. } => panic!("indicator written in automatic mode"),
        CommandOutcome::Rejected { .. } => {
            assert_eq!(state.actuators, ActuatorState::all_off());
        }
        CommandOutcome::ModeSet(mode) => assert_eq!(state.mode, mode),
        CommandOutcome::SensorTypesRequested => {}
    }
});
