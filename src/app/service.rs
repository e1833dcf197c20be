//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the [`ControlState`] and wires the decision engine,
//! command handler and report emitter to the ports.  All I/O flows through
//! port traits injected at call sites, making the whole service testable
//! with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │        AppService        │
//! ActuatorPort ◀──│ decide · handle · report │
//!                 └──────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::SystemConfig;

use super::commands::AppCommand;
use super::decision::decide;
use super::events::AppEvent;
use super::handler::{CommandOutcome, handle};
use super::ports::{ActuatorPort, EventSink, SensorPort};
use super::state::{ActuatorId, ActuatorState, ControlState, OperationMode, SensorReading};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    state: ControlState,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            state: ControlState::new(config.thresholds()),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the outputs to the startup state and announce it: both
    /// indicator reports, then the mode report.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.apply_indicators(hw);
        hw.set_mode_indicator(self.state.is_automatic());

        sink.emit(&AppEvent::Started(self.state.mode));
        self.emit_actuator_reports(sink);
        sink.emit(&AppEvent::ModeReport(self.state.mode));
        info!("AppService started in {} mode", self.state.mode);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Fast tick: take one fresh sample, then run the decision engine.
    ///
    /// `hw` serves as both the [`SensorPort`] and the [`ActuatorPort`].
    pub fn tick(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        self.tick_count += 1;

        // 1. Sampling step
        self.state.reading = SensorReading {
            brightness: hw.read_brightness(),
            distance: hw.measure_distance_cm(),
        };

        // 2. Decision, apply, announce (no-op outside Automatic)
        if self.state.is_automatic() {
            self.run_decision(hw, sink);
        }
    }

    /// Slow tick: sensor batch first, then each indicator individually.
    pub fn report(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::SensorBatch(self.state.reading));
        self.emit_actuator_reports(sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a remote command to completion.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> CommandOutcome {
        let outcome = handle(&mut self.state, cmd);
        match outcome {
            CommandOutcome::ModeSet(mode) => {
                hw.set_mode_indicator(mode == OperationMode::Automatic);
                sink.emit(&AppEvent::ModeReport(mode));
                info!(
                    "operation mode: {}, mode indicator {}",
                    mode,
                    if mode == OperationMode::Automatic { "on" } else { "off" }
                );
                // Re-entering Automatic re-derives the indicators from the latest sample.
                if mode == OperationMode::Automatic && self.tick_count > 0 {
                    self.run_decision(hw, sink);
                }
            }
            CommandOutcome::ActuatorSet { id, on } => {
                hw.set_indicator(id, on);
                sink.emit(&AppEvent::ActuatorReport { id, on });
                info!("{} {} (remote)", id.topic(), if on { "on" } else { "off" });
            }
            CommandOutcome::Rejected { id } => {
                debug!("{} command ignored in automatic mode", id.topic());
                sink.emit(&AppEvent::CommandRejected { id });
            }
            CommandOutcome::SensorTypesRequested => {
                sink.emit(&AppEvent::SensorTypes);
            }
        }
        outcome
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> OperationMode {
        self.state.mode
    }

    pub fn actuators(&self) -> ActuatorState {
        self.state.actuators
    }

    pub fn reading(&self) -> SensorReading {
        self.state.reading
    }

    /// Read-only view of the whole control state.
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Sampling ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Decide over the stored reading, drive the outputs and announce
    /// each flip.
    fn run_decision(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let decision = decide(
            self.state.mode,
            &self.state.reading,
            &self.state.thresholds,
            self.state.actuators,
        );
        self.state.actuators = decision.states;
        self.apply_indicators(hw);

        for id in ActuatorId::ALL {
            if decision.changed.get(id) {
                sink.emit(&AppEvent::IndicatorChanged {
                    id,
                    on: decision.states.get(id),
                });
            }
        }
    }

    fn apply_indicators(&self, hw: &mut impl ActuatorPort) {
        for id in ActuatorId::ALL {
            hw.set_indicator(id, self.state.actuators.get(id));
        }
    }

    fn emit_actuator_reports(&self, sink: &mut impl EventSink) {
        for id in ActuatorId::ALL {
            sink.emit(&AppEvent::ActuatorReport {
                id,
                on: self.state.actuators.get(id),
            });
        }
    }
}
