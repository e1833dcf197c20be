//! Remote command handler: mode-gated state transitions.
//!
//! [`handle`] mutates [`ControlState`] only and reports what happened as a
//! [`CommandOutcome`]; driving the pins and echoing state back is the
//! service's job.  One handler serves both indicators so the gating rule
//! cannot drift between them.
//!
//! Mode-gating rule: an indicator command is dropped, with no state change
//! and no side effect, whenever the mode is Automatic.  Remote writes can
//! therefore never race the decision engine.  The mode check and the write
//! happen in the same call on the loop task, so nothing can interleave.

use super::commands::AppCommand;
use super::state::{ActuatorId, ControlState, OperationMode};

/// Result of applying one command to the control state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Mode written (possibly unchanged).  The mode indicator must mirror it.
    ModeSet(OperationMode),
    /// Indicator written in Manual mode.  Apply and echo immediately.
    ActuatorSet { id: ActuatorId, on: bool },
    /// Indicator command dropped because the mode is Automatic.
    Rejected { id: ActuatorId },
    /// Descriptor request; no state involved.
    SensorTypesRequested,
}

/// Apply `cmd` to `state`.
pub fn handle(state: &mut ControlState, cmd: AppCommand) -> CommandOutcome {
    match cmd {
        AppCommand::SetMode(mode) => {
            state.mode = mode;
            CommandOutcome::ModeSet(mode)
        }
        AppCommand::SetActuator { id, .. } if state.is_automatic() => {
            CommandOutcome::Rejected { id }
        }
        AppCommand::SetActuator { id, on } => {
            state.actuators.set(id, on);
            CommandOutcome::ActuatorSet { id, on }
        }
        AppCommand::QuerySensorTypes => CommandOutcome::SensorTypesRequested,
    }
}
