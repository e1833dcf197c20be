//! Control loop glue.
//!
//! [`Runtime`] owns the [`AppService`], the command router, the cadence
//! scheduler, the hardware adapter and the event sink, and runs one loop
//! iteration per [`step`](Runtime::step):
//!
//! 1. drain the inbox, routing and handling each command to completion;
//! 2. poll the scheduler, running the sampling tick and then the report
//!    tick if they are due.
//!
//! The caller supplies the clock and does the sleeping, so the whole loop
//! runs under a synthetic clock in tests.

use log::debug;

use crate::app::ports::{ActuatorPort, Cadence, EventSink, SchedulerDelegate, SensorPort};
use crate::app::router::CommandRouter;
use crate::app::service::AppService;
use crate::config::SystemConfig;
use crate::inbox;
use crate::scheduler::Scheduler;

/// Records which cadences fired during one scheduler poll.
#[derive(Debug, Default, Clone, Copy)]
struct DueCadences {
    sample: bool,
    report: bool,
}

impl SchedulerDelegate for DueCadences {
    fn on_cadence(&mut self, cadence: Cadence) {
        match cadence {
            Cadence::Sample => self.sample = true,
            Cadence::Report => self.report = true,
        }
    }
}

/// What one loop iteration did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Inbound messages drained from the inbox.
    pub commands: usize,
    pub sampled: bool,
    pub reported: bool,
    /// How long the caller may sleep before the next cadence is due.
    pub idle_ms: u64,
}

pub struct Runtime<H, S> {
    app: AppService,
    router: CommandRouter,
    scheduler: Scheduler,
    hw: H,
    sink: S,
}

impl<H, S> Runtime<H, S>
where
    H: SensorPort + ActuatorPort,
    S: EventSink,
{
    pub fn new(config: &SystemConfig, router: CommandRouter, hw: H, sink: S) -> Self {
        Self {
            app: AppService::new(config),
            router,
            scheduler: Scheduler::from_config(config),
            hw,
            sink,
        }
    }

    /// Drive outputs to the startup state and emit the startup reports.
    pub fn start(&mut self) {
        self.app.start(&mut self.hw, &mut self.sink);
    }

    /// One loop iteration at monotonic time `now_ms`.
    pub fn step(&mut self, now_ms: u64) -> StepOutcome {
        let commands = self.drain_commands();

        let mut due = DueCadences::default();
        self.scheduler.poll(now_ms, &mut due);
        if due.sample {
            self.app.tick(&mut self.hw, &mut self.sink);
        }
        if due.report {
            self.app.report(&mut self.sink);
        }

        StepOutcome {
            commands,
            sampled: due.sample,
            reported: due.report,
            idle_ms: self.scheduler.ms_until_next(now_ms),
        }
    }

    fn drain_commands(&mut self) -> usize {
        let Self {
            app,
            router,
            hw,
            sink,
            ..
        } = self;
        inbox::drain(|msg| {
            if let Some(cmd) = router.route(&msg) {
                let outcome = app.handle_command(cmd, &mut *hw, &mut *sink);
                debug!("command on '{}' -> {:?}", msg.topic, outcome);
            }
        })
    }

    pub fn app(&self) -> &AppService {
        &self.app
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
