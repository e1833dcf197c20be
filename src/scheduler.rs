//! Cadence scheduler.
//!
//! Turns a monotonic millisecond clock into the two periodic steps of the
//! control loop.  The scheduler notifies a [`SchedulerDelegate`] when a
//! cadence comes due; the run loop implements the delegate and calls into
//! [`AppService`](crate::app::service::AppService).
//!
//! ```text
//!   now_ms ──▶ Scheduler ──▶ SchedulerDelegate ──▶ AppService.tick()
//!                                              └─▶ AppService.report()
//! ```
//!
//! A late poll fires each due cadence once and re-anchors it at `now`
//! rather than firing a burst to catch up; a blocked echo wait therefore
//! stretches one period instead of queuing extra samples.

use crate::app::ports::{Cadence, SchedulerDelegate};
use crate::config::SystemConfig;
use log::debug;

/// Bookkeeping for one periodic step.
#[derive(Debug, Clone, Copy)]
struct Slot {
    cadence: Cadence,
    period_ms: u64,
    /// `None` until the first poll, which fires immediately.
    last_fire_ms: Option<u64>,
}

impl Slot {
    fn due(&self, now_ms: u64) -> bool {
        match self.last_fire_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.period_ms,
        }
    }
}

/// The scheduler engine.
///
/// Decoupled from the run loop: it only knows periods and a delegate, so
/// it is testable with a synthetic clock.
pub struct Scheduler {
    /// Fast cadence first so a poll that finds both due samples before reporting.
    slots: [Slot; 2],
    enabled: bool,
}

impl Scheduler {
    pub fn new(sample_period_ms: u32, report_period_ms: u32) -> Self {
        Self {
            slots: [
                Slot {
                    cadence: Cadence::Sample,
                    period_ms: u64::from(sample_period_ms),
                    last_fire_ms: None,
                },
                Slot {
                    cadence: Cadence::Report,
                    period_ms: u64::from(report_period_ms),
                    last_fire_ms: None,
                },
            ],
            enabled: true,
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.sample_interval_ms, config.report_interval_ms)
    }

    /// Enable or disable every cadence.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Poll the scheduler.  Call once per run-loop iteration.
    ///
    /// Returns the number of cadences fired.
    pub fn poll(&mut self, now_ms: u64, delegate: &mut dyn SchedulerDelegate) -> usize {
        if !self.enabled {
            return 0;
        }

        let mut fired = 0;
        for slot in &mut self.slots {
            if slot.due(now_ms) {
                slot.last_fire_ms = Some(now_ms);
                debug!("scheduler: {:?} due at {} ms", slot.cadence, now_ms);
                delegate.on_cadence(slot.cadence);
                fired += 1;
            }
        }
        fired
    }

    /// Milliseconds until the next cadence is due (0 if one is due now).
    pub fn ms_until_next(&self, now_ms: u64) -> u64 {
        self.slots
            .iter()
            .map(|s| match s.last_fire_ms {
                None => 0,
                Some(last) => (last + s.period_ms).saturating_sub(now_ms),
            })
            .min()
            .unwrap_or(0)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
