//! Inbound command channel.
//!
//! Uses an `embassy-sync` bounded channel to bridge the transport's
//! delivery task with the synchronous control loop without heap
//! allocation.  The transport callback only copies the message in; the
//! control loop drains and handles every message to completion between
//! scheduled steps, so all state mutation stays on one task.
//!
//! ```text
//! ┌──────────────┐ PendingCommand ┌──────────────┐
//! │ MQTT client  │───────────────▶│ Control Loop │
//! │ (callback)   │                │ (sync)       │
//! └──────────────┘                └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::commands::PendingCommand;

/// Channel depth for inbound messages.
pub const INBOX_DEPTH: usize = 8;

/// Inbound command channel: transport → control loop.
pub static INBOX: Channel<CriticalSectionRawMutex, PendingCommand, INBOX_DEPTH> = Channel::new();

/// Queue a message from the transport side.  Never blocks.
/// Returns `false` if the inbox is full (message dropped).
pub fn post(cmd: PendingCommand) -> bool {
    match INBOX.try_send(cmd) {
        Ok(()) => true,
        Err(_) => {
            warn!("inbox full, dropping inbound message");
            false
        }
    }
}

/// Drain all pending messages into `handler`, in arrival order.
/// Returns how many were handled.
pub fn drain(mut handler: impl FnMut(PendingCommand)) -> usize {
    let mut n = 0;
    while let Ok(cmd) = INBOX.try_receive() {
        handler(cmd);
        n += 1;
    }
    n
}

/// Number of queued messages.
pub fn len() -> usize {
    INBOX.len()
}
