//! Publishing event sink adapter.
//!
//! Renders each [`AppEvent`] with [`report::render`] and hands the
//! resulting `(topic, key, value)` triples to a [`Publisher`].  Delivery is
//! at-most-once: a failed publish is logged and counted, never retried,
//! and never interrupts the control loop.

use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, Publisher};
use crate::app::report;

pub struct PublishSink<P> {
    publisher: P,
    published: u32,
    failed: u32,
}

impl<P: Publisher> PublishSink<P> {
    pub fn new(publisher: P) -> Self {
        Self {
            publisher,
            published: 0,
            failed: 0,
        }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    /// Messages handed to the transport successfully.
    pub fn published(&self) -> u32 {
        self.published
    }

    /// Messages the transport refused.
    pub fn failed(&self) -> u32 {
        self.failed
    }
}

impl<P: Publisher> EventSink for PublishSink<P> {
    fn emit(&mut self, event: &AppEvent) {
        for msg in report::render(event) {
            match self.publisher.publish(msg.topic, msg.key, &msg.value) {
                Ok(()) => self.published = self.published.wrapping_add(1),
                Err(e) => {
                    self.failed = self.failed.wrapping_add(1);
                    warn!("publish {}/{} failed: {}", msg.topic, msg.key, e);
                }
            }
        }
    }
}
