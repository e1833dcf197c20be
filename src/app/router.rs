//! Topic → parser registration table.
//!
//! Each inbound topic is registered once with the function that turns its
//! payload into an [`AppCommand`].  The transport subscribes to exactly the
//! registered topics and the control loop routes every [`PendingCommand`]
//! through [`CommandRouter::route`]; there is no implicit global dispatch.

use log::debug;

use super::commands::{AppCommand, PendingCommand, TOPIC_GET_SENSOR_TYPE, TOPIC_OPERATION_MODE};
use super::state::ActuatorId;

/// Turns a payload into a command.  Receives the topic so one function can
/// serve a family of topics (one per indicator).
pub type CommandParser = fn(topic: &str, payload: &str) -> Option<AppCommand>;

const MAX_ROUTES: usize = 8;

#[derive(Clone, Copy)]
struct Route {
    topic: &'static str,
    parse: CommandParser,
}

/// Explicit topic registration table.
pub struct CommandRouter {
    routes: heapless::Vec<Route, MAX_ROUTES>,
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::standard()
    }
}

impl CommandRouter {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            routes: heapless::Vec::new(),
        }
    }

    /// The controller's topic set: mode control, both indicators and the
    /// sensor descriptor request.
    pub fn standard() -> Self {
        let mut router = Self::new();
        // Capacity is far above the four standard routes.
        let _ = router.register(TOPIC_OPERATION_MODE, parse_mode);
        for id in ActuatorId::ALL {
            let _ = router.register(id.topic(), parse_actuator);
        }
        let _ = router.register(TOPIC_GET_SENSOR_TYPE, parse_sensor_type_query);
        router
    }

    /// Register `parse` for `topic`, replacing an earlier registration.
    /// Returns `false` when the table is full.
    pub fn register(&mut self, topic: &'static str, parse: CommandParser) -> bool {
        if let Some(route) = self.routes.iter_mut().find(|r| r.topic == topic) {
            route.parse = parse;
            return true;
        }
        self.routes.push(Route { topic, parse }).is_ok()
    }

    /// Every registered topic, in registration order.
    pub fn topics(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.iter().map(|r| r.topic)
    }

    /// Resolve a pending message.  Unregistered topics yield `None`.
    pub fn route(&self, msg: &PendingCommand) -> Option<AppCommand> {
        let topic = msg.topic.as_str();
        match self.routes.iter().find(|r| r.topic == topic) {
            Some(route) => (route.parse)(topic, msg.payload.as_str()),
            None => {
                debug!("router: no handler for topic '{}'", topic);
                None
            }
        }
    }
}

fn parse_mode(_topic: &str, payload: &str) -> Option<AppCommand> {
    Some(AppCommand::mode(payload))
}

fn parse_actuator(topic: &str, payload: &str) -> Option<AppCommand> {
    ActuatorId::from_topic(topic).map(|id| AppCommand::actuator(id, payload))
}

fn parse_sensor_type_query(_topic: &str, _payload: &str) -> Option<AppCommand> {
    Some(AppCommand::QuerySensorTypes)
}
