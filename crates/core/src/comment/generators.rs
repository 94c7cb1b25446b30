//! Injectable sources of identifiers and time.

use chrono::{DateTime, Utc};
use uuid::timestamp::context::Context;
use uuid::{Timestamp, Uuid};

/// Produces record identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}

/// Produces the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Version-1 (time-based) UUID generator.
///
/// Identifiers generated within the same clock tick are told apart by the
/// clock sequence counter held in the context.
#[derive(Debug)]
pub struct TimeUuidGenerator {
    context: Context,
    node_id: [u8; 6],
}

impl TimeUuidGenerator {
    /// Creates a generator with an explicit node id.
    pub fn new(node_id: [u8; 6]) -> Self {
        Self {
            context: Context::new(rand::random()),
            node_id,
        }
    }

    /// Creates a generator with a random node id.
    ///
    /// The multicast bit is set, marking the node id as not derived from a
    /// network card.
    pub fn with_random_node() -> Self {
        let mut node_id: [u8; 6] = rand::random();
        node_id[0] |= 0x01;
        Self::new(node_id)
    }

    pub fn node_id(&self) -> [u8; 6] {
        self.node_id
    }
}

impl Default for TimeUuidGenerator {
    fn default() -> Self {
        Self::with_random_node()
    }
}

impl IdGenerator for TimeUuidGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v1(Timestamp::now(&self.context), &self.node_id)
    }
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
