use chrono::{DateTime, Utc};
use std::sync::RwLock;
use uuid::Uuid;

/// Source of the current time.
///
/// Scheduling rules ("strictly in the future") depend on *when* a request
/// is evaluated, so the clock is injected rather than read ambiently.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a settable instant, for tests.
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.write() {
            *guard = now;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.read().map(|guard| *guard).unwrap_or_else(|_| Utc::now())
    }
}

/// Source of fresh entity identifiers.
pub trait IdSource: Send + Sync {
    fn new_id(&self) -> Uuid;
}

/// Random v4 UUIDs.
pub struct UuidSource;

impl IdSource for UuidSource {
    fn new_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
