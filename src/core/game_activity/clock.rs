use chrono::{DateTime, Utc};

/// Source of "now" for session timing.
///
/// Start and stop must read the same clock, otherwise elapsed durations
/// are meaningless. Production uses the system wall clock; tests drive a
/// manual one.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
