// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "clock/system_clock.rs"]
pub mod clock;

#[path = "leveling/leveling_store.rs"]
pub mod leveling;
