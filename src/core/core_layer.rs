// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "game_activity/mod.rs"]
pub mod game_activity;

#[path = "greeting/greeting_service.rs"]
pub mod greeting;

#[path = "leveling/leveling_service.rs"]
pub mod leveling;
