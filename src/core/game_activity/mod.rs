pub mod clock;
pub mod game_activity_models;
pub mod game_activity_service;
pub mod transition;

pub use clock::Clock;
pub use game_activity_models::{ActiveGame, GameEvent};
pub use game_activity_service::{GameActivityError, GameActivityTracker};
pub use transition::Transition;
