// Discord layer - commands and event handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "game_activity/mod.rs"]
pub mod game_activity;

#[path = "greeting/welcome.rs"]
pub mod greeting;

#[path = "leveling/leveling_announcements.rs"]
pub mod leveling_announcements;

use crate::config::BotConfig;
use crate::core::game_activity::GameActivityTracker;
use crate::core::leveling::LevelingService;
use crate::infra::clock::SystemClock;
use crate::infra::leveling::InMemoryXpStore;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Data that's shared across all commands and event handlers.
pub struct Data {
    pub games: Arc<GameActivityTracker<SystemClock>>,
    pub leveling: Arc<LevelingService<InMemoryXpStore>>,
    pub config: Arc<BotConfig>,
}
