use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Duration;

/// One user's in-progress game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub game_name: String,
    pub started_at: DateTime<Utc>,
    /// Guild the start was observed in. Only used to route announcements.
    pub guild_id: u64,
}

/// Everything we know about one game title since the bot started.
///
/// Aggregates are never removed, so totals survive every player leaving.
#[derive(Debug, Clone)]
pub struct GameAggregate {
    pub game_name: String,
    pub current_players: HashSet<String>,
    pub total_played: Duration,
}

impl GameAggregate {
    pub fn new(game_name: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            current_players: HashSet::new(),
            total_played: Duration::ZERO,
        }
    }
}

/// Notifications for the announcement channel.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted {
        guild_id: u64,
        user_id: String,
        game_name: String,
        /// Size of the game's player set, including this user.
        player_count: usize,
        /// A few of the other people already playing.
        other_players: Vec<String>,
        /// Other players not listed in `other_players`.
        overflow_count: usize,
    },
    LongSessionEnded {
        guild_id: u64,
        user_id: String,
        game_name: String,
        hours: f64,
    },
}

impl GameEvent {
    pub fn guild_id(&self) -> u64 {
        match self {
            GameEvent::SessionStarted { guild_id, .. } => *guild_id,
            GameEvent::LongSessionEnded { guild_id, .. } => *guild_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePlayer {
    pub user_id: String,
    /// Time since the session started, measured when the report was built.
    pub elapsed: Duration,
}

/// One group of the "who is playing what" report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveGame {
    pub game_name: String,
    pub players: Vec<ActivePlayer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopGame {
    pub game_name: String,
    pub total_played: Duration,
    pub current_player_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDetail {
    pub game_name: String,
    pub total_played: Duration,
    pub current_player_count: usize,
    /// Current players, capped for display. Use `current_player_count` for the real total.
    pub players: Vec<String>,
}
