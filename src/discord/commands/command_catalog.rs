// Discord commands module.
// Each feature gets its own command file.

pub mod games;

pub mod info;

pub mod leveling;

// Bot presence management (our own status, not member tracking)
pub mod presence;

use crate::discord::{Data, Error};

/// Every command the framework should register.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        games::playing(),
        games::topgames(),
        games::gamestats(),
        leveling::level(),
        leveling::leaderboard(),
        info::info(),
    ]
}
