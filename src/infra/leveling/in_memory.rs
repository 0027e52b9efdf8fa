// IN-MEMORY implementation of XpStore.
//
// XP lives for the lifetime of the process only. Persisting it is out of
// scope, so this is the production store, not just a test double.

use crate::core::leveling::{LevelingError, UserStats, XpStore};
use async_trait::async_trait;
use dashmap::DashMap;

/// A composite key for looking up user XP.
/// We need both user_id AND guild_id since users can be in multiple guilds.
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
struct UserGuildKey {
    user_id: u64,
    guild_id: u64,
}

/// Data we store for each user in each guild.
#[derive(Clone, Copy, Debug)]
struct StoredUserData {
    xp: u64,
    level: u32,
}

impl Default for StoredUserData {
    fn default() -> Self {
        Self { xp: 0, level: 1 }
    }
}

/// In-memory implementation of XpStore.
///
/// **DashMap:**
/// Multiple message events can land at once, and the entry API gives us
/// per-key atomic updates without a global Mutex.
pub struct InMemoryXpStore {
    data: DashMap<UserGuildKey, StoredUserData>,
}

impl InMemoryXpStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

fn to_stats(key: &UserGuildKey, data: &StoredUserData) -> UserStats {
    UserStats {
        user_id: key.user_id,
        guild_id: key.guild_id,
        xp: data.xp,
        level: data.level,
    }
}

#[async_trait]
impl XpStore for InMemoryXpStore {
    async fn get_stats(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<Option<UserStats>, LevelingError> {
        let key = UserGuildKey { user_id, guild_id };
        Ok(self.data.get(&key).map(|entry| to_stats(&key, entry.value())))
    }

    async fn add_xp(
        &self,
        user_id: u64,
        guild_id: u64,
        amount: u64,
    ) -> Result<UserStats, LevelingError> {
        let key = UserGuildKey { user_id, guild_id };

        // entry() holds the shard lock, so read-modify-write is atomic per user
        let mut entry = self.data.entry(key).or_default();
        entry.xp = entry.xp.saturating_add(amount);
        Ok(to_stats(&key, &entry))
    }

    async fn promote(
        &self,
        user_id: u64,
        guild_id: u64,
        from_level: u32,
    ) -> Result<bool, LevelingError> {
        let key = UserGuildKey { user_id, guild_id };

        match self.data.get_mut(&key) {
            Some(mut entry) if entry.level == from_level => {
                entry.level += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get_leaderboard(
        &self,
        guild_id: u64,
        limit: usize,
    ) -> Result<Vec<UserStats>, LevelingError> {
        if limit == 0 {
            return Err(LevelingError::StorageError(
                "Leaderboard limit must be at least 1".to_string(),
            ));
        }

        let mut users: Vec<UserStats> = self
            .data
            .iter()
            .filter(|entry| entry.key().guild_id == guild_id)
            .map(|entry| to_stats(entry.key(), entry.value()))
            .collect();

        // Highest XP first, user ID as a stable tie-break
        users.sort_by(|a, b| b.xp.cmp(&a.xp).then_with(|| a.user_id.cmp(&b.user_id)));
        users.truncate(limit);

        Ok(users)
    }
}

impl Default for InMemoryXpStore {
    fn default() -> Self {
        Self::new()
    }
}
