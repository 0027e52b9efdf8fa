// This is the leveling module - it contains ALL the business logic for the leveling system.
// Notice how this module has NO Discord-specific code (no serenity, no poise imports).
// It works with primitive types (u64) so it could be driven by any frontend.

use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// DOMAIN MODELS
// ============================================================================

/// A user's XP and level in a specific guild.
///
/// Users can be in multiple guilds, and progress is tracked separately in each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStats {
    pub user_id: u64,
    pub guild_id: u64,
    pub xp: u64,
    pub level: u32,
}

/// Returned by the service so the Discord layer can announce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUpEvent {
    pub user_id: u64,
    pub guild_id: u64,
    pub new_level: u32,
    pub total_xp: u64,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum LevelingError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid user or guild ID")]
    InvalidId,
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for storing XP data.
#[async_trait]
pub trait XpStore: Send + Sync {
    /// `None` if the user has never earned XP in this guild.
    async fn get_stats(&self, user_id: u64, guild_id: u64)
        -> Result<Option<UserStats>, LevelingError>;

    /// Add XP, creating a level 1 profile on first use. Must be atomic per user.
    async fn add_xp(&self, user_id: u64, guild_id: u64, amount: u64)
        -> Result<UserStats, LevelingError>;

    /// Bump the level by one, but only if it is still `from_level`.
    /// Returns whether this call did the promotion.
    async fn promote(&self, user_id: u64, guild_id: u64, from_level: u32)
        -> Result<bool, LevelingError>;

    /// Get the top users in a guild by XP.
    async fn get_leaderboard(
        &self,
        guild_id: u64,
        limit: usize,
    ) -> Result<Vec<UserStats>, LevelingError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// The main service for leveling operations.
pub struct LevelingService<S: XpStore> {
    store: S,

    /// How much XP to award per message.
    xp_per_message: u64,
}

impl<S: XpStore> LevelingService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            xp_per_message: 10,
        }
    }

    fn validate_ids(user_id: u64, guild_id: u64) -> Result<(), LevelingError> {
        if user_id == 0 || guild_id == 0 {
            Err(LevelingError::InvalidId)
        } else {
            Ok(())
        }
    }

    /// Award message XP and promote the user when they cross their threshold.
    ///
    /// **Returns:**
    /// - `Ok(Some(LevelUpEvent))` if the user leveled up
    /// - `Ok(None)` if XP was awarded but no level up occurred
    pub async fn process_message(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<Option<LevelUpEvent>, LevelingError> {
        Self::validate_ids(user_id, guild_id)?;

        let stats = self
            .store
            .add_xp(user_id, guild_id, self.xp_per_message)
            .await?;

        if stats.xp < self.xp_for_next_level(stats.level) {
            return Ok(None);
        }

        // Only one of several concurrent messages gets to announce the level up.
        if !self.store.promote(user_id, guild_id, stats.level).await? {
            return Ok(None);
        }

        Ok(Some(LevelUpEvent {
            user_id,
            guild_id,
            new_level: stats.level + 1,
            total_xp: stats.xp,
        }))
    }

    /// Total XP needed to leave `level`. XP is never reset, so thresholds
    /// are cumulative: 100 to leave level 1, 200 to leave level 2, ...
    pub fn xp_for_next_level(&self, level: u32) -> u64 {
        level as u64 * 100
    }

    pub async fn get_user_stats(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<Option<UserStats>, LevelingError> {
        Self::validate_ids(user_id, guild_id)?;
        self.store.get_stats(user_id, guild_id).await
    }

    pub async fn get_leaderboard(
        &self,
        guild_id: u64,
        limit: usize,
    ) -> Result<Vec<UserStats>, LevelingError> {
        if guild_id == 0 {
            return Err(LevelingError::InvalidId);
        }

        self.store.get_leaderboard(guild_id, limit).await
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::leveling::InMemoryXpStore;

    fn make_service() -> LevelingService<InMemoryXpStore> {
        LevelingService::new(InMemoryXpStore::new())
    }

    #[test]
    fn thresholds_grow_with_level() {
        let service = make_service();

        assert_eq!(service.xp_for_next_level(1), 100);
        assert_eq!(service.xp_for_next_level(2), 200);
        assert_eq!(service.xp_for_next_level(5), 500);
    }

    #[tokio::test]
    async fn tenth_message_reaches_level_two() {
        let service = make_service();

        for _ in 0..9 {
            assert_eq!(service.process_message(1, 2).await.unwrap(), None);
        }

        let level_up = service.process_message(1, 2).await.unwrap().unwrap();
        assert_eq!(level_up.new_level, 2);
        assert_eq!(level_up.total_xp, 100);

        // Level 2 needs 200 total, so the next message is quiet again.
        assert_eq!(service.process_message(1, 2).await.unwrap(), None);

        let stats = service.get_user_stats(1, 2).await.unwrap().unwrap();
        assert_eq!(stats.xp, 110);
        assert_eq!(stats.level, 2);
    }

    #[tokio::test]
    async fn unknown_users_have_no_stats() {
        let service = make_service();
        assert!(service.get_user_stats(5, 6).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn zero_ids_are_rejected() {
        let service = make_service();

        assert!(matches!(
            service.process_message(0, 1).await,
            Err(LevelingError::InvalidId)
        ));
        assert!(matches!(
            service.get_leaderboard(0, 10).await,
            Err(LevelingError::InvalidId)
        ));
    }

    #[test]
    fn leveling_error_messages_are_descriptive() {
        let storage_error = LevelingError::StorageError("db down".into());
        assert!(storage_error.to_string().contains("db down"));

        let invalid_id = LevelingError::InvalidId;
        assert_eq!(invalid_id.to_string(), "Invalid user or guild ID");
    }
}
