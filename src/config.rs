// Runtime configuration, read from the environment (and `.env` via dotenv).

use thiserror::Error;

const DEFAULT_PREFIX: &str = "!";
const DEFAULT_WELCOME_CHANNEL: &str = "welcome";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} environment variable! Create a .env file with your bot token.")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub command_prefix: String,
    /// Where game announcements go. Falls back to each guild's system channel.
    pub game_announce_channel_id: Option<u64>,
    pub welcome_channel_name: String,
    /// Role handed to every new member, if set.
    pub welcome_role_name: Option<String>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = non_empty("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let game_announce_channel_id =
            non_empty("GAME_ANNOUNCE_CHANNEL_ID").and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!("Ignoring GAME_ANNOUNCE_CHANNEL_ID={}: {}", raw, e);
                    None
                }
            });

        Ok(Self {
            token,
            command_prefix: non_empty("COMMAND_PREFIX")
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            game_announce_channel_id,
            welcome_channel_name: non_empty("WELCOME_CHANNEL_NAME")
                .unwrap_or_else(|| DEFAULT_WELCOME_CHANNEL.to_string()),
            welcome_role_name: non_empty("WELCOME_ROLE_NAME"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn token_is_required() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("DISCORD_TOKEN"));

        assert!(config_from(&[("DISCORD_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn defaults_apply_when_optional_values_are_missing() {
        let config = config_from(&[("DISCORD_TOKEN", "abc")]).unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.game_announce_channel_id, None);
        assert_eq!(config.welcome_channel_name, "welcome");
        assert_eq!(config.welcome_role_name, None);
    }

    #[test]
    fn optional_values_are_read() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("COMMAND_PREFIX", "?"),
            ("GAME_ANNOUNCE_CHANNEL_ID", "1234"),
            ("WELCOME_CHANNEL_NAME", "arrivals"),
            ("WELCOME_ROLE_NAME", "Members"),
        ])
        .unwrap();

        assert_eq!(config.command_prefix, "?");
        assert_eq!(config.game_announce_channel_id, Some(1234));
        assert_eq!(config.welcome_channel_name, "arrivals");
        assert_eq!(config.welcome_role_name.as_deref(), Some("Members"));
    }

    #[test]
    fn bad_channel_id_is_ignored() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("GAME_ANNOUNCE_CHANNEL_ID", "not-a-number"),
        ])
        .unwrap();
        assert_eq!(config.game_announce_channel_id, None);
    }
}
