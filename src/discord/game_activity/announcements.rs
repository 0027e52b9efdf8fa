// Drains tracker events and posts them to Discord.
//
// This runs as its own task so a slow or failing channel never holds up the
// tracker. Failed sends are logged and dropped, no retries.

use super::formatting::{format_player_list, mention};
use crate::core::game_activity::GameEvent;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::mpsc;

pub fn spawn_announcer(
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
    announce_channel_id: Option<u64>,
    mut events: mpsc::UnboundedReceiver<GameEvent>,
) {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let guild_id = event.guild_id();
            let Some(channel_id) = target_channel(&cache, announce_channel_id, guild_id) else {
                tracing::debug!(guild_id, "No channel for game announcement, skipping");
                continue;
            };

            if let Err(err) = send_event(&http, channel_id, &event).await {
                tracing::warn!(
                    guild_id,
                    channel_id = channel_id.get(),
                    error = %err,
                    "Failed to send game announcement"
                );
            }
        }

        tracing::info!("Game event queue closed, announcer stopping");
    });
}

/// Configured channel first, otherwise the guild's system channel.
fn target_channel(
    cache: &serenity::Cache,
    configured: Option<u64>,
    guild_id: u64,
) -> Option<serenity::ChannelId> {
    if let Some(id) = configured {
        return Some(serenity::ChannelId::new(id));
    }

    cache
        .guild(serenity::GuildId::new(guild_id))
        .and_then(|guild| guild.system_channel_id)
}

async fn send_event(
    http: &serenity::Http,
    channel_id: serenity::ChannelId,
    event: &GameEvent,
) -> Result<(), serenity::Error> {
    channel_id
        .send_message(http, serenity::CreateMessage::new().embed(build_event_embed(event)))
        .await?;
    Ok(())
}

fn build_event_embed(event: &GameEvent) -> serenity::CreateEmbed {
    match event {
        GameEvent::SessionStarted {
            game_name,
            player_count,
            other_players,
            overflow_count,
            ..
        } => {
            let mut embed = serenity::CreateEmbed::new()
                .title(format!("🎮 {}", game_name))
                .description(event_summary(event))
                .color(serenity::Colour::DARK_GREEN)
                .field("Now playing", people(*player_count), true);

            if !other_players.is_empty() || *overflow_count > 0 {
                embed = embed.field(
                    "Also playing",
                    format_player_list(other_players, *overflow_count),
                    false,
                );
            }

            embed.timestamp(serenity::Timestamp::now())
        }
        GameEvent::LongSessionEnded { game_name, .. } => serenity::CreateEmbed::new()
            .title(format!("⏱️ {} marathon over", game_name))
            .description(event_summary(event))
            .color(serenity::Colour::ORANGE)
            .timestamp(serenity::Timestamp::now()),
    }
}

fn event_summary(event: &GameEvent) -> String {
    match event {
        GameEvent::SessionStarted {
            user_id, game_name, ..
        } => format!("{} started playing **{}**", mention(user_id), game_name),
        GameEvent::LongSessionEnded {
            user_id,
            game_name,
            hours,
            ..
        } => format!(
            "{} played **{}** for {:.1} hours straight!",
            mention(user_id),
            game_name,
            hours
        ),
    }
}

fn people(count: usize) -> String {
    if count == 1 {
        "1 person".to_string()
    } else {
        format!("{} people", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_mention_the_player_and_game() {
        let started = GameEvent::SessionStarted {
            guild_id: 1,
            user_id: "7".into(),
            game_name: "Chess".into(),
            player_count: 2,
            other_players: vec!["8".into()],
            overflow_count: 0,
        };
        assert_eq!(event_summary(&started), "<@7> started playing **Chess**");

        let ended = GameEvent::LongSessionEnded {
            guild_id: 1,
            user_id: "7".into(),
            game_name: "Chess".into(),
            hours: 65.0 / 60.0,
        };
        assert_eq!(
            event_summary(&ended),
            "<@7> played **Chess** for 1.1 hours straight!"
        );
    }

    #[test]
    fn player_counts_read_naturally() {
        assert_eq!(people(1), "1 person");
        assert_eq!(people(4), "4 people");
    }

    #[test]
    fn configured_channel_wins_over_system_channel() {
        let cache = serenity::Cache::new();
        assert_eq!(
            target_channel(&cache, Some(99), 5),
            Some(serenity::ChannelId::new(99))
        );
        // Unknown guild and nothing configured: nowhere to post.
        assert_eq!(target_channel(&cache, None, 5), None);
    }
}
