// Discord commands for game tracking.
//
// Same pattern as the leveling commands: call the tracker, format the plain
// data it returns. No tracking logic lives here.

use crate::core::game_activity::{ActiveGame, GameActivityError};
use crate::discord::game_activity::formatting::{format_duration, format_player_list, mention};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Embeds allow at most 25 fields.
const MAX_GAME_FIELDS: usize = 25;
/// Players listed per game before collapsing into "and N more".
const PLAYERS_PER_GAME: usize = 10;
const DEFAULT_TOP_GAMES: usize = 10;

/// See who is playing what right now.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn playing(ctx: Context<'_>) -> Result<(), Error> {
    let report = ctx.data().games.active_sessions(Some(MAX_GAME_FIELDS)).await;

    if report.is_empty() {
        ctx.say("😴 Nobody is playing anything right now.").await?;
        return Ok(());
    }

    let mut embed = serenity::CreateEmbed::new()
        .title("🎮 Currently playing")
        .color(0x5865F2);

    for game in &report {
        embed = embed.field(
            format!("{} ({})", game.game_name, game.players.len()),
            active_game_lines(game),
            false,
        );
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn active_game_lines(game: &ActiveGame) -> String {
    let mut lines: Vec<String> = game
        .players
        .iter()
        .take(PLAYERS_PER_GAME)
        .map(|player| {
            format!(
                "{} · {}",
                mention(&player.user_id),
                format_duration(player.elapsed)
            )
        })
        .collect();

    let hidden = game.players.len().saturating_sub(PLAYERS_PER_GAME);
    if hidden > 0 {
        lines.push(format!("…and {} more", hidden));
    }

    lines.join("\n")
}

/// Most played games since the bot came online.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn topgames(
    ctx: Context<'_>,
    #[description = "How many games to show (max 20)"]
    #[min = 1]
    limit: Option<usize>,
) -> Result<(), Error> {
    let top = ctx
        .data()
        .games
        .top_games(limit.unwrap_or(DEFAULT_TOP_GAMES))
        .await;

    if top.is_empty() {
        ctx.say("No games tracked yet! Fire something up 🕹️").await?;
        return Ok(());
    }

    let description = top
        .iter()
        .enumerate()
        .map(|(index, game)| {
            let medal = match index {
                0 => "🥇".to_string(),
                1 => "🥈".to_string(),
                2 => "🥉".to_string(),
                _ => format!("**#{}**", index + 1),
            };
            format!(
                "{} **{}** · {} played · {} playing now",
                medal,
                game.game_name,
                format_duration(game.total_played),
                game.current_player_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let embed = serenity::CreateEmbed::new()
        .title("🏆 Top games")
        .description(description)
        .color(serenity::Colour::GOLD);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Stats for a single game.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn gamestats(
    ctx: Context<'_>,
    #[description = "Game name (not case sensitive)"]
    #[rest]
    game: String,
) -> Result<(), Error> {
    let detail = match ctx.data().games.game_detail(game.trim()).await {
        Ok(detail) => detail,
        Err(GameActivityError::NotFound(name)) => {
            ctx.say(format!("🤷 Nobody has played **{}** since I came online.", name))
                .await?;
            return Ok(());
        }
    };

    let hidden = detail.current_player_count.saturating_sub(detail.players.len());
    let players = if detail.current_player_count == 0 {
        "Nobody right now".to_string()
    } else {
        format_player_list(&detail.players, hidden)
    };

    let embed = serenity::CreateEmbed::new()
        .title(format!("📊 {}", detail.game_name))
        .color(0x3498db)
        .field("Total time played", format_duration(detail.total_played), true)
        .field("Playing now", detail.current_player_count.to_string(), true)
        .field("Players", players, false);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
