// Discord commands for the leveling system.
//
// **Notice the pattern:**
// 1. Extract primitive data from Discord types
// 2. Call core service
// 3. Format the response based on the result
//
// This layer is THIN - no business logic, just translation.

use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

const LEADERBOARD_SIZE: usize = 10;

/// Show your current level and XP.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn level(
    ctx: Context<'_>,
    #[description = "User to check (defaults to you)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target_user = user.as_ref().unwrap_or_else(|| ctx.author());
    let guild_id = ctx
        .guild_id()
        .ok_or("This command only works in servers")?
        .get();

    if target_user.bot {
        ctx.say("Bots don't level up! 🤖").await?;
        return Ok(());
    }

    let stats = ctx
        .data()
        .leveling
        .get_user_stats(target_user.id.get(), guild_id)
        .await?;

    match stats {
        Some(stats) => {
            let next = ctx.data().leveling.xp_for_next_level(stats.level);
            ctx.say(format!(
                "🎮 **{}** - Level {} | {} XP ({} to next level)",
                target_user.name,
                stats.level,
                stats.xp,
                next.saturating_sub(stats.xp)
            ))
            .await?;
        }
        None => {
            ctx.say(format!("😴 {} hasn't said anything here yet!", target_user.name))
                .await?;
        }
    }

    Ok(())
}

/// Show the top 10 members by XP.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn leaderboard(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or("This command only works in servers")?
        .get();

    let top = ctx
        .data()
        .leveling
        .get_leaderboard(guild_id, LEADERBOARD_SIZE)
        .await?;

    if top.is_empty() {
        ctx.say("No one has earned XP yet! Start chatting to get on the leaderboard! 💬")
            .await?;
        return Ok(());
    }

    let author_id = ctx.author().id.get();
    let description = top
        .iter()
        .enumerate()
        .map(|(index, stats)| {
            let marker = if stats.user_id == author_id { " ← you" } else { "" };
            format!(
                "**#{}** <@{}> · Level {} · {} XP{}",
                index + 1,
                stats.user_id,
                stats.level,
                stats.xp,
                marker
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let embed = serenity::CreateEmbed::new()
        .title("🏆 Leaderboard")
        .description(description)
        .color(serenity::Colour::GOLD);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
