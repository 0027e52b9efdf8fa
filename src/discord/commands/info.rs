use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Quick facts about this server.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn info(ctx: Context<'_>) -> Result<(), Error> {
    // Copy what we need out of the cache guard before awaiting anything.
    let (name, owner_id, member_count, created_at, icon_url) = {
        let guild = ctx.guild().ok_or("Guild not found")?;
        (
            guild.name.clone(),
            guild.owner_id,
            guild.member_count,
            guild.id.created_at(),
            guild.icon_url(),
        )
    };

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("🏠 {}", name))
        .color(0x5865F2)
        .field("👑 Owner", format!("<@{}>", owner_id.get()), true)
        .field("👥 Members", member_count.to_string(), true)
        // Discord renders <t:...:D> as a date in each reader's locale
        .field(
            "📅 Created",
            format!("<t:{}:D>", created_at.unix_timestamp()),
            true,
        )
        .timestamp(serenity::Timestamp::now());

    if let Some(icon_url) = icon_url {
        embed = embed.thumbnail(icon_url);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
