// Greets new members and hands out the configured starter role.

use crate::core::greeting::welcome_line;
use crate::discord::Data;
use anyhow::Result;
use poise::serenity_prelude::{self as serenity, Context, Mentionable};

/// First text channel with the given name. Voice channels and categories can share names.
fn welcome_text_channel<'a>(
    channels: impl IntoIterator<Item = (serenity::ChannelType, &'a str, serenity::ChannelId)>,
    name: &str,
) -> Option<serenity::ChannelId> {
    channels
        .into_iter()
        .find(|(kind, channel_name, _)| {
            *kind == serenity::ChannelType::Text && *channel_name == name
        })
        .map(|(_, _, id)| id)
}

pub async fn handle_member_join(
    ctx: &Context,
    data: &Data,
    member: &serenity::Member,
) -> Result<()> {
    if member.user.bot {
        return Ok(());
    }

    let role_name = data.config.welcome_role_name.as_deref();

    // Resolve names to IDs from the cache, and drop the guard before any await.
    let (welcome_channel, role_id) = match ctx.cache.guild(member.guild_id) {
        Some(guild) => (
            welcome_text_channel(
                guild
                    .channels
                    .values()
                    .map(|channel| (channel.kind, channel.name.as_str(), channel.id)),
                &data.config.welcome_channel_name,
            ),
            role_name.and_then(|name| {
                guild
                    .roles
                    .values()
                    .find(|role| role.name == name)
                    .map(|role| role.id)
            }),
        ),
        None => return Ok(()),
    };

    match welcome_channel {
        Some(channel_id) => {
            channel_id
                .say(&ctx.http, welcome_line(&member.mention().to_string()))
                .await?;
        }
        None => tracing::debug!(
            guild_id = member.guild_id.get(),
            channel = %data.config.welcome_channel_name,
            "Welcome channel not found"
        ),
    }

    match (role_name, role_id) {
        (Some(_), Some(role_id)) => {
            member.add_role(&ctx.http, role_id).await?;
            tracing::info!(
                guild_id = member.guild_id.get(),
                user_id = member.user.id.get(),
                "Assigned welcome role"
            );
        }
        (Some(name), None) => {
            tracing::warn!(
                guild_id = member.guild_id.get(),
                role = name,
                "Welcome role not found"
            );
        }
        _ => {}
    }

    Ok(())
}
