use crate::core::leveling::LevelUpEvent;
use poise::serenity_prelude::{self as serenity, builder::CreateMessage};
use rand::seq::SliceRandom;

/// Announce a level up in the channel the message was sent in.
pub async fn send_level_up_embed(
    ctx: &serenity::Context,
    message: &serenity::Message,
    level_up: &LevelUpEvent,
) -> Result<(), serenity::Error> {
    let embed = serenity::CreateEmbed::new()
        .title("Level Up!")
        .description(level_up_line(level_up))
        .color(level_color(level_up.new_level))
        .field("Total XP", level_up.total_xp.to_string(), true)
        .footer(serenity::CreateEmbedFooter::new(random_flavor_line()));

    message
        .channel_id
        .send_message(ctx, CreateMessage::new().embed(embed))
        .await
        .map(|_| ())
}

fn level_up_line(level_up: &LevelUpEvent) -> String {
    format!(
        "🚀 GG <@{}>! Level {} 🎯",
        level_up.user_id, level_up.new_level
    )
}

fn level_color(level: u32) -> serenity::Colour {
    if level >= 50 {
        serenity::Colour::DARK_PURPLE
    } else if level >= 25 {
        serenity::Colour::ORANGE
    } else if level >= 10 {
        serenity::Colour::GOLD
    } else if level >= 5 {
        serenity::Colour::BLURPLE
    } else {
        serenity::Colour::LIGHT_GREY
    }
}

fn random_flavor_line() -> &'static str {
    const FLAVOR_LINES: [&str; 4] = [
        "Keep the streak going!",
        "Your grind is paying off.",
        "Another level, another flex.",
        "That XP bar never stood a chance.",
    ];

    FLAVOR_LINES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FLAVOR_LINES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_up_line_mentions_user_and_level() {
        let event = LevelUpEvent {
            user_id: 42,
            guild_id: 1,
            new_level: 3,
            total_xp: 200,
        };
        assert_eq!(level_up_line(&event), "🚀 GG <@42>! Level 3 🎯");
    }

    #[test]
    fn colors_escalate_with_level() {
        assert_eq!(level_color(2), serenity::Colour::LIGHT_GREY);
        assert_eq!(level_color(5), serenity::Colour::BLURPLE);
        assert_eq!(level_color(60), serenity::Colour::DARK_PURPLE);
    }
}
