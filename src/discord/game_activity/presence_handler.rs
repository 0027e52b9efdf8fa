// Turns gateway presence updates into tracker input.
//
// Serenity only gives us the new presence, so the "before" half of the
// snapshot pair is remembered by the tracker itself.

use crate::core::game_activity::Transition;
use crate::discord::Data;
use poise::serenity_prelude as serenity;

/// Name of the first "Playing" activity. Streaming, listening, custom status etc. are ignored.
pub fn playing_game(activities: &[serenity::Activity]) -> Option<&str> {
    first_playing(
        activities
            .iter()
            .map(|activity| (activity.kind, activity.name.as_str())),
    )
}

fn first_playing<'a>(
    activities: impl IntoIterator<Item = (serenity::ActivityType, &'a str)>,
) -> Option<&'a str> {
    activities
        .into_iter()
        .find(|(kind, _)| *kind == serenity::ActivityType::Playing)
        .map(|(_, name)| name)
}

pub async fn handle_presence_update(data: &Data, presence: &serenity::Presence) {
    if presence.user.bot.unwrap_or(false) {
        return;
    }

    let guild_id = match presence.guild_id {
        Some(id) => id.get(),
        None => return,
    };

    let user_id = presence.user.id.get().to_string();
    let current = playing_game(&presence.activities);

    let transition = data
        .games
        .observe_presence(&user_id, guild_id, current)
        .await;

    if transition != Transition::Unchanged {
        tracing::debug!(user_id = %user_id, guild_id, ?transition, "Presence transition");
    }
}
