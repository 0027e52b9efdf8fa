// This module handles the bot's own presence.
//
// Not to be confused with member presence tracking in `discord::game_activity`:
// this only sets what the bot itself shows in the member list.

use poise::serenity_prelude as serenity;

/// Resets the bot's status to the default message.
pub fn reset_status(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::watching("who's playing");
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

/// Called once the bot is ready so we can announce a default presence message.
pub fn on_ready(ctx: &serenity::Context) {
    reset_status(ctx);
}
