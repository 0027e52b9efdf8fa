// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (clock, stores)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::config::BotConfig;
use crate::core::game_activity::GameActivityTracker;
use crate::core::leveling::LevelingService;
use crate::discord::commands::presence;
use crate::discord::game_activity::{announcements, presence_handler};
use crate::discord::greeting as welcome;
use crate::discord::leveling_announcements::send_level_up_embed;
use crate::discord::{Data, Error};
use crate::infra::clock::SystemClock;
use crate::infra::leveling::InMemoryXpStore;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for non-command Discord events.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            // Ignore bot messages (including our own)
            if new_message.author.bot {
                return Ok(());
            }

            // Only process guild messages (not DMs)
            if let Some(guild_id) = new_message.guild_id {
                match data
                    .leveling
                    .process_message(new_message.author.id.get(), guild_id.get())
                    .await
                {
                    Ok(Some(level_up)) => {
                        tracing::info!(
                            user_id = level_up.user_id,
                            guild_id = level_up.guild_id,
                            new_level = level_up.new_level,
                            total_xp = level_up.total_xp,
                            "User leveled up"
                        );

                        if let Err(err) = send_level_up_embed(ctx, new_message, &level_up).await {
                            tracing::warn!("Failed to send level-up embed: {err}");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        // Log it but don't crash
                        tracing::error!("Error processing XP for message: {}", e);
                    }
                }
            }
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            if let Err(e) = welcome::handle_member_join(ctx, data, new_member).await {
                tracing::error!("Error greeting new member: {}", e);
            }
        }
        serenity::FullEvent::PresenceUpdate { new_data } => {
            presence_handler::handle_presence_update(data, new_data).await;
        }

        _ => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = BotConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("{}", e);
        std::process::exit(1);
    });

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    // Tracker events flow to the announcer task started in setup.
    let (game_events_tx, game_events_rx) = tokio::sync::mpsc::unbounded_channel();
    let game_tracker = Arc::new(GameActivityTracker::new(SystemClock, game_events_tx));

    let leveling_service = Arc::new(LevelingService::new(InMemoryXpStore::new()));

    let data = Data {
        games: Arc::clone(&game_tracker),
        leveling: Arc::clone(&leveling_service),
        config: Arc::new(config.clone()),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_PRESENCES; // Required for game tracking

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.command_prefix.clone()),
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                tracing::info!("Bot is starting up...");

                // Register slash commands globally (can take up to an hour to propagate)
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!("Commands registered");

                presence::on_ready(ctx);

                announcements::spawn_announcer(
                    ctx.http.clone(),
                    ctx.cache.clone(),
                    data.config.game_announce_channel_id,
                    game_events_rx,
                );

                tracing::info!("Bot is ready!");
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .await
        .expect("Error creating client");

    client.start().await.expect("Error running bot");
}
