// Presence-driven game session tracking.
// Like the rest of core, nothing here knows about Discord. User IDs are
// opaque strings and notifications leave through a channel the Discord
// layer drains on its own time.

use super::clock::Clock;
use super::game_activity_models::{
    ActiveGame, ActivePlayer, GameAggregate, GameDetail, GameEvent, Session, TopGame,
};
use super::transition::{classify, Transition};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};

/// Sessions longer than this get a "long session ended" announcement.
pub const LONG_SESSION_THRESHOLD: Duration = Duration::from_secs(60 * 60);
/// Hard cap on the top games report, whatever the caller asks for.
pub const MAX_TOP_GAMES: usize = 20;
/// How many other players a "session started" event lists by name.
pub const STARTED_PREVIEW_PLAYERS: usize = 3;
/// How many player IDs the single-game detail returns.
pub const DETAIL_PLAYER_CAP: usize = 10;

#[derive(Debug, Error)]
pub enum GameActivityError {
    #[error("No stats recorded for game '{0}'")]
    NotFound(String),
}

/// Both tables live behind one lock so start/stop never leave a session
/// and its aggregate membership out of step.
#[derive(Default)]
struct GameTables {
    /// user_id -> active session
    sessions: HashMap<String, Session>,
    /// Aggregates in first-seen order.
    aggregates: Vec<GameAggregate>,
    /// game_name -> position in `aggregates`
    index: HashMap<String, usize>,
    /// user_id -> last observed playing game (absent = not playing)
    snapshots: HashMap<String, String>,
}

impl GameTables {
    fn aggregate_index(&mut self, game_name: &str) -> usize {
        if let Some(&index) = self.index.get(game_name) {
            return index;
        }

        let index = self.aggregates.len();
        self.aggregates.push(GameAggregate::new(game_name));
        self.index.insert(game_name.to_string(), index);
        index
    }

    fn session_start(&self, user_id: &str) -> Option<DateTime<Utc>> {
        self.sessions.get(user_id).map(|s| s.started_at)
    }

    /// Player IDs ordered by who started first, then by ID.
    fn players_by_start(&self, aggregate: &GameAggregate) -> Vec<String> {
        let mut players: Vec<String> = aggregate.current_players.iter().cloned().collect();
        players.sort_by(|a, b| {
            self.session_start(a)
                .cmp(&self.session_start(b))
                .then_with(|| a.cmp(b))
        });
        players
    }
}

/// Tracks who is playing what and how long each game has been played.
///
/// **Generic over C: Clock** so tests can move time by hand.
pub struct GameActivityTracker<C: Clock> {
    clock: C,
    tables: RwLock<GameTables>,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl<C: Clock> GameActivityTracker<C> {
    pub fn new(clock: C, events: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self {
            clock,
            tables: RwLock::new(GameTables::default()),
            events,
        }
    }

    /// Feed the latest "currently playing" snapshot for a user.
    ///
    /// The previous snapshot is remembered per user, so duplicate deliveries
    /// (one per shared guild) classify as `Unchanged`.
    pub async fn observe_presence(
        &self,
        user_id: &str,
        guild_id: u64,
        current: Option<&str>,
    ) -> Transition {
        let mut tables = self.tables.write().await;
        let previous = match current {
            Some(game) => tables
                .snapshots
                .insert(user_id.to_string(), game.to_string()),
            None => tables.snapshots.remove(user_id),
        };

        let transition = classify(previous.as_deref(), current);
        let now = self.clock.now();
        self.apply_locked(&mut tables, user_id, guild_id, &transition, now);
        transition
    }

    /// Apply an already classified transition.
    #[allow(dead_code)]
    pub async fn apply(&self, user_id: &str, guild_id: u64, transition: &Transition) {
        let mut tables = self.tables.write().await;
        let now = self.clock.now();
        self.apply_locked(&mut tables, user_id, guild_id, transition, now);
    }

    #[allow(dead_code)]
    pub async fn start_session(&self, user_id: &str, guild_id: u64, game_name: &str) {
        let mut tables = self.tables.write().await;
        let now = self.clock.now();
        self.start_locked(&mut tables, user_id, guild_id, game_name, now);
    }

    #[allow(dead_code)]
    pub async fn stop_session(&self, user_id: &str, game_name: &str) {
        let mut tables = self.tables.write().await;
        let now = self.clock.now();
        self.stop_locked(&mut tables, user_id, game_name, now);
    }

    fn apply_locked(
        &self,
        tables: &mut GameTables,
        user_id: &str,
        guild_id: u64,
        transition: &Transition,
        now: DateTime<Utc>,
    ) {
        match transition {
            Transition::Unchanged => {}
            Transition::Start(game) => self.start_locked(tables, user_id, guild_id, game, now),
            Transition::Stop(game) => self.stop_locked(tables, user_id, game, now),
            Transition::Switch { from, to } => {
                // Same lock, same instant: nobody sees the gap between the two.
                self.stop_locked(tables, user_id, from, now);
                self.start_locked(tables, user_id, guild_id, to, now);
            }
        }
    }

    fn start_locked(
        &self,
        tables: &mut GameTables,
        user_id: &str,
        guild_id: u64,
        game_name: &str,
        now: DateTime<Utc>,
    ) {
        // A leftover session is overwritten without crediting its time.
        if let Some(previous) = tables.sessions.remove(user_id) {
            tracing::debug!(
                user_id,
                previous_game = %previous.game_name,
                game = game_name,
                "Replacing an existing session"
            );
            if previous.game_name != game_name {
                if let Some(&index) = tables.index.get(&previous.game_name) {
                    tables.aggregates[index].current_players.remove(user_id);
                }
            }
        }

        let index = tables.aggregate_index(game_name);
        tables.aggregates[index]
            .current_players
            .insert(user_id.to_string());

        let players = tables.players_by_start(&tables.aggregates[index]);
        let player_count = players.len();
        let mut other_players: Vec<String> =
            players.into_iter().filter(|id| id != user_id).collect();
        let overflow_count = other_players.len().saturating_sub(STARTED_PREVIEW_PLAYERS);
        other_players.truncate(STARTED_PREVIEW_PLAYERS);

        tables.sessions.insert(
            user_id.to_string(),
            Session {
                user_id: user_id.to_string(),
                game_name: game_name.to_string(),
                started_at: now,
                guild_id,
            },
        );
        // Keep the presence snapshot in step so a later presence update sees the session.
        tables
            .snapshots
            .insert(user_id.to_string(), game_name.to_string());

        tracing::info!(user_id, game = game_name, player_count, "Game session started");

        self.notify(GameEvent::SessionStarted {
            guild_id,
            user_id: user_id.to_string(),
            game_name: game_name.to_string(),
            player_count,
            other_players,
            overflow_count,
        });
    }

    fn stop_locked(
        &self,
        tables: &mut GameTables,
        user_id: &str,
        game_name: &str,
        now: DateTime<Utc>,
    ) {
        // Stale or duplicate stops are expected from the gateway; ignore them.
        let session = match tables.sessions.get(user_id) {
            Some(session) if session.game_name == game_name => session.clone(),
            Some(session) => {
                tracing::debug!(
                    user_id,
                    game = game_name,
                    active_game = %session.game_name,
                    "Ignoring stop for a game the user is not playing"
                );
                return;
            }
            None => return,
        };
        tables.sessions.remove(user_id);
        if tables.snapshots.get(user_id).is_some_and(|seen| seen == game_name) {
            tables.snapshots.remove(user_id);
        }

        let elapsed = elapsed_between(session.started_at, now);
        if let Some(&index) = tables.index.get(game_name) {
            let aggregate = &mut tables.aggregates[index];
            aggregate.total_played = aggregate.total_played.saturating_add(elapsed);
            aggregate.current_players.remove(user_id);
        }

        tracing::info!(
            user_id,
            game = game_name,
            elapsed_secs = elapsed.as_secs(),
            "Game session ended"
        );

        if elapsed > LONG_SESSION_THRESHOLD {
            self.notify(GameEvent::LongSessionEnded {
                guild_id: session.guild_id,
                user_id: user_id.to_string(),
                game_name: game_name.to_string(),
                hours: elapsed.as_secs_f64() / 3600.0,
            });
        }
    }

    fn notify(&self, event: GameEvent) {
        // Fire and forget: a closed queue must never affect the tables.
        if self.events.send(event).is_err() {
            tracing::debug!("Game event queue is closed, dropping notification");
        }
    }

    /// Who is playing what right now, grouped by game in first-seen order.
    ///
    /// `max_games` caps the number of groups; `None` or `Some(0)` means no cap.
    /// An empty vector means nobody is playing.
    pub async fn active_sessions(&self, max_games: Option<usize>) -> Vec<ActiveGame> {
        let tables = self.tables.read().await;
        let now = self.clock.now();
        let max_games = max_games.filter(|&max| max > 0);

        let mut report = Vec::new();
        for aggregate in tables
            .aggregates
            .iter()
            .filter(|a| !a.current_players.is_empty())
        {
            if max_games.is_some_and(|max| report.len() >= max) {
                break;
            }

            let mut players: Vec<ActivePlayer> = aggregate
                .current_players
                .iter()
                .map(|user_id| ActivePlayer {
                    user_id: user_id.clone(),
                    elapsed: tables
                        .session_start(user_id)
                        .map(|start| elapsed_between(start, now))
                        .unwrap_or_default(),
                })
                .collect();
            // Longest running first
            players.sort_by(|a, b| {
                b.elapsed
                    .cmp(&a.elapsed)
                    .then_with(|| a.user_id.cmp(&b.user_id))
            });

            report.push(ActiveGame {
                game_name: aggregate.game_name.clone(),
                players,
            });
        }

        report
    }

    /// Games ranked by total time played. `limit` is clamped to `MAX_TOP_GAMES`.
    pub async fn top_games(&self, limit: usize) -> Vec<TopGame> {
        let tables = self.tables.read().await;
        let limit = limit.min(MAX_TOP_GAMES);

        let mut ranked: Vec<&GameAggregate> = tables.aggregates.iter().collect();
        // Stable sort keeps first-seen order for ties.
        ranked.sort_by(|a, b| b.total_played.cmp(&a.total_played));

        ranked
            .into_iter()
            .take(limit)
            .map(|aggregate| TopGame {
                game_name: aggregate.game_name.clone(),
                total_played: aggregate.total_played,
                current_player_count: aggregate.current_players.len(),
            })
            .collect()
    }

    /// Stats for one game, matched case-insensitively. The first-seen match wins
    /// when several aggregates differ only in casing.
    pub async fn game_detail(&self, game_name: &str) -> Result<GameDetail, GameActivityError> {
        let tables = self.tables.read().await;
        let wanted = game_name.to_lowercase();

        let aggregate = tables
            .aggregates
            .iter()
            .find(|a| a.game_name.to_lowercase() == wanted)
            .ok_or_else(|| GameActivityError::NotFound(game_name.to_string()))?;

        let mut players = tables.players_by_start(aggregate);
        players.truncate(DETAIL_PLAYER_CAP);

        Ok(GameDetail {
            game_name: aggregate.game_name.clone(),
            total_played: aggregate.total_played,
            current_player_count: aggregate.current_players.len(),
            players,
        })
    }
}

/// Time between two instants, clamped to zero if the clock went backwards.
fn elapsed_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Duration {
    (end - start).to_std().unwrap_or(Duration::ZERO)
}
