//! The game controller.

use smallvec::smallvec;

use super::events::{Events, GameEvent};
use super::unlock::UnlockGate;
use crate::board::{apply_move, Direction, TileSpawner};
use crate::clock::{self, TickHandle, TickOutcome, TickScheduler};
use crate::core::error::Result;
use crate::core::{GameConfig, GameRng, TileRng};
use crate::input::swipe_direction;
use crate::session::{KeyValueStore, Session, SessionStore};

/// Applies commands and ticks to the session and persists the result.
///
/// All mutation goes through here, one event at a time. Each handler returns
/// the events it raised; the current state is available from
/// [`session`](Self::session).
///
/// ## Gating
///
/// - Nothing is persisted while the session is locked.
/// - Moves and ticks are ignored while locked.
/// - Moves are ignored once the game is won, over, or out of time.
pub struct GameController<S, R = GameRng> {
    config: GameConfig,
    session: Session,
    store: SessionStore<S>,
    rng: R,
    spawner: TileSpawner,
    gate: UnlockGate,
    ticks: TickScheduler,
}

impl<S: KeyValueStore> GameController<S, GameRng> {
    /// Create a controller, resuming any stored session.
    ///
    /// The spawn RNG continues from its stored position when there is one.
    /// Otherwise it starts from `config.seed`, or from a fresh random seed
    /// when none is configured.
    pub fn new(config: GameConfig, store: S) -> Self {
        let session_store = SessionStore::new(store, &config);
        let rng = match (session_store.load_rng(), config.seed) {
            (Some(state), _) => {
                tracing::debug!(seed = state.seed, "restoring spawn rng");
                GameRng::from_state(&state)
            }
            (None, Some(seed)) => GameRng::new(seed),
            (None, None) => GameRng::from_entropy(),
        };
        Self::with_rng(config, session_store.into_inner(), rng)
    }
}

impl<S: KeyValueStore, R: TileRng> GameController<S, R> {
    /// Create a controller with an explicit random source.
    ///
    /// Resumes the stored session if there is one, otherwise starts fresh.
    pub fn with_rng(config: GameConfig, store: S, mut rng: R) -> Self {
        let session_store = SessionStore::new(store, &config);
        let session = match session_store.load(&mut rng) {
            Some(session) => {
                tracing::info!(
                    time_left = session.time_left_seconds,
                    unlocked = session.unlocked,
                    "resuming stored session"
                );
                session
            }
            None => Session::fresh(&config, &mut rng),
        };
        Self::assemble(config, session_store, rng, session)
    }

    /// Create a controller around a given session, ignoring stored state.
    pub fn with_session(config: GameConfig, store: S, rng: R, session: Session) -> Self {
        let session_store = SessionStore::new(store, &config);
        Self::assemble(config, session_store, rng, session)
    }

    fn assemble(config: GameConfig, store: SessionStore<S>, rng: R, session: Session) -> Self {
        Self {
            spawner: TileSpawner::new(config.four_probability),
            gate: UnlockGate::new(config.unlock_secret.clone()),
            config,
            session,
            store,
            rng,
            ticks: TickScheduler::new(),
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Active configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        self.store.inner()
    }

    /// Tear down and return the backing store.
    pub fn into_store(mut self) -> S {
        self.teardown();
        self.store.into_inner()
    }

    /// Borrow the random source.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn is_unlocked(&self) -> bool {
        self.session.unlocked
    }

    /// Slide the board.
    ///
    /// On a real move: spawn a tile, raise `Moved`, and raise `Won` the first
    /// time a merge reaches the win value. A move that changes nothing leaves
    /// the session untouched.
    pub fn handle_move(&mut self, direction: Direction) -> Events {
        if !self.session.unlocked || self.session.is_finished() {
            tracing::debug!(%direction, "move ignored");
            return Events::new();
        }

        let outcome = apply_move(&self.session.board, direction, self.config.win_value);
        if !outcome.moved {
            return Events::new();
        }

        let mut board = outcome.board;
        let spawned = self.spawner.spawn_in_place(&mut board, &mut self.rng);
        self.session.board = board;
        tracing::debug!(%direction, ?spawned, "moved");

        let mut events: Events = smallvec![GameEvent::Moved];
        if outcome.reached_win_value && !self.session.won {
            self.session.won = true;
            self.ticks.cancel();
            tracing::info!(
                time_left = self.session.time_left_seconds,
                "reached {}",
                self.config.win_value
            );
            events.push(GameEvent::Won);
        }

        self.persist();
        events
    }

    /// Parse a command word or key name and move. Unrecognised input is ignored.
    pub fn handle_command(&mut self, command: &str) -> Events {
        match command.parse::<Direction>() {
            Ok(direction) => self.handle_move(direction),
            Err(e) => {
                tracing::debug!("ignoring command: {}", e);
                Events::new()
            }
        }
    }

    /// Move for an arrow key. Other keys are ignored.
    pub fn handle_key(&mut self, key: &str) -> Events {
        match Direction::from_key(key) {
            Some(direction) => self.handle_move(direction),
            None => Events::new(),
        }
    }

    /// Move for a swipe displacement. Short swipes are ignored.
    pub fn handle_swipe(&mut self, dx: f32, dy: f32) -> Events {
        match swipe_direction(dx, dy, self.config.min_swipe_distance) {
            Some(direction) => self.handle_move(direction),
            None => Events::new(),
        }
    }

    /// Advance the clock one second.
    ///
    /// Raises `GameOver` when the last second elapses, unless already won.
    pub fn handle_tick(&mut self) -> Events {
        if !self.session.unlocked {
            return Events::new();
        }

        let halted = self.session.clock_halted();
        match clock::tick(&mut self.session.time_left_seconds, halted) {
            TickOutcome::Ignored => Events::new(),
            TickOutcome::Ticked { .. } => {
                self.persist();
                Events::new()
            }
            TickOutcome::Expired => {
                self.ticks.cancel();
                let mut events = Events::new();
                if !self.session.won {
                    self.session.over = true;
                    tracing::info!("time expired");
                    events.push(GameEvent::GameOver);
                }
                self.persist();
                events
            }
        }
    }

    /// Start the recurring tick. `None` when the clock should not run.
    ///
    /// The host calls [`handle_scheduled_tick`](Self::handle_scheduled_tick)
    /// with the returned handle once per second.
    pub fn start_clock(&mut self) -> Option<TickHandle> {
        if !self.session.unlocked || self.session.is_finished() {
            return None;
        }
        Some(self.ticks.schedule())
    }

    /// Tick on behalf of a schedule. Stale handles are a no-op.
    pub fn handle_scheduled_tick(&mut self, handle: TickHandle) -> Events {
        if !self.ticks.is_live(handle) {
            tracing::debug!(epoch = handle.epoch(), "dropping stale tick");
            return Events::new();
        }
        self.handle_tick()
    }

    /// Whether a tick schedule is live.
    pub fn clock_running(&self) -> bool {
        self.ticks.is_active()
    }

    /// Unlock the game. Returns `true` only on the first unlock.
    pub fn handle_unlock(&mut self) -> bool {
        if self.session.unlocked {
            return false;
        }
        self.session.unlocked = true;
        tracing::info!("game unlocked");
        self.persist();
        true
    }

    /// Unlock with a scanned payload.
    ///
    /// A payload that does not match the secret is rejected and changes
    /// nothing.
    pub fn handle_scan(&mut self, payload: &str) -> Result<bool> {
        self.gate.verify(payload)?;
        Ok(self.handle_unlock())
    }

    /// Discard the session and start a fresh one. The unlock flag survives.
    pub fn handle_reset(&mut self) {
        self.ticks.cancel();
        let unlocked = self.session.unlocked;
        self.session = self.store.reset(&mut self.rng).with_unlocked(unlocked);
        tracing::debug!("session reset");
        self.persist();
    }

    /// Stop the clock so no further scheduled tick is processed.
    pub fn teardown(&mut self) {
        self.ticks.cancel();
    }

    fn persist(&mut self) {
        if !self.session.unlocked {
            return;
        }
        let checkpoint = self.rng.checkpoint();
        if let Err(e) = self.store.save_checkpoint(&self.session, checkpoint.as_ref()) {
            tracing::warn!("failed to persist session: {}", e);
        }
    }
}
