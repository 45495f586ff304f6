//! Session persistence over a key-value store.
//!
//! Each session field lives under its own key so that one bad value never
//! takes the others down with it:
//!
//! | key                 | value                     |
//! |---------------------|---------------------------|
//! | `{prefix}-board`    | JSON nested rows          |
//! | `{prefix}-won`      | JSON bool                 |
//! | `{prefix}-over`     | JSON bool                 |
//! | `{prefix}-time`     | integer seconds           |
//! | `{prefix}-unlocked` | JSON bool                 |
//! | `{prefix}-rng`      | JSON spawn RNG position   |
//!
//! The RNG position is optional. Without it a resumed game simply draws from
//! a new stream.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{Result, StoreError};
use super::state::Session;
use crate::board::{Board, TileSpawner};
use crate::core::{GameConfig, GameRngState, TileRng};

/// String key-value storage, the shape of browser local storage.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Deleting an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Write several values at once.
    ///
    /// Stores with an expensive commit should override this to commit once.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and hosts without durable storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage keys for the session fields and the spawn RNG position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionKeys {
    pub board: String,
    pub won: String,
    pub over: String,
    pub time: String,
    pub unlocked: String,
    pub rng: String,
}

impl SessionKeys {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            board: config.storage_key("board"),
            won: config.storage_key("won"),
            over: config.storage_key("over"),
            time: config.storage_key("time"),
            unlocked: config.storage_key("unlocked"),
            rng: config.storage_key("rng"),
        }
    }

    /// Keys cleared by a reset. `unlocked` is deliberately absent.
    fn gameplay(&self) -> [&str; 5] {
        [
            self.board.as_str(),
            self.won.as_str(),
            self.over.as_str(),
            self.time.as_str(),
            self.rng.as_str(),
        ]
    }

    fn all(&self) -> [&str; 6] {
        [
            self.board.as_str(),
            self.won.as_str(),
            self.over.as_str(),
            self.time.as_str(),
            self.unlocked.as_str(),
            self.rng.as_str(),
        ]
    }
}

/// Loads, saves and resets a [`Session`] in a [`KeyValueStore`].
#[derive(Debug)]
pub struct SessionStore<S> {
    store: S,
    keys: SessionKeys,
    config: GameConfig,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S, config: &GameConfig) -> Self {
        Self {
            store,
            keys: SessionKeys::new(config),
            config: config.clone(),
        }
    }

    /// The storage keys in use.
    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Borrow the underlying store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the underlying store.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume, returning the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load the persisted session.
    ///
    /// Returns `None` when no field is stored at all. Otherwise every field
    /// that is missing or malformed falls back to its fresh default on its
    /// own; a missing board is replaced by a freshly spawned one.
    ///
    /// A session out of time that is neither won nor over is marked over, so
    /// a half-corrupt record still ends in a game over.
    pub fn load<R: TileRng + ?Sized>(&self, rng: &mut R) -> Option<Session> {
        let board_raw = self.read_raw(&self.keys.board);
        let won_raw = self.read_raw(&self.keys.won);
        let over_raw = self.read_raw(&self.keys.over);
        let time_raw = self.read_raw(&self.keys.time);
        let unlocked_raw = self.read_raw(&self.keys.unlocked);

        if board_raw.is_none()
            && won_raw.is_none()
            && over_raw.is_none()
            && time_raw.is_none()
            && unlocked_raw.is_none()
        {
            return None;
        }

        let board = decode_field::<Board>(&self.keys.board, board_raw.as_deref())
            .unwrap_or_else(|| TileSpawner::new(self.config.four_probability).fresh_board(rng));

        let mut session = Session {
            board,
            won: decode_field(&self.keys.won, won_raw.as_deref()).unwrap_or(false),
            over: decode_field(&self.keys.over, over_raw.as_deref()).unwrap_or(false),
            time_left_seconds: decode_field(&self.keys.time, time_raw.as_deref())
                .unwrap_or(self.config.session_seconds),
            unlocked: decode_field(&self.keys.unlocked, unlocked_raw.as_deref()).unwrap_or(false),
        };

        if session.time_left_seconds == 0 && !session.won && !session.over {
            tracing::warn!("stored session is out of time but not over; ending it");
            session.over = true;
        }

        tracing::debug!(
            won = session.won,
            over = session.over,
            time_left = session.time_left_seconds,
            unlocked = session.unlocked,
            "loaded session"
        );

        Some(session)
    }

    /// Read only the unlock flag. Missing or malformed means locked.
    pub fn load_unlocked(&self) -> bool {
        let raw = self.read_raw(&self.keys.unlocked);
        decode_field(&self.keys.unlocked, raw.as_deref()).unwrap_or(false)
    }

    /// Read the stored spawn RNG position, if any.
    pub fn load_rng(&self) -> Option<GameRngState> {
        let raw = self.read_raw(&self.keys.rng);
        decode_field(&self.keys.rng, raw.as_deref())
    }

    /// Persist every field of `session` in one batch.
    pub fn save(&mut self, session: &Session) -> Result<()> {
        self.save_checkpoint(session, None)
    }

    /// Persist `session` together with the spawn RNG position.
    pub fn save_checkpoint(
        &mut self,
        session: &Session,
        rng: Option<&GameRngState>,
    ) -> Result<()> {
        let keys = &self.keys;
        let mut entries = vec![
            (keys.board.as_str(), encode(&session.board)?),
            (keys.won.as_str(), encode(&session.won)?),
            (keys.over.as_str(), encode(&session.over)?),
            (keys.time.as_str(), encode(&session.time_left_seconds)?),
            (keys.unlocked.as_str(), encode(&session.unlocked)?),
        ];
        if let Some(state) = rng {
            entries.push((keys.rng.as_str(), encode(state)?));
        }

        self.store.set_many(&entries)?;
        tracing::debug!(time_left = session.time_left_seconds, "saved session");
        Ok(())
    }

    /// Remove the gameplay fields, keeping the unlock flag.
    pub fn clear(&mut self) -> Result<()> {
        for key in self.keys.gameplay() {
            self.store.remove(key)?;
        }
        Ok(())
    }

    /// Remove every field, including the unlock flag.
    pub fn clear_all(&mut self) -> Result<()> {
        for key in self.keys.all() {
            self.store.remove(key)?;
        }
        Ok(())
    }

    /// Clear the persisted gameplay record and return a fresh session.
    ///
    /// The returned session keeps the persisted unlock flag. A failed clear is
    /// logged; it never prevents the reset.
    pub fn reset<R: TileRng + ?Sized>(&mut self, rng: &mut R) -> Session {
        let unlocked = self.load_unlocked();
        if let Err(e) = self.clear() {
            tracing::warn!("failed to clear persisted session: {}", e);
        }
        Session::fresh(&self.config, rng).with_unlocked(unlocked)
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, "failed to read stored field: {}", e);
                None
            }
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Decode one stored field, logging and discarding malformed values.
fn decode_field<T: DeserializeOwned>(key: &str, raw: Option<&str>) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(raw.trim()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, "discarding corrupt stored field: {}", e);
            None
        }
    }
}
