//! Game controller: composes the board engine, spawner, clock and session store.
//!
//! ```text
//! key / swipe / command ──► handle_move ──► apply_move ─► spawn ─┐
//! scheduled tick ─────────► handle_tick ──► clock::tick ─────────┼─► Session ─► save
//! scanned payload ────────► handle_scan ──► UnlockGate ──────────┘
//! ```

mod events;
mod game;
mod unlock;

pub use events::{Events, GameEvent};
pub use game::GameController;
pub use unlock::UnlockGate;
