//! Events the controller hands back to the UI.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Something the UI should react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// Tiles slid and a new tile spawned.
    Moved,
    /// The win value was reached for the first time this session.
    Won,
    /// Time ran out without a win.
    GameOver,
}

/// Events raised by one controller call, in order.
///
/// A single call raises at most two (`Moved` then `Won`).
pub type Events = SmallVec<[GameEvent; 2]>;
