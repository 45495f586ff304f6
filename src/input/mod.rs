//! Mapping raw input onto move directions.
//!
//! - Arrow key names (`ArrowUp`, ...) via [`Direction::from_key`]
//! - Command words (`up`, `left`, ...) via `str::parse`
//! - Swipes via [`swipe_direction`]

use std::str::FromStr;

use crate::board::Direction;
use crate::core::EngineError;

impl Direction {
    /// Direction for a keyboard key name, if it is an arrow key.
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Direction::from_key(s.trim())
                .ok_or_else(|| EngineError::InvalidInput(s.to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Direction of a swipe from its displacement.
///
/// The axis with the larger displacement wins; a tie counts as vertical.
/// The swipe must travel strictly more than `min_distance` along that axis.
/// Screen coordinates: positive `dy` points down.
pub fn swipe_direction(dx: f32, dy: f32, min_distance: f32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx.abs() <= min_distance {
            return None;
        }
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        if dy.abs() <= min_distance {
            return None;
        }
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

/// Tracks a touch from start to end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where a touch began.
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the touch and return the swipe direction, if any.
    ///
    /// Ending without a matching `begin` yields `None`.
    pub fn end(&mut self, x: f32, y: f32, min_distance: f32) -> Option<Direction> {
        let (sx, sy) = self.start.take()?;
        swipe_direction(x - sx, y - sy, min_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("w"), None);
    }

    #[test]
    fn test_parse_words() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!(" Left ".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("ArrowRight".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(EngineError::InvalidInput("sideways".to_string()))
        );
    }

    #[test]
    fn test_display_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
    }

    #[test]
    fn test_swipe_horizontal() {
        assert_eq!(swipe_direction(80.0, 10.0, 50.0), Some(Direction::Right));
        assert_eq!(swipe_direction(-80.0, 10.0, 50.0), Some(Direction::Left));
    }

    #[test]
    fn test_swipe_vertical() {
        assert_eq!(swipe_direction(5.0, 60.0, 50.0), Some(Direction::Down));
        assert_eq!(swipe_direction(5.0, -60.0, 50.0), Some(Direction::Up));
    }

    #[test]
    fn test_swipe_threshold_is_strict() {
        assert_eq!(swipe_direction(50.0, 0.0, 50.0), None);
        assert_eq!(swipe_direction(0.0, -50.0, 50.0), None);
        assert_eq!(swipe_direction(50.5, 0.0, 50.0), Some(Direction::Right));
    }

    #[test]
    fn test_swipe_tie_is_vertical() {
        assert_eq!(swipe_direction(70.0, 70.0, 50.0), Some(Direction::Down));
    }

    #[test]
    fn test_tracker() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.end(10.0, 10.0, 50.0), None);

        tracker.begin(100.0, 100.0);
        assert_eq!(tracker.end(20.0, 110.0, 50.0), Some(Direction::Left));

        // Start is consumed
        assert_eq!(tracker.end(200.0, 100.0, 50.0), None);
    }
}
