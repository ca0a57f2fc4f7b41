//! Terminal client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use deck_core::DeckConfig;

/// Configuration required to run the terminal deck.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub deck: DeckConfig,
    pub ui: UiConfig,
    pub feed: FeedConfig,
    pub session_id: Option<String>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DECK_DISTANCE_THRESHOLD` - Commit distance in pointer units (default: 60)
    /// - `DECK_VELOCITY_THRESHOLD` - Commit velocity in units/second (default: 400)
    /// - `DECK_ROTATION_FACTOR` - Degrees of tilt per unit of drag (default: 0.05)
    /// - `DECK_VISIBLE_DEPTH` - Cards kept in the visible stack (default: 3)
    /// - `DECK_COMMIT_MS` - Fling-out duration (default: 180)
    /// - `DECK_CANCEL_MS` - Snap-back duration (default: 150)
    /// - `DECK_FLIP_MS` - Full flip duration (default: 300)
    /// - `DECK_DEAD_ZONE` - Drag dead zone in pointer units (default: 10)
    /// - `DECK_CARD_WIDTH` - Card width in pointer units (default: 320)
    /// - `CLI_UNITS_PER_COLUMN` - Pointer units per terminal column (default: 8)
    /// - `CLI_FRAME_INTERVAL_MS` - Frame interval (default: 16)
    /// - `DECK_FEED_PATH` - RON feed file (default: built-in demo feed)
    /// - `DECK_WRAP_FEED` - Replay the feed forever instead of exhausting (default: false)
    /// - `DECK_SESSION_ID` - Session identifier for the log directory (default: auto-generated)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let deck = &mut config.deck;
        if let Some(value) = read_env::<f32>("DECK_DISTANCE_THRESHOLD") {
            deck.distance_threshold = value;
        }
        if let Some(value) = read_env::<f32>("DECK_VELOCITY_THRESHOLD") {
            deck.velocity_threshold = value;
        }
        if let Some(value) = read_env::<f32>("DECK_ROTATION_FACTOR") {
            deck.rotation_factor = value;
        }
        if let Some(depth) = read_env::<usize>("DECK_VISIBLE_DEPTH") {
            deck.visible_depth = depth.max(1);
        }
        if let Some(ms) = read_env::<u64>("DECK_COMMIT_MS") {
            deck.commit_animation_duration_ms = ms;
        }
        if let Some(ms) = read_env::<u64>("DECK_CANCEL_MS") {
            deck.cancel_animation_duration_ms = ms;
        }
        if let Some(ms) = read_env::<u64>("DECK_FLIP_MS") {
            deck.flip_animation_duration_ms = ms;
        }
        if let Some(value) = read_env::<f32>("DECK_DEAD_ZONE") {
            deck.drag_dead_zone = value;
        }
        if let Some(value) = read_env::<f32>("DECK_CARD_WIDTH") {
            deck.card_width = value;
        }

        if let Some(units) = read_env::<f32>("CLI_UNITS_PER_COLUMN")
            && units.is_finite()
            && units > 0.0
        {
            config.ui.units_per_column = units;
        }
        if let Some(ms) = read_env::<u64>("CLI_FRAME_INTERVAL_MS") {
            config.ui.frame_interval_ms = ms.max(1);
        }

        config.feed.path = env::var("DECK_FEED_PATH").ok().map(PathBuf::from);
        if let Some(wrap) = read_env_bool("DECK_WRAP_FEED") {
            config.feed.wrap = wrap;
        }

        config.session_id = env::var("DECK_SESSION_ID").ok();

        config
    }
}

/// Terminal layout and pacing.
#[derive(Clone, Debug)]
pub struct UiConfig {
    /// Pointer units per terminal column; mouse columns are scaled by this.
    pub units_per_column: f32,
    pub frame_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            units_per_column: 8.0,
            frame_interval_ms: 16,
        }
    }
}

impl UiConfig {
    /// Converts a mouse column into engine pointer units.
    pub fn column_to_units(&self, column: u16) -> f32 {
        f32::from(column) * self.units_per_column
    }

    /// Converts an engine offset back to whole terminal columns.
    pub fn units_to_columns(&self, units: f32) -> i32 {
        (units / self.units_per_column).round() as i32
    }
}

#[derive(Clone, Debug, Default)]
pub struct FeedConfig {
    pub path: Option<PathBuf>,
    pub wrap: bool,
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_conversion_round_trips_whole_columns() {
        let ui = UiConfig::default();
        assert_eq!(ui.column_to_units(10), 80.0);
        assert_eq!(ui.units_to_columns(80.0), 10);
        assert_eq!(ui.units_to_columns(-12.0), -2);
    }

    #[test]
    fn defaults_match_engine_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.deck, DeckConfig::default());
        assert!(!config.feed.wrap);
        assert!(config.feed.path.is_none());
    }
}
