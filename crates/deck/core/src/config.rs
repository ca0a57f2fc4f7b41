use crate::error::ConfigError;

/// Tunable thresholds, durations and geometry for the swipe engine.
///
/// Distances are in host pointer units (pixels, terminal sub-cells, ...);
/// the engine only ever compares them against each other, so behavior is
/// resolution-independent as long as the host is consistent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeckConfig {
    /// Horizontal displacement past which a release commits.
    pub distance_threshold: f32,
    /// Release velocity (units/second) past which a release commits.
    pub velocity_threshold: f32,
    /// Degrees of tilt per unit of horizontal drag, up to `distance_threshold`.
    pub rotation_factor: f32,
    /// Number of cards kept in the visible window.
    pub visible_depth: usize,
    pub commit_animation_duration_ms: u64,
    pub cancel_animation_duration_ms: u64,
    /// Total flip duration; each half (collapse, expand) takes half of it.
    pub flip_animation_duration_ms: u64,
    /// Moves with |deltaX| below this are ignored until the gesture engages.
    pub drag_dead_zone: f32,
    /// Committed cards fly out to twice this width.
    pub card_width: f32,
}

impl DeckConfig {
    pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 60.0;
    pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 400.0;
    pub const DEFAULT_ROTATION_FACTOR: f32 = 0.05;
    pub const DEFAULT_VISIBLE_DEPTH: usize = 3;
    pub const DEFAULT_COMMIT_ANIMATION_MS: u64 = 180;
    pub const DEFAULT_CANCEL_ANIMATION_MS: u64 = 150;
    pub const DEFAULT_FLIP_ANIMATION_MS: u64 = 300;
    pub const DEFAULT_DRAG_DEAD_ZONE: f32 = 10.0;
    pub const DEFAULT_CARD_WIDTH: f32 = 320.0;

    pub fn new() -> Self {
        Self {
            distance_threshold: Self::DEFAULT_DISTANCE_THRESHOLD,
            velocity_threshold: Self::DEFAULT_VELOCITY_THRESHOLD,
            rotation_factor: Self::DEFAULT_ROTATION_FACTOR,
            visible_depth: Self::DEFAULT_VISIBLE_DEPTH,
            commit_animation_duration_ms: Self::DEFAULT_COMMIT_ANIMATION_MS,
            cancel_animation_duration_ms: Self::DEFAULT_CANCEL_ANIMATION_MS,
            flip_animation_duration_ms: Self::DEFAULT_FLIP_ANIMATION_MS,
            drag_dead_zone: Self::DEFAULT_DRAG_DEAD_ZONE,
            card_width: Self::DEFAULT_CARD_WIDTH,
        }
    }

    #[must_use]
    pub fn with_distance_threshold(mut self, value: f32) -> Self {
        self.distance_threshold = value;
        self
    }

    #[must_use]
    pub fn with_velocity_threshold(mut self, value: f32) -> Self {
        self.velocity_threshold = value;
        self
    }

    #[must_use]
    pub fn with_rotation_factor(mut self, value: f32) -> Self {
        self.rotation_factor = value;
        self
    }

    #[must_use]
    pub fn with_visible_depth(mut self, depth: usize) -> Self {
        self.visible_depth = depth;
        self
    }

    #[must_use]
    pub fn with_commit_animation_ms(mut self, ms: u64) -> Self {
        self.commit_animation_duration_ms = ms;
        self
    }

    #[must_use]
    pub fn with_cancel_animation_ms(mut self, ms: u64) -> Self {
        self.cancel_animation_duration_ms = ms;
        self
    }

    #[must_use]
    pub fn with_flip_animation_ms(mut self, ms: u64) -> Self {
        self.flip_animation_duration_ms = ms;
        self
    }

    #[must_use]
    pub fn with_drag_dead_zone(mut self, value: f32) -> Self {
        self.drag_dead_zone = value;
        self
    }

    #[must_use]
    pub fn with_card_width(mut self, value: f32) -> Self {
        self.card_width = value;
        self
    }

    /// Checks every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("distance_threshold", self.distance_threshold)?;
        positive("velocity_threshold", self.velocity_threshold)?;
        positive("card_width", self.card_width)?;
        finite("rotation_factor", self.rotation_factor)?;
        finite("drag_dead_zone", self.drag_dead_zone)?;
        if self.drag_dead_zone < 0.0 {
            return Err(ConfigError::Negative {
                field: "drag_dead_zone",
                value: self.drag_dead_zone,
            });
        }
        if self.visible_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }

    /// Half of the flip duration, rounded up so a 1 ms flip still animates.
    pub(crate) fn flip_half_ms(&self) -> u64 {
        self.flip_animation_duration_ms.div_ceil(2)
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(DeckConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_depth() {
        let config = DeckConfig::new().with_visible_depth(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDepth));
    }

    #[test]
    fn rejects_non_positive_thresholds() {
        let config = DeckConfig::new().with_distance_threshold(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "distance_threshold",
                value: 0.0
            })
        );

        let config = DeckConfig::new().with_velocity_threshold(f32::NAN);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "velocity_threshold"
            })
        );
    }

    #[test]
    fn rejects_negative_dead_zone() {
        let config = DeckConfig::new().with_drag_dead_zone(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "drag_dead_zone",
                ..
            })
        ));
    }

    #[test]
    fn flip_halves_round_up() {
        assert_eq!(DeckConfig::new().with_flip_animation_ms(300).flip_half_ms(), 150);
        assert_eq!(DeckConfig::new().with_flip_animation_ms(1).flip_half_ms(), 1);
    }
}
