//! Pointer-motion interpretation.
//!
//! [`GestureInterpreter`] turns pointer-down/move/up/cancel samples into
//! [`GestureUpdate`]s. It holds no state beyond the active
//! [`GestureSession`], which lives from pointer-down until the gesture
//! commits or cancels.
//!
//! # Commit policy
//!
//! A release commits if the horizontal displacement exceeds
//! `distance_threshold` **or** the last velocity estimate exceeds
//! `velocity_threshold`. Either trigger is enough, so both quick flicks and
//! slow deliberate drags count as swipes. The direction is always the sign
//! of the displacement.

use tracing::trace;

use crate::animation::Timestamp;
use crate::card::CardVisualState;
use crate::config::DeckConfig;
use crate::error::Rejection;

/// Direction of a committed swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SwipeDirection {
    /// Swipe right: the item is liked.
    Right,
    /// Swipe left: the item is passed.
    Left,
}

impl SwipeDirection {
    /// Direction of a horizontal displacement, `None` for zero or NaN.
    pub fn from_delta(delta_x: f32) -> Option<Self> {
        if delta_x > 0.0 {
            Some(Self::Right)
        } else if delta_x < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    pub const fn sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    pub const fn is_like(self) -> bool {
        matches!(self, Self::Right)
    }
}

/// Ephemeral state of one pointer interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub start_x: f32,
    pub last_x: f32,
    /// Units per second, measured from the velocity anchor to the latest sample.
    pub last_velocity_x: f32,
    last_at: Timestamp,
    /// Last position seen at a timestamp strictly before `last_at`.
    anchor_x: f32,
    anchor_at: Timestamp,
    engaged: bool,
}

impl GestureSession {
    fn open(x: f32, at: Timestamp) -> Self {
        Self {
            start_x: x,
            last_x: x,
            last_velocity_x: 0.0,
            last_at: at,
            anchor_x: x,
            anchor_at: at,
            engaged: false,
        }
    }

    /// Moves the session to `(x, at)` and refreshes the velocity estimate.
    ///
    /// Samples sharing a timestamp belong to one batch: the anchor only moves
    /// forward when a new timestamp arrives, so every sample of a batch is
    /// measured against the end of the previous batch.
    fn record(&mut self, x: f32, at: Timestamp) {
        if at.saturating_since(self.last_at) > 0 {
            self.anchor_x = self.last_x;
            self.anchor_at = self.last_at;
            self.last_at = at;
        }
        self.last_x = x;
        self.refresh_velocity(self.last_at);
    }

    /// Velocity from the anchor to the latest position as seen at `at`.
    ///
    /// A zero interval keeps the previous estimate.
    fn refresh_velocity(&mut self, at: Timestamp) {
        let elapsed_ms = at.saturating_since(self.anchor_at);
        if elapsed_ms > 0 {
            self.last_velocity_x = (self.last_x - self.anchor_x) * 1000.0 / elapsed_ms as f32;
        }
    }

    pub fn delta_x(&self) -> f32 {
        self.last_x - self.start_x
    }

    /// True once the pointer has left the dead zone at least once.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}

/// Output of the interpreter for the card visual state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureUpdate {
    /// The pointer moved; the card should follow `delta_x`.
    Drag { delta_x: f32 },
    /// Terminal: the gesture is a swipe.
    Commit {
        direction: SwipeDirection,
        delta_x: f32,
        velocity_x: f32,
    },
    /// Terminal: the gesture is abandoned; the card should snap back.
    Cancel,
}

/// Converts pointer samples into drag, commit and cancel updates.
#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    distance_threshold: f32,
    velocity_threshold: f32,
    dead_zone: f32,
    session: Option<GestureSession>,
}

impl GestureInterpreter {
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            distance_threshold: config.distance_threshold,
            velocity_threshold: config.velocity_threshold,
            dead_zone: config.drag_dead_zone,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Drops the active session without emitting anything.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Opens a session at `x` on `target`.
    ///
    /// Rejected while another session is open or while the target card is
    /// owned by an animation (committing or removed).
    pub fn on_pointer_down(
        &mut self,
        x: f32,
        at: Timestamp,
        target: &CardVisualState,
    ) -> Result<(), Rejection> {
        if self.session.is_some() {
            return Err(Rejection::GestureInProgress);
        }
        if !target.interaction.accepts_pointer() {
            return Err(Rejection::CardBusy {
                state: target.interaction,
            });
        }
        self.session = Some(GestureSession::open(x, at));
        Ok(())
    }

    /// Records a pointer sample.
    ///
    /// Returns `Ok(None)` while the gesture has not yet left the dead zone.
    pub fn on_pointer_move(
        &mut self,
        x: f32,
        at: Timestamp,
    ) -> Result<Option<GestureUpdate>, Rejection> {
        let session = self.session.as_mut().ok_or(Rejection::NoActiveGesture)?;
        session.record(x, at);

        let delta_x = session.delta_x();
        if !session.engaged && delta_x.abs() < self.dead_zone {
            return Ok(None);
        }
        session.engaged = true;

        trace!(delta_x, velocity_x = session.last_velocity_x, "drag");
        Ok(Some(GestureUpdate::Drag { delta_x }))
    }

    /// Ends the session at `at` and decides between commit and cancel.
    ///
    /// The pointer rested at `last_x` between the last move and the release,
    /// so a pause before letting go stretches the velocity interval and a
    /// held card no longer counts as a flick.
    pub fn on_pointer_up(&mut self, at: Timestamp) -> Result<GestureUpdate, Rejection> {
        let mut session = self.session.take().ok_or(Rejection::NoActiveGesture)?;
        if at.saturating_since(session.last_at) > 0 {
            session.refresh_velocity(at);
        }
        Ok(self.evaluate(&session))
    }

    /// Ends the session without a decision.
    pub fn on_pointer_cancel(&mut self) -> Result<GestureUpdate, Rejection> {
        self.session.take().ok_or(Rejection::NoActiveGesture)?;
        Ok(GestureUpdate::Cancel)
    }

    fn evaluate(&self, session: &GestureSession) -> GestureUpdate {
        if !session.engaged {
            return GestureUpdate::Cancel;
        }

        let delta_x = session.delta_x();
        let velocity_x = session.last_velocity_x;
        let far_enough = delta_x.abs() > self.distance_threshold;
        let fast_enough = velocity_x.abs() > self.velocity_threshold;

        match SwipeDirection::from_delta(delta_x) {
            Some(direction) if far_enough || fast_enough => GestureUpdate::Commit {
                direction,
                delta_x,
                velocity_x,
            },
            _ => GestureUpdate::Cancel,
        }
    }
}
