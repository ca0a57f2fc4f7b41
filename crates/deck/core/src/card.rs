//! Per-card visual state machine.
//!
//! ```text
//!            drag              commit           completion
//!   Idle ──────────▶ Dragging ───────▶ Committing ──────────▶ Removed
//!     ▲                 │
//!     └──── cancel ─────┘   (snap-back animation, card is Idle again)
//! ```
//!
//! Orthogonally, `face` toggles `FrontShown ↔ BackShown` on a flip request.
//! Flips are only accepted while the card is `Idle`; once started they run
//! to completion regardless of what the interaction state does next.
//!
//! Interpolated values (`translation_x`, `rotation_deg`, overlay alphas,
//! `face_scale`) live in [`CardVisualState`] and are advanced by
//! [`CardMachine::advance`] from the host clock.

use crate::animation::{Timestamp, Tween, lerp};
use crate::config::DeckConfig;
use crate::error::Rejection;
use crate::gesture::SwipeDirection;

/// Interaction state of a card.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging,
    /// The fling-out animation owns the card; input is ignored.
    Committing,
    /// Terminal. The commit animation finished and completion was signalled.
    Removed,
}

impl InteractionState {
    /// Returns true if a new pointer-down may open a gesture on this card.
    pub const fn accepts_pointer(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Which face of the card is visible.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum FaceState {
    #[default]
    FrontShown,
    BackShown,
}

impl FaceState {
    pub const fn toggled(self) -> Self {
        match self {
            Self::FrontShown => Self::BackShown,
            Self::BackShown => Self::FrontShown,
        }
    }
}

/// Everything a renderer needs to draw one card.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardVisualState {
    pub interaction: InteractionState,
    pub face: FaceState,
    pub translation_x: f32,
    pub rotation_deg: f32,
    pub like_overlay_alpha: f32,
    pub pass_overlay_alpha: f32,
    /// Horizontal scale of the visible face: 1.0 at rest, 0.0 mid-flip.
    pub face_scale: f32,
}

impl Default for CardVisualState {
    fn default() -> Self {
        Self {
            interaction: InteractionState::Idle,
            face: FaceState::FrontShown,
            translation_x: 0.0,
            rotation_deg: 0.0,
            like_overlay_alpha: 0.0,
            pass_overlay_alpha: 0.0,
            face_scale: 1.0,
        }
    }
}

impl CardVisualState {
    /// True when no drag offset, tilt or overlay is showing.
    pub fn is_at_rest(&self) -> bool {
        self.translation_x == 0.0
            && self.rotation_deg == 0.0
            && self.like_overlay_alpha == 0.0
            && self.pass_overlay_alpha == 0.0
    }

    fn pose(&self) -> Pose {
        Pose {
            translation_x: self.translation_x,
            rotation_deg: self.rotation_deg,
            like_overlay_alpha: self.like_overlay_alpha,
            pass_overlay_alpha: self.pass_overlay_alpha,
        }
    }

    fn set_pose(&mut self, pose: Pose) {
        self.translation_x = pose.translation_x;
        self.rotation_deg = pose.rotation_deg;
        self.like_overlay_alpha = pose.like_overlay_alpha;
        self.pass_overlay_alpha = pose.pass_overlay_alpha;
    }
}

/// Drag progress toward the commit distance, clamped to [0, 1].
pub fn drag_progress(delta_x: f32, distance_threshold: f32) -> f32 {
    (delta_x.abs() / distance_threshold).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Pose {
    translation_x: f32,
    rotation_deg: f32,
    like_overlay_alpha: f32,
    pass_overlay_alpha: f32,
}

impl Pose {
    const REST: Self = Self {
        translation_x: 0.0,
        rotation_deg: 0.0,
        like_overlay_alpha: 0.0,
        pass_overlay_alpha: 0.0,
    };

    fn lerp_to(self, to: Self, t: f32) -> Self {
        Self {
            translation_x: lerp(self.translation_x, to.translation_x, t),
            rotation_deg: lerp(self.rotation_deg, to.rotation_deg, t),
            like_overlay_alpha: lerp(self.like_overlay_alpha, to.like_overlay_alpha, t),
            pass_overlay_alpha: lerp(self.pass_overlay_alpha, to.pass_overlay_alpha, t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Still,
    SnapBack {
        from: Pose,
        tween: Tween,
    },
    Fling {
        from_x: f32,
        to_x: f32,
        tween: Tween,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum FlipPhase {
    Collapsing(Tween),
    Expanding(Tween),
}

/// Notable transitions reported by [`CardMachine::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSignal {
    /// The fling-out finished and the card is now `Removed`. Emitted once.
    CommitFinished(SwipeDirection),
    /// The snap-back finished; the card is at rest.
    Settled,
}

/// Visual state machine for one card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardMachine {
    visual: CardVisualState,
    motion: Motion,
    flip: Option<FlipPhase>,
    committed: Option<SwipeDirection>,
}

impl Default for CardMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CardMachine {
    pub fn new() -> Self {
        Self {
            visual: CardVisualState::default(),
            motion: Motion::Still,
            flip: None,
            committed: None,
        }
    }

    pub fn visual(&self) -> &CardVisualState {
        &self.visual
    }

    pub fn interaction(&self) -> InteractionState {
        self.visual.interaction
    }

    pub fn face(&self) -> FaceState {
        self.visual.face
    }

    /// Direction of the commit, once one has started.
    pub fn committed_direction(&self) -> Option<SwipeDirection> {
        self.committed
    }

    /// Returns true while any tween (snap-back, fling, flip) is running.
    pub fn is_animating(&self) -> bool {
        self.motion != Motion::Still || self.flip.is_some()
    }

    /// Follows a drag update. Interrupts a running snap-back.
    pub fn drag(&mut self, delta_x: f32, config: &DeckConfig) -> Result<(), Rejection> {
        match self.visual.interaction {
            InteractionState::Idle | InteractionState::Dragging => {}
            state => return Err(Rejection::CardBusy { state }),
        }

        self.motion = Motion::Still;
        self.visual.interaction = InteractionState::Dragging;

        let t = drag_progress(delta_x, config.distance_threshold);
        let (like, pass) = if delta_x > 0.0 { (t, 0.0) } else { (0.0, t) };
        // Tilt stops growing once the drag reaches the commit distance.
        let tilt = if delta_x < 0.0 { -t } else { t };
        self.visual.set_pose(Pose {
            translation_x: delta_x,
            rotation_deg: tilt * config.distance_threshold * config.rotation_factor,
            like_overlay_alpha: like,
            pass_overlay_alpha: pass,
        });
        Ok(())
    }

    /// Starts the fling-out toward `±2 × card_width`.
    ///
    /// Commit is final: there is no way back to `Idle` from here.
    pub fn commit(
        &mut self,
        direction: SwipeDirection,
        now: Timestamp,
        config: &DeckConfig,
    ) -> Result<(), Rejection> {
        self.require_dragging()?;

        self.visual.interaction = InteractionState::Committing;
        self.committed = Some(direction);
        let (like, pass) = if direction.is_like() { (1.0, 0.0) } else { (0.0, 1.0) };
        self.visual.like_overlay_alpha = like;
        self.visual.pass_overlay_alpha = pass;
        self.motion = Motion::Fling {
            from_x: self.visual.translation_x,
            to_x: direction.sign() * config.card_width * 2.0,
            tween: Tween::new(now, config.commit_animation_duration_ms),
        };
        Ok(())
    }

    /// Abandons the drag and animates back to rest. The card is `Idle`
    /// immediately; the snap-back is purely visual.
    pub fn cancel(&mut self, now: Timestamp, config: &DeckConfig) -> Result<(), Rejection> {
        self.require_dragging()?;

        self.visual.interaction = InteractionState::Idle;
        self.motion = Motion::SnapBack {
            from: self.visual.pose(),
            tween: Tween::new(now, config.cancel_animation_duration_ms),
        };
        Ok(())
    }

    /// Starts a front/back flip. Only valid while `Idle`.
    pub fn request_flip(&mut self, now: Timestamp, config: &DeckConfig) -> Result<(), Rejection> {
        match self.visual.interaction {
            InteractionState::Idle => {}
            state => return Err(Rejection::CardBusy { state }),
        }
        if self.flip.is_some() {
            return Err(Rejection::FlipInProgress);
        }

        self.flip = Some(FlipPhase::Collapsing(Tween::new(now, config.flip_half_ms())));
        Ok(())
    }

    /// Advances every running tween to `now`.
    pub fn advance(&mut self, now: Timestamp) -> Option<CardSignal> {
        self.advance_flip(now);

        match self.motion {
            Motion::Still => None,
            Motion::SnapBack { from, tween } => {
                if tween.is_finished(now) {
                    self.visual.set_pose(Pose::REST);
                    self.motion = Motion::Still;
                    Some(CardSignal::Settled)
                } else {
                    self.visual.set_pose(from.lerp_to(Pose::REST, tween.eased(now)));
                    None
                }
            }
            Motion::Fling { from_x, to_x, tween } => {
                self.visual.translation_x = lerp(from_x, to_x, tween.eased(now));
                if tween.is_finished(now) {
                    self.complete_commit().ok().map(CardSignal::CommitFinished)
                } else {
                    None
                }
            }
        }
    }

    /// Marks the commit animation as finished.
    ///
    /// Succeeds exactly once per commit; duplicate completion callbacks get
    /// [`Rejection::AlreadyRemoved`] and change nothing.
    pub fn complete_commit(&mut self) -> Result<SwipeDirection, Rejection> {
        match self.visual.interaction {
            InteractionState::Committing => {}
            InteractionState::Removed => return Err(Rejection::AlreadyRemoved),
            InteractionState::Idle | InteractionState::Dragging => {
                return Err(Rejection::NotCommitting);
            }
        }
        let direction = self.committed.ok_or(Rejection::NotCommitting)?;

        if let Motion::Fling { to_x, .. } = self.motion {
            self.visual.translation_x = to_x;
        }
        self.motion = Motion::Still;
        self.visual.interaction = InteractionState::Removed;
        Ok(direction)
    }

    fn require_dragging(&self) -> Result<(), Rejection> {
        match self.visual.interaction {
            InteractionState::Dragging => Ok(()),
            InteractionState::Idle => Err(Rejection::NotDragging),
            state => Err(Rejection::CardBusy { state }),
        }
    }

    fn advance_flip(&mut self, now: Timestamp) {
        // A long frame gap can finish both halves in one step.
        loop {
            match self.flip {
                None => return,
                Some(FlipPhase::Collapsing(tween)) => {
                    if tween.is_finished(now) {
                        self.visual.face = self.visual.face.toggled();
                        self.visual.face_scale = 0.0;
                        let expand = Tween::new(tween.end(), tween.duration_ms());
                        self.flip = Some(FlipPhase::Expanding(expand));
                    } else {
                        self.visual.face_scale = 1.0 - tween.linear(now);
                        return;
                    }
                }
                Some(FlipPhase::Expanding(tween)) => {
                    if tween.is_finished(now) {
                        self.visual.face_scale = 1.0;
                        self.flip = None;
                    } else {
                        self.visual.face_scale = tween.linear(now);
                    }
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DeckConfig {
        DeckConfig::default()
    }

    fn dragging(delta_x: f32) -> CardMachine {
        let mut card = CardMachine::new();
        card.drag(delta_x, &config()).unwrap();
        card
    }

    #[test]
    fn drag_sets_pose_and_overlays() {
        let card = dragging(30.0);
        let visual = card.visual();
        assert_eq!(visual.interaction, InteractionState::Dragging);
        assert_eq!(visual.translation_x, 30.0);
        assert!((visual.rotation_deg - 1.5).abs() < 1e-6);
        assert_eq!(visual.like_overlay_alpha, 0.5);
        assert_eq!(visual.pass_overlay_alpha, 0.0);
    }

    #[test]
    fn rotation_is_capped_at_commit_distance() {
        let max_tilt = config().distance_threshold * config().rotation_factor;

        let right = dragging(300.0);
        assert_eq!(right.visual().translation_x, 300.0);
        assert!((right.visual().rotation_deg - max_tilt).abs() < 1e-5);

        let left = dragging(-300.0);
        assert!((left.visual().rotation_deg + max_tilt).abs() < 1e-5);
        assert!((max_tilt - 3.0).abs() < 1e-5);
    }

    #[test]
    fn overlay_saturates_before_commit_threshold_is_passed() {
        let card = dragging(-90.0);
        assert_eq!(card.visual().pass_overlay_alpha, 1.0);
        assert_eq!(card.visual().like_overlay_alpha, 0.0);
    }

    #[test]
    fn cancel_snaps_back_to_rest() {
        let mut card = dragging(40.0);
        card.cancel(Timestamp(1_000), &config()).unwrap();
        assert_eq!(card.interaction(), InteractionState::Idle);

        assert_eq!(card.advance(Timestamp(1_075)), None);
        let halfway = card.visual().translation_x;
        assert!(halfway > 0.0 && halfway < 40.0);

        assert_eq!(card.advance(Timestamp(1_150)), Some(CardSignal::Settled));
        assert!(card.visual().is_at_rest());
        assert!(!card.is_animating());
    }

    #[test]
    fn commit_flies_out_and_completes_once() {
        let mut card = dragging(70.0);
        card.commit(SwipeDirection::Right, Timestamp(0), &config()).unwrap();
        assert_eq!(card.interaction(), InteractionState::Committing);
        assert_eq!(card.visual().like_overlay_alpha, 1.0);

        assert_eq!(card.advance(Timestamp(90)), None);
        assert_eq!(
            card.advance(Timestamp(180)),
            Some(CardSignal::CommitFinished(SwipeDirection::Right))
        );
        assert_eq!(card.interaction(), InteractionState::Removed);
        assert_eq!(card.visual().translation_x, 640.0);

        assert_eq!(card.advance(Timestamp(200)), None);
        assert_eq!(card.complete_commit(), Err(Rejection::AlreadyRemoved));
    }

    #[test]
    fn external_completion_is_idempotent() {
        let mut card = dragging(-80.0);
        card.commit(SwipeDirection::Left, Timestamp(0), &config()).unwrap();
        assert_eq!(card.complete_commit(), Ok(SwipeDirection::Left));
        assert_eq!(card.complete_commit(), Err(Rejection::AlreadyRemoved));
        assert_eq!(card.visual().translation_x, -640.0);
        assert_eq!(card.advance(Timestamp(1_000)), None);
    }

    #[test]
    fn committing_card_ignores_drag_and_cancel() {
        let mut card = dragging(70.0);
        card.commit(SwipeDirection::Right, Timestamp(0), &config()).unwrap();

        let busy = Err(Rejection::CardBusy {
            state: InteractionState::Committing,
        });
        assert_eq!(card.drag(10.0, &config()), busy);
        assert_eq!(card.cancel(Timestamp(10), &config()), busy);
        assert_eq!(card.interaction(), InteractionState::Committing);
    }

    #[test]
    fn idle_card_cannot_commit_or_cancel() {
        let mut card = CardMachine::new();
        assert_eq!(
            card.commit(SwipeDirection::Right, Timestamp(0), &config()),
            Err(Rejection::NotDragging)
        );
        assert_eq!(card.cancel(Timestamp(0), &config()), Err(Rejection::NotDragging));
        assert_eq!(card.complete_commit(), Err(Rejection::NotCommitting));
    }

    #[test]
    fn flip_swaps_face_at_midpoint() {
        let mut card = CardMachine::new();
        card.request_flip(Timestamp(0), &config()).unwrap();

        card.advance(Timestamp(75));
        assert_eq!(card.face(), FaceState::FrontShown);
        assert_eq!(card.visual().face_scale, 0.5);

        card.advance(Timestamp(150));
        assert_eq!(card.face(), FaceState::BackShown);
        assert_eq!(card.visual().face_scale, 0.0);

        card.advance(Timestamp(225));
        assert_eq!(card.visual().face_scale, 0.5);

        card.advance(Timestamp(300));
        assert_eq!(card.visual().face_scale, 1.0);
        assert!(!card.is_animating());
        assert_eq!(card.interaction(), InteractionState::Idle);
    }

    #[test]
    fn flip_completes_across_a_long_frame_gap() {
        let mut card = CardMachine::new();
        card.request_flip(Timestamp(0), &config()).unwrap();
        card.advance(Timestamp(10_000));
        assert_eq!(card.face(), FaceState::BackShown);
        assert_eq!(card.visual().face_scale, 1.0);
        assert!(!card.is_animating());
    }

    #[test]
    fn flip_rejected_while_dragging_or_flipping() {
        let mut card = dragging(20.0);
        assert_eq!(
            card.request_flip(Timestamp(0), &config()),
            Err(Rejection::CardBusy {
                state: InteractionState::Dragging
            })
        );

        let mut card = CardMachine::new();
        card.request_flip(Timestamp(0), &config()).unwrap();
        assert_eq!(
            card.request_flip(Timestamp(10), &config()),
            Err(Rejection::FlipInProgress)
        );
    }

    #[test]
    fn drag_interrupts_snap_back() {
        let mut card = dragging(40.0);
        card.cancel(Timestamp(0), &config()).unwrap();
        card.advance(Timestamp(50));

        card.drag(15.0, &config()).unwrap();
        assert_eq!(card.interaction(), InteractionState::Dragging);
        assert_eq!(card.visual().translation_x, 15.0);
        assert_eq!(card.advance(Timestamp(500)), None);
        assert_eq!(card.visual().translation_x, 15.0);
    }
}
