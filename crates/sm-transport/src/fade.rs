//! The fade ease (§4.6): one pure function shared by fade-in, fade-out,
//! `goToStart`, and `returnAllToInitial`. Everything these four
//! operations do differently is which tracks they target and what
//! happens when the ease completes — never the interpolation itself.

use sm_core::{AnimationId, Easing, Position, TrackId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStep {
    pub position: Position,
    pub complete: bool,
}

/// Interpolate `from` → `to` at `elapsed_ms` into a `duration_ms` ease. A
/// zero-duration fade completes immediately at `to` rather than dividing
/// by zero.
pub fn fade_step(from: Position, to: Position, elapsed_ms: u64, duration_ms: u64, easing: Easing) -> FadeStep {
    if duration_ms == 0 {
        return FadeStep { position: to, complete: true };
    }
    let t = elapsed_ms as f64 / duration_ms as f64;
    FadeStep {
        position: from.lerp(to, easing.evaluate(t)),
        complete: elapsed_ms >= duration_ms,
    }
}

/// What happens to the owning animation once every track in its fade
/// group has completed. A fade not tied to a play/stop transition (e.g.
/// `returnAllToInitial`) carries `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeGroupAction {
    /// Fade-in on first play: once every track's fade completes, the
    /// `PlayingAnimation` is created and the clock starts.
    StartPlayback,
    /// `goToStart`: resume a `PlayingAnimation` already paused for the
    /// duration of the ease.
    ResumePlayback,
    /// Fade-out on stop: remove the animation's playing entry and state
    /// once every track has eased back to its initial position.
    RemoveAnimationState,
}

/// One track's in-flight fade. `start_ms` is the wall-clock tick time the
/// fade began, so `elapsed_ms` is derived rather than advanced manually —
/// a fade computed this way can be resumed after any number of skipped
/// ticks without drifting.
#[derive(Debug, Clone, Copy)]
pub struct ActiveFade {
    pub track_id: TrackId,
    pub from: Position,
    pub to: Position,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
    /// When set, this fade belongs to a group tied to `animation_id`;
    /// the group's action fires once every track in it has completed.
    pub group: Option<(AnimationId, FadeGroupAction)>,
}

impl ActiveFade {
    pub fn step(&self, now_ms: u64) -> FadeStep {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        fade_step(self.from, self.to, elapsed, self.duration_ms, self.easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_duration_completes_immediately() {
        let step = fade_step(Position::ORIGIN, Position::new(1.0, 0.0, 0.0), 0, 0, Easing::Linear);
        assert!(step.complete);
        assert_eq!(step.position, Position::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn halfway_linear_fade_is_the_midpoint() {
        let step = fade_step(Position::ORIGIN, Position::new(10.0, 0.0, 0.0), 500, 1000, Easing::Linear);
        assert_relative_eq!(step.position.x, 5.0);
        assert!(!step.complete);
    }

    #[test]
    fn active_fade_elapsed_is_relative_to_its_own_start() {
        let fade = ActiveFade {
            track_id: TrackId::new(1),
            from: Position::ORIGIN,
            to: Position::new(4.0, 0.0, 0.0),
            start_ms: 1000,
            duration_ms: 2000,
            easing: Easing::Linear,
            group: None,
        };
        let step = fade.step(2000);
        assert_relative_eq!(step.position.x, 2.0);
        assert!(!step.complete);
        let step = fade.step(3000);
        assert!(step.complete);
    }
}
