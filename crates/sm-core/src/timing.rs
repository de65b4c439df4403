//! The Timing Engine (C4): pure functions over a per-animation timing
//! state record. No wall clock, no I/O, no global state — `now` is
//! always passed in by the caller (the Transport, in milliseconds).

use serde::{Deserialize, Serialize};

/// Mutable timing datum for one [`crate::animation::Animation`] instance
/// (one `PlayingAnimation`). The only mutable timing state the engine
/// ever touches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingState {
    pub start_epoch_ms: u64,
    pub paused_epoch_ms: Option<u64>,
    pub accumulated_paused_ms: u64,
    pub is_paused: bool,
    pub is_reversed: bool,
    pub loop_count: u32,
}

impl TimingState {
    pub fn create(now_ms: u64) -> Self {
        Self {
            start_epoch_ms: now_ms,
            paused_epoch_ms: None,
            accumulated_paused_ms: 0,
            is_paused: false,
            is_reversed: false,
            loop_count: 0,
        }
    }

    /// Records `paused_epoch_ms = now`. Idempotent when already paused.
    pub fn pause(self, now_ms: u64) -> Self {
        if self.is_paused {
            return self;
        }
        Self {
            paused_epoch_ms: Some(now_ms),
            is_paused: true,
            ..self
        }
    }

    /// Accumulates `now - paused_epoch_ms` into `accumulated_paused_ms`
    /// and clears `paused_epoch_ms`. No-op when not paused.
    pub fn resume(self, now_ms: u64) -> Self {
        let Some(paused_at) = self.paused_epoch_ms else {
            return self;
        };
        let elapsed_paused = now_ms.saturating_sub(paused_at);
        Self {
            paused_epoch_ms: None,
            accumulated_paused_ms: self.accumulated_paused_ms + elapsed_paused,
            is_paused: false,
            ..self
        }
    }

    /// Like [`TimingState::create`], but preserves `is_paused`/`paused_epoch_ms`
    /// (used by `goToStart`, which resets the clock without resuming a
    /// paused animation out from under the caller).
    pub fn reset(self, now_ms: u64) -> Self {
        Self {
            start_epoch_ms: now_ms,
            accumulated_paused_ms: 0,
            is_reversed: false,
            loop_count: 0,
            ..self
        }
    }

    /// Wall-clock elapsed time minus paused intervals, in milliseconds.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let raw = now_ms.saturating_sub(self.start_epoch_ms);
        let paused = if let Some(paused_at) = self.paused_epoch_ms {
            self.accumulated_paused_ms + now_ms.saturating_sub(paused_at)
        } else {
            self.accumulated_paused_ms
        };
        raw.saturating_sub(paused)
    }
}

/// Result of advancing a [`TimingState`] to `now` (§4.5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTimeResult {
    pub animation_time_secs: f64,
    pub new_state: TimingState,
    pub should_loop: bool,
    pub should_stop: bool,
}

/// Advance `state` to `now_ms` given the animation's `duration_secs`,
/// `r#loop`, `ping_pong`, and `playback_speed` (§4.5).
///
/// While paused, returns the state unchanged and the animation time held
/// at whatever it was the instant pause took effect (callers should skip
/// recomputing a position from a time that has not moved).
pub fn calculate_animation_time(
    now_ms: u64,
    duration_secs: f64,
    r#loop: bool,
    ping_pong: bool,
    playback_speed: f64,
    state: TimingState,
) -> AnimationTimeResult {
    if state.is_paused {
        let held_elapsed = state.elapsed_ms(now_ms) as f64 / 1000.0 * playback_speed;
        let held_time = held_elapsed.min(duration_secs);
        return AnimationTimeResult {
            animation_time_secs: if state.is_reversed { duration_secs - held_time } else { held_time },
            new_state: state,
            should_loop: false,
            should_stop: false,
        };
    }

    let raw = state.elapsed_ms(now_ms) as f64 / 1000.0 * playback_speed;

    if raw < duration_secs {
        let animation_time = if state.is_reversed { duration_secs - raw } else { raw };
        return AnimationTimeResult {
            animation_time_secs: animation_time,
            new_state: state,
            should_loop: false,
            should_stop: false,
        };
    }

    if !r#loop {
        let animation_time = if state.is_reversed { 0.0 } else { duration_secs };
        return AnimationTimeResult {
            animation_time_secs: animation_time,
            new_state: state,
            should_loop: false,
            should_stop: true,
        };
    }

    if !ping_pong {
        let raw_in_loop = if duration_secs > 0.0 { raw % duration_secs } else { 0.0 };
        let loops_elapsed = (raw / duration_secs).floor() as u32;
        let new_state = TimingState {
            loop_count: loops_elapsed,
            ..state
        };
        return AnimationTimeResult {
            animation_time_secs: raw_in_loop,
            new_state,
            should_loop: loops_elapsed > state.loop_count,
            should_stop: false,
        };
    }

    // Loop + ping-pong: each full `duration_secs` cycle flips direction.
    let cycles_elapsed = (raw / duration_secs).floor() as u32;
    let raw_in_loop = raw % duration_secs;
    let is_reversed = cycles_elapsed % 2 == 1;
    let animation_time = if is_reversed { duration_secs - raw_in_loop } else { raw_in_loop };
    let new_state = TimingState {
        is_reversed,
        loop_count: cycles_elapsed,
        ..state
    };
    AnimationTimeResult {
        animation_time_secs: animation_time,
        new_state,
        should_loop: cycles_elapsed > state.loop_count,
        should_stop: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pause_resume_elapsed_matches_wall_clock_minus_pauses() {
        let state = TimingState::create(0);
        let state = state.pause(1000);
        let state = state.resume(1500); // 500ms paused
        assert_eq!(state.elapsed_ms(2000), 2000 - 500);
    }

    #[test]
    fn pause_is_idempotent() {
        let state = TimingState::create(0).pause(1000);
        let state2 = state.pause(2000);
        assert_eq!(state, state2);
    }

    #[test]
    fn linear_no_loop_stops_at_duration() {
        let state = TimingState::create(0);
        let result = calculate_animation_time(500, 2.0, false, false, 1.0, state);
        assert_relative_eq!(result.animation_time_secs, 0.5);
        assert!(!result.should_stop);

        let result = calculate_animation_time(2001, 2.0, false, false, 1.0, state);
        assert!(result.should_stop);
        assert_relative_eq!(result.animation_time_secs, 2.0);
    }

    #[test]
    fn loop_without_pingpong_wraps_and_counts() {
        let state = TimingState::create(0);
        let result = calculate_animation_time(4500, 2.0, true, false, 1.0, state);
        assert_relative_eq!(result.animation_time_secs, 0.5, epsilon = 1e-6);
        assert_eq!(result.new_state.loop_count, 2);
        assert!(result.should_loop);
    }

    #[test]
    fn ping_pong_reverses_each_cycle() {
        let state = TimingState::create(0);
        // duration=4s: at t=2s we're at the first half-cycle boundary, still forward.
        let result = calculate_animation_time(2000, 4.0, true, true, 1.0, state);
        assert_relative_eq!(result.animation_time_secs, 2.0, epsilon = 1e-6);
        assert!(!result.new_state.is_reversed);

        // at t=6s we've completed one forward (0-4) and are 2s into the reverse cycle.
        let result = calculate_animation_time(6000, 4.0, true, true, 1.0, state);
        assert!(result.new_state.is_reversed);
        assert_relative_eq!(result.animation_time_secs, 2.0, epsilon = 1e-6);
        assert_eq!(result.new_state.loop_count, 1);
    }

    #[test]
    fn paused_state_returns_unchanged() {
        let state = TimingState::create(0).pause(500);
        let result = calculate_animation_time(10_000, 2.0, true, false, 1.0, state);
        assert_eq!(result.new_state, state);
        assert!(!result.should_loop);
        assert!(!result.should_stop);
    }
}
