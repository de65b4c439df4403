//! Track: a virtual sound source the core moves along an animation's path.

use crate::Position;
use serde::{Deserialize, Serialize};

/// Stable track identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackId(pub u64);

impl TrackId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A virtual sound source.
///
/// Owned by the external project layer; the core only ever reads and
/// writes `position`, `initial_position`, and the `is_playing`/`current_time`
/// fields of [`TrackAnimationState`] (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub position: Position,
    /// Captured the first time the track is driven by a playing animation
    /// in a given play session; never overwritten while still set.
    pub initial_position: Option<Position>,
    /// External OSC addressing index, if assigned by the host.
    pub external_index: Option<u32>,
    pub muted: bool,
    pub soloed: bool,
    /// Per-track animation override used in relative multi-track mode.
    pub animation_override: Option<crate::AnimationId>,
    pub animation_state: TrackAnimationState,
}

impl Track {
    pub fn new(id: TrackId, position: Position) -> Self {
        Self {
            id,
            position,
            initial_position: None,
            external_index: None,
            muted: false,
            soloed: false,
            animation_override: None,
            animation_state: TrackAnimationState::default(),
        }
    }

    /// Capture `initial_position` if it has not already been captured
    /// this play session. Idempotent.
    pub fn capture_initial_position(&mut self) {
        if self.initial_position.is_none() {
            self.initial_position = Some(self.position);
        }
    }

    pub fn clear_initial_position(&mut self) {
        self.initial_position = None;
    }
}

/// The subset of a track's playback bookkeeping the core is allowed to
/// mutate directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackAnimationState {
    pub is_playing: bool,
    pub current_time: f64,
}

/// Given a set of tracks and mute/solo flags, decide which tracks are
/// "active" this tick: a muted track never participates; if any track in
/// the set is soloed, only soloed tracks participate.
pub fn active_tracks<'a>(tracks: &'a [Track]) -> Vec<&'a Track> {
    let any_soloed = tracks.iter().any(|t| t.soloed);
    tracks
        .iter()
        .filter(|t| !t.muted && (!any_soloed || t.soloed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: u64, muted: bool, soloed: bool) -> Track {
        let mut t = Track::new(TrackId::new(id), Position::ORIGIN);
        t.muted = muted;
        t.soloed = soloed;
        t
    }

    #[test]
    fn mute_excludes_track() {
        let tracks = vec![track(1, true, false), track(2, false, false)];
        let active = active_tracks(&tracks);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, TrackId::new(2));
    }

    #[test]
    fn solo_excludes_non_soloed() {
        let tracks = vec![track(1, false, false), track(2, false, true), track(3, false, false)];
        let active = active_tracks(&tracks);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, TrackId::new(2));
    }

    #[test]
    fn capture_initial_position_is_idempotent() {
        let mut t = Track::new(TrackId::new(1), Position::new(1.0, 2.0, 3.0));
        t.capture_initial_position();
        t.position = Position::new(9.0, 9.0, 9.0);
        t.capture_initial_position();
        assert_eq!(t.initial_position, Some(Position::new(1.0, 2.0, 3.0)));
    }
}
