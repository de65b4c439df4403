//! External collaborator interfaces (§6): the project/track store the
//! host implements, the OSC send callback, and the OSC input filter.
//! The transport only ever calls through these traits — it never assumes
//! a particular persistence or network layer.

use crate::osc::OscBatch;
use sm_core::{Animation, AnimationId, Position, Track, TrackId};

/// The host's project/track store, consumed by the transport. Positions
/// MUST be written back through [`TrackStore::set_position`] so the host
/// sees them — the transport never holds its own copy of track state.
pub trait TrackStore: Send {
    fn find_track(&self, id: TrackId) -> Option<Track>;
    fn set_position(&mut self, id: TrackId, position: Position);
    fn capture_initial_position(&mut self, id: TrackId);
    fn clear_initial_position(&mut self, id: TrackId);
    fn set_playback_state(&mut self, id: TrackId, is_playing: bool, current_time: f64);
    /// Every track id known to the store, used only by
    /// `returnAllToInitial` to find tracks outside any currently playing
    /// animation that still carry a stored `initialPosition`.
    fn all_track_ids(&self) -> Vec<TrackId>;
}

/// The host's animation definitions, consumed read-only by the transport.
pub trait AnimationStore: Send {
    fn find_animation(&self, id: AnimationId) -> Option<Animation>;
}

/// The OSC send callback (§4.7, §6). Registered once; the transport
/// MUST NOT assume delivery succeeds. The sink MUST be idempotent under
/// repeated flushes of an empty batch.
pub trait OscSink: Send {
    fn send(&mut self, batch: &OscBatch);
}

/// Invoked on global stop so a host-side OSC input filter does not keep
/// treating stopped tracks as "animating" for the purpose of ignoring
/// externally-received OSC for them.
pub trait OscInputFilter: Send {
    fn clear_animating_tracks(&mut self);
}
