//! A currently-playing animation: the transport's `playing` map holds
//! one of these per animation id (§4.6).

use sm_core::{AnimationId, TimingState, TrackId};

#[derive(Debug, Clone)]
pub struct PlayingAnimation {
    pub animation_id: AnimationId,
    pub track_ids: Vec<TrackId>,
    pub timing: TimingState,
}

impl PlayingAnimation {
    pub fn new(animation_id: AnimationId, track_ids: Vec<TrackId>, now_ms: u64) -> Self {
        Self {
            animation_id,
            track_ids,
            timing: TimingState::create(now_ms),
        }
    }
}
