//! Minimal in-memory collaborators for `sm-cli run`: a single track
//! driven by a single animation, with every OSC batch printed to stdout
//! instead of sent anywhere.

use std::collections::HashMap;

use sm_core::{
    Animation, AnimationId, AnimationParameters, CoordinateSystem, FadeSpec, ModelTypeId, MultiTrackMode, Position,
    Track, TrackId,
};
use sm_transport::{AnimationStore, OscBatch, OscInputFilter, OscSink, TrackStore};

pub struct StubTrackStore {
    tracks: HashMap<TrackId, Track>,
}

impl StubTrackStore {
    pub fn with_one_track(id: TrackId) -> Self {
        let mut track = Track::new(id, Position::ORIGIN);
        track.external_index = Some(0);
        let mut tracks = HashMap::new();
        tracks.insert(id, track);
        Self { tracks }
    }
}

impl TrackStore for StubTrackStore {
    fn find_track(&self, id: TrackId) -> Option<Track> {
        self.tracks.get(&id).cloned()
    }

    fn set_position(&mut self, id: TrackId, position: Position) {
        if let Some(t) = self.tracks.get_mut(&id) {
            t.position = position;
        }
    }

    fn capture_initial_position(&mut self, id: TrackId) {
        if let Some(t) = self.tracks.get_mut(&id) {
            t.capture_initial_position();
        }
    }

    fn clear_initial_position(&mut self, id: TrackId) {
        if let Some(t) = self.tracks.get_mut(&id) {
            t.clear_initial_position();
        }
    }

    fn set_playback_state(&mut self, id: TrackId, is_playing: bool, current_time: f64) {
        if let Some(t) = self.tracks.get_mut(&id) {
            t.animation_state.is_playing = is_playing;
            t.animation_state.current_time = current_time;
        }
    }

    fn all_track_ids(&self) -> Vec<TrackId> {
        self.tracks.keys().copied().collect()
    }
}

pub struct StubAnimationStore {
    animation: Animation,
}

impl StubAnimationStore {
    pub fn single(id: AnimationId, model_type: ModelTypeId, duration_secs: f64) -> Self {
        Self {
            animation: Animation {
                id,
                name: "cli-trace".to_string(),
                model_type,
                parameters: AnimationParameters::new(),
                duration_secs,
                r#loop: true,
                ping_pong: false,
                coordinate_system: CoordinateSystem::Xyz,
                multi_track_mode: MultiTrackMode::Relative,
                global_phase_offset_secs: 0.0,
                multi_track_parameters: std::collections::BTreeMap::new(),
                locked_track_set: false,
                fade_in: FadeSpec::disabled(),
                fade_out: FadeSpec::disabled(),
                playback_speed: 1.0,
            },
        }
    }
}

impl AnimationStore for StubAnimationStore {
    fn find_animation(&self, id: AnimationId) -> Option<Animation> {
        (id == self.animation.id).then(|| self.animation.clone())
    }
}

#[derive(Default)]
pub struct StubOscSink;

impl OscSink for StubOscSink {
    fn send(&mut self, batch: &OscBatch) {
        if batch.is_empty() {
            return;
        }
        for entry in &batch.messages {
            println!("/track/{}/position  {:.3} {:.3} {:.3}", entry.track_external_index, entry.position.x, entry.position.y, entry.position.z);
        }
    }
}

#[derive(Default)]
pub struct StubInputFilter;

impl OscInputFilter for StubInputFilter {
    fn clear_animating_tracks(&mut self) {}
}
