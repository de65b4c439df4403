//! Transport (C5, §4.6): owns the playing set, the per-animation state
//! scratchpads, and the OSC batch accumulator, and drives them through
//! two interleaved fixed-rate ticks (§5).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use sm_core::{
    active_tracks, calculate_animation_time, Animation, AnimationId, CoordinateSystem, Easing, Position, Track, TrackId,
};
use sm_models::{CalculationContext, ModelRegistry, ModelState};
use sm_multitrack::{apply_transform, compute_strategy, get_track_time};

use crate::collaborators::{AnimationStore, OscInputFilter, OscSink, TrackStore};
use crate::config::TransportConfig;
use crate::error::{TransportError, TransportResult};
use crate::fade::{ActiveFade, FadeGroupAction};
use crate::osc::{OscBatch, OscEntry};
use crate::playing::PlayingAnimation;
use crate::stats::TransportStats;

/// Immediately-equal-enough threshold for "does this track already sit
/// at its fade target", so a fade-in/goToStart does not spin up a
/// zero-distance ease.
const SAME_POSITION_EPSILON: f64 = 1e-6;

struct Inner<S, A, O, F> {
    track_store: S,
    animation_store: A,
    osc_sink: O,
    input_filter: F,

    playing: HashMap<AnimationId, PlayingAnimation>,
    state_store: HashMap<AnimationId, ModelState>,
    osc_batch: OscBatch,

    active_fades: HashMap<TrackId, ActiveFade>,
    /// Remaining un-completed fades per fade group, keyed by the owning
    /// animation id.
    pending_fade_groups: HashMap<AnimationId, usize>,
    /// Track ids a `StartPlayback` fade group will hand to a fresh
    /// `PlayingAnimation` once every track in the group eases in.
    pending_play: HashMap<AnimationId, Vec<TrackId>>,

    /// Per-(animation, track) last finite position a model produced,
    /// substituted when `calculate` returns a non-finite one (§7
    /// ComputationAnomaly).
    last_known_good: HashMap<(AnimationId, TrackId), Position>,
    /// (animation, track) pairs already warned about, so a persistently
    /// broken model logs once, not every tick.
    anomaly_logged: HashSet<(AnimationId, TrackId)>,

    stats: TransportStats,
    global_time_secs: f64,
}

/// The playback transport. Generic over its four external collaborators
/// (§6) so a host supplies its own project/track store, OSC sink, and
/// input filter without the transport depending on their concrete types.
pub struct Transport<S, A, O, F>
where
    S: TrackStore,
    A: AnimationStore,
    O: OscSink,
    F: OscInputFilter,
{
    config: TransportConfig,
    registry: Arc<ModelRegistry>,
    inner: Mutex<Inner<S, A, O, F>>,
}

impl<S, A, O, F> Transport<S, A, O, F>
where
    S: TrackStore,
    A: AnimationStore,
    O: OscSink,
    F: OscInputFilter,
{
    pub fn new(config: TransportConfig, registry: Arc<ModelRegistry>, track_store: S, animation_store: A, osc_sink: O, input_filter: F) -> Self {
        Self {
            config,
            registry,
            inner: Mutex::new(Inner {
                track_store,
                animation_store,
                osc_sink,
                input_filter,
                playing: HashMap::new(),
                state_store: HashMap::new(),
                osc_batch: OscBatch::default(),
                active_fades: HashMap::new(),
                pending_fade_groups: HashMap::new(),
                pending_play: HashMap::new(),
                last_known_good: HashMap::new(),
                anomaly_logged: HashSet::new(),
                stats: TransportStats::default(),
                global_time_secs: 0.0,
            }),
        }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn stats(&self) -> TransportStats {
        self.inner.lock().stats
    }

    /// `true` iff any playing animation is not paused.
    pub fn is_playing(&self) -> bool {
        self.inner.lock().playing.values().any(|p| !p.timing.is_paused)
    }

    pub fn playing_count(&self) -> usize {
        self.inner.lock().playing.len()
    }

    /// Public `globalTime` marker used by the UI. Does not rewind any
    /// `TimingState` — seeking live playback is out of scope (§4.6).
    pub fn seek(&self, time_secs: f64) {
        self.inner.lock().global_time_secs = time_secs;
    }

    pub fn global_time_secs(&self) -> f64 {
        self.inner.lock().global_time_secs
    }

    pub fn play(&self, animation_id: AnimationId, track_ids: Vec<TrackId>, now_ms: u64) -> TransportResult<()> {
        let mut inner = self.inner.lock();

        if let Some(existing) = inner.playing.get(&animation_id) {
            if existing.timing.is_paused {
                let resumed = existing.timing.resume(now_ms);
                inner.playing.get_mut(&animation_id).unwrap().timing = resumed;
            }
            return Ok(());
        }

        let animation = inner
            .animation_store
            .find_animation(animation_id)
            .ok_or(TransportError::AnimationNotFound(animation_id))?;

        for &track_id in &track_ids {
            inner.track_store.capture_initial_position(track_id);
        }

        if animation.fade_in.enabled && animation.fade_in.auto_trigger {
            self.start_fade_in(&mut inner, &animation, &track_ids, now_ms)
        } else {
            inner.playing.insert(animation_id, PlayingAnimation::new(animation_id, track_ids, now_ms));
            Ok(())
        }
    }

    pub fn pause(&self, animation_id: Option<AnimationId>, now_ms: u64) {
        let mut inner = self.inner.lock();
        match animation_id {
            Some(id) => {
                if let Some(p) = inner.playing.get_mut(&id) {
                    p.timing = p.timing.pause(now_ms);
                }
            }
            None => {
                for p in inner.playing.values_mut() {
                    p.timing = p.timing.pause(now_ms);
                }
            }
        }
    }

    pub fn stop(&self, animation_id: Option<AnimationId>, now_ms: u64) -> TransportResult<()> {
        let mut inner = self.inner.lock();
        match animation_id {
            Some(id) => self.stop_one(&mut inner, id, now_ms)?,
            None => {
                let ids: Vec<AnimationId> = inner.playing.keys().copied().collect();
                for id in ids {
                    self.stop_one(&mut inner, id, now_ms)?;
                }
                inner.osc_batch = OscBatch::default();
                inner.input_filter.clear_animating_tracks();
            }
        }
        Ok(())
    }

    pub fn stop_all(&self, now_ms: u64) -> TransportResult<()> {
        self.stop(None, now_ms)
    }

    /// Pause affected animations, ease their tracks to `initialPosition`
    /// over `duration_ms`, then resume. `track_ids` of `None` means every
    /// currently playing track.
    pub fn go_to_start(&self, duration_ms: u64, track_ids: Option<Vec<TrackId>>, now_ms: u64) -> TransportResult<()> {
        let mut inner = self.inner.lock();

        let affected: Vec<(AnimationId, Vec<TrackId>)> = match track_ids {
            Some(ids) => {
                let mut groups: HashMap<AnimationId, Vec<TrackId>> = HashMap::new();
                for tid in ids {
                    for (&aid, playing) in inner.playing.iter() {
                        if playing.track_ids.contains(&tid) {
                            groups.entry(aid).or_default().push(tid);
                        }
                    }
                }
                groups.into_iter().collect()
            }
            None => inner.playing.iter().map(|(&aid, p)| (aid, p.track_ids.clone())).collect(),
        };

        for (animation_id, tids) in affected {
            if let Some(p) = inner.playing.get_mut(&animation_id) {
                p.timing = p.timing.pause(now_ms).reset(now_ms);
            }

            let mut pending = 0usize;
            for tid in tids {
                let Some(track) = inner.track_store.find_track(tid) else { continue };
                let Some(target) = track.initial_position else { continue };
                if track.position.distance_to(target) <= SAME_POSITION_EPSILON {
                    continue;
                }
                inner.active_fades.insert(
                    tid,
                    ActiveFade {
                        track_id: tid,
                        from: track.position,
                        to: target,
                        start_ms: now_ms,
                        duration_ms,
                        easing: Easing::CubicOut,
                        group: Some((animation_id, FadeGroupAction::ResumePlayback)),
                    },
                );
                pending += 1;
            }

            if pending > 0 {
                inner.pending_fade_groups.insert(animation_id, pending);
            } else if let Some(p) = inner.playing.get_mut(&animation_id) {
                p.timing = p.timing.resume(now_ms);
            }
        }

        Ok(())
    }

    /// Safety button: stop everything without fade-out, then ease every
    /// track with a stored `initialPosition` back to it.
    pub fn return_all_to_initial(&self, duration_ms: u64, now_ms: u64) -> TransportResult<()> {
        let mut inner = self.inner.lock();
        inner.playing.clear();
        inner.state_store.clear();
        inner.pending_fade_groups.clear();
        inner.pending_play.clear();
        inner.osc_batch = OscBatch::default();
        inner.input_filter.clear_animating_tracks();

        for tid in inner.track_store.all_track_ids() {
            let Some(track) = inner.track_store.find_track(tid) else { continue };
            let Some(target) = track.initial_position else { continue };
            if track.position.distance_to(target) <= SAME_POSITION_EPSILON {
                continue;
            }
            inner.active_fades.insert(
                tid,
                ActiveFade {
                    track_id: tid,
                    from: track.position,
                    to: target,
                    start_ms: now_ms,
                    duration_ms,
                    easing: Easing::CubicOut,
                    group: None,
                },
            );
        }

        Ok(())
    }

    /// The UI tick (~`config.ui_tick_hz`): advances timing, drives
    /// playing animations through the model + strategy + transform
    /// chain, and writes positions back to the track store.
    pub fn tick_ui(&self, now_ms: u64, delta_time_secs: f64) -> TransportResult<()> {
        let tick_started = std::time::Instant::now();
        let mut inner = self.inner.lock();

        self.advance_fades(&mut inner, now_ms);

        let animation_ids: Vec<AnimationId> = inner.playing.keys().copied().collect();
        let mut to_stop = Vec::new();

        for animation_id in animation_ids {
            let Some(animation) = inner.animation_store.find_animation(animation_id) else {
                to_stop.push(animation_id);
                continue;
            };
            let playing = inner.playing.get(&animation_id).unwrap().clone();
            if playing.timing.is_paused {
                continue;
            }

            let result = calculate_animation_time(
                now_ms,
                animation.duration_secs,
                animation.r#loop,
                animation.ping_pong,
                animation.playback_speed,
                playing.timing,
            );

            if let Some(p) = inner.playing.get_mut(&animation_id) {
                p.timing = result.new_state;
            }

            if result.should_stop {
                to_stop.push(animation_id);
                continue;
            }

            let all_tracks: Vec<Track> = playing.track_ids.iter().filter_map(|&tid| inner.track_store.find_track(tid)).collect();
            let active = active_tracks(&all_tracks);
            let frame_count = inner.stats.frame_count();

            for track in active {
                if inner.active_fades.contains_key(&track.id) {
                    continue;
                }
                let position = self.compute_track_position(
                    &mut inner,
                    &animation,
                    &all_tracks,
                    track,
                    result.animation_time_secs,
                    delta_time_secs,
                    frame_count,
                )?;
                inner.track_store.set_position(track.id, position);
                inner.track_store.set_playback_state(track.id, true, result.animation_time_secs);
            }
        }

        for animation_id in to_stop {
            self.stop_one(&mut inner, animation_id, now_ms)?;
        }

        let playing_count = inner.playing.len();
        inner.stats.record_tick(tick_started.elapsed().as_secs_f64(), playing_count);
        Ok(())
    }

    /// The OSC tick (fixed `config.osc_tick_hz`): recomputes the same
    /// positions purely for emission and flushes one batch. Never
    /// mutates `TimingState` — that duplication with the UI tick is
    /// intentional (§4.6), decoupling wire latency from visual latency.
    pub fn tick_osc(&self, now_ms: u64) -> TransportResult<()> {
        let mut inner = self.inner.lock();
        let animation_ids: Vec<AnimationId> = inner.playing.keys().copied().collect();

        for animation_id in animation_ids {
            let Some(animation) = inner.animation_store.find_animation(animation_id) else {
                continue;
            };
            let Some(playing) = inner.playing.get(&animation_id).cloned() else {
                continue;
            };
            if playing.timing.is_paused {
                continue;
            }

            let result = calculate_animation_time(
                now_ms,
                animation.duration_secs,
                animation.r#loop,
                animation.ping_pong,
                animation.playback_speed,
                playing.timing,
            );

            let all_tracks: Vec<Track> = playing.track_ids.iter().filter_map(|&tid| inner.track_store.find_track(tid)).collect();
            let active = active_tracks(&all_tracks);

            for track in active {
                let Some(external_index) = track.external_index else {
                    continue;
                };
                let position = if inner.active_fades.contains_key(&track.id) {
                    track.position
                } else {
                    self.compute_track_position(&mut inner, &animation, &all_tracks, track, result.animation_time_secs, 0.0, 0)?
                };
                inner.osc_batch.push(OscEntry {
                    track_external_index: external_index,
                    position,
                    coordinate_system: animation.coordinate_system,
                });
            }
        }

        let batch = inner.osc_batch.take();
        inner.osc_sink.send(&batch);
        Ok(())
    }

    fn start_fade_in(&self, inner: &mut Inner<S, A, O, F>, animation: &Animation, track_ids: &[TrackId], now_ms: u64) -> TransportResult<()> {
        let all_tracks: Vec<Track> = track_ids.iter().filter_map(|&id| inner.track_store.find_track(id)).collect();
        let mut pending = 0usize;

        for track in &all_tracks {
            let target = self.compute_track_position(inner, animation, &all_tracks, track, 0.0, 0.0, 0)?;
            if track.position.distance_to(target) <= SAME_POSITION_EPSILON {
                continue;
            }
            inner.active_fades.insert(
                track.id,
                ActiveFade {
                    track_id: track.id,
                    from: track.position,
                    to: target,
                    start_ms: now_ms,
                    duration_ms: animation.fade_in.duration_ms,
                    easing: animation.fade_in.easing,
                    group: Some((animation.id, FadeGroupAction::StartPlayback)),
                },
            );
            pending += 1;
        }

        if pending == 0 {
            inner.playing.insert(animation.id, PlayingAnimation::new(animation.id, track_ids.to_vec(), now_ms));
        } else {
            inner.pending_fade_groups.insert(animation.id, pending);
            inner.pending_play.insert(animation.id, track_ids.to_vec());
        }
        Ok(())
    }

    fn stop_one(&self, inner: &mut Inner<S, A, O, F>, animation_id: AnimationId, now_ms: u64) -> TransportResult<()> {
        let Some(playing) = inner.playing.get(&animation_id) else {
            return Ok(());
        };
        let track_ids = playing.track_ids.clone();
        let animation = inner.animation_store.find_animation(animation_id);

        if let Some(animation) = &animation {
            if animation.fade_out.enabled && animation.fade_out.auto_trigger {
                let mut pending = 0usize;
                for &tid in &track_ids {
                    let Some(track) = inner.track_store.find_track(tid) else { continue };
                    let Some(initial) = track.initial_position else { continue };
                    if track.position.distance_to(initial) <= SAME_POSITION_EPSILON {
                        continue;
                    }
                    inner.active_fades.insert(
                        tid,
                        ActiveFade {
                            track_id: tid,
                            from: track.position,
                            to: initial,
                            start_ms: now_ms,
                            duration_ms: animation.fade_out.duration_ms,
                            easing: animation.fade_out.easing,
                            group: Some((animation_id, FadeGroupAction::RemoveAnimationState)),
                        },
                    );
                    pending += 1;
                }
                if pending > 0 {
                    inner.pending_fade_groups.insert(animation_id, pending);
                    return Ok(());
                }
            }
        }

        inner.playing.remove(&animation_id);
        inner.state_store.remove(&animation_id);
        Ok(())
    }

    fn advance_fades(&self, inner: &mut Inner<S, A, O, F>, now_ms: u64) {
        let fade_ids: Vec<TrackId> = inner.active_fades.keys().copied().collect();
        let mut completed_groups: Vec<(AnimationId, FadeGroupAction)> = Vec::new();

        for track_id in fade_ids {
            let fade = *inner.active_fades.get(&track_id).unwrap();
            let step = fade.step(now_ms);
            inner.track_store.set_position(track_id, step.position);

            let coordinate_system = fade
                .group
                .and_then(|(aid, _)| inner.animation_store.find_animation(aid))
                .map(|a| a.coordinate_system)
                .unwrap_or(CoordinateSystem::Xyz);
            if let Some(track) = inner.track_store.find_track(track_id) {
                if let Some(external_index) = track.external_index {
                    inner.osc_batch.push(OscEntry {
                        track_external_index: external_index,
                        position: step.position,
                        coordinate_system,
                    });
                }
            }

            if !step.complete {
                continue;
            }
            inner.active_fades.remove(&track_id);
            let Some((animation_id, action)) = fade.group else { continue };
            let Some(remaining) = inner.pending_fade_groups.get_mut(&animation_id) else { continue };
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                inner.pending_fade_groups.remove(&animation_id);
                completed_groups.push((animation_id, action));
            }
        }

        for (animation_id, action) in completed_groups {
            match action {
                FadeGroupAction::StartPlayback => {
                    if let Some(track_ids) = inner.pending_play.remove(&animation_id) {
                        inner.playing.insert(animation_id, PlayingAnimation::new(animation_id, track_ids, now_ms));
                    }
                }
                FadeGroupAction::ResumePlayback => {
                    if let Some(p) = inner.playing.get_mut(&animation_id) {
                        p.timing = p.timing.resume(now_ms);
                    }
                }
                FadeGroupAction::RemoveAnimationState => {
                    inner.playing.remove(&animation_id);
                    inner.state_store.remove(&animation_id);
                }
            }
        }
    }

    /// Run `params -> calculate -> strategy -> transform` for one track.
    /// A non-finite model output is logged once per (animation, track)
    /// and replaced by the last finite position this pair produced,
    /// rather than propagated to the wire (§7 ComputationAnomaly).
    fn compute_track_position(
        &self,
        inner: &mut Inner<S, A, O, F>,
        animation: &Animation,
        all_tracks: &[Track],
        track: &Track,
        animation_time_secs: f64,
        delta_time_secs: f64,
        frame_count: u64,
    ) -> TransportResult<Position> {
        let model = self
            .registry
            .require(&animation.model_type)
            .map_err(|e| TransportError::ModelNotFound(e.to_string()))?;

        let strategy = compute_strategy(animation, all_tracks, track);
        let track_time = get_track_time(animation_time_secs, strategy.phase_offset_secs);

        let scratch = inner.state_store.entry(animation.id).or_default();
        let mut calc_ctx = CalculationContext {
            track_id: track.id,
            track_index: strategy.transform_context.track_index,
            total_tracks: strategy.transform_context.total_tracks,
            delta_time_secs,
            frame_count,
            state: scratch,
        };

        let base = model.calculate(&strategy.effective_params, track_time, animation.duration_secs, &mut calc_ctx);
        let key = (animation.id, track.id);

        let resolved_base = if base.is_finite() {
            inner.last_known_good.insert(key, base);
            base
        } else {
            if inner.anomaly_logged.insert(key) {
                log::warn!(
                    "model {} produced a non-finite position for animation {:?} track {:?}; substituting last-known-good",
                    animation.model_type,
                    animation.id,
                    track.id
                );
            }
            inner.last_known_good.get(&key).copied().unwrap_or(Position::ORIGIN)
        };

        let rotation = model.rotation_angle(track_time, animation.duration_secs, &strategy.effective_params);
        Ok(apply_transform(resolved_base, &strategy.transform_context, rotation, self.config.world_envelope_bound()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sm_core::{AnimationId, CoordinateSystem, FadeSpec, ModelTypeId, MultiTrackMode, Position, TrackId};
    use std::collections::BTreeMap;
    use std::sync::Mutex as StdMutex;

    struct StubTrackStore {
        tracks: HashMap<TrackId, Track>,
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

    struct StubAnimationStore {
        animations: HashMap<AnimationId, Animation>,
    }

    impl AnimationStore for StubAnimationStore {
        fn find_animation(&self, id: AnimationId) -> Option<Animation> {
            self.animations.get(&id).cloned()
        }
    }

    #[derive(Default)]
    struct StubOscSink {
        flushes: StdMutex<Vec<usize>>,
    }

    impl OscSink for StubOscSink {
        fn send(&mut self, batch: &OscBatch) {
            self.flushes.lock().unwrap().push(batch.len());
        }
    }

    #[derive(Default)]
    struct StubInputFilter {
        cleared: bool,
    }

    impl OscInputFilter for StubInputFilter {
        fn clear_animating_tracks(&mut self) {
            self.cleared = true;
        }
    }

    fn linear_animation(id: u64, duration: f64) -> Animation {
        let mut parameters = sm_core::AnimationParameters::new();
        parameters.set("startPosition", sm_core::ParamValue::Position(Position::ORIGIN));
        parameters.set("endPosition", sm_core::ParamValue::Position(Position::new(10.0, 0.0, 0.0)));
        Animation {
            id: AnimationId::new(id),
            name: "test".to_string(),
            model_type: ModelTypeId::new("linear"),
            parameters,
            duration_secs: duration,
            r#loop: false,
            ping_pong: false,
            coordinate_system: CoordinateSystem::Xyz,
            multi_track_mode: MultiTrackMode::Relative,
            global_phase_offset_secs: 0.0,
            multi_track_parameters: BTreeMap::new(),
            locked_track_set: false,
            fade_in: FadeSpec::disabled(),
            fade_out: FadeSpec::disabled(),
            playback_speed: 1.0,
        }
    }

    fn build_transport() -> Transport<StubTrackStore, StubAnimationStore, StubOscSink, StubInputFilter> {
        let registry = Arc::new(sm_models::with_builtins());
        let mut tracks = HashMap::new();
        let mut track = Track::new(TrackId::new(1), Position::ORIGIN);
        track.external_index = Some(0);
        tracks.insert(TrackId::new(1), track);

        let mut animations = HashMap::new();
        animations.insert(AnimationId::new(1), linear_animation(1, 2.0));

        Transport::new(
            TransportConfig::default(),
            registry,
            StubTrackStore { tracks },
            StubAnimationStore { animations },
            StubOscSink::default(),
            StubInputFilter::default(),
        )
    }

    #[test]
    fn play_tick_stop_moves_track_and_then_removes_it() {
        let transport = build_transport();
        transport.play(AnimationId::new(1), vec![TrackId::new(1)], 0).unwrap();
        assert_eq!(transport.playing_count(), 1);

        for tick in 1..=5u64 {
            transport.tick_ui(tick * 200, 0.2).unwrap();
        }

        let moved = transport.inner.lock().track_store.find_track(TrackId::new(1)).unwrap();
        assert!(moved.position.x > 0.0);

        transport.stop(Some(AnimationId::new(1)), 1200).unwrap();
        assert_eq!(transport.playing_count(), 0);
    }

    #[test]
    fn tick_osc_flushes_a_batch_for_each_animating_track() {
        let transport = build_transport();
        transport.play(AnimationId::new(1), vec![TrackId::new(1)], 0).unwrap();
        transport.tick_osc(100).unwrap();

        let flushes = transport.inner.lock().osc_sink.flushes.lock().unwrap().clone();
        assert_eq!(flushes, vec![1]);
    }

    #[test]
    fn pause_then_play_resumes_rather_than_restarting() {
        let transport = build_transport();
        transport.play(AnimationId::new(1), vec![TrackId::new(1)], 0).unwrap();
        transport.tick_ui(500, 0.5).unwrap();
        transport.pause(Some(AnimationId::new(1)), 500);
        assert!(!transport.is_playing());

        transport.play(AnimationId::new(1), vec![TrackId::new(1)], 900).unwrap();
        assert!(transport.is_playing());
        assert_eq!(transport.playing_count(), 1);
    }

    #[test]
    fn stop_without_fade_out_removes_immediately() {
        let transport = build_transport();
        transport.play(AnimationId::new(1), vec![TrackId::new(1)], 0).unwrap();
        transport.stop_all(100).unwrap();
        assert_eq!(transport.playing_count(), 0);
        assert!(transport.inner.lock().input_filter.cleared);
    }
}
