//! The `Model` contract (§4.2): metadata plus a handful of pure
//! functions every animation model implements.

use sm_core::{AnimationParameters, ControlPoint, ParameterDefinition, Position, RotationPlane, TrackId};
use std::collections::HashMap;

/// Free-form per-animation scratchpad for stateful models, keyed by the
/// model itself (typically namespaced by track id so several tracks
/// driven by the same animation keep independent state). Owned by the
/// Transport (C5), never shared between different playing animations.
pub type ModelState = HashMap<String, serde_json::Value>;

/// Read typed state out of the scratchpad, falling back to `T::default()`
/// when absent or malformed rather than panicking — a stateful model
/// must never fail just because its state was dropped (e.g. after a stop).
pub fn read_state<T: serde::de::DeserializeOwned + Default>(state: &ModelState, key: &str) -> T {
    state.get(key).and_then(|v| serde_json::from_value(v.clone()).ok()).unwrap_or_default()
}

pub fn write_state<T: serde::Serialize>(state: &mut ModelState, key: &str, value: &T) {
    if let Ok(v) = serde_json::to_value(value) {
        state.insert(key.to_string(), v);
    }
}

/// Per-invocation context passed to [`Model::calculate`].
pub struct CalculationContext<'a> {
    pub track_id: TrackId,
    /// Index of this track within the animation's track set (0-based).
    pub track_index: usize,
    pub total_tracks: usize,
    pub delta_time_secs: f64,
    pub frame_count: u64,
    pub state: &'a mut ModelState,
}

impl<'a> CalculationContext<'a> {
    /// Namespaced key for this track's slice of the shared scratchpad.
    pub fn track_key(&self, suffix: &str) -> String {
        format!("track_{}_{}", self.track_id.0, suffix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Constant,
    Linear,
    Quadratic,
}

/// Subset of multi-track modes a model declares support for (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiTrackModeKind {
    Relative,
    BarycentricShared,
    BarycentricIsobarycentric,
    BarycentricCentered,
    BarycentricCustom,
}

pub const ALL_MULTI_TRACK_MODES: &[MultiTrackModeKind] = &[
    MultiTrackModeKind::Relative,
    MultiTrackModeKind::BarycentricShared,
    MultiTrackModeKind::BarycentricIsobarycentric,
    MultiTrackModeKind::BarycentricCentered,
    MultiTrackModeKind::BarycentricCustom,
];

#[derive(Debug, Clone)]
pub struct ModelMetadata {
    pub type_id: sm_core::ModelTypeId,
    pub display_name: String,
    pub version: String,
    pub category: String,
    pub tags: Vec<String>,
    pub description: String,
    pub author: Option<String>,
    pub complexity: Complexity,
    pub is_stateful: bool,
    /// Optional cache-key deriver for the performance hint in §4.2 ("a
    /// stateless model's output may be memoized by `(params, time)` once
    /// this closure collapses `params` to its cache-relevant digest"). A
    /// plain function pointer, not a boxed closure, so metadata stays
    /// `Clone` without capturing state (see the "closures embedded in
    /// JSON models" redesign note — models already avoid that shape for
    /// predicates, this keeps the same discipline for cache keys).
    pub cache_key: Option<fn(&AnimationParameters) -> String>,
}

/// `{ metadata, contract }` (§4.2). Implementors MUST NOT panic from
/// `calculate` — an internally inconsistent parameter set falls back to
/// the first control point it can identify, or the origin.
pub trait Model: Send + Sync {
    fn metadata(&self) -> &ModelMetadata;

    fn parameter_schema(&self) -> &[ParameterDefinition];

    /// Deterministic, side-effect-free. When `track_position` is given,
    /// position-valued defaults are anchored at it.
    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters;

    /// Deterministic given `(params, time, duration, ctx.state)`. `time`
    /// may lie outside `[0, duration]`; each model documents how it
    /// clamps, wraps, or extrapolates.
    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, ctx: &mut CalculationContext) -> Position;

    /// A polyline approximation for visualization only. MUST be
    /// continuous and, for deterministic models, agree with `calculate`
    /// at the sample points.
    fn generate_path(&self, params: &AnimationParameters, duration: f64, resolution: usize) -> Vec<Position> {
        let n = resolution.max(2);
        let mut state = ModelState::new();
        (0..n)
            .map(|i| {
                let t = duration * (i as f64) / ((n - 1) as f64);
                let mut ctx = CalculationContext {
                    track_id: TrackId::new(0),
                    track_index: 0,
                    total_tracks: 1,
                    delta_time_secs: 0.0,
                    frame_count: i as u64,
                    state: &mut state,
                };
                self.calculate(params, t, duration, &mut ctx)
            })
            .collect()
    }

    fn supported_multi_track_modes(&self) -> &'static [MultiTrackModeKind] {
        ALL_MULTI_TRACK_MODES
    }

    fn control_points(&self, _params: &AnimationParameters) -> Vec<ControlPoint> {
        Vec::new()
    }

    /// Present only on rotational models (circular, spiral, ...); used by
    /// the transform pipeline to rotate a barycentric `trackOffset`.
    fn rotation_angle(&self, _time: f64, _duration: f64, _params: &AnimationParameters) -> Option<(f64, RotationPlane)> {
        None
    }
}

/// Fallback position for a model that cannot identify any sensible
/// control point for its current (invalid) parameters (§4.2).
pub fn fallback_position(control_points: &[ControlPoint]) -> Position {
    control_points.first().map(|cp| cp.position).unwrap_or(Position::ORIGIN)
}
