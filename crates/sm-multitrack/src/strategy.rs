//! Multi-Track Strategy (C3, §4.3): given an animation and a track, shape
//! the parameters the model sees, the phase offset applied before it
//! runs, and a context record the transform pipeline (§4.4) consumes.

use sm_core::{Animation, AnimationParameters, BarycentricVariant, MultiTrackMode, Position, Track, TrackId};

/// `{ trackId, trackIndex, totalTracks, trackOffset?, isobarycenter?,
/// customCenter?, mode, variant }` (§4.3).
#[derive(Debug, Clone)]
pub struct TransformContext {
    pub track_id: TrackId,
    pub track_index: usize,
    pub total_tracks: usize,
    pub track_offset: Option<Position>,
    pub isobarycenter: Option<Position>,
    pub custom_center: Option<Position>,
    pub mode: MultiTrackMode,
}

impl TransformContext {
    pub fn is_barycentric(&self) -> bool {
        matches!(self.mode, MultiTrackMode::Barycentric(_))
    }
}

pub struct StrategyResult {
    pub effective_params: AnimationParameters,
    pub phase_offset_secs: f64,
    pub transform_context: TransformContext,
}

/// Mean position across `tracks`. `(0,0,0)` for an empty slice — callers
/// should not invoke isobarycentric mode with zero tracks, but this never
/// panics, matching the Model contract's no-panic discipline (§4.2).
fn centroid(tracks: &[&Track]) -> Position {
    if tracks.is_empty() {
        return Position::ORIGIN;
    }
    let sum = tracks.iter().fold(Position::ORIGIN, |acc, t| acc + t.position);
    sum * (1.0 / tracks.len() as f64)
}

/// Distribute `n` points on a sphere of radius `r` using the golden-angle
/// algorithm (§4.3); `i` is 0-based. Stable for a given `(n, i)`.
pub fn golden_angle_offset(radius: f64, i: usize, n: usize) -> Position {
    if n <= 1 {
        return Position::new(radius, 0.0, 0.0);
    }
    let golden_angle = (3.0 - 5.0_f64.sqrt()) * std::f64::consts::PI;
    let theta = i as f64 * golden_angle;
    let phi = (1.0 - 2.0 * i as f64 / (n - 1) as f64).clamp(-1.0, 1.0).acos();
    Position::new(radius * phi.sin() * theta.cos(), radius * phi.cos(), radius * phi.sin() * theta.sin())
}

/// Shape the per-track strategy result for `track`, which must be a
/// member of `all_tracks` (its index within `all_tracks` is used as
/// `trackIndex`). For isobarycentric mode, callers driving a rigid
/// formation must pass the track positions captured at play start —
/// this function itself is a pure snapshot, it does not remember
/// anything between calls (the "offsets locked once at play start"
/// invariant in §4.3 is the Transport's responsibility, not this
/// crate's).
pub fn compute_strategy(animation: &Animation, all_tracks: &[Track], track: &Track) -> StrategyResult {
    let track_index = all_tracks.iter().position(|t| t.id == track.id).unwrap_or(0);
    let total_tracks = all_tracks.len();
    let refs: Vec<&Track> = all_tracks.iter().collect();

    match &animation.multi_track_mode {
        MultiTrackMode::Relative => {
            let effective_params = animation
                .multi_track_parameters
                .get(&track.id)
                .cloned()
                .unwrap_or_else(|| animation.parameters.clone());
            StrategyResult {
                effective_params,
                phase_offset_secs: track_index as f64 * animation.global_phase_offset_secs,
                transform_context: TransformContext {
                    track_id: track.id,
                    track_index,
                    total_tracks,
                    track_offset: Some(track.position),
                    isobarycenter: None,
                    custom_center: None,
                    mode: animation.multi_track_mode.clone(),
                },
            }
        }
        MultiTrackMode::Barycentric(variant) => {
            let phase_offset_secs = match variant {
                BarycentricVariant::Isobarycentric => 0.0,
                _ => track_index as f64 * animation.global_phase_offset_secs,
            };

            let (track_offset, isobarycenter, custom_center) = match variant {
                BarycentricVariant::Shared => (None, None, None),
                BarycentricVariant::Isobarycentric => {
                    let center = centroid(&refs);
                    (Some(track.position - center), Some(center), None)
                }
                BarycentricVariant::Centered { center } => (Some(track.position - *center), None, Some(*center)),
                BarycentricVariant::Custom { center, radius } => match radius.unwrap_or(5.0) {
                    r if r == 0.0 => (None, None, Some(*center)),
                    r => (Some(golden_angle_offset(r, track_index, total_tracks.max(1))), None, Some(*center)),
                },
            };

            StrategyResult {
                effective_params: animation.parameters.clone(),
                phase_offset_secs,
                transform_context: TransformContext {
                    track_id: track.id,
                    track_index,
                    total_tracks,
                    track_offset,
                    isobarycenter,
                    custom_center,
                    mode: animation.multi_track_mode.clone(),
                },
            }
        }
    }
}

/// The single application point for per-track phase offset (§4.4): the
/// animation clock every track's model sees is the shared animation
/// time plus that track's own offset.
pub fn get_track_time(animation_time: f64, phase_offset_secs: f64) -> f64 {
    animation_time + phase_offset_secs
}
