//! Animation: a named, typed, parameterised motion recipe.

use crate::{AnimationParameters, CoreError, CoreResult, Easing, Position, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Identifies a registered [`Model`](sm_models) implementation. A plain
/// string rather than an enum: the registry (C1) can accept new model
/// types at runtime, so the core cannot enumerate them at compile time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModelTypeId(pub String);

impl ModelTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ModelTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSystem {
    Xyz,
    Polar,
}

/// The two multi-track modes (§3), with barycentric's four variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MultiTrackMode {
    Relative,
    Barycentric(BarycentricVariant),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BarycentricVariant {
    Shared,
    Isobarycentric,
    Centered { center: Position },
    Custom { center: Position, radius: Option<f64> },
}

impl MultiTrackMode {
    /// Migrate a legacy six-mode system name to the current two-mode
    /// system (§4.3). Total and case-sensitive; unknown names return
    /// `None` rather than a guessed default (§10.6).
    pub fn migrate_legacy(name: &str) -> Option<MultiTrackMode> {
        match name {
            "identical" | "phase-offset" => Some(MultiTrackMode::Barycentric(BarycentricVariant::Shared)),
            "centered" => Some(MultiTrackMode::Barycentric(BarycentricVariant::Centered {
                center: Position::ORIGIN,
            })),
            "isobarycenter" | "formation" => Some(MultiTrackMode::Barycentric(BarycentricVariant::Isobarycentric)),
            "position-relative" | "phase-offset-relative" | "per-track" | "relative" => {
                Some(MultiTrackMode::Relative)
            }
            _ => None,
        }
    }
}

/// A fade-in or fade-out sub-animation spec (§3, §4.6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeSpec {
    pub enabled: bool,
    pub auto_trigger: bool,
    pub duration_ms: u64,
    pub easing: Easing,
    /// Override target position; for fade-in this defaults to the
    /// animation's t=0 position, for fade-out to the track's
    /// `initial_position`.
    pub to_position: Option<Position>,
}

impl FadeSpec {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            auto_trigger: false,
            duration_ms: 0,
            easing: Easing::CubicOut,
            to_position: None,
        }
    }
}

impl Default for FadeSpec {
    fn default() -> Self {
        Self::disabled()
    }
}

/// A named, typed, parameterised motion recipe with a duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub id: AnimationId,
    pub name: String,
    pub model_type: ModelTypeId,
    pub parameters: AnimationParameters,
    pub duration_secs: f64,
    pub r#loop: bool,
    pub ping_pong: bool,
    pub coordinate_system: CoordinateSystem,
    pub multi_track_mode: MultiTrackMode,
    /// Seconds of phase delay applied per track index (§4.3).
    pub global_phase_offset_secs: f64,
    /// Per-track parameter overrides, used only in relative mode.
    pub multi_track_parameters: BTreeMap<TrackId, AnimationParameters>,
    /// When set, external schedulers must not reassign this animation's
    /// track set.
    pub locked_track_set: bool,
    pub fade_in: FadeSpec,
    pub fade_out: FadeSpec,
    pub playback_speed: f64,
}

impl Animation {
    /// Validate the invariants from §3: duration > 0; ping-pong requires loop.
    pub fn validate(&self) -> CoreResult<()> {
        if self.duration_secs <= 0.0 {
            return Err(CoreError::NonPositiveDuration(self.duration_secs));
        }
        if self.ping_pong && !self.r#loop {
            return Err(CoreError::PingPongRequiresLoop);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_animation() -> Animation {
        Animation {
            id: AnimationId::new(1),
            name: "test".to_string(),
            model_type: ModelTypeId::new("linear"),
            parameters: AnimationParameters::new(),
            duration_secs: 2.0,
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

    #[test]
    fn rejects_non_positive_duration() {
        let mut a = base_animation();
        a.duration_secs = 0.0;
        assert!(a.validate().is_err());
    }

    #[test]
    fn rejects_ping_pong_without_loop() {
        let mut a = base_animation();
        a.ping_pong = true;
        a.r#loop = false;
        assert!(a.validate().is_err());
    }

    #[test]
    fn accepts_ping_pong_with_loop() {
        let mut a = base_animation();
        a.ping_pong = true;
        a.r#loop = true;
        assert!(a.validate().is_ok());
    }

    #[test]
    fn migrate_legacy_modes() {
        assert_eq!(
            MultiTrackMode::migrate_legacy("identical"),
            Some(MultiTrackMode::Barycentric(BarycentricVariant::Shared))
        );
        assert_eq!(
            MultiTrackMode::migrate_legacy("isobarycenter"),
            Some(MultiTrackMode::Barycentric(BarycentricVariant::Isobarycentric))
        );
        assert_eq!(MultiTrackMode::migrate_legacy("relative"), Some(MultiTrackMode::Relative));
        assert_eq!(MultiTrackMode::migrate_legacy("nonsense"), None);
    }
}
