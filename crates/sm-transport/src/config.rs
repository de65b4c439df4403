//! Transport configuration (§10.4): builder-style, no config-file loader —
//! the transport itself has no persistence concerns, but every field is
//! still serde-derived so a host can fold it into its own project file.

use serde::{Deserialize, Serialize};

/// Optional bounding box clamp applied by the transform pipeline's final
/// step (§4.4 step 3). Absent by default: only the finite-value check
/// applies then, not a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldEnvelope {
    /// Symmetric bound applied to every coordinate, in metres.
    pub bound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    pub ui_tick_hz: f64,
    pub osc_tick_hz: f64,
    pub world_envelope: Option<WorldEnvelope>,
    pub default_global_phase_offset_secs: f64,
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ui_tick_hz(mut self, hz: f64) -> Self {
        self.ui_tick_hz = hz;
        self
    }

    pub fn with_osc_tick_hz(mut self, hz: f64) -> Self {
        self.osc_tick_hz = hz;
        self
    }

    pub fn with_world_envelope(mut self, bound: f64) -> Self {
        self.world_envelope = Some(WorldEnvelope { bound });
        self
    }

    pub fn with_default_global_phase_offset_secs(mut self, secs: f64) -> Self {
        self.default_global_phase_offset_secs = secs;
        self
    }

    pub fn world_envelope_bound(&self) -> Option<f64> {
        self.world_envelope.map(|e| e.bound)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ui_tick_hz: 60.0,
            osc_tick_hz: 30.0,
            world_envelope: None,
            default_global_phase_offset_secs: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_rates() {
        let config = TransportConfig::default();
        assert_eq!(config.ui_tick_hz, 60.0);
        assert_eq!(config.osc_tick_hz, 30.0);
        assert_eq!(config.world_envelope_bound(), None);
    }

    #[test]
    fn builder_sets_world_envelope() {
        let config = TransportConfig::new().with_world_envelope(50.0);
        assert_eq!(config.world_envelope_bound(), Some(50.0));
    }
}
