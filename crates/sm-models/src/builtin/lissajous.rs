//! Lissajous: `p = centre + (Ax sin(ωx t + φx), Ay sin(ωy t), Az sin(ωz t))`.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ParamValue, ParameterDefinition, Position};

pub struct LissajousModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for LissajousModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("lissajous"),
                display_name: "Lissajous".to_string(),
                version: "1.0.0".to_string(),
                category: "parametric".to_string(),
                tags: vec!["curve".to_string()],
                description: "Independent sinusoidal motion on each axis".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("center", Position::ORIGIN),
                ParameterDefinition::scalar("amplitudeX", 2.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("amplitudeY", 2.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("amplitudeZ", 0.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("frequencyX", 3.0).with_range(0.0, 50.0),
                ParameterDefinition::scalar("frequencyY", 2.0).with_range(0.0, 50.0),
                ParameterDefinition::scalar("frequencyZ", 1.0).with_range(0.0, 50.0),
                ParameterDefinition::scalar("phaseX", 0.0).with_range(-360.0, 360.0),
            ],
        }
    }
}

impl Model for LissajousModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("amplitudeX", ParamValue::Scalar(2.0));
        params.set("amplitudeY", ParamValue::Scalar(2.0));
        params.set("amplitudeZ", ParamValue::Scalar(0.0));
        params.set("frequencyX", ParamValue::Scalar(3.0));
        params.set("frequencyY", ParamValue::Scalar(2.0));
        params.set("frequencyZ", ParamValue::Scalar(1.0));
        params.set("phaseX", ParamValue::Scalar(0.0));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, _duration: f64, _ctx: &mut CalculationContext) -> Position {
        let center = params.position("center", Position::ORIGIN);
        let ax = params.scalar("amplitudeX", 2.0);
        let ay = params.scalar("amplitudeY", 2.0);
        let az = params.scalar("amplitudeZ", 0.0);
        let wx = params.scalar("frequencyX", 3.0);
        let wy = params.scalar("frequencyY", 2.0);
        let wz = params.scalar("frequencyZ", 1.0);
        let phase_x = params.scalar("phaseX", 0.0).to_radians();
        let tau = std::f64::consts::TAU;

        center
            + Position::new(
                ax * (wx * tau * time + phase_x).sin(),
                ay * (wy * tau * time).sin(),
                az * (wz * tau * time).sin(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelState;
    use approx::assert_relative_eq;
    use sm_core::TrackId;

    fn ctx(state: &mut ModelState) -> CalculationContext<'_> {
        CalculationContext {
            track_id: TrackId::new(0),
            track_index: 0,
            total_tracks: 1,
            delta_time_secs: 1.0 / 60.0,
            frame_count: 0,
            state,
        }
    }

    #[test]
    fn bounded_by_amplitude() {
        let model = LissajousModel::default();
        let mut params = AnimationParameters::new();
        params.set("amplitudeX", ParamValue::Scalar(5.0));
        params.set("amplitudeY", ParamValue::Scalar(3.0));

        let mut state = ModelState::new();
        for i in 0..50 {
            let p = model.calculate(&params, i as f64 * 0.05, 4.0, &mut ctx(&mut state));
            assert!(p.x.abs() <= 5.0 + 1e-9);
            assert!(p.y.abs() <= 3.0 + 1e-9);
        }
    }

    #[test]
    fn zero_amplitude_collapses_to_center() {
        let model = LissajousModel::default();
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(Position::new(1.0, 2.0, 3.0)));
        params.set("amplitudeX", ParamValue::Scalar(0.0));
        params.set("amplitudeY", ParamValue::Scalar(0.0));
        params.set("amplitudeZ", ParamValue::Scalar(0.0));

        let mut state = ModelState::new();
        let p = model.calculate(&params, 1.23, 4.0, &mut ctx(&mut state));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 3.0);
    }
}
