//! Rose Curve: `r = amplitude * cos(k * theta)`, a closed-form planar curve.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};

pub struct RoseCurveModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for RoseCurveModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("roseCurve"),
                display_name: "Rose Curve".to_string(),
                version: "1.0.0".to_string(),
                category: "parametric".to_string(),
                tags: vec!["curve".to_string(), "closed".to_string()],
                description: "Closed-form polar rose r = amplitude * cos(k * theta)".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("center", Position::ORIGIN),
                ParameterDefinition::scalar("amplitude", 3.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("petals", 5.0).with_range(1.0, 50.0),
                ParameterDefinition::scalar("revolutionsPerSec", 0.1).with_range(-10.0, 10.0),
            ],
        }
    }
}

impl Model for RoseCurveModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("amplitude", ParamValue::Scalar(3.0));
        params.set("petals", ParamValue::Scalar(5.0));
        params.set("revolutionsPerSec", ParamValue::Scalar(0.1));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, _duration: f64, _ctx: &mut CalculationContext) -> Position {
        let center = params.position("center", Position::ORIGIN);
        let amplitude = params.scalar("amplitude", 3.0);
        let k = params.scalar("petals", 5.0);
        let rps = params.scalar("revolutionsPerSec", 0.1);

        let theta = std::f64::consts::TAU * rps * time;
        let r = amplitude * (k * theta).cos();
        center + Position::new(r * theta.cos(), r * theta.sin(), 0.0)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new("center", params.position("center", Position::ORIGIN), ControlPointRole::Control)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelState;
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
        let model = RoseCurveModel::default();
        let mut params = AnimationParameters::new();
        params.set("amplitude", ParamValue::Scalar(4.0));
        params.set("petals", ParamValue::Scalar(3.0));

        let mut state = ModelState::new();
        for i in 0..80 {
            let p = model.calculate(&params, i as f64 * 0.2, 4.0, &mut ctx(&mut state));
            assert!(p.magnitude() <= 4.0 + 1e-9);
        }
    }

    #[test]
    fn returns_to_center_region_periodically() {
        let model = RoseCurveModel::default();
        let mut params = AnimationParameters::new();
        params.set("amplitude", ParamValue::Scalar(4.0));
        params.set("petals", ParamValue::Scalar(4.0));

        let mut state = ModelState::new();
        let mut saw_small_radius = false;
        for i in 0..200 {
            let p = model.calculate(&params, i as f64 * 0.05, 4.0, &mut ctx(&mut state));
            if p.magnitude() < 0.1 {
                saw_small_radius = true;
            }
        }
        assert!(saw_small_radius);
    }
}
