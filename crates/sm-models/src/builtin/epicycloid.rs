//! Epicycloid: a circle of radius `r` rolling around the outside of a
//! fixed circle of radius `R`, tracing a point on its rim.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};

pub struct EpicycloidModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for EpicycloidModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("epicycloid"),
                display_name: "Epicycloid".to_string(),
                version: "1.0.0".to_string(),
                category: "parametric".to_string(),
                tags: vec!["curve".to_string(), "closed".to_string()],
                description: "Point traced by a circle rolling around a fixed circle".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("center", Position::ORIGIN),
                ParameterDefinition::scalar("fixedRadius", 3.0).with_range(0.01, 1000.0),
                ParameterDefinition::scalar("rollingRadius", 1.0).with_range(0.01, 1000.0),
                ParameterDefinition::scalar("revolutionsPerSec", 0.1).with_range(-10.0, 10.0),
            ],
        }
    }
}

impl Model for EpicycloidModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("fixedRadius", ParamValue::Scalar(3.0));
        params.set("rollingRadius", ParamValue::Scalar(1.0));
        params.set("revolutionsPerSec", ParamValue::Scalar(0.1));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, _duration: f64, _ctx: &mut CalculationContext) -> Position {
        let center = params.position("center", Position::ORIGIN);
        let r_fixed = params.scalar("fixedRadius", 3.0).max(0.01);
        let r_roll = params.scalar("rollingRadius", 1.0).max(0.01);
        let rps = params.scalar("revolutionsPerSec", 0.1);

        let t = std::f64::consts::TAU * rps * time;
        let sum = r_fixed + r_roll;
        let ratio = sum / r_roll;
        let x = sum * t.cos() - r_roll * (ratio * t).cos();
        let y = sum * t.sin() - r_roll * (ratio * t).sin();
        center + Position::new(x, y, 0.0)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new("center", params.position("center", Position::ORIGIN), ControlPointRole::Control)]
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
    fn starts_at_expected_rim_point() {
        let model = EpicycloidModel::default();
        let mut params = AnimationParameters::new();
        params.set("fixedRadius", ParamValue::Scalar(3.0));
        params.set("rollingRadius", ParamValue::Scalar(1.0));

        let mut state = ModelState::new();
        let p = model.calculate(&params, 0.0, 4.0, &mut ctx(&mut state));
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn is_continuous_and_finite() {
        let model = EpicycloidModel::default();
        let params = model.default_parameters(None);
        let mut state = ModelState::new();
        for i in 0..100 {
            let p = model.calculate(&params, i as f64 * 0.1, 4.0, &mut ctx(&mut state));
            assert!(p.is_finite());
        }
    }
}
