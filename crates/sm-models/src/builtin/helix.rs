//! Helix: circular motion around an axis that itself translates.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};

pub struct HelixModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for HelixModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("helix"),
                display_name: "Helix".to_string(),
                version: "1.0.0".to_string(),
                category: "orbital".to_string(),
                tags: vec!["rotational".to_string(), "3d".to_string()],
                description: "Circular motion whose axis translates over the animation".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("axisStart", Position::new(0.0, 0.0, -2.0)),
                ParameterDefinition::position("axisEnd", Position::new(0.0, 0.0, 2.0)),
                ParameterDefinition::scalar("radius", 2.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("revolutionsPerSec", 0.5).with_range(-10.0, 10.0),
                ParameterDefinition::enumerant("direction", "cw", &["cw", "ccw"]),
            ],
        }
    }
}

impl Model for HelixModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        let base = track_position.unwrap_or(Position::ORIGIN);
        params.set("axisStart", ParamValue::Position(base + Position::new(0.0, 0.0, -2.0)));
        params.set("axisEnd", ParamValue::Position(base + Position::new(0.0, 0.0, 2.0)));
        params.set("radius", ParamValue::Scalar(2.0));
        params.set("revolutionsPerSec", ParamValue::Scalar(0.5));
        params.set("direction", ParamValue::Enum("cw".to_string()));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, _ctx: &mut CalculationContext) -> Position {
        let axis_start = params.position("axisStart", Position::new(0.0, 0.0, -2.0));
        let axis_end = params.position("axisEnd", Position::new(0.0, 0.0, 2.0));
        let radius = params.scalar("radius", 2.0);
        let rps = params.scalar("revolutionsPerSec", 0.5);
        let direction = params.enumerant("direction", "cw");
        let sign = if direction == "ccw" { 1.0 } else { -1.0 };

        let t = if duration > 0.0 { (time / duration).clamp(0.0, 1.0) } else { 1.0 };
        let along_axis = axis_start.lerp(axis_end, t);
        let angle = (sign * 360.0 * rps * time).to_radians();
        along_axis + Position::new(radius * angle.cos(), radius * angle.sin(), 0.0)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![
            ControlPoint::new(
                "axisStart",
                params.position("axisStart", Position::new(0.0, 0.0, -2.0)),
                ControlPointRole::Start,
            ),
            ControlPoint::new(
                "axisEnd",
                params.position("axisEnd", Position::new(0.0, 0.0, 2.0)),
                ControlPointRole::End,
            ),
        ]
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
    fn progresses_along_the_axis() {
        let model = HelixModel::default();
        let mut params = AnimationParameters::new();
        params.set("axisStart", ParamValue::Position(Position::new(0.0, 0.0, 0.0)));
        params.set("axisEnd", ParamValue::Position(Position::new(0.0, 0.0, 10.0)));
        params.set("radius", ParamValue::Scalar(1.0));

        let mut state = ModelState::new();
        let start = model.calculate(&params, 0.0, 4.0, &mut ctx(&mut state));
        let end = model.calculate(&params, 4.0, 4.0, &mut ctx(&mut state));
        assert_relative_eq!(start.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(end.z, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn radial_distance_from_axis_is_constant() {
        let model = HelixModel::default();
        let mut params = AnimationParameters::new();
        params.set("axisStart", ParamValue::Position(Position::new(0.0, 0.0, 0.0)));
        params.set("axisEnd", ParamValue::Position(Position::new(0.0, 0.0, 10.0)));
        params.set("radius", ParamValue::Scalar(3.0));

        let mut state = ModelState::new();
        for i in 0..10 {
            let p = model.calculate(&params, i as f64 * 0.2, 4.0, &mut ctx(&mut state));
            let radial = (p.x * p.x + p.y * p.y).sqrt();
            assert_relative_eq!(radial, 3.0, epsilon = 1e-9);
        }
    }
}
