//! Spiral: radius interpolates between start/end while angle accumulates.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position, RotationPlane};

fn progress(time: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        (time / duration).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

fn angle_at(time: f64, total_turns: f64, duration: f64, direction: &str) -> f64 {
    let sign = if direction == "ccw" { 1.0 } else { -1.0 };
    sign * 360.0 * total_turns * progress(time, duration)
}

pub struct SpiralModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for SpiralModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("spiral"),
                display_name: "Spiral".to_string(),
                version: "1.0.0".to_string(),
                category: "orbital".to_string(),
                tags: vec!["rotational".to_string()],
                description: "Radius interpolates while angle accumulates".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("center", Position::ORIGIN),
                ParameterDefinition::scalar("startRadius", 0.2).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("endRadius", 4.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("totalTurns", 3.0).with_range(0.0, 100.0),
                ParameterDefinition::enumerant("direction", "cw", &["cw", "ccw"]),
            ],
        }
    }
}

impl Model for SpiralModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("startRadius", ParamValue::Scalar(0.2));
        params.set("endRadius", ParamValue::Scalar(4.0));
        params.set("totalTurns", ParamValue::Scalar(3.0));
        params.set("direction", ParamValue::Enum("cw".to_string()));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, _ctx: &mut CalculationContext) -> Position {
        let center = params.position("center", Position::ORIGIN);
        let start_radius = params.scalar("startRadius", 0.2);
        let end_radius = params.scalar("endRadius", 4.0);
        let turns = params.scalar("totalTurns", 3.0);
        let direction = params.enumerant("direction", "cw");

        let t = progress(time, duration);
        let radius = start_radius + (end_radius - start_radius) * t;
        let angle = angle_at(time, turns, duration, direction).to_radians();
        center + Position::new(radius * angle.cos(), radius * angle.sin(), 0.0)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new("center", params.position("center", Position::ORIGIN), ControlPointRole::Control)]
    }

    fn rotation_angle(&self, time: f64, duration: f64, params: &AnimationParameters) -> Option<(f64, RotationPlane)> {
        let turns = params.scalar("totalTurns", 3.0);
        let direction = params.enumerant("direction", "cw");
        Some((angle_at(time, turns, duration, direction), RotationPlane::Xy))
    }
}
