//! Elliptical: like Circular but with independent X/Y radii.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position, RotationPlane};

fn angle_at(time: f64, revolutions_per_sec: f64, direction: &str) -> f64 {
    let sign = if direction == "ccw" { 1.0 } else { -1.0 };
    sign * 360.0 * revolutions_per_sec * time
}

pub struct EllipticalModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for EllipticalModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("elliptical"),
                display_name: "Elliptical".to_string(),
                version: "1.0.0".to_string(),
                category: "orbital".to_string(),
                tags: vec!["rotational".to_string(), "planar".to_string()],
                description: "Constant angular-rate motion around an ellipse".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("center", Position::ORIGIN),
                ParameterDefinition::scalar("radiusX", 3.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("radiusY", 1.5).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("revolutionsPerSec", 0.25).with_range(-10.0, 10.0),
                ParameterDefinition::enumerant("direction", "cw", &["cw", "ccw"]),
                ParameterDefinition::scalar("rotationZ", 0.0).with_range(-360.0, 360.0),
            ],
        }
    }
}

impl Model for EllipticalModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("radiusX", ParamValue::Scalar(3.0));
        params.set("radiusY", ParamValue::Scalar(1.5));
        params.set("revolutionsPerSec", ParamValue::Scalar(0.25));
        params.set("direction", ParamValue::Enum("cw".to_string()));
        params.set("rotationZ", ParamValue::Scalar(0.0));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, _duration: f64, _ctx: &mut CalculationContext) -> Position {
        let center = params.position("center", Position::ORIGIN);
        let rx = params.scalar("radiusX", 3.0);
        let ry = params.scalar("radiusY", 1.5);
        let rps = params.scalar("revolutionsPerSec", 0.25);
        let direction = params.enumerant("direction", "cw");
        let rotation_z = params.scalar("rotationZ", 0.0);

        let angle = angle_at(time, rps, direction).to_radians();
        let local = Position::new(rx * angle.cos(), ry * angle.sin(), 0.0);
        center + local.rotate_xy(rotation_z)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new("center", params.position("center", Position::ORIGIN), ControlPointRole::Control)]
    }

    fn rotation_angle(&self, time: f64, _duration: f64, params: &AnimationParameters) -> Option<(f64, RotationPlane)> {
        let rps = params.scalar("revolutionsPerSec", 0.25);
        let direction = params.enumerant("direction", "cw");
        Some((angle_at(time, rps, direction), RotationPlane::Xy))
    }
}
