//! Circular: constant-angular-rate motion around a centre, in a plane
//! optionally tilted by a 3D rotation.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position, RotationPlane};

fn angle_at(time: f64, revolutions_per_sec: f64, direction: &str) -> f64 {
    let sign = if direction == "ccw" { 1.0 } else { -1.0 };
    sign * 360.0 * revolutions_per_sec * time
}

fn planar_point(center: Position, radius: f64, angle_deg: f64, tilt: (f64, f64, f64)) -> Position {
    let mut p = Position::new(radius * angle_deg.to_radians().cos(), radius * angle_deg.to_radians().sin(), 0.0);
    if tilt.0 != 0.0 {
        p = p.rotate_yz(tilt.0);
    }
    if tilt.1 != 0.0 {
        p = p.rotate_xz(tilt.1);
    }
    if tilt.2 != 0.0 {
        p = p.rotate_xy(tilt.2);
    }
    center + p
}

pub struct CircularModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for CircularModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("circular"),
                display_name: "Circular".to_string(),
                version: "1.0.0".to_string(),
                category: "orbital".to_string(),
                tags: vec!["rotational".to_string(), "planar".to_string()],
                description: "Constant angular-rate motion around a centre".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("center", Position::ORIGIN),
                ParameterDefinition::scalar("radius", 2.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("revolutionsPerSec", 0.25).with_range(-10.0, 10.0),
                ParameterDefinition::enumerant("direction", "cw", &["cw", "ccw"]),
                ParameterDefinition::scalar("rotationX", 0.0).with_range(-360.0, 360.0),
                ParameterDefinition::scalar("rotationY", 0.0).with_range(-360.0, 360.0),
                ParameterDefinition::scalar("rotationZ", 0.0).with_range(-360.0, 360.0),
            ],
        }
    }
}

impl Model for CircularModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("radius", ParamValue::Scalar(2.0));
        params.set("revolutionsPerSec", ParamValue::Scalar(0.25));
        params.set("direction", ParamValue::Enum("cw".to_string()));
        params.set("rotationX", ParamValue::Scalar(0.0));
        params.set("rotationY", ParamValue::Scalar(0.0));
        params.set("rotationZ", ParamValue::Scalar(0.0));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, _duration: f64, _ctx: &mut CalculationContext) -> Position {
        let center = params.position("center", Position::ORIGIN);
        let radius = params.scalar("radius", 2.0);
        let rps = params.scalar("revolutionsPerSec", 0.25);
        let direction = params.enumerant("direction", "cw");
        let tilt = (
            params.scalar("rotationX", 0.0),
            params.scalar("rotationY", 0.0),
            params.scalar("rotationZ", 0.0),
        );
        let angle = angle_at(time, rps, direction);
        planar_point(center, radius, angle, tilt)
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
    fn stays_on_circle_at_constant_radius() {
        let model = CircularModel::default();
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(Position::ORIGIN));
        params.set("radius", ParamValue::Scalar(3.0));
        params.set("revolutionsPerSec", ParamValue::Scalar(0.5));

        let mut state = ModelState::new();
        for i in 0..20 {
            let p = model.calculate(&params, i as f64 * 0.1, 4.0, &mut ctx(&mut state));
            assert_relative_eq!(p.magnitude(), 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn direction_flips_angular_sign() {
        let model = CircularModel::default();
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(Position::ORIGIN));
        params.set("radius", ParamValue::Scalar(1.0));
        params.set("revolutionsPerSec", ParamValue::Scalar(0.25));

        let mut state = ModelState::new();
        params.set("direction", ParamValue::Enum("cw".to_string()));
        let cw = model.calculate(&params, 0.5, 4.0, &mut ctx(&mut state));
        params.set("direction", ParamValue::Enum("ccw".to_string()));
        let ccw = model.calculate(&params, 0.5, 4.0, &mut ctx(&mut state));

        assert_relative_eq!(cw.y, -ccw.y, epsilon = 1e-9);
    }

    #[test]
    fn rotation_angle_matches_position_angle() {
        let model = CircularModel::default();
        let mut params = AnimationParameters::new();
        params.set("revolutionsPerSec", ParamValue::Scalar(1.0));
        let (angle, plane) = model.rotation_angle(0.25, 4.0, &params).unwrap();
        assert_eq!(plane, RotationPlane::Xy);
        assert_relative_eq!(angle, -90.0, epsilon = 1e-9);
    }
}
