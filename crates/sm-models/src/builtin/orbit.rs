//! Orbit: Keplerian-style circular/elliptical orbit with optional
//! inclination about the X axis.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position, RotationPlane};

fn angle_at(time: f64, revolutions_per_sec: f64, direction: &str) -> f64 {
    let sign = if direction == "ccw" { 1.0 } else { -1.0 };
    sign * 360.0 * revolutions_per_sec * time
}

pub struct OrbitModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for OrbitModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("orbit"),
                display_name: "Orbit".to_string(),
                version: "1.0.0".to_string(),
                category: "orbital".to_string(),
                tags: vec!["rotational".to_string(), "3d".to_string()],
                description: "Elliptical orbit with an inclined plane".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("focus", Position::ORIGIN),
                ParameterDefinition::scalar("semiMajorAxis", 4.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("eccentricity", 0.3).with_range(0.0, 0.95),
                ParameterDefinition::scalar("inclinationDeg", 15.0).with_range(-90.0, 90.0),
                ParameterDefinition::scalar("revolutionsPerSec", 0.15).with_range(-10.0, 10.0),
                ParameterDefinition::enumerant("direction", "cw", &["cw", "ccw"]),
            ],
        }
    }
}

impl Model for OrbitModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("focus", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("semiMajorAxis", ParamValue::Scalar(4.0));
        params.set("eccentricity", ParamValue::Scalar(0.3));
        params.set("inclinationDeg", ParamValue::Scalar(15.0));
        params.set("revolutionsPerSec", ParamValue::Scalar(0.15));
        params.set("direction", ParamValue::Enum("cw".to_string()));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, _duration: f64, _ctx: &mut CalculationContext) -> Position {
        let focus = params.position("focus", Position::ORIGIN);
        let a = params.scalar("semiMajorAxis", 4.0);
        let e = params.scalar("eccentricity", 0.3).clamp(0.0, 0.95);
        let inclination = params.scalar("inclinationDeg", 15.0);
        let rps = params.scalar("revolutionsPerSec", 0.15);
        let direction = params.enumerant("direction", "cw");

        let true_anomaly = angle_at(time, rps, direction).to_radians();
        let radius = a * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());
        let planar = Position::new(radius * true_anomaly.cos(), radius * true_anomaly.sin(), 0.0);
        focus + planar.rotate_xz(inclination)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new("focus", params.position("focus", Position::ORIGIN), ControlPointRole::Control)]
    }

    fn rotation_angle(&self, time: f64, _duration: f64, params: &AnimationParameters) -> Option<(f64, RotationPlane)> {
        let rps = params.scalar("revolutionsPerSec", 0.15);
        let direction = params.enumerant("direction", "cw");
        Some((angle_at(time, rps, direction), RotationPlane::Xy))
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
    fn radius_stays_within_apsis_bounds() {
        let model = OrbitModel::default();
        let mut params = AnimationParameters::new();
        params.set("semiMajorAxis", ParamValue::Scalar(4.0));
        params.set("eccentricity", ParamValue::Scalar(0.5));
        params.set("inclinationDeg", ParamValue::Scalar(0.0));

        let perihelion = 4.0 * (1.0 - 0.5);
        let aphelion = 4.0 * (1.0 + 0.5);

        let mut state = ModelState::new();
        for i in 0..40 {
            let p = model.calculate(&params, i as f64 * 0.3, 4.0, &mut ctx(&mut state));
            let radius = p.magnitude();
            assert!(radius >= perihelion - 1e-6 && radius <= aphelion + 1e-6);
        }
    }

    #[test]
    fn zero_inclination_stays_in_xy_plane() {
        let model = OrbitModel::default();
        let mut params = AnimationParameters::new();
        params.set("inclinationDeg", ParamValue::Scalar(0.0));

        let mut state = ModelState::new();
        let p = model.calculate(&params, 1.0, 4.0, &mut ctx(&mut state));
        assert!(p.z.abs() < 1e-9);
    }
}
