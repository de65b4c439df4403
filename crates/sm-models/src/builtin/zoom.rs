//! Zoom: radial motion towards/away from `zoomCenter` with an easing curve.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, Easing, ParamValue, ParameterDefinition, Position};

fn ease_from_str(name: &str) -> Easing {
    match name {
        "quadratic" => Easing::QuadraticInOut,
        "cubic" => Easing::CubicInOut,
        "sinusoidal" => Easing::SinusoidalInOut,
        _ => Easing::Linear,
    }
}

pub struct ZoomModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for ZoomModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("zoom"),
                display_name: "Zoom".to_string(),
                version: "1.0.0".to_string(),
                category: "basic".to_string(),
                tags: vec!["radial".to_string()],
                description: "Eased radial motion towards or away from a centre".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("zoomCenter", Position::ORIGIN),
                ParameterDefinition::scalar("azimuthDeg", 0.0).with_range(-360.0, 360.0),
                ParameterDefinition::scalar("elevationDeg", 0.0).with_range(-90.0, 90.0),
                ParameterDefinition::scalar("startDistance", 8.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("endDistance", 0.5).with_range(0.0, 1000.0),
                ParameterDefinition::enumerant("ease", "cubic", &["linear", "quadratic", "cubic", "sinusoidal"]),
            ],
        }
    }
}

impl Model for ZoomModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("zoomCenter", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("azimuthDeg", ParamValue::Scalar(0.0));
        params.set("elevationDeg", ParamValue::Scalar(0.0));
        params.set("startDistance", ParamValue::Scalar(8.0));
        params.set("endDistance", ParamValue::Scalar(0.5));
        params.set("ease", ParamValue::Enum("cubic".to_string()));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, _ctx: &mut CalculationContext) -> Position {
        let center = params.position("zoomCenter", Position::ORIGIN);
        let azimuth = params.scalar("azimuthDeg", 0.0);
        let elevation = params.scalar("elevationDeg", 0.0);
        let start_distance = params.scalar("startDistance", 8.0);
        let end_distance = params.scalar("endDistance", 0.5);
        let ease = ease_from_str(params.enumerant("ease", "cubic"));

        let t = if duration > 0.0 { (time / duration).clamp(0.0, 1.0) } else { 1.0 };
        let distance = start_distance + (end_distance - start_distance) * ease.evaluate(t);
        center + Position::from_spherical(azimuth, elevation, distance)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new("zoomCenter", params.position("zoomCenter", Position::ORIGIN), ControlPointRole::Control)]
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
    fn endpoints_match_declared_distances() {
        let model = ZoomModel::default();
        let params = model.default_parameters(None);
        let mut state = ModelState::new();
        let start = model.calculate(&params, 0.0, 4.0, &mut ctx(&mut state));
        let end = model.calculate(&params, 4.0, 4.0, &mut ctx(&mut state));
        assert_relative_eq!(start.magnitude(), 8.0, epsilon = 1e-6);
        assert_relative_eq!(end.magnitude(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn distance_shrinks_monotonically_when_zooming_in() {
        let model = ZoomModel::default();
        let params = model.default_parameters(None);
        let mut state = ModelState::new();
        let mut prev = f64::MAX;
        for i in 0..=10 {
            let p = model.calculate(&params, i as f64 * 0.4, 4.0, &mut ctx(&mut state));
            assert!(p.magnitude() <= prev + 1e-9);
            prev = p.magnitude();
        }
    }
}
