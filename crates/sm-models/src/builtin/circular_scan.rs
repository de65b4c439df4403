//! Circular-Scan: sweeps around a listener at a fixed radius, over an
//! angular range (rather than full revolutions like Circular).

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position, RotationPlane};

fn angle_at(time: f64, duration: f64, start_angle: f64, sweep_angle: f64, ping_pong_within: bool) -> f64 {
    let t = if duration > 0.0 { (time / duration).clamp(0.0, 1.0) } else { 1.0 };
    let shaped = if ping_pong_within {
        1.0 - (2.0 * t - 1.0).abs()
    } else {
        t
    };
    start_angle + sweep_angle * shaped
}

pub struct CircularScanModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for CircularScanModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("circularScan"),
                display_name: "Circular Scan".to_string(),
                version: "1.0.0".to_string(),
                category: "orbital".to_string(),
                tags: vec!["sweep".to_string()],
                description: "Angular sweep around a listener over a fixed angular range".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("listener", Position::ORIGIN),
                ParameterDefinition::scalar("radius", 3.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("startAngleDeg", -60.0).with_range(-360.0, 360.0),
                ParameterDefinition::scalar("sweepAngleDeg", 120.0).with_range(-720.0, 720.0),
                ParameterDefinition::boolean("pingPongWithinSweep", true),
            ],
        }
    }
}

impl Model for CircularScanModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("listener", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("radius", ParamValue::Scalar(3.0));
        params.set("startAngleDeg", ParamValue::Scalar(-60.0));
        params.set("sweepAngleDeg", ParamValue::Scalar(120.0));
        params.set("pingPongWithinSweep", ParamValue::Bool(true));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, _ctx: &mut CalculationContext) -> Position {
        let listener = params.position("listener", Position::ORIGIN);
        let radius = params.scalar("radius", 3.0);
        let start_angle = params.scalar("startAngleDeg", -60.0);
        let sweep = params.scalar("sweepAngleDeg", 120.0);
        let ping_pong = params.boolean("pingPongWithinSweep", true);

        let angle = angle_at(time, duration, start_angle, sweep, ping_pong).to_radians();
        listener + Position::new(radius * angle.cos(), radius * angle.sin(), 0.0)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new("listener", params.position("listener", Position::ORIGIN), ControlPointRole::Control)]
    }

    fn rotation_angle(&self, time: f64, duration: f64, params: &AnimationParameters) -> Option<(f64, RotationPlane)> {
        let start_angle = params.scalar("startAngleDeg", -60.0);
        let sweep = params.scalar("sweepAngleDeg", 120.0);
        let ping_pong = params.boolean("pingPongWithinSweep", true);
        Some((angle_at(time, duration, start_angle, sweep, ping_pong), RotationPlane::Xy))
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
    fn starts_and_returns_to_start_angle_with_ping_pong() {
        let model = CircularScanModel::default();
        let mut params = AnimationParameters::new();
        params.set("radius", ParamValue::Scalar(1.0));
        params.set("startAngleDeg", ParamValue::Scalar(0.0));
        params.set("sweepAngleDeg", ParamValue::Scalar(90.0));
        params.set("pingPongWithinSweep", ParamValue::Bool(true));

        let mut state = ModelState::new();
        let start = model.calculate(&params, 0.0, 4.0, &mut ctx(&mut state));
        let end = model.calculate(&params, 4.0, 4.0, &mut ctx(&mut state));
        assert_relative_eq!(start.x, end.x, epsilon = 1e-9);
        assert_relative_eq!(start.y, end.y, epsilon = 1e-9);
    }

    #[test]
    fn stays_on_the_fixed_radius() {
        let model = CircularScanModel::default();
        let mut params = AnimationParameters::new();
        params.set("radius", ParamValue::Scalar(2.5));

        let mut state = ModelState::new();
        for i in 0..20 {
            let p = model.calculate(&params, i as f64 * 0.2, 4.0, &mut ctx(&mut state));
            assert_relative_eq!(p.magnitude(), 2.5, epsilon = 1e-9);
        }
    }
}
