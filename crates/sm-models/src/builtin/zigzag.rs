//! Zigzag: piecewise-linear between two endpoints with N segments and a
//! perpendicular amplitude.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};

fn perpendicular_xy(axis: Position) -> Position {
    let len = (axis.x * axis.x + axis.y * axis.y).sqrt();
    if len < 1e-9 {
        Position::new(0.0, 1.0, 0.0)
    } else {
        Position::new(-axis.y / len, axis.x / len, 0.0)
    }
}

pub struct ZigzagModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for ZigzagModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("zigzag"),
                display_name: "Zigzag".to_string(),
                version: "1.0.0".to_string(),
                category: "basic".to_string(),
                tags: vec!["segment".to_string()],
                description: "Piecewise-linear path with perpendicular zigzag amplitude".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("zigzagStart", Position::ORIGIN),
                ParameterDefinition::position("zigzagEnd", Position::new(8.0, 0.0, 0.0)),
                ParameterDefinition::scalar("segments", 6.0).with_range(1.0, 200.0),
                ParameterDefinition::scalar("amplitude", 1.0).with_range(0.0, 1000.0),
            ],
        }
    }
}

impl Model for ZigzagModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        let start = track_position.unwrap_or(Position::ORIGIN);
        params.set("zigzagStart", ParamValue::Position(start));
        params.set("zigzagEnd", ParamValue::Position(start + Position::new(8.0, 0.0, 0.0)));
        params.set("segments", ParamValue::Scalar(6.0));
        params.set("amplitude", ParamValue::Scalar(1.0));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, _ctx: &mut CalculationContext) -> Position {
        let start = params.position("zigzagStart", Position::ORIGIN);
        let end = params.position("zigzagEnd", Position::new(8.0, 0.0, 0.0));
        let segments = params.scalar("segments", 6.0).max(1.0);
        let amplitude = params.scalar("amplitude", 1.0);

        let t = if duration > 0.0 { (time / duration).clamp(0.0, 1.0) } else { 1.0 };
        let along = start.lerp(end, t);
        let perp = perpendicular_xy(end - start);

        let scaled = t * segments;
        let within_segment = scaled.fract();
        let triangle = 1.0 - 4.0 * (within_segment - 0.5).abs();
        along + perp * (amplitude * triangle)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![
            ControlPoint::new("zigzagStart", params.position("zigzagStart", Position::ORIGIN), ControlPointRole::Start),
            ControlPoint::new(
                "zigzagEnd",
                params.position("zigzagEnd", Position::new(8.0, 0.0, 0.0)),
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
    fn endpoints_have_zero_perpendicular_offset() {
        let model = ZigzagModel::default();
        let params = model.default_parameters(None);
        let mut state = ModelState::new();
        let start = model.calculate(&params, 0.0, 4.0, &mut ctx(&mut state));
        assert_relative_eq!(start.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn stays_within_amplitude_bound() {
        let model = ZigzagModel::default();
        let mut params = AnimationParameters::new();
        params.set("zigzagStart", ParamValue::Position(Position::ORIGIN));
        params.set("zigzagEnd", ParamValue::Position(Position::new(10.0, 0.0, 0.0)));
        params.set("amplitude", ParamValue::Scalar(2.0));
        params.set("segments", ParamValue::Scalar(5.0));

        let mut state = ModelState::new();
        for i in 0..40 {
            let p = model.calculate(&params, i as f64 * 0.1, 4.0, &mut ctx(&mut state));
            assert!(p.y.abs() <= 2.0 + 1e-9);
        }
    }
}
