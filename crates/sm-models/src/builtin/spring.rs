//! Spring (stateful): mass-spring-damper driven by `restPosition` and
//! `targetPosition`. State holds current position and velocity.

use crate::model::{read_state, write_state, CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
struct SpringState {
    position: Option<Position>,
    velocity: Position,
}

pub struct SpringModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for SpringModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("spring"),
                display_name: "Spring".to_string(),
                version: "1.0.0".to_string(),
                category: "physics".to_string(),
                tags: vec!["stateful".to_string(), "physics".to_string()],
                description: "Mass-spring-damper settling towards a target position".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: true,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("restPosition", Position::ORIGIN),
                ParameterDefinition::position("targetPosition", Position::new(3.0, 0.0, 0.0)),
                ParameterDefinition::scalar("stiffness", 8.0).with_range(0.01, 500.0),
                ParameterDefinition::scalar("damping", 2.0).with_range(0.0, 100.0),
                ParameterDefinition::scalar("mass", 1.0).with_range(0.01, 100.0),
            ],
        }
    }
}

impl Model for SpringModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        let rest = track_position.unwrap_or(Position::ORIGIN);
        params.set("restPosition", ParamValue::Position(rest));
        params.set("targetPosition", ParamValue::Position(rest + Position::new(3.0, 0.0, 0.0)));
        params.set("stiffness", ParamValue::Scalar(8.0));
        params.set("damping", ParamValue::Scalar(2.0));
        params.set("mass", ParamValue::Scalar(1.0));
        params
    }

    fn calculate(&self, params: &AnimationParameters, _time: f64, _duration: f64, ctx: &mut CalculationContext) -> Position {
        let rest = params.position("restPosition", Position::ORIGIN);
        let target = params.position("targetPosition", Position::new(3.0, 0.0, 0.0));
        let stiffness = params.scalar("stiffness", 8.0).max(0.01);
        let damping = params.scalar("damping", 2.0);
        let mass = params.scalar("mass", 1.0).max(0.01);

        let key = ctx.track_key("spring");
        let mut state: SpringState = read_state(ctx.state, &key);
        let current = state.position.unwrap_or(rest);

        let displacement = current - target;
        let accel = (displacement * -stiffness - state.velocity * damping) * (1.0 / mass);

        let dt = ctx.delta_time_secs.max(0.0).min(0.1);
        state.velocity = state.velocity + accel * dt;
        let new_position = current + state.velocity * dt;
        state.position = Some(new_position);

        write_state(ctx.state, &key, &state);
        new_position
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![
            ControlPoint::new("restPosition", params.position("restPosition", Position::ORIGIN), ControlPointRole::Start),
            ControlPoint::new(
                "targetPosition",
                params.position("targetPosition", Position::new(3.0, 0.0, 0.0)),
                ControlPointRole::End,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelState;
    use sm_core::TrackId;

    fn ctx(state: &mut ModelState, dt: f64) -> CalculationContext<'_> {
        CalculationContext {
            track_id: TrackId::new(0),
            track_index: 0,
            total_tracks: 1,
            delta_time_secs: dt,
            frame_count: 0,
            state,
        }
    }

    #[test]
    fn settles_towards_target_position() {
        let model = SpringModel::default();
        let mut params = AnimationParameters::new();
        params.set("restPosition", ParamValue::Position(Position::ORIGIN));
        params.set("targetPosition", ParamValue::Position(Position::new(5.0, 0.0, 0.0)));
        params.set("damping", ParamValue::Scalar(6.0));

        let mut state = ModelState::new();
        let mut last = Position::ORIGIN;
        for _ in 0..600 {
            last = model.calculate(&params, 0.0, 0.0, &mut ctx(&mut state, 1.0 / 60.0));
        }
        assert!((last.x - 5.0).abs() < 0.05);
    }

    #[test]
    fn undamped_spring_does_not_explode() {
        let model = SpringModel::default();
        let mut params = AnimationParameters::new();
        params.set("restPosition", ParamValue::Position(Position::ORIGIN));
        params.set("targetPosition", ParamValue::Position(Position::new(1.0, 0.0, 0.0)));
        params.set("damping", ParamValue::Scalar(0.0));
        params.set("stiffness", ParamValue::Scalar(4.0));

        let mut state = ModelState::new();
        for _ in 0..300 {
            let p = model.calculate(&params, 0.0, 0.0, &mut ctx(&mut state, 1.0 / 60.0));
            assert!(p.x.abs() < 10.0);
        }
    }
}
