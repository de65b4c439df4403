//! Attract-Repel (stateful): steering towards `targetPosition` with an
//! attraction strength and a repulsion radius, capped at `maxSpeed`.

use crate::model::{read_state, write_state, CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
struct SteeringState {
    position: Option<Position>,
}

pub struct AttractRepelModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for AttractRepelModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("attractRepel"),
                display_name: "Attract-Repel".to_string(),
                version: "1.0.0".to_string(),
                category: "physics".to_string(),
                tags: vec!["stateful".to_string(), "steering".to_string()],
                description: "Steers towards a target, repelled within a minimum radius".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: true,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("targetPosition", Position::new(4.0, 0.0, 0.0)),
                ParameterDefinition::scalar("attractionStrength", 2.0).with_range(0.0, 100.0),
                ParameterDefinition::scalar("repulsionRadius", 0.5).with_range(0.0, 100.0),
                ParameterDefinition::scalar("maxSpeed", 3.0).with_range(0.0, 1000.0),
            ],
        }
    }
}

impl Model for AttractRepelModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        let base = track_position.unwrap_or(Position::ORIGIN);
        params.set("targetPosition", ParamValue::Position(base + Position::new(4.0, 0.0, 0.0)));
        params.set("attractionStrength", ParamValue::Scalar(2.0));
        params.set("repulsionRadius", ParamValue::Scalar(0.5));
        params.set("maxSpeed", ParamValue::Scalar(3.0));
        params
    }

    fn calculate(&self, params: &AnimationParameters, _time: f64, _duration: f64, ctx: &mut CalculationContext) -> Position {
        let target = params.position("targetPosition", Position::new(4.0, 0.0, 0.0));
        let strength = params.scalar("attractionStrength", 2.0);
        let repulsion_radius = params.scalar("repulsionRadius", 0.5);
        let max_speed = params.scalar("maxSpeed", 3.0).max(0.0);

        let key = ctx.track_key("attract_repel");
        let mut state: SteeringState = read_state(ctx.state, &key);
        let current = state.position.unwrap_or(Position::ORIGIN);

        let to_target = target - current;
        let distance = to_target.magnitude();

        let steer = if distance < 1e-9 {
            Position::ORIGIN
        } else if distance < repulsion_radius {
            (to_target * (-1.0)) * (strength * (repulsion_radius - distance) / repulsion_radius.max(1e-9))
        } else {
            to_target * (strength / distance.max(1e-9))
        };

        let speed = steer.magnitude();
        let velocity = if speed > max_speed && speed > 1e-9 {
            steer * (max_speed / speed)
        } else {
            steer
        };

        let dt = ctx.delta_time_secs.max(0.0).min(0.1);
        let new_position = current + velocity * dt;
        state.position = Some(new_position);
        write_state(ctx.state, &key, &state);
        new_position
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new(
            "targetPosition",
            params.position("targetPosition", Position::new(4.0, 0.0, 0.0)),
            ControlPointRole::End,
        )]
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
    fn moves_towards_target_when_far_away() {
        let model = AttractRepelModel::default();
        let mut params = AnimationParameters::new();
        params.set("targetPosition", ParamValue::Position(Position::new(10.0, 0.0, 0.0)));
        params.set("repulsionRadius", ParamValue::Scalar(0.5));

        let mut state = ModelState::new();
        let mut last_distance = 10.0;
        for _ in 0..300 {
            let p = model.calculate(&params, 0.0, 0.0, &mut ctx(&mut state, 1.0 / 60.0));
            let distance = p.distance_to(Position::new(10.0, 0.0, 0.0));
            assert!(distance <= last_distance + 1e-9);
            last_distance = distance;
        }
    }

    #[test]
    fn never_exceeds_max_speed() {
        let model = AttractRepelModel::default();
        let mut params = AnimationParameters::new();
        params.set("targetPosition", ParamValue::Position(Position::new(100.0, 0.0, 0.0)));
        params.set("maxSpeed", ParamValue::Scalar(1.0));

        let mut state = ModelState::new();
        let mut previous = Position::ORIGIN;
        for _ in 0..60 {
            let p = model.calculate(&params, 0.0, 0.0, &mut ctx(&mut state, 1.0 / 60.0));
            let step_distance = p.distance_to(previous);
            assert!(step_distance <= 1.0 / 60.0 + 1e-6);
            previous = p;
        }
    }
}
