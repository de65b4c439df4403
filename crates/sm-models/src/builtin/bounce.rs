//! Bounce (stateful): vertical gravity with a coefficient of restitution;
//! `groundLevel` is the rebound floor (local Z axis).

use crate::model::{read_state, write_state, CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BounceState {
    height: f64,
    velocity: f64,
    initialized: bool,
}

impl Default for BounceState {
    fn default() -> Self {
        Self { height: 0.0, velocity: 0.0, initialized: false }
    }
}

pub struct BounceModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for BounceModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("bounce"),
                display_name: "Bounce".to_string(),
                version: "1.0.0".to_string(),
                category: "physics".to_string(),
                tags: vec!["stateful".to_string(), "physics".to_string()],
                description: "Vertical gravity with a coefficient of restitution".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: true,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("groundAnchor", Position::ORIGIN),
                ParameterDefinition::scalar("groundLevel", 0.0),
                ParameterDefinition::scalar("dropHeight", 3.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("gravity", 9.81).with_range(0.01, 100.0),
                ParameterDefinition::scalar("restitution", 0.7).with_range(0.0, 1.0),
            ],
        }
    }
}

impl Model for BounceModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("groundAnchor", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("groundLevel", ParamValue::Scalar(0.0));
        params.set("dropHeight", ParamValue::Scalar(3.0));
        params.set("gravity", ParamValue::Scalar(9.81));
        params.set("restitution", ParamValue::Scalar(0.7));
        params
    }

    fn calculate(&self, params: &AnimationParameters, _time: f64, _duration: f64, ctx: &mut CalculationContext) -> Position {
        let anchor = params.position("groundAnchor", Position::ORIGIN);
        let ground = params.scalar("groundLevel", 0.0);
        let drop_height = params.scalar("dropHeight", 3.0);
        let gravity = params.scalar("gravity", 9.81).max(0.01);
        let restitution = params.scalar("restitution", 0.7).clamp(0.0, 1.0);

        let key = ctx.track_key("bounce");
        let mut state: BounceState = read_state(ctx.state, &key);
        if !state.initialized {
            state = BounceState { height: ground + drop_height, velocity: 0.0, initialized: true };
        }

        let dt = ctx.delta_time_secs.max(0.0).min(0.1);
        state.velocity -= gravity * dt;
        state.height += state.velocity * dt;

        if state.height <= ground {
            state.height = ground;
            state.velocity = -state.velocity * restitution;
        }

        write_state(ctx.state, &key, &state);
        anchor + Position::new(0.0, 0.0, state.height - ground)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new(
            "groundAnchor",
            params.position("groundAnchor", Position::ORIGIN),
            ControlPointRole::Control,
        )]
    }
}
