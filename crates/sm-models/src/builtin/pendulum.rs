//! Pendulum (stateful): gravity/length/damping/mass, integrated step by
//! step using `context.deltaTime`. State holds `{theta, theta_dot}`.

use crate::model::{read_state, write_state, CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PendulumState {
    theta: f64,
    theta_dot: f64,
    initialized: bool,
}

impl Default for PendulumState {
    fn default() -> Self {
        Self { theta: 0.0, theta_dot: 0.0, initialized: false }
    }
}

pub struct PendulumModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for PendulumModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("pendulum"),
                display_name: "Pendulum".to_string(),
                version: "1.0.0".to_string(),
                category: "physics".to_string(),
                tags: vec!["stateful".to_string(), "physics".to_string()],
                description: "Gravity-driven pendulum integrated step by step".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: true,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("anchorPoint", Position::new(0.0, 0.0, 3.0)),
                ParameterDefinition::scalar("length", 2.0).with_range(0.01, 100.0),
                ParameterDefinition::scalar("gravity", 9.81).with_range(0.0, 100.0),
                ParameterDefinition::scalar("damping", 0.02).with_range(0.0, 10.0),
                ParameterDefinition::scalar("initialAngleDeg", 45.0).with_range(-180.0, 180.0),
            ],
        }
    }
}

impl Model for PendulumModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        let anchor = track_position.unwrap_or(Position::new(0.0, 0.0, 3.0));
        params.set("anchorPoint", ParamValue::Position(anchor));
        params.set("length", ParamValue::Scalar(2.0));
        params.set("gravity", ParamValue::Scalar(9.81));
        params.set("damping", ParamValue::Scalar(0.02));
        params.set("initialAngleDeg", ParamValue::Scalar(45.0));
        params
    }

    fn calculate(&self, params: &AnimationParameters, _time: f64, _duration: f64, ctx: &mut CalculationContext) -> Position {
        let anchor = params.position("anchorPoint", Position::new(0.0, 0.0, 3.0));
        let length = params.scalar("length", 2.0).max(0.01);
        let gravity = params.scalar("gravity", 9.81);
        let damping = params.scalar("damping", 0.02);
        let initial_angle = params.scalar("initialAngleDeg", 45.0).to_radians();

        let key = ctx.track_key("pendulum");
        let mut state: PendulumState = read_state(ctx.state, &key);
        if !state.initialized {
            state = PendulumState { theta: initial_angle, theta_dot: 0.0, initialized: true };
        }

        let dt = ctx.delta_time_secs.max(0.0).min(0.1);
        let angular_accel = -(gravity / length) * state.theta.sin() - damping * state.theta_dot;
        state.theta_dot += angular_accel * dt;
        state.theta += state.theta_dot * dt;

        write_state(ctx.state, &key, &state);

        anchor + Position::new(length * state.theta.sin(), 0.0, -length * state.theta.cos())
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new(
            "anchorPoint",
            params.position("anchorPoint", Position::new(0.0, 0.0, 3.0)),
            ControlPointRole::Control,
        )]
    }
}
