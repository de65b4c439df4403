//! Custom (keyframe): an ordered sequence of `{time, position, easing}`
//! keyframes; `calculate` interpolates between the two straddling the
//! current time with the left keyframe's easing.

use crate::model::{fallback_position, CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, Easing, ParamValue, ParameterDefinition, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f64,
    pub position: Position,
    pub easing: Easing,
}

fn keyframes_from_params(params: &AnimationParameters) -> Vec<Keyframe> {
    match params.get("keyframes") {
        Some(ParamValue::Opaque(value)) => serde_json::from_value(value.clone()).unwrap_or_default(),
        _ => Vec::new(),
    }
}

pub struct CustomKeyframeModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for CustomKeyframeModel {
    fn default() -> Self {
        let mut schema = vec![ParameterDefinition::scalar("keyframeCount", 0.0)];
        schema[0].ui_hint = sm_core::UiHint::Text;
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("customKeyframe"),
                display_name: "Custom Keyframes".to_string(),
                version: "1.0.0".to_string(),
                category: "curve".to_string(),
                tags: vec!["keyframe".to_string()],
                description: "Interpolates between an arbitrary ordered sequence of keyframes".to_string(),
                author: None,
                complexity: Complexity::Linear,
                is_stateful: false,
                cache_key: None,
            },
            schema,
        }
    }
}

impl Model for CustomKeyframeModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        let start = track_position.unwrap_or(Position::ORIGIN);
        let keyframes = vec![
            Keyframe { time: 0.0, position: start, easing: Easing::Linear },
            Keyframe { time: 1.0, position: start + Position::new(2.0, 0.0, 0.0), easing: Easing::Linear },
        ];
        params.set("keyframes", ParamValue::Opaque(serde_json::to_value(&keyframes).unwrap_or_default()));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, _ctx: &mut CalculationContext) -> Position {
        let keyframes = keyframes_from_params(params);
        if keyframes.is_empty() {
            return fallback_position(&self.control_points(params));
        }
        if keyframes.len() == 1 {
            return keyframes[0].position;
        }

        let normalized_time = if duration > 0.0 { (time / duration).clamp(0.0, 1.0) } else { 1.0 };

        if normalized_time <= keyframes[0].time {
            return keyframes[0].position;
        }
        if normalized_time >= keyframes[keyframes.len() - 1].time {
            return keyframes[keyframes.len() - 1].position;
        }

        for window in keyframes.windows(2) {
            let (left, right) = (window[0], window[1]);
            if normalized_time >= left.time && normalized_time <= right.time {
                let span = (right.time - left.time).max(1e-9);
                let local_t = (normalized_time - left.time) / span;
                return left.position.lerp(right.position, left.easing.evaluate(local_t));
            }
        }

        keyframes[keyframes.len() - 1].position
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        let keyframes = keyframes_from_params(params);
        keyframes
            .iter()
            .enumerate()
            .map(|(i, kf)| {
                let role = if i == 0 {
                    ControlPointRole::Start
                } else if i == keyframes.len() - 1 {
                    ControlPointRole::End
                } else {
                    ControlPointRole::Control
                };
                let mut cp = ControlPoint::new(format!("keyframe{i}"), kf.position, role);
                cp.index = Some(i);
                cp
            })
            .collect()
    }
}
