//! Wave: centre plus an amplitude vector times a selectable waveform.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ParamValue, ParameterDefinition, Position};

fn waveform(kind: &str, phase: f64) -> f64 {
    let p = phase.rem_euclid(1.0);
    match kind {
        "square" => {
            if p < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        "triangle" => 4.0 * (p - (p + 0.5).floor()).abs() - 1.0,
        "sawtooth" => 2.0 * (p - (p + 0.5).floor()),
        _ => (std::f64::consts::TAU * p).sin(),
    }
}

pub struct WaveModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for WaveModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("wave"),
                display_name: "Wave".to_string(),
                version: "1.0.0".to_string(),
                category: "oscillator".to_string(),
                tags: vec!["periodic".to_string()],
                description: "Centre plus an amplitude vector times a waveform".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("center", Position::ORIGIN),
                ParameterDefinition::scalar("amplitudeX", 0.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("amplitudeY", 2.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("amplitudeZ", 0.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("frequency", 0.5).with_range(0.0, 50.0),
                ParameterDefinition::enumerant("waveform", "sine", &["sine", "square", "triangle", "sawtooth"]),
            ],
        }
    }
}

impl Model for WaveModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("amplitudeX", ParamValue::Scalar(0.0));
        params.set("amplitudeY", ParamValue::Scalar(2.0));
        params.set("amplitudeZ", ParamValue::Scalar(0.0));
        params.set("frequency", ParamValue::Scalar(0.5));
        params.set("waveform", ParamValue::Enum("sine".to_string()));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, _duration: f64, _ctx: &mut CalculationContext) -> Position {
        let center = params.position("center", Position::ORIGIN);
        let amp = Position::new(
            params.scalar("amplitudeX", 0.0),
            params.scalar("amplitudeY", 2.0),
            params.scalar("amplitudeZ", 0.0),
        );
        let freq = params.scalar("frequency", 0.5);
        let kind = params.enumerant("waveform", "sine");
        let value = waveform(kind, freq * time);
        center + amp * value
    }
}
