//! Doppler: a fly-by segment between `pathStart` and `pathEnd`, intended
//! to exercise a Doppler-shifted OSC listener at the receiving end.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};

pub struct DopplerModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for DopplerModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("doppler"),
                display_name: "Doppler".to_string(),
                version: "1.0.0".to_string(),
                category: "basic".to_string(),
                tags: vec!["flyby".to_string()],
                description: "Constant-velocity fly-by segment".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("pathStart", Position::new(-8.0, 2.0, 0.0)),
                ParameterDefinition::position("pathEnd", Position::new(8.0, 2.0, 0.0)),
            ],
        }
    }
}

impl Model for DopplerModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        let base = track_position.unwrap_or(Position::ORIGIN);
        params.set("pathStart", ParamValue::Position(base + Position::new(-8.0, 2.0, 0.0)));
        params.set("pathEnd", ParamValue::Position(base + Position::new(8.0, 2.0, 0.0)));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, _ctx: &mut CalculationContext) -> Position {
        let start = params.position("pathStart", Position::new(-8.0, 2.0, 0.0));
        let end = params.position("pathEnd", Position::new(8.0, 2.0, 0.0));
        let t = if duration > 0.0 { (time / duration).clamp(0.0, 1.0) } else { 1.0 };
        start.lerp(end, t)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![
            ControlPoint::new("pathStart", params.position("pathStart", Position::new(-8.0, 2.0, 0.0)), ControlPointRole::Start),
            ControlPoint::new("pathEnd", params.position("pathEnd", Position::new(8.0, 2.0, 0.0)), ControlPointRole::End),
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
    fn travels_start_to_end() {
        let model = DopplerModel::default();
        let params = model.default_parameters(None);
        let mut state = ModelState::new();
        let start = model.calculate(&params, 0.0, 4.0, &mut ctx(&mut state));
        let end = model.calculate(&params, 4.0, 4.0, &mut ctx(&mut state));
        assert_relative_eq!(start.x, -8.0, epsilon = 1e-9);
        assert_relative_eq!(end.x, 8.0, epsilon = 1e-9);
    }
}
