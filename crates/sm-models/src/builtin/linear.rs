//! Linear: easing-interpolated segment between two fixed positions.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{
    AnimationParameters, ControlPoint, ControlPointRole, Easing, ParamValue, ParameterDefinition, Position,
};

fn ease_from_str(name: &str) -> Easing {
    match name {
        "quadratic" => Easing::QuadraticInOut,
        "cubic" => Easing::CubicInOut,
        "sinusoidal" => Easing::SinusoidalInOut,
        "exponentialIn" => Easing::ExponentialIn,
        "exponentialOut" => Easing::ExponentialOut,
        "exponentialInOut" => Easing::ExponentialInOut,
        _ => Easing::Linear,
    }
}

pub struct LinearModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for LinearModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("linear"),
                display_name: "Linear".to_string(),
                version: "1.0.0".to_string(),
                category: "basic".to_string(),
                tags: vec!["segment".to_string(), "easing".to_string()],
                description: "Eased interpolation between a start and end position".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("startPosition", Position::ORIGIN),
                ParameterDefinition::position("endPosition", Position::new(1.0, 0.0, 0.0)),
                ParameterDefinition::enumerant(
                    "ease",
                    "linear",
                    &["linear", "quadratic", "cubic", "sinusoidal", "exponentialIn", "exponentialOut", "exponentialInOut"],
                ),
            ],
        }
    }
}

impl Model for LinearModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        let start = track_position.unwrap_or(Position::ORIGIN);
        params.set("startPosition", ParamValue::Position(start));
        params.set("endPosition", ParamValue::Position(start + Position::new(4.0, 0.0, 0.0)));
        params.set("ease", ParamValue::Enum("linear".to_string()));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, _ctx: &mut CalculationContext) -> Position {
        let start = params.position("startPosition", Position::ORIGIN);
        let end = params.position("endPosition", Position::new(1.0, 0.0, 0.0));
        let ease = ease_from_str(params.enumerant("ease", "linear"));

        let progress = if duration > 0.0 { (time / duration).clamp(0.0, 1.0) } else { 1.0 };
        start.lerp(end, ease.evaluate(progress))
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        let start = params.position("startPosition", Position::ORIGIN);
        let end = params.position("endPosition", Position::new(1.0, 0.0, 0.0));
        vec![
            ControlPoint::new("start", start, ControlPointRole::Start),
            ControlPoint::new("end", end, ControlPointRole::End),
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
    fn interpolates_linearly_between_endpoints() {
        let model = LinearModel::default();
        let mut params = AnimationParameters::new();
        params.set("startPosition", ParamValue::Position(Position::ORIGIN));
        params.set("endPosition", ParamValue::Position(Position::new(4.0, 0.0, 0.0)));
        params.set("ease", ParamValue::Enum("linear".to_string()));

        let mut state = ModelState::new();
        let p = model.calculate(&params, 1.0, 2.0, &mut ctx(&mut state));
        assert_relative_eq!(p.x, 2.0);

        let p_end = model.calculate(&params, 2.0, 2.0, &mut ctx(&mut state));
        assert_relative_eq!(p_end.x, 4.0);
    }

    #[test]
    fn clamps_time_outside_duration() {
        let model = LinearModel::default();
        let mut params = AnimationParameters::new();
        params.set("startPosition", ParamValue::Position(Position::ORIGIN));
        params.set("endPosition", ParamValue::Position(Position::new(4.0, 0.0, 0.0)));

        let mut state = ModelState::new();
        let p = model.calculate(&params, 10.0, 2.0, &mut ctx(&mut state));
        assert_relative_eq!(p.x, 4.0);
    }

    #[test]
    fn generate_path_matches_calculate_at_samples() {
        let model = LinearModel::default();
        let mut params = AnimationParameters::new();
        params.set("startPosition", ParamValue::Position(Position::ORIGIN));
        params.set("endPosition", ParamValue::Position(Position::new(4.0, 0.0, 0.0)));

        let path = model.generate_path(&params, 2.0, 5);
        assert_eq!(path.len(), 5);
        assert_relative_eq!(path[0].x, 0.0);
        assert_relative_eq!(path[4].x, 4.0);
    }
}
