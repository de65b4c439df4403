//! Bezier (cubic): De Casteljau over `progress = time/duration`.

use crate::model::{fallback_position, CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};

fn de_casteljau(p0: Position, p1: Position, p2: Position, p3: Position, t: f64) -> Position {
    let a = p0.lerp(p1, t);
    let b = p1.lerp(p2, t);
    let c = p2.lerp(p3, t);
    let d = a.lerp(b, t);
    let e = b.lerp(c, t);
    d.lerp(e, t)
}

pub struct BezierModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for BezierModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("bezier"),
                display_name: "Bezier".to_string(),
                version: "1.0.0".to_string(),
                category: "curve".to_string(),
                tags: vec!["spline".to_string()],
                description: "Cubic Bezier segment over four control points".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("bezierStart", Position::ORIGIN),
                ParameterDefinition::position("bezierControl1", Position::new(1.0, 2.0, 0.0)),
                ParameterDefinition::position("bezierControl2", Position::new(3.0, 2.0, 0.0)),
                ParameterDefinition::position("bezierEnd", Position::new(4.0, 0.0, 0.0)),
            ],
        }
    }
}

impl Model for BezierModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        let start = track_position.unwrap_or(Position::ORIGIN);
        params.set("bezierStart", ParamValue::Position(start));
        params.set("bezierControl1", ParamValue::Position(start + Position::new(1.0, 2.0, 0.0)));
        params.set("bezierControl2", ParamValue::Position(start + Position::new(3.0, 2.0, 0.0)));
        params.set("bezierEnd", ParamValue::Position(start + Position::new(4.0, 0.0, 0.0)));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, _ctx: &mut CalculationContext) -> Position {
        let cps = self.control_points(params);
        if cps.len() < 4 {
            return fallback_position(&cps);
        }
        let t = if duration > 0.0 { (time / duration).clamp(0.0, 1.0) } else { 1.0 };
        de_casteljau(cps[0].position, cps[1].position, cps[2].position, cps[3].position, t)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![
            ControlPoint::new("bezierStart", params.position("bezierStart", Position::ORIGIN), ControlPointRole::Start),
            ControlPoint::new(
                "bezierControl1",
                params.position("bezierControl1", Position::new(1.0, 2.0, 0.0)),
                ControlPointRole::Control,
            ),
            ControlPoint::new(
                "bezierControl2",
                params.position("bezierControl2", Position::new(3.0, 2.0, 0.0)),
                ControlPointRole::Control,
            ),
            ControlPoint::new(
                "bezierEnd",
                params.position("bezierEnd", Position::new(4.0, 0.0, 0.0)),
                ControlPointRole::End,
            ),
        ]
    }
}
