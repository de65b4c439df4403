//! Catmull–Rom: uniform spline through an ordered control-point list,
//! reflecting virtual points at the endpoints.

use crate::model::{fallback_position, CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};

fn catmull_rom_point(p0: Position, p1: Position, p2: Position, p3: Position, t: f64) -> Position {
    let t2 = t * t;
    let t3 = t2 * t;
    let combine = |a: f64, b: f64, c: f64, d: f64| -> f64 {
        0.5 * ((2.0 * b)
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    Position::new(
        combine(p0.x, p1.x, p2.x, p3.x),
        combine(p0.y, p1.y, p2.y, p3.y),
        combine(p0.z, p1.z, p2.z, p3.z),
    )
}

pub struct CatmullRomModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for CatmullRomModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("catmullRom"),
                display_name: "Catmull-Rom".to_string(),
                version: "1.0.0".to_string(),
                category: "curve".to_string(),
                tags: vec!["spline".to_string()],
                description: "Uniform spline through an ordered point sequence".to_string(),
                author: None,
                complexity: Complexity::Linear,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![ParameterDefinition::position_seq("points")],
        }
    }
}

impl CatmullRomModel {
    fn points(&self, params: &AnimationParameters) -> Vec<Position> {
        let pts = params.position_seq("points");
        if pts.len() >= 2 {
            pts
        } else {
            vec![Position::ORIGIN, Position::new(4.0, 0.0, 0.0)]
        }
    }
}

impl Model for CatmullRomModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        let start = track_position.unwrap_or(Position::ORIGIN);
        params.set(
            "points",
            ParamValue::PositionSeq(vec![
                start,
                start + Position::new(2.0, 2.0, 0.0),
                start + Position::new(4.0, -1.0, 0.0),
                start + Position::new(6.0, 0.0, 0.0),
            ]),
        );
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, duration: f64, _ctx: &mut CalculationContext) -> Position {
        let points = self.points(params);
        let segments = points.len() - 1;
        if segments == 0 {
            return fallback_position(&self.control_points(params));
        }

        let t = if duration > 0.0 { (time / duration).clamp(0.0, 1.0) } else { 1.0 };
        let scaled = t * segments as f64;
        let segment = (scaled.floor() as usize).min(segments - 1);
        let local_t = scaled - segment as f64;

        let at = |i: i64| -> Position {
            if i < 0 {
                points[0] + (points[0] - points[1])
            } else if i as usize >= points.len() {
                let last = points.len() - 1;
                points[last] + (points[last] - points[last - 1])
            } else {
                points[i as usize]
            }
        };

        catmull_rom_point(at(segment as i64 - 1), at(segment as i64), at(segment as i64 + 1), at(segment as i64 + 2), local_t)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        let points = self.points(params);
        let last = points.len() - 1;
        points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let role = if i == 0 {
                    ControlPointRole::Start
                } else if i == last {
                    ControlPointRole::End
                } else {
                    ControlPointRole::Control
                };
                let mut cp = ControlPoint::new(format!("point{i}"), p, role);
                cp.index = Some(i);
                cp
            })
            .collect()
    }
}
