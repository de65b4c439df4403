//! Random: samples new target positions inside `bounds` at a fixed
//! interval and interpolates between them.
//!
//! The trajectory is a pure function of `(seed, bounds, interval, time)`:
//! each waypoint is derived by hashing the seed together with its
//! interval index, never with wall-clock time or an accumulating loop
//! counter. Looping the animation revisits the same `time` values every
//! pass, so it deterministically reproduces the same waypoints instead
//! of drawing fresh ones (the legacy re-randomize-on-loop bug, §9).

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn waypoint(seed: u64, bounds: Position, interval_index: i64) -> Position {
    let folded = interval_index as u64 ^ (interval_index.rotate_left(23) as u64);
    let combined = seed ^ folded.wrapping_mul(0x9E3779B97F4A7C15);
    let mut rng = ChaCha8Rng::seed_from_u64(combined);
    Position::new(
        rng.random_range(-bounds.x..=bounds.x),
        rng.random_range(-bounds.y..=bounds.y),
        rng.random_range(-bounds.z..=bounds.z),
    )
}

pub struct RandomModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for RandomModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("random"),
                display_name: "Random".to_string(),
                version: "1.0.0".to_string(),
                category: "procedural".to_string(),
                tags: vec!["seeded".to_string()],
                description: "Interpolated waypoints sampled at a fixed interval, seeded per animation".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("center", Position::ORIGIN),
                ParameterDefinition::scalar("boundsX", 4.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("boundsY", 4.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("boundsZ", 0.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("intervalSecs", 1.0).with_range(0.01, 1000.0),
                ParameterDefinition::scalar("seed", 1.0).with_range(0.0, 1e9),
            ],
        }
    }
}

impl Model for RandomModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("boundsX", ParamValue::Scalar(4.0));
        params.set("boundsY", ParamValue::Scalar(4.0));
        params.set("boundsZ", ParamValue::Scalar(0.0));
        params.set("intervalSecs", ParamValue::Scalar(1.0));
        params.set("seed", ParamValue::Scalar(1.0));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, _duration: f64, _ctx: &mut CalculationContext) -> Position {
        let center = params.position("center", Position::ORIGIN);
        let bounds = Position::new(
            params.scalar("boundsX", 4.0),
            params.scalar("boundsY", 4.0),
            params.scalar("boundsZ", 0.0),
        );
        let interval = params.scalar("intervalSecs", 1.0).max(0.01);
        let seed = params.scalar("seed", 1.0) as u64;

        let scaled = (time.max(0.0) / interval).max(0.0);
        let interval_index = scaled.floor() as i64;
        let local_t = scaled - interval_index as f64;

        let from = waypoint(seed, bounds, interval_index);
        let to = waypoint(seed, bounds, interval_index + 1);
        center + from.lerp(to, local_t)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new("center", params.position("center", Position::ORIGIN), ControlPointRole::Control)]
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
    fn looping_does_not_re_randomize_the_trajectory() {
        let model = RandomModel::default();
        let params = model.default_parameters(None);
        let mut state = ModelState::new();

        let first_pass: Vec<Position> = (0..20).map(|i| model.calculate(&params, i as f64 * 0.1, 2.0, &mut ctx(&mut state))).collect();
        let second_pass: Vec<Position> = (0..20).map(|i| model.calculate(&params, i as f64 * 0.1, 2.0, &mut ctx(&mut state))).collect();

        for (a, b) in first_pass.iter().zip(second_pass.iter()) {
            assert_relative_eq!(a.x, b.x);
            assert_relative_eq!(a.y, b.y);
        }
    }

    #[test]
    fn stays_within_declared_bounds() {
        let model = RandomModel::default();
        let mut params = AnimationParameters::new();
        params.set("boundsX", ParamValue::Scalar(3.0));
        params.set("boundsY", ParamValue::Scalar(3.0));
        params.set("intervalSecs", ParamValue::Scalar(0.5));

        let mut state = ModelState::new();
        for i in 0..200 {
            let p = model.calculate(&params, i as f64 * 0.05, 4.0, &mut ctx(&mut state));
            assert!(p.x.abs() <= 3.0 + 1e-9);
            assert!(p.y.abs() <= 3.0 + 1e-9);
        }
    }
}
