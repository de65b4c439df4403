//! Perlin Noise: smooth pseudo-random wander within `bounds`, anchored at
//! `center`, seeded so the path is reproducible for a given animation.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Deterministic per-cell pseudo-random value in `[-1, 1]`. Re-seeds a
/// fresh RNG from `(seed, axis_salt, cell)` rather than advancing a
/// stored stream, so noise at any `time` can be evaluated independently
/// and reproduced exactly by `generate_path` and `calculate` alike.
fn cell_value(seed: u64, axis_salt: u64, cell: i64) -> f64 {
    let folded = cell as u64 ^ cell.rotate_left(17) as u64;
    let combined = seed ^ axis_salt.wrapping_mul(0x9E3779B97F4A7C15) ^ folded.wrapping_mul(0xBF58476D1CE4E5B9);
    let mut rng = ChaCha8Rng::seed_from_u64(combined);
    rng.random::<f64>() * 2.0 - 1.0
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn noise_1d(seed: u64, axis_salt: u64, x: f64) -> f64 {
    let cell = x.floor() as i64;
    let frac = x - cell as f64;
    let a = cell_value(seed, axis_salt, cell);
    let b = cell_value(seed, axis_salt, cell + 1);
    a + (b - a) * smoothstep(frac)
}

pub struct PerlinModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for PerlinModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("perlin"),
                display_name: "Perlin Noise".to_string(),
                version: "1.0.0".to_string(),
                category: "procedural".to_string(),
                tags: vec!["noise".to_string(), "wander".to_string()],
                description: "Smooth seeded pseudo-random wander within a bounding box".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("center", Position::ORIGIN),
                ParameterDefinition::scalar("boundsX", 3.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("boundsY", 3.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("boundsZ", 0.0).with_range(0.0, 1000.0),
                ParameterDefinition::scalar("speed", 0.3).with_range(0.0, 20.0),
                ParameterDefinition::scalar("seed", 1.0).with_range(0.0, 1e9),
            ],
        }
    }
}

impl Model for PerlinModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("center", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("boundsX", ParamValue::Scalar(3.0));
        params.set("boundsY", ParamValue::Scalar(3.0));
        params.set("boundsZ", ParamValue::Scalar(0.0));
        params.set("speed", ParamValue::Scalar(0.3));
        params.set("seed", ParamValue::Scalar(1.0));
        params
    }

    fn calculate(&self, params: &AnimationParameters, time: f64, _duration: f64, _ctx: &mut CalculationContext) -> Position {
        let center = params.position("center", Position::ORIGIN);
        let bounds = Position::new(
            params.scalar("boundsX", 3.0),
            params.scalar("boundsY", 3.0),
            params.scalar("boundsZ", 0.0),
        );
        let speed = params.scalar("speed", 0.3);
        let seed = params.scalar("seed", 1.0) as u64;

        let x = speed * time;
        center
            + Position::new(
                noise_1d(seed, 1, x) * bounds.x,
                noise_1d(seed, 2, x) * bounds.y,
                noise_1d(seed, 3, x) * bounds.z,
            )
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
    fn deterministic_for_a_given_seed() {
        let model = PerlinModel::default();
        let params = model.default_parameters(None);
        let mut state = ModelState::new();
        let a = model.calculate(&params, 3.7, 4.0, &mut ctx(&mut state));
        let b = model.calculate(&params, 3.7, 4.0, &mut ctx(&mut state));
        assert_relative_eq!(a.x, b.x);
        assert_relative_eq!(a.y, b.y);
    }

    #[test]
    fn different_seeds_diverge() {
        let model = PerlinModel::default();
        let mut params_a = model.default_parameters(None);
        let mut params_b = model.default_parameters(None);
        params_a.set("seed", ParamValue::Scalar(1.0));
        params_b.set("seed", ParamValue::Scalar(2.0));

        let mut state = ModelState::new();
        let a = model.calculate(&params_a, 3.7, 4.0, &mut ctx(&mut state));
        let b = model.calculate(&params_b, 3.7, 4.0, &mut ctx(&mut state));
        assert!(a.distance_to(b) > 1e-6);
    }

    #[test]
    fn stays_within_bounds() {
        let model = PerlinModel::default();
        let mut params = model.default_parameters(None);
        params.set("boundsX", ParamValue::Scalar(2.0));
        params.set("boundsY", ParamValue::Scalar(2.0));

        let mut state = ModelState::new();
        for i in 0..100 {
            let p = model.calculate(&params, i as f64 * 0.1, 4.0, &mut ctx(&mut state));
            assert!(p.x.abs() <= 2.0 + 1e-9);
            assert!(p.y.abs() <= 2.0 + 1e-9);
        }
    }
}
