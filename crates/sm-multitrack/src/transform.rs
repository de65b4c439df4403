//! Transform Pipeline (§4.4): the single application point for trailing
//! offsets, barycentric rotation, and the world-envelope clamp.

use crate::strategy::TransformContext;
use sm_core::{Position, RotationPlane};

/// Apply the transform pipeline to a model's base position `base`.
///
/// 1. If this is a barycentric formation and the model is rotational
///    (`rotation` is `Some`), rotate `trackOffset` by that angle in the
///    model's plane, then add to `base`.
/// 2. Otherwise, if `trackOffset` is present, add it directly.
/// 3. Clamp every coordinate to `world_envelope` (if any) and to finite
///    values.
///
/// No other subsystem may apply offsets or rotations after this stage.
pub fn apply_transform(
    base: Position,
    ctx: &TransformContext,
    rotation: Option<(f64, RotationPlane)>,
    world_envelope: Option<f64>,
) -> Position {
    let with_offset = match (ctx.is_barycentric(), rotation, ctx.track_offset) {
        (true, Some((angle, plane)), Some(offset)) => base + plane.rotate(offset, angle),
        (_, _, Some(offset)) => base + offset,
        (_, _, None) => base,
    };

    with_offset.clamp_finite(world_envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::golden_angle_offset;
    use sm_core::{BarycentricVariant, MultiTrackMode, TrackId};

    fn barycentric_ctx(offset: Option<Position>) -> TransformContext {
        TransformContext {
            track_id: TrackId::new(1),
            track_index: 0,
            total_tracks: 1,
            track_offset: offset,
            isobarycenter: None,
            custom_center: None,
            mode: MultiTrackMode::Barycentric(BarycentricVariant::Isobarycentric),
        }
    }

    #[test]
    fn rotational_formation_rotates_the_offset_not_the_base() {
        let ctx = barycentric_ctx(Some(Position::new(1.0, 0.0, 0.0)));
        let result = apply_transform(Position::new(5.0, 5.0, 0.0), &ctx, Some((90.0, RotationPlane::Xy)), None);
        assert!((result.x - 5.0).abs() < 1e-9);
        assert!((result.y - 6.0).abs() < 1e-9);
    }

    #[test]
    fn non_rotational_formation_adds_offset_directly() {
        let ctx = barycentric_ctx(Some(Position::new(2.0, 0.0, 0.0)));
        let result = apply_transform(Position::new(1.0, 1.0, 0.0), &ctx, None, None);
        assert_eq!(result, Position::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn no_offset_passes_base_through() {
        let ctx = barycentric_ctx(None);
        let result = apply_transform(Position::new(1.0, 2.0, 3.0), &ctx, None, None);
        assert_eq!(result, Position::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn world_envelope_clamps_final_position() {
        let ctx = barycentric_ctx(Some(Position::new(10.0, 0.0, 0.0)));
        let result = apply_transform(Position::new(0.0, 0.0, 0.0), &ctx, None, Some(5.0));
        assert_eq!(result.x, 5.0);
    }

    #[test]
    fn golden_angle_formation_offsets_survive_the_pipeline_unrotated() {
        let offset = golden_angle_offset(3.0, 2, 5);
        let ctx = barycentric_ctx(Some(offset));
        let result = apply_transform(Position::ORIGIN, &ctx, None, None);
        assert_eq!(result, offset);
    }
}
