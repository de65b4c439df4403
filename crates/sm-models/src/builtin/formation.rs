//! Formation: a rigid multi-track transform applied at the barycentre.
//! The heavy lifting lives in the Multi-Track Strategy (C3); this model
//! only carries the parameters and returns the barycentre itself as the
//! base position for a single track.

use crate::model::{CalculationContext, Complexity, Model, ModelMetadata, MultiTrackModeKind};
use sm_core::{AnimationParameters, ControlPoint, ControlPointRole, ParamValue, ParameterDefinition, Position};

pub struct FormationModel {
    metadata: ModelMetadata,
    schema: Vec<ParameterDefinition>,
}

impl Default for FormationModel {
    fn default() -> Self {
        Self {
            metadata: ModelMetadata {
                type_id: sm_core::ModelTypeId::new("formation"),
                display_name: "Formation".to_string(),
                version: "1.0.0".to_string(),
                category: "multi-track".to_string(),
                tags: vec!["barycentric".to_string()],
                description: "Rigid multi-track formation, shaped entirely by the strategy layer".to_string(),
                author: None,
                complexity: Complexity::Constant,
                is_stateful: false,
                cache_key: None,
            },
            schema: vec![
                ParameterDefinition::position("barycenter", Position::ORIGIN),
                ParameterDefinition::scalar("spacing", 1.5).with_range(0.0, 1000.0),
            ],
        }
    }
}

impl Model for FormationModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn parameter_schema(&self) -> &[ParameterDefinition] {
        &self.schema
    }

    fn default_parameters(&self, track_position: Option<Position>) -> AnimationParameters {
        let mut params = AnimationParameters::new();
        params.set("barycenter", ParamValue::Position(track_position.unwrap_or(Position::ORIGIN)));
        params.set("spacing", ParamValue::Scalar(1.5));
        params
    }

    fn calculate(&self, params: &AnimationParameters, _time: f64, _duration: f64, _ctx: &mut CalculationContext) -> Position {
        params.position("barycenter", Position::ORIGIN)
    }

    fn control_points(&self, params: &AnimationParameters) -> Vec<ControlPoint> {
        vec![ControlPoint::new("barycenter", params.position("barycenter", Position::ORIGIN), ControlPointRole::Control)]
    }

    fn supported_multi_track_modes(&self) -> &'static [MultiTrackModeKind] {
        &[
            MultiTrackModeKind::BarycentricShared,
            MultiTrackModeKind::BarycentricIsobarycentric,
            MultiTrackModeKind::BarycentricCentered,
            MultiTrackModeKind::BarycentricCustom,
        ]
    }
}
