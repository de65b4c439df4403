//! Control points: editable anchors a model exposes for visualization.

use crate::{Position, TrackId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlPointRole {
    Start,
    End,
    Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorTransformMode {
    Translate,
    Rotate,
    Scale,
}

/// A typed point exposed by a model for interactive editing.
///
/// The core only ever produces these for visualization; it never applies
/// the listed transform modes itself (that happens in the external
/// editor, out of scope for this crate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub id: String,
    pub position: Position,
    pub role: ControlPointRole,
    pub index: Option<usize>,
    pub owning_track: Option<TrackId>,
    pub allowed_transforms: Vec<EditorTransformMode>,
}

impl ControlPoint {
    pub fn new(id: impl Into<String>, position: Position, role: ControlPointRole) -> Self {
        Self {
            id: id.into(),
            position,
            role,
            index: None,
            owning_track: None,
            allowed_transforms: vec![EditorTransformMode::Translate],
        }
    }
}
