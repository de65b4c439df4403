//! Error types for the playback transport.

use sm_core::{AnimationId, CoreError, TrackId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("animation {0:?} is not currently playing")]
    NotPlaying(AnimationId),

    #[error("animation {0:?} is not registered with the project store")]
    AnimationNotFound(AnimationId),

    #[error("track {0:?} is not registered with the project store")]
    TrackNotFound(TrackId),

    #[error("model type {0:?} is not registered")]
    ModelNotFound(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type TransportResult<T> = Result<T, TransportError>;
