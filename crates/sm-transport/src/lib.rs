//! sm-transport: the playback transport (C5, §4.6-§4.7). Owns the tick
//! loop, fade eases, and the OSC batch sink; everything else (models,
//! multi-track strategy, project persistence) is a collaborator it calls
//! through, never a dependency it reaches into.

mod collaborators;
mod config;
mod error;
mod fade;
mod osc;
mod playing;
mod stats;
mod transport;

pub use collaborators::{AnimationStore, OscInputFilter, OscSink, TrackStore};
pub use config::{TransportConfig, WorldEnvelope};
pub use error::{TransportError, TransportResult};
pub use fade::{fade_step, ActiveFade, FadeGroupAction, FadeStep};
pub use osc::{encode_batch, OscBatch, OscEntry};
pub use playing::PlayingAnimation;
pub use stats::TransportStats;
pub use transport::Transport;
