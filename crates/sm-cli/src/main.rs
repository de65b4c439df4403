//! Command-line harness for exercising the engine without a host editor:
//! list what models are registered, dry-run one model's path, or run the
//! transport end to end against a stub project, printing OSC batches to
//! stdout.

mod stub;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sm_core::{AnimationId, ModelTypeId, TrackId};
use sm_transport::{Transport, TransportConfig};

use stub::{StubAnimationStore, StubInputFilter, StubOscSink, StubTrackStore};

#[derive(Parser)]
#[command(name = "sm-cli", about = "Headless harness for the spatial motion engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every model registered with the built-in model library.
    ListModels,
    /// Dry-run one model's path and print the sampled positions.
    Trace {
        /// Registered model type id, e.g. "circular".
        model_type: String,
        /// Animation duration in seconds.
        #[arg(long, default_value_t = 4.0)]
        duration: f64,
        /// Number of samples across the duration.
        #[arg(long, default_value_t = 16)]
        resolution: usize,
    },
    /// Run the transport against an in-memory stub project, printing
    /// each OSC batch as it flushes.
    Run {
        /// Registered model type id to drive a single stub track with.
        model_type: String,
        /// Animation duration in seconds.
        #[arg(long, default_value_t = 4.0)]
        duration: f64,
        /// Number of UI ticks to simulate.
        #[arg(long, default_value_t = 30)]
        ticks: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::ListModels => list_models(),
        Command::Trace { model_type, duration, resolution } => trace(&model_type, duration, resolution),
        Command::Run { model_type, duration, ticks } => run(&model_type, duration, ticks),
    }
}

fn list_models() -> Result<()> {
    let registry = sm_models::with_builtins();
    for model in registry.list(&sm_models::ModelFilter::default()) {
        let meta = model.metadata();
        println!("{:<16} {:<10} {}", meta.type_id.0, meta.category, meta.description);
    }
    Ok(())
}

fn trace(model_type: &str, duration: f64, resolution: usize) -> Result<()> {
    let registry = sm_models::with_builtins();
    let type_id = ModelTypeId::new(model_type);
    let model = registry.require(&type_id).with_context(|| format!("model {model_type:?} is not registered"))?;

    let params = model.default_parameters(None);
    for (i, position) in model.generate_path(&params, duration, resolution).into_iter().enumerate() {
        println!("{i:>4}  x={:>8.3}  y={:>8.3}  z={:>8.3}", position.x, position.y, position.z);
    }
    Ok(())
}

fn run(model_type: &str, duration: f64, ticks: u64) -> Result<()> {
    let registry = Arc::new(sm_models::with_builtins());
    let type_id = ModelTypeId::new(model_type);
    registry.require(&type_id).with_context(|| format!("model {model_type:?} is not registered"))?;

    let track_id = TrackId::new(1);
    let animation_id = AnimationId::new(1);

    let track_store = StubTrackStore::with_one_track(track_id);
    let animation_store = StubAnimationStore::single(animation_id, type_id, duration);
    let osc_sink = StubOscSink::default();
    let input_filter = StubInputFilter::default();

    let transport = Transport::new(TransportConfig::default(), registry, track_store, animation_store, osc_sink, input_filter);

    transport.play(animation_id, vec![track_id], 0).context("failed to start playback")?;

    let tick_ms = (1000.0 / transport.config().ui_tick_hz) as u64;
    for tick in 1..=ticks {
        let now_ms = tick * tick_ms;
        transport.tick_ui(now_ms, Duration::from_millis(tick_ms).as_secs_f64()).context("tick_ui failed")?;
        transport.tick_osc(now_ms).context("tick_osc failed")?;
    }

    transport.stop_all(ticks * tick_ms).context("failed to stop playback")?;
    println!("ran {ticks} ticks, final stats: {:?}", transport.stats());
    Ok(())
}
