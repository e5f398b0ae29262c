use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use signage::app::App;
use signage::backend::RecordingRenderer;
use signage::clock::{Instant, WallClock, parse_instant};
use signage::config::AppConfig;
use signage::engine::Engine;
use signage::engines::{ClockEngine, SignageEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    /// Slides, ticker and event guide
    Signage,
    /// Full-screen clock
    Clock,
}

#[derive(Debug, Parser)]
#[command(version, about = "Digital signage player")]
struct Args {
    /// Directory holding app.json, the data feeds and assets
    app_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = EngineKind::Signage)]
    engine: EngineKind,

    /// Start the clock at this RFC 3339 time instead of the system time
    #[arg(long, value_parser = parse_now)]
    now: Option<Instant>,

    /// Render without a window, recording draw calls
    #[arg(long)]
    headless: bool,

    /// Frames to render in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Override the frame rate from app.json
    #[arg(long)]
    fps: Option<u32>,

    /// Print the last headless frame's draw calls as JSON
    #[arg(long)]
    dump_frame: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_now(value: &str) -> std::result::Result<Instant, String> {
    parse_instant(value).map_err(|e| e.to_string())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut config = AppConfig::load(&args.app_dir)
        .with_context(|| format!("failed to load configuration from {}", args.app_dir.display()))?;
    if let Some(fps) = args.fps {
        if fps == 0 {
            bail!("--fps must be non-zero");
        }
        config.fps = fps;
    }

    let clock = match args.now {
        Some(at) => {
            info!(%at, "clock forced");
            WallClock::forced(at)
        }
        None => WallClock::system(),
    };

    let engine: Box<dyn Engine> = match args.engine {
        EngineKind::Signage => Box::new(SignageEngine::new(&config)),
        EngineKind::Clock => Box::new(ClockEngine::new(&config)),
    };

    let mut app = App::new(engine, config, clock);
    app.watch_feeds(&args.app_dir)
        .with_context(|| format!("failed to watch {}", args.app_dir.display()))?;

    if args.headless {
        run_headless(&mut app, args.frames, args.dump_frame)
    } else {
        run_windowed(&mut app, &args)
    }
}

fn run_headless(app: &mut App, frames: u64, dump_frame: bool) -> Result<()> {
    let dt = app.config().frame_time();
    info!(frames, dt, "rendering headless");

    let mut gfx = RecordingRenderer::new();
    for _ in 0..frames {
        gfx.take_calls();
        app.frame(dt, &mut gfx);
    }

    if dump_frame {
        let json = serde_json::to_string_pretty(gfx.calls()).context("failed to serialize draw calls")?;
        println!("{json}");
    }
    Ok(())
}

#[cfg(feature = "raylib")]
fn run_windowed(app: &mut App, args: &Args) -> Result<()> {
    signage::backend::raylib::run(app, &args.app_dir).context("windowed backend failed")
}

#[cfg(not(feature = "raylib"))]
fn run_windowed(_app: &mut App, _args: &Args) -> Result<()> {
    bail!("built without the `raylib` feature; pass --headless or rebuild with --features raylib")
}
