use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use facewarp::session::{ScriptedDetector, ScriptedDevices, script_from_json};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "facewarp", version)]
struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply an effect to a still image using given landmark detections.
    Frame(FrameArgs),
    /// Run a capture session over a still image with a scripted detector.
    Run(RunArgs),
    /// List effect identifiers and their style variants.
    Effects,
}

#[derive(Parser, Debug)]
struct EffectArgs {
    /// Parameter JSON (`DistortionParameters`); flags below override it.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Effect identifier (unknown names fall back to `stretch`).
    #[arg(long)]
    effect: Option<String>,

    /// Global intensity, clamped to [0, 2].
    #[arg(long)]
    intensity: Option<f64>,

    /// Style variant of the selected effect.
    #[arg(long)]
    style: Option<String>,

    /// Style intensity of the selected effect (gan3d, contour, blur).
    #[arg(long)]
    style_intensity: Option<f64>,

    /// Base mosaic tile size, clamped to [5, 30].
    #[arg(long)]
    mosaic_size: Option<f64>,

    /// Landmark smoothing factor, clamped to [0, 1].
    #[arg(long)]
    smoothing: Option<f64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input image (PNG or JPEG).
    #[arg(long)]
    image: PathBuf,

    /// JSON list of detections, each 68 `{ "x", "y" }` points.
    #[arg(long)]
    landmarks: PathBuf,

    #[command(flatten)]
    effect: EffectArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input image served as every camera frame.
    #[arg(long)]
    image: PathBuf,

    /// Detector script: JSON list of steps, each a list of detections or `{"error": ".."}`.
    #[arg(long)]
    landmarks: PathBuf,

    #[command(flatten)]
    effect: EffectArgs,

    /// Number of render cycles.
    #[arg(long, default_value_t = 30)]
    frames: u32,

    /// Render loop rate.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Simulated time per detection request, in milliseconds.
    #[arg(long, default_value_t = 10)]
    detect_ms: u64,

    /// Stop the detection loop on the first failed request instead of retrying.
    #[arg(long)]
    no_retry: bool,

    /// Output PNG path for the last rendered frame.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
        Command::Effects => cmd_effects(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

fn build_params(args: &EffectArgs) -> anyhow::Result<facewarp::DistortionParameters> {
    let mut params = match &args.params {
        Some(path) => facewarp::DistortionParameters::from_path(path)?,
        None => facewarp::DistortionParameters::default(),
    };
    if let Some(name) = &args.effect {
        let kind = facewarp::EffectKind::parse(name);
        if !kind.as_str().eq_ignore_ascii_case(name.trim()) {
            tracing::warn!(effect = %name, "unknown effect, using stretch");
        }
        params = params.with_effect(kind);
    }
    if let Some(v) = args.intensity {
        params = params.with_intensity(v);
    }
    if let Some(style) = &args.style {
        params = params.with_style_variant(style);
    }
    if let Some(v) = args.style_intensity {
        params = params.with_style_intensity(v);
    }
    if let Some(v) = args.mosaic_size {
        params.style.mosaic_size = v;
    }
    if let Some(v) = args.smoothing {
        params.smoothing_factor = v;
    }
    Ok(params.normalized()?)
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let params = build_params(&args.effect)?;
    let frame = facewarp::read_frame(&args.image)?;
    let detections = facewarp::detections_from_json(&read_text(&args.landmarks, "landmarks")?)
        .with_context(|| "parse landmarks JSON")?;

    let mut compositor = facewarp::FrameCompositor::new();
    let out = compositor.draw(&frame.into(), &detections, &params)?;
    facewarp::write_png(&out, &args.out)?;

    tracing::info!(
        effect = params.effect_type.as_str(),
        faces = detections.len(),
        out = %args.out.display(),
        "frame written"
    );
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    let params = build_params(&args.effect)?;
    let frame = facewarp::read_frame(&args.image)?;
    let canvas = facewarp::Canvas::new(frame.width, frame.height)?;
    let script = script_from_json(&read_text(&args.landmarks, "detector script")?)
        .with_context(|| "parse detector script JSON")?;

    let detector =
        ScriptedDetector::new(script).with_latency(Duration::from_millis(args.detect_ms));
    let opts = facewarp::SessionOpts {
        canvas,
        retry_on_error: !args.no_retry,
        ..facewarp::SessionOpts::default()
    };
    let mut session = facewarp::Session::new(ScriptedDevices::new(frame, detector), opts);
    session.start()?;

    let period = Duration::from_secs_f64(1.0 / args.fps);
    let mut last = None;
    for _ in 0..args.frames {
        last = Some(session.render(&params)?);
        std::thread::sleep(period);
    }
    session.stop();

    let stats = session.feed_stats();
    tracing::info!(
        cycles = stats.cycles,
        failures = stats.failures,
        discarded = stats.discarded,
        stalled = stats.stalled,
        "detection feed finished"
    );
    match last {
        Some(out) => {
            facewarp::write_png(&out, &args.out)?;
            tracing::info!(out = %args.out.display(), "last frame written");
        }
        None => tracing::warn!("no frames rendered, nothing written"),
    }
    Ok(())
}

fn cmd_effects() -> anyhow::Result<()> {
    for &kind in facewarp::EffectKind::ALL {
        let variants = kind.variant_names();
        if variants.is_empty() {
            println!("{kind}");
        } else {
            println!("{kind}: {}", variants.join(", "));
        }
    }
    Ok(())
}
