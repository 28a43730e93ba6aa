use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use lumasync::{
    ClockDriver, GradeEvaluator, GradePreset, InMemoryBackend, LinkTick, LutEncoding, LutLayout,
    LutTable, PlaybackRequest, Rgb, TimelineLink, event_channel,
};

mod logger;

#[derive(Parser, Debug)]
#[command(name = "lumasync", version)]
struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bake a preset into a 256x16 LUT strip PNG.
    Bake(BakeArgs),
    /// Grade a single color and print the result.
    Eval(EvalArgs),
    /// Derive a preset from a reference image.
    Match(MatchArgs),
    /// Write the default preset as JSON.
    Preset(PresetArgs),
    /// Drive an in-memory video backend through a clip and print the clock per frame.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct BakeArgs {
    /// Preset JSON. Defaults to the built-in preset.
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Consumer layout to bake for.
    #[arg(long, value_enum, default_value_t = LayoutChoice::Passthrough)]
    layout: LayoutChoice,

    /// Override vertical flip.
    #[arg(long)]
    flip: Option<bool>,

    /// Override linear encoding.
    #[arg(long)]
    linear: Option<bool>,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Preset JSON. Defaults to the built-in preset.
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Input color as `r,g,b` in `[0, 1]`.
    #[arg(long, value_parser = parse_rgb)]
    rgb: Rgb,
}

#[derive(Parser, Debug)]
struct MatchArgs {
    /// Reference image (PNG, JPEG, ...).
    #[arg(long)]
    image: PathBuf,

    /// Output preset JSON.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Output preset JSON.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Clip URL or path.
    #[arg(long)]
    url: String,

    /// Clip start offset in the master video, seconds.
    #[arg(long, default_value_t = 0.0)]
    offset: f64,

    /// Video duration, seconds.
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Host frame rate.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Frames to simulate.
    #[arg(long, default_value_t = 10)]
    frames: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutChoice {
    /// Flipped rows, gamma encoded.
    Passthrough,
    /// Unflipped rows, linear encoded.
    Volume,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);
    match cli.cmd {
        Command::Bake(args) => cmd_bake(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Match(args) => cmd_match(args),
        Command::Preset(args) => cmd_preset(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn parse_rgb(s: &str) -> Result<Rgb, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid channel in '{s}': {e}"))?;
    match parts.as_slice() {
        [r, g, b] => Ok(Rgb::new(*r, *g, *b)),
        _ => Err(format!("expected three comma separated channels, got '{s}'")),
    }
}

fn load_preset(path: Option<&Path>) -> anyhow::Result<GradePreset> {
    let Some(path) = path else {
        return Ok(GradePreset::default());
    };
    let preset = GradePreset::from_path(path)
        .with_context(|| format!("load preset '{}'", path.display()))?;
    preset.validate()?;
    Ok(preset)
}

fn cmd_bake(args: BakeArgs) -> anyhow::Result<()> {
    let preset = load_preset(args.preset.as_deref())?;

    let mut layout = match args.layout {
        LayoutChoice::Passthrough => LutLayout::PASSTHROUGH,
        LayoutChoice::Volume => LutLayout::VOLUME,
    };
    if let Some(flip) = args.flip {
        layout.flip_vertical = flip;
    }
    if let Some(linear) = args.linear {
        layout.encoding = if linear {
            LutEncoding::Linear
        } else {
            LutEncoding::Srgb
        };
    }

    let table = LutTable::generate(&preset, layout);
    table
        .save_png(&args.out)
        .with_context(|| format!("write strip '{}'", args.out.display()))?;
    tracing::info!(out = %args.out.display(), ?layout, "baked lut strip");
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let preset = load_preset(args.preset.as_deref())?;
    let out = GradeEvaluator::new(&preset).apply(args.rgb);
    println!("{:.6},{:.6},{:.6}", out.r, out.g, out.b);
    Ok(())
}

fn cmd_match(args: MatchArgs) -> anyhow::Result<()> {
    let preset = lumasync::match_image(&args.image)
        .with_context(|| format!("match '{}'", args.image.display()))?;
    preset
        .save(&args.out)
        .with_context(|| format!("write preset '{}'", args.out.display()))?;
    tracing::info!(out = %args.out.display(), "matched preset");
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    GradePreset::default()
        .save(&args.out)
        .with_context(|| format!("write preset '{}'", args.out.display()))?;
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("fps must be positive, got {}", args.fps);
    }
    let dt = 1.0 / args.fps;

    let (events_tx, events_rx) = event_channel();
    let backend = InMemoryBackend::new()
        .with_duration(args.duration)
        .with_events(events_tx);
    let mut link = TimelineLink::new(backend);
    let mut driver = ClockDriver::new();
    let request = PlaybackRequest::new(args.url, args.offset);

    for frame in 0..args.frames {
        let host_secs = f64::from(frame) * dt;
        let outcome = driver.drive(Some(&request), host_secs, Some(&mut link));
        link.backend_mut().advance(dt);
        let tick = link.tick();

        let clock = match tick {
            LinkTick::Playing { timeline_secs, .. } => format!("{timeline_secs:.4}"),
            other => format!("{other:?}"),
        };
        println!(
            "frame={frame} driving={} effective={:.4} timeline={clock}",
            outcome.driving, outcome.effective_time_secs
        );
        for event in events_rx.drain() {
            tracing::debug!(frame, ?event, "backend event");
        }
    }
    Ok(())
}
