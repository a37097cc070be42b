use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "emberline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single burn-transition frame as a PNG.
    Burn(BurnArgs),
    /// Sweep a section's progress from 0 to 1 and print one JSON line per sample.
    Sweep(SweepArgs),
    /// Print the tuning knob table after environment overrides.
    Knobs(KnobArgs),
}

#[derive(Parser, Debug)]
struct BurnArgs {
    /// Image shown above the burn edge.
    #[arg(long)]
    before: PathBuf,

    /// Image revealed below the burn edge.
    #[arg(long)]
    after: PathBuf,

    /// Burn progress in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    progress: f64,

    /// Noise time, seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f32,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// JSON object of knob overrides.
    #[arg(long)]
    knobs: Option<PathBuf>,

    /// Render as for a viewer who prefers reduced motion.
    #[arg(long)]
    reduced_motion: bool,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Input section JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of progress steps between 0 and 1.
    #[arg(long, default_value_t = 100)]
    samples: u32,

    /// Simulated seconds between samples.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// JSON object of knob overrides.
    #[arg(long)]
    knobs: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct KnobArgs {
    /// JSON object of knob overrides.
    #[arg(long)]
    knobs: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Burn(args) => cmd_burn(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Knobs(args) => cmd_knobs(args),
    }
}

fn load_knobs(path: Option<&Path>) -> anyhow::Result<emberline::KnobSet> {
    let mut knobs = emberline::KnobSet::default();
    if let Some(path) = path {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read knobs '{}'", path.display()))?;
        knobs.apply_json(&json)?;
    }
    knobs.apply_env(std::env::vars())?;
    Ok(knobs)
}

fn cmd_burn(args: BurnArgs) -> anyhow::Result<()> {
    let knobs = load_knobs(args.knobs.as_deref())?;
    let motion = if args.reduced_motion {
        emberline::MotionPreference::Reduced
    } else {
        emberline::MotionPreference::Full
    };
    let tuning = emberline::BurnTuning::from_knobs(&knobs, motion);
    let canvas = emberline::Canvas::new(args.width, args.height)?;

    let before = emberline::load_image(&args.before)?;
    let after = emberline::load_image(&args.after)?;
    let frame = emberline::composite_burn(
        &emberline::cover_fit(&before, canvas),
        &emberline::cover_fit(&after, canvas),
        emberline::Progress::new(args.progress),
        args.time,
        &tuning,
    )?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let spec = emberline::SectionSpec::from_path(&args.in_path)?;
    let knobs = load_knobs(args.knobs.as_deref())?;
    let mut runtime = emberline::SectionRuntime::new(
        &spec,
        &knobs,
        emberline::MotionPreference::Full,
        emberline::Canvas::new(1, 1)?,
    )?;
    runtime.activate();

    // A section exactly one viewport taller than the viewport: offset == progress * 1000.
    runtime.on_resize(emberline::SectionMetrics {
        top: 0.0,
        height: 2000.0,
        viewport_height: 1000.0,
    });

    let samples = args.samples.max(1);
    for i in 0..=samples {
        let p = f64::from(i) / f64::from(samples);
        runtime.on_scroll(p * 1000.0);
        let out = runtime.on_frame(args.dt)?;
        let line = serde_json::json!({
            "progress": out.timeline.progress.get(),
            "phase": out.phase,
            "phase_change": out.phase_change,
            "revealed": out.timeline.mask.count(),
            "mask_change": out.timeline.mask_change,
            "events": out.timeline.events,
            "slide_offset": out.timeline.slide_offset,
            "styles": out.timeline.styles,
            "reveal": out.reveal,
            "media": out.media,
        });
        println!("{line}");
    }
    Ok(())
}

fn cmd_knobs(args: KnobArgs) -> anyhow::Result<()> {
    let knobs = load_knobs(args.knobs.as_deref())?;
    println!("{:<26} {:>10} {:>10} {:>10} {:>10}", "key", "default", "min", "max", "value");
    for (def, value) in knobs.iter() {
        println!(
            "{:<26} {:>10.4} {:>10.4} {:>10.4} {:>10.4}  {}",
            def.key, def.default, def.min, def.max, value, def.doc
        );
    }
    Ok(())
}
