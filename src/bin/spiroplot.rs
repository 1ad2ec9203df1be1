use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};

#[derive(Parser, Debug)]
#[command(name = "spiroplot", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw a spirograph with explicit parameters and export it as a PNG.
    Render(RenderArgs),
    /// Draw a spirograph with randomized parameters and export it as a PNG.
    Random(RandomArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Curve family.
    #[arg(long, value_enum, default_value_t = KindChoice::Hypotrochoid)]
    kind: KindChoice,

    /// Fixed (big) circle radius R.
    #[arg(long = "big-radius", default_value_t = 125.0)]
    big_radius: f64,

    /// Rolling (small) circle radius r.
    #[arg(long = "small-radius", default_value_t = 75.0)]
    small_radius: f64,

    /// Pen offset l from the rolling circle's center.
    #[arg(long = "pen-offset", default_value_t = 55.0)]
    pen_offset: f64,

    /// Full revolutions to trace.
    #[arg(long, default_value_t = 3)]
    cycles: u32,

    /// How many spirographs to draw one after another.
    #[arg(long = "nested", default_value_t = 1)]
    nested_count: u32,

    /// Color a single `#RRGGBB` instead of one random color per cycle.
    #[arg(long = "color")]
    single_color: Option<String>,

    /// Line thickness in pixels.
    #[arg(long, default_value_t = 2.0)]
    thickness: f64,

    /// Overlay the approximate fixed and rolling circles.
    #[arg(long = "show-circles")]
    show_circles: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct RandomArgs {
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 700)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 700)]
    height: u32,

    /// Seed for the random color/parameter draws (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective plot spec as JSON to stderr.
    #[arg(long)]
    dump_spec: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Hypotrochoid,
    Epitrochoid,
}

impl From<KindChoice> for spiroplot::CurveKind {
    fn from(kind: KindChoice) -> Self {
        match kind {
            KindChoice::Hypotrochoid => Self::Hypotrochoid,
            KindChoice::Epitrochoid => Self::Epitrochoid,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Random(args) => cmd_random(args),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    StdRng::seed_from_u64(seed)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let color_mode = match &args.single_color {
        Some(hex) => spiroplot::ColorMode::Single(
            spiroplot::Rgb::from_hex(hex).with_context(|| format!("parse color '{hex}'"))?,
        ),
        None => spiroplot::ColorMode::RandomPerCycle,
    };

    let spec = spiroplot::PlotSpec {
        kind: args.kind.into(),
        big_radius: args.big_radius,
        small_radius: args.small_radius,
        pen_offset: args.pen_offset,
        cycles: args.cycles,
        nested_count: args.nested_count,
        color_mode,
        line_thickness: args.thickness,
        show_circles: args.show_circles,
    };

    export_png(&spec, &args.output)
}

fn cmd_random(args: RandomArgs) -> anyhow::Result<()> {
    let mut rng = make_rng(args.output.seed);
    let spec = spiroplot::PlotSpec::randomized(&mut rng);
    eprintln!(
        "randomized params: {}",
        serde_json::to_string(&spec).context("serialize plot spec")?
    );
    export_png(&spec, &args.output)
}

fn export_png(spec: &spiroplot::PlotSpec, output: &OutputArgs) -> anyhow::Result<()> {
    spec.validate()?;

    if output.dump_spec {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(spec).context("serialize plot spec")?
        );
    }

    let viewport = spiroplot::Viewport::new(f64::from(output.width), f64::from(output.height))?;
    let mut surface = spiroplot::RasterSurface::new(
        output.width,
        output.height,
        spiroplot::Rgb::new(255, 255, 255),
    )?;

    let mut rng = make_rng(output.seed);
    let mut player = spiroplot::Player::default();
    let segments = player.play(
        spec,
        &viewport,
        &mut surface,
        &mut spiroplot::NoDelayScheduler,
        &mut rng,
    )?;

    if let Some(parent) = output.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    surface.save_png(&output.out)?;

    eprintln!("wrote {} ({segments} segments)", output.out.display());
    Ok(())
}
