use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use curvease::{
    BezierCurve, CanvasSize, CurveSpace, EaseConverter, InMemoryHost, KeyframeSample, format,
    presets,
};

#[derive(Parser, Debug)]
#[command(name = "curvease", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the editor viewport and handle positions for a curve.
    Bounds(BoundsArgs),
    /// Convert a curve plus a keyframe list into per-pair eases.
    Convert(ConvertArgs),
    /// Apply a curve to a host snapshot and write the updated snapshot.
    Apply(ApplyArgs),
    /// List presets.
    Presets(PresetsArgs),
    /// Sample the timing function over a preview duration.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct BoundsArgs {
    /// Curve as "a,b,c,d".
    #[arg(long, allow_hyphen_values = true)]
    curve: String,

    /// Canvas edge length in pixels.
    #[arg(long, default_value_t = 400.0)]
    canvas: f64,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Curve as "a,b,c,d".
    #[arg(long, allow_hyphen_values = true)]
    curve: String,

    /// JSON array of `{ "time", "value" }` keyframes in key order.
    #[arg(long)]
    keys: PathBuf,

    /// Print full-precision values instead of rounding to two decimals.
    #[arg(long, default_value_t = false)]
    raw: bool,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Curve as "a,b,c,d".
    #[arg(long, allow_hyphen_values = true)]
    curve: String,

    /// Host snapshot JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path for the updated snapshot (defaults to stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Preset JSON file; built-in presets are listed when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Curve as "a,b,c,d".
    #[arg(long, allow_hyphen_values = true)]
    curve: String,

    /// Preview duration in seconds.
    #[arg(long, default_value_t = 2.0)]
    duration: f64,

    /// Number of intervals to sample.
    #[arg(long, default_value_t = 10)]
    steps: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Bounds(args) => cmd_bounds(args),
        Command::Convert(args) => cmd_convert(args),
        Command::Apply(args) => cmd_apply(args),
        Command::Presets(args) => cmd_presets(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn parse_curve(text: &str) -> anyhow::Result<BezierCurve> {
    BezierCurve::parse(text).map_err(|e| anyhow::anyhow!(e.user_message()))
}

fn cmd_bounds(args: BoundsArgs) -> anyhow::Result<()> {
    let curve = parse_curve(&args.curve)?;
    let canvas = CanvasSize::new(args.canvas)?;
    let space = CurveSpace::default();
    let (p1, p2) = curve.control_points();
    let bounds = space.compute_bounds(p1, p2);

    let out = serde_json::json!({
        "curve": format::css_timing(curve),
        "bounds": bounds,
        "handles": [
            space.logical_to_canvas(p1, &bounds, canvas),
            space.logical_to_canvas(p2, &bounds, canvas),
        ],
        "unit_box": space.unit_box(&bounds, canvas),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let curve = parse_curve(&args.curve)?.clamped()?;
    let text = std::fs::read_to_string(&args.keys)
        .with_context(|| format!("read keyframes '{}'", args.keys.display()))?;
    let keys: Vec<KeyframeSample> = serde_json::from_str(&text)
        .with_context(|| format!("parse keyframes '{}'", args.keys.display()))?;

    let mut pairs =
        EaseConverter::convert(&curve, &keys).map_err(|e| anyhow::anyhow!(e.user_message()))?;
    if !args.raw {
        for pair in &mut pairs {
            for dim in &mut pair.dims {
                *dim = format::rounded_pair(dim);
            }
        }
    }
    println!("{}", serde_json::to_string_pretty(&pairs)?);
    Ok(())
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let curve = parse_curve(&args.curve)?;
    let mut host = InMemoryHost::from_path(&args.in_path)?;
    let report =
        curvease::apply_curve(&mut host, curve).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let snapshot = host.to_json_string()?;
    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, snapshot)
                .with_context(|| format!("write snapshot '{}'", out.display()))?;
            eprintln!(
                "applied {} to {} pair(s) in {}; wrote {}",
                format::css_timing(curve),
                report.pairs,
                report.applied.join(", "),
                out.display()
            );
        }
        None => println!("{snapshot}"),
    }
    for name in &report.skipped {
        tracing::warn!(property = %name, "skipped: fewer than two selected keyframes");
    }
    Ok(())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let list = match &args.file {
        Some(path) => presets::load_presets(path)?,
        None => presets::builtin_presets(),
    };
    for p in &list {
        match p.curve() {
            Ok(curve) => println!("{:<16} {}  {}", p.label, format::css_timing(curve), p.tooltip),
            Err(e) => println!("{:<16} invalid: {}", p.label, e.user_message()),
        }
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let curve = parse_curve(&args.curve)?;
    let samples = curvease::preview_samples(curve, args.duration, args.steps);
    println!("{}", serde_json::to_string_pretty(&samples)?);
    Ok(())
}
