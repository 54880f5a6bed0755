use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "geolayer", version)]
struct Cli {
    /// Log classifier generation, animator and hit-test activity to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a dataset and print the annotated features as JSON.
    Process(LayerArgs),
    /// Print the legend descriptor for the configured draw mode.
    Legend(LegendArgs),
    /// Hit-test a pixel against a dataset whose coordinates are pixels.
    Hit(HitArgs),
    /// Simulate the time animation and print one step per frame.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct LayerArgs {
    /// Input data JSON: an array of features or of `{lng, lat, ...}` records.
    #[arg(long)]
    data: PathBuf,

    /// Layer options JSON. Defaults apply when omitted.
    #[arg(long)]
    options: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LegendArgs {
    #[command(flatten)]
    layer: LayerArgs,

    /// Gradient legend width in pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Gradient legend height in pixels.
    #[arg(long)]
    height: Option<f64>,
}

#[derive(Parser, Debug)]
struct HitArgs {
    #[command(flatten)]
    layer: LayerArgs,

    /// Query pixel x, in CSS pixels.
    #[arg(long)]
    x: f64,

    /// Query pixel y, in CSS pixels.
    #[arg(long)]
    y: f64,

    /// Device pixel ratio of the surface.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    layer: LayerArgs,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 10)]
    frames: u32,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Process(args) => cmd_process(args),
        Command::Legend(args) => cmd_legend(args),
        Command::Hit(args) => cmd_hit(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse JSON '{}'", path.display()))
}

/// Arrays of objects carrying `geometry` are datasets; anything else goes through binding.
fn read_data(path: &Path) -> anyhow::Result<geolayer::DataInput> {
    let value = read_json(path)?;
    let serde_json::Value::Array(items) = value else {
        anyhow::bail!("'{}' must contain a JSON array", path.display());
    };
    let is_dataset = !items.is_empty() && items.iter().all(|v| v.get("geometry").is_some());
    if is_dataset {
        let ds: geolayer::Dataset = serde_json::from_value(serde_json::Value::Array(items))
            .with_context(|| "parse features")?;
        return Ok(ds.into());
    }
    Ok(items.into())
}

fn read_options(path: Option<&Path>) -> anyhow::Result<geolayer::LayerOptions> {
    let Some(path) = path else {
        return Ok(geolayer::LayerOptions::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read options '{}'", path.display()))?;
    Ok(geolayer::LayerOptions::from_json(&s)?)
}

fn load_layer(args: &LayerArgs) -> anyhow::Result<geolayer::Layer> {
    let options = read_options(args.options.as_deref())?;
    let input = read_data(&args.data)?;
    Ok(geolayer::Layer::new(input, options)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).with_context(|| "serialize output")?;
    println!("{s}");
    Ok(())
}

fn cmd_process(args: LayerArgs) -> anyhow::Result<()> {
    let mut layer = load_layer(&args)?;
    layer.process_data();
    print_json(layer.dataset())
}

fn cmd_legend(args: LegendArgs) -> anyhow::Result<()> {
    let layer = load_layer(&args.layer)?;
    let legend = layer.legend(&geolayer::LegendOptions {
        width: args.width,
        height: args.height,
    });
    print_json(&legend)
}

fn cmd_hit(args: HitArgs) -> anyhow::Result<()> {
    let mut layer = load_layer(&args.layer)?.with_device_pixel_ratio(args.dpr);
    layer.process_data();

    let mut ctx = geolayer::PathContext::new(args.dpr);
    let renderer = geolayer::SimplePath::new(geolayer::PixelSpace);
    let hit = geolayer::hit_test_index(
        &mut ctx,
        &renderer,
        layer.dataset(),
        layer.options(),
        geolayer::Point::new(args.x, args.y),
        layer.device_pixel_ratio(),
    );

    let out = serde_json::json!({
        "index": hit,
        "feature": hit.and_then(|i| layer.dataset().get().get(i)),
    });
    print_json(&out)
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be > 0");
    }
    let mut layer = load_layer(&args.layer)?;
    let mut scheduler = geolayer::Scheduler::new();
    layer.init(&mut scheduler)?;
    let Some(id) = layer.animator() else {
        anyhow::bail!("layer has no time animation (no feature carries a `time`)");
    };

    let frame_ms = 1000.0 / args.fps;
    for frame in 0..args.frames {
        let now_ms = f64::from(frame) * frame_ms;
        let mut step = None;
        scheduler.advance(now_ms, |got, s| {
            if got == id {
                step = Some(s);
            }
        });
        if let Some(s) = step {
            layer.on_animation_step(s);
            let visible = layer.visible_features(s).count();
            println!("{frame}\t{s:.3}\t{visible}");
        }
    }

    layer.destroy(&mut scheduler);
    Ok(())
}
