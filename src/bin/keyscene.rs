use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "keyscene", version)]
struct Cli {
    /// Log at DEBUG level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a script: a static scene once, or every frame of an animation.
    Run(RunArgs),
    /// Render one frame as an image.
    Frame(FrameArgs),
    /// Print the per-frame knob values as JSON.
    Knobs(KnobsArgs),
}

#[derive(Parser, Debug)]
struct CanvasArgs {
    /// Canvas width in pixels.
    #[arg(long, default_value_t = 500)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Sphere and torus tessellation.
    #[arg(long, default_value_t = keyscene::DEFAULT_STEPS)]
    steps: u32,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Script path (`.json` for a command list, anything else for script text).
    script: PathBuf,

    /// Directory animated frames are written to.
    #[arg(long, default_value = "anim")]
    out_dir: PathBuf,

    #[command(flatten)]
    canvas: CanvasArgs,

    /// Render frames of an animation concurrently.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Skip `display` commands instead of launching a viewer.
    #[arg(long)]
    no_display: bool,

    /// Program that `display` commands hand the rendered image to.
    #[arg(long, default_value = "display")]
    viewer: String,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    script: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output image path; the format follows the extension.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Parser, Debug)]
struct KnobsArgs {
    script: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Knobs(args) => cmd_knobs(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_script(path: &Path) -> anyhow::Result<keyscene::Script> {
    keyscene::Script::from_path(path).with_context(|| format!("read script '{}'", path.display()))
}

fn opts_from(canvas: &CanvasArgs) -> anyhow::Result<keyscene::RenderOpts> {
    Ok(keyscene::RenderOpts {
        canvas: keyscene::Canvas::new(canvas.width, canvas.height)?,
        steps: canvas.steps,
        ..keyscene::RenderOpts::default()
    })
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;
    let mut opts = opts_from(&args.canvas)?;
    opts.output_dir = args.out_dir;
    opts.threading.parallel = args.parallel;
    opts.threading.threads = args.threads;

    let mut backend = if args.no_display {
        keyscene::FileBackend::headless()
    } else {
        keyscene::FileBackend::with_viewer(args.viewer)
    };
    let summary = keyscene::run_script(
        &script,
        &opts,
        &keyscene::CpuRasterizer::new(),
        &mut backend,
    )
    .with_context(|| format!("run '{}'", args.script.display()))?;

    for path in &summary.outputs {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;
    let opts = opts_from(&args.canvas)?;

    let scene = keyscene::render_frame(
        &script,
        keyscene::FrameIndex(args.frame),
        &opts,
        &keyscene::CpuRasterizer::new(),
    )?;

    let mut backend = keyscene::FileBackend::headless();
    keyscene::OutputBackend::save(&mut backend, &scene.surface, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_knobs(args: KnobsArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;
    let schedule = keyscene::build_schedule(&script.commands)?;
    let tables = keyscene::build_frame_tables(schedule.num_frames, &schedule.knobs);

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &tables).context("write knob tables")?;
    println!();
    Ok(())
}
