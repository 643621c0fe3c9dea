use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::{
    animation::knob::build_schedule,
    animation::table::{FrameValueTable, build_frame_tables},
    foundation::core::{Canvas, FrameIndex, Rgb8},
    foundation::error::{KeysceneError, KeysceneResult},
    interp::interpreter::{DEFAULT_STEPS, Interpreter},
    interp::stack::{TransformStack, check_stack_ops},
    render::output::{FileBackend, OutputBackend},
    render::raster::{CpuRasterizer, Lighting, Rasterizer},
    render::surface::SceneState,
    script::reader::Script,
    script::symbols::SymbolTable,
};

#[derive(Clone, Debug)]
/// Threading and chunking controls for animated runs.
pub struct RenderThreading {
    /// Render frames of a chunk concurrently when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Frames rendered per batch before they are persisted in order.
    pub chunk_size: usize,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 64,
        }
    }
}

/// Options for a run.
#[derive(Clone, Debug)]
pub struct RenderOpts {
    pub canvas: Canvas,
    /// Directory animated frames are written to.
    pub output_dir: PathBuf,
    /// Image extension of animated frames (selects the encoder).
    pub extension: String,
    /// Sphere/torus tessellation.
    pub steps: u32,
    pub lighting: Lighting,
    pub background: Rgb8,
    pub line_color: Rgb8,
    pub threading: RenderThreading,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            output_dir: PathBuf::from("anim"),
            extension: "png".to_string(),
            steps: DEFAULT_STEPS,
            lighting: Lighting::default(),
            background: Rgb8::WHITE,
            line_color: Rgb8::BLACK,
            threading: RenderThreading::default(),
        }
    }
}

impl RenderOpts {
    pub fn validate(&self) -> KeysceneResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.extension.is_empty() {
            return Err(KeysceneError::validation("output extension must be non-empty"));
        }
        if let Some(n) = self.threading.threads
            && n == 0
        {
            return Err(KeysceneError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    fn interpreter<'a>(
        &self,
        symbols: &'a SymbolTable,
        rasterizer: &'a dyn Rasterizer,
    ) -> Interpreter<'a> {
        Interpreter::new(symbols, rasterizer)
            .with_lighting(self.lighting)
            .with_steps(self.steps)
            .with_line_color(self.line_color)
    }

    fn fresh_scene(&self) -> SceneState {
        SceneState::new(self.canvas, self.background)
    }
}

/// What a run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// `true` when the script declared more than one frame.
    pub animated: bool,
    /// Frames rendered.
    pub frames_total: u64,
    /// Files written by the driver for animated runs, in frame order.
    pub outputs: Vec<PathBuf>,
}

/// `<dir>/<basename><frame>.<extension>`, e.g. `anim/test7.png`.
pub fn frame_output_path(dir: &Path, basename: &str, frame: FrameIndex, extension: &str) -> PathBuf {
    dir.join(format!("{basename}{frame}.{extension}"))
}

/// Render one animated frame in isolation with a fresh stack and scene.
///
/// Explicit `display`/`save` commands are skipped; the caller owns persistence.
pub fn render_animation_frame(
    script: &Script,
    table: &FrameValueTable,
    opts: &RenderOpts,
    rasterizer: &dyn Rasterizer,
) -> KeysceneResult<SceneState> {
    let mut stack = TransformStack::new();
    let mut scene = opts.fresh_scene();
    opts.interpreter(&script.symbols, rasterizer).run(
        &script.commands,
        Some(table),
        &mut stack,
        &mut scene,
        None,
    )?;
    Ok(scene)
}

/// Render a single frame of a script without writing anything.
///
/// For a static script only frame 0 exists and is rendered with literal arguments.
#[tracing::instrument(skip(script, opts, rasterizer))]
pub fn render_frame(
    script: &Script,
    frame: FrameIndex,
    opts: &RenderOpts,
    rasterizer: &dyn Rasterizer,
) -> KeysceneResult<SceneState> {
    opts.validate()?;
    let schedule = build_schedule(&script.commands)?;
    check_stack_ops(&script.commands)?;
    if frame.0 >= schedule.num_frames {
        return Err(KeysceneError::validation(format!(
            "frame {frame} is outside the script's {} frame(s)",
            schedule.num_frames
        )));
    }

    if !schedule.is_animated() {
        let mut stack = TransformStack::new();
        let mut scene = opts.fresh_scene();
        opts.interpreter(&script.symbols, rasterizer).run(
            &script.commands,
            None,
            &mut stack,
            &mut scene,
            None,
        )?;
        return Ok(scene);
    }

    let table = FrameValueTable::evaluate(frame, &schedule.knobs);
    render_animation_frame(script, &table, opts, rasterizer)
}

/// Run a script end to end.
///
/// Static scripts execute once and perform output only through their own `display`/`save`
/// commands. Animated scripts render every frame from scratch and save each one to
/// [`frame_output_path`]. The first error stops the run; no later frame is written.
#[tracing::instrument(skip(script, opts, rasterizer, backend))]
pub fn run_script(
    script: &Script,
    opts: &RenderOpts,
    rasterizer: &dyn Rasterizer,
    backend: &mut dyn OutputBackend,
) -> KeysceneResult<RunSummary> {
    opts.validate()?;
    let schedule = build_schedule(&script.commands)?;
    check_stack_ops(&script.commands)?;

    if !schedule.is_animated() {
        let mut stack = TransformStack::new();
        let mut scene = opts.fresh_scene();
        opts.interpreter(&script.symbols, rasterizer).run(
            &script.commands,
            None,
            &mut stack,
            &mut scene,
            Some(backend),
        )?;
        return Ok(RunSummary {
            animated: false,
            frames_total: 1,
            outputs: Vec::new(),
        });
    }

    if schedule.basename_defaulted {
        tracing::warn!(
            basename = %schedule.basename,
            "no base name provided, using default"
        );
    }

    let tables = build_frame_tables(schedule.num_frames, &schedule.knobs);
    let mut outputs = Vec::with_capacity(tables.len());
    let mut persist = |table: &FrameValueTable, scene: SceneState| -> KeysceneResult<()> {
        let path = frame_output_path(
            &opts.output_dir,
            &schedule.basename,
            table.frame(),
            &opts.extension,
        );
        backend.save(&scene.surface, &path)?;
        outputs.push(path);
        Ok(())
    };

    if opts.threading.parallel {
        let pool = build_thread_pool(opts.threading.threads)?;
        for chunk in tables.chunks(normalized_chunk_size(opts.threading.chunk_size)) {
            // Frames after the earliest failure seen so far are not started.
            let first_failed = AtomicUsize::new(usize::MAX);
            let rendered = pool.install(|| {
                chunk
                    .par_iter()
                    .enumerate()
                    .map(|(i, table)| {
                        if i > first_failed.load(Ordering::Acquire) {
                            return None;
                        }
                        tracing::info!(frame = %table.frame(), "generating frame");
                        let result = render_animation_frame(script, table, opts, rasterizer);
                        if result.is_err() {
                            first_failed.fetch_min(i, Ordering::AcqRel);
                        }
                        Some(result)
                    })
                    .collect::<Vec<_>>()
            });
            for (table, slot) in chunk.iter().zip(rendered) {
                let Some(scene) = slot else {
                    return Err(KeysceneError::render(format!(
                        "frame {} skipped after an earlier frame failed",
                        table.frame()
                    )));
                };
                persist(table, scene?)?;
            }
        }
    } else {
        for table in &tables {
            tracing::info!(frame = %table.frame(), "generating frame");
            let scene = render_animation_frame(script, table, opts, rasterizer)?;
            persist(table, scene)?;
        }
    }

    tracing::info!(frames = schedule.num_frames, "frame generation complete");
    Ok(RunSummary {
        animated: true,
        frames_total: schedule.num_frames,
        outputs,
    })
}

/// Read the script at `path` and run it with the CPU rasterizer and file output.
pub fn run_file(path: impl AsRef<Path>, opts: &RenderOpts) -> KeysceneResult<RunSummary> {
    let script = Script::from_path(path)?;
    run_script(&script, opts, &CpuRasterizer::new(), &mut FileBackend::new())
}

fn build_thread_pool(threads: Option<usize>) -> KeysceneResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| KeysceneError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/driver/pipeline.rs"]
mod tests;
