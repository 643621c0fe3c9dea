//! Keyframed scene-script interpreter.
//!
//! A script is a flat list of drawing, transform, stack and animation commands. Scripts that
//! declare `frames N` (N > 1) are rendered once per frame: named knobs declared with `vary`
//! are interpolated per frame and scale the arguments of the transforms that reference them.
//!
//! ```no_run
//! let summary = keyscene::run_file("scene.mdl", &keyscene::RenderOpts::default())?;
//! println!("wrote {} frame(s)", summary.outputs.len());
//! # Ok::<(), keyscene::KeysceneError>(())
//! ```
#![forbid(unsafe_code)]

mod animation;
mod driver;
mod foundation;
mod geometry;
mod interp;
mod render;
mod script;

pub use animation::knob::{DEFAULT_BASENAME, Knob, KnobSchedule, build_schedule};
pub use animation::table::{FrameValueTable, build_frame_tables};
pub use driver::pipeline::{
    RenderOpts, RenderThreading, RunSummary, frame_output_path, render_animation_frame,
    render_frame, run_file, run_script,
};
pub use foundation::core::{Canvas, DMat4, DVec3, FrameIndex, Rgb8};
pub use foundation::error::{KeysceneError, KeysceneResult};
pub use foundation::math::{Axis, identity, rotation, scaling, translation};
pub use geometry::shapes::{MIN_STEPS, add_box, add_edge, add_sphere, add_torus};
pub use geometry::{EdgeBuffer, PolygonBuffer};
pub use interp::interpreter::{DEFAULT_STEPS, Interpreter, knob_factor, transform_matrix};
pub use interp::stack::{TransformStack, check_stack_ops};
pub use render::output::{FileBackend, MemoryBackend, OutputBackend, ensure_parent_dir};
pub use render::raster::{CpuRasterizer, Lighting, PointLight, Rasterizer};
pub use render::surface::{DepthBuffer, SceneState, Surface};
pub use script::command::Command;
pub use script::reader::Script;
pub use script::symbols::{DEFAULT_MATERIAL, Material, Reflectance, SymbolTable};
