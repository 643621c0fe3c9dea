use std::f64::consts::PI;

use crate::{
    animation::table::FrameValueTable,
    foundation::core::{DMat4, Rgb8},
    foundation::error::{KeysceneError, KeysceneResult},
    foundation::math::{rotation, scaling, translation},
    geometry::{
        EdgeBuffer, PolygonBuffer,
        shapes::{add_box, add_edge, add_sphere, add_torus},
    },
    interp::stack::TransformStack,
    render::output::OutputBackend,
    render::raster::{Lighting, Rasterizer},
    render::surface::SceneState,
    script::command::Command,
    script::symbols::SymbolTable,
};

/// Default tessellation for spheres and tori.
pub const DEFAULT_STEPS: u32 = 100;

/// Multiplier a transform applies to its arguments: the knob's value for this frame, or
/// `1.0` when there is no table, no knob reference, or no entry for the knob.
pub fn knob_factor(knob: Option<&str>, table: Option<&FrameValueTable>) -> f64 {
    match (knob, table) {
        (Some(name), Some(table)) => table.get(name).unwrap_or(1.0),
        _ => 1.0,
    }
}

/// Matrix built by a `move`, `scale` or `rotate` command for the given frame table.
/// Returns `None` for every other command.
pub fn transform_matrix(cmd: &Command, table: Option<&FrameValueTable>) -> Option<DMat4> {
    let k = knob_factor(cmd.knob(), table);
    match cmd {
        Command::Move { offset, .. } => {
            Some(translation(offset[0] * k, offset[1] * k, offset[2] * k))
        }
        Command::Scale { factors, .. } => {
            Some(scaling(factors[0] * k, factors[1] * k, factors[2] * k))
        }
        Command::Rotate { axis, degrees, .. } => {
            Some(rotation(*axis, degrees * k * (PI / 180.0)))
        }
        _ => None,
    }
}

/// Replays a command list against a transform stack and a scene.
///
/// One interpreter serves both static and animated runs: the frame table is optional, and
/// output commands only reach a backend when one is supplied.
pub struct Interpreter<'a> {
    symbols: &'a SymbolTable,
    rasterizer: &'a dyn Rasterizer,
    lighting: Lighting,
    steps: u32,
    line_color: Rgb8,
}

impl<'a> Interpreter<'a> {
    pub fn new(symbols: &'a SymbolTable, rasterizer: &'a dyn Rasterizer) -> Self {
        Self {
            symbols,
            rasterizer,
            lighting: Lighting::default(),
            steps: DEFAULT_STEPS,
            line_color: Rgb8::BLACK,
        }
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_line_color(mut self, color: Rgb8) -> Self {
        self.line_color = color;
        self
    }

    /// Execute `commands` in order.
    ///
    /// `display`/`save` are forwarded to `output` when present and skipped otherwise. The
    /// first failing command aborts the pass.
    pub fn run(
        &self,
        commands: &[Command],
        table: Option<&FrameValueTable>,
        stack: &mut TransformStack,
        scene: &mut SceneState,
        mut output: Option<&mut dyn OutputBackend>,
    ) -> KeysceneResult<()> {
        for (index, cmd) in commands.iter().enumerate() {
            tracing::trace!(index, op = cmd.op_name(), "exec");
            match cmd {
                Command::Box {
                    origin,
                    dims,
                    constants,
                } => {
                    let mut polygons = PolygonBuffer::new();
                    add_box(&mut polygons, *origin, *dims);
                    self.fill(polygons, constants.as_deref(), stack, scene)?;
                }
                Command::Sphere {
                    center,
                    radius,
                    constants,
                } => {
                    let mut polygons = PolygonBuffer::new();
                    add_sphere(&mut polygons, *center, *radius, self.steps);
                    self.fill(polygons, constants.as_deref(), stack, scene)?;
                }
                Command::Torus {
                    center,
                    minor_radius,
                    major_radius,
                    constants,
                } => {
                    let mut polygons = PolygonBuffer::new();
                    add_torus(
                        &mut polygons,
                        *center,
                        *minor_radius,
                        *major_radius,
                        self.steps,
                    );
                    self.fill(polygons, constants.as_deref(), stack, scene)?;
                }
                Command::Line { p0, p1 } => {
                    let mut edges = EdgeBuffer::new();
                    add_edge(&mut edges, *p0, *p1);
                    edges.transform(stack.top());
                    self.rasterizer.draw_edges(&edges, scene, self.line_color);
                }
                Command::Move { .. } | Command::Scale { .. } | Command::Rotate { .. } => {
                    if let Some(m) = transform_matrix(cmd, table) {
                        stack.apply(&m);
                    }
                }
                Command::Push => stack.push(),
                Command::Pop => {
                    if !stack.pop() {
                        return Err(KeysceneError::StackUnderflow { index });
                    }
                }
                Command::Display => match output.as_mut() {
                    Some(out) => out.display(&scene.surface)?,
                    None => tracing::debug!(index, "display skipped in animated pass"),
                },
                Command::Save { path } => match output.as_mut() {
                    Some(out) => out.save(&scene.surface, path)?,
                    None => {
                        tracing::debug!(index, path = %path.display(), "save skipped in animated pass")
                    }
                },
                Command::Frames { .. } | Command::Basename { .. } | Command::Vary { .. } => {}
            }
        }
        Ok(())
    }

    /// Draw one shape. The material lives only for this call, so the next shape starts
    /// from the default again.
    fn fill(
        &self,
        mut polygons: PolygonBuffer,
        constants: Option<&str>,
        stack: &TransformStack,
        scene: &mut SceneState,
    ) -> KeysceneResult<()> {
        let material = self.symbols.resolve(constants)?;
        polygons.transform(stack.top());
        self.rasterizer
            .fill_polygons(&polygons, scene, &self.lighting, material);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interp/interpreter.rs"]
mod tests;
