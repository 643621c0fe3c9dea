use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;

use crate::{
    foundation::error::{KeysceneError, KeysceneResult},
    render::surface::Surface,
};

/// Destination for finished surfaces: on-screen display and file export.
pub trait OutputBackend {
    /// Show the surface to the user.
    fn display(&mut self, surface: &Surface) -> KeysceneResult<()>;

    /// Write the surface to `path`; the image format follows the file extension.
    fn save(&mut self, surface: &Surface, path: &Path) -> KeysceneResult<()>;
}

/// Writes images with the `image` crate and shows them through an external viewer program.
#[derive(Clone, Debug)]
pub struct FileBackend {
    viewer: Option<OsString>,
}

impl Default for FileBackend {
    fn default() -> Self {
        Self {
            viewer: Some(OsString::from("display")),
        }
    }
}

impl FileBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose `display` is a no-op.
    pub fn headless() -> Self {
        Self { viewer: None }
    }

    pub fn with_viewer(program: impl Into<OsString>) -> Self {
        Self {
            viewer: Some(program.into()),
        }
    }
}

impl OutputBackend for FileBackend {
    fn display(&mut self, surface: &Surface) -> KeysceneResult<()> {
        let Some(viewer) = &self.viewer else {
            tracing::debug!("display skipped: no viewer configured");
            return Ok(());
        };

        static SEQ: AtomicU64 = AtomicU64::new(0);
        let tmp = std::env::temp_dir().join(format!(
            "keyscene_display_{}_{}.png",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        let guard = TempFileGuard(Some(tmp.clone()));
        write_image(surface, &tmp)?;

        let status = std::process::Command::new(viewer)
            .arg(&tmp)
            .status()
            .with_context(|| format!("spawn viewer '{}'", viewer.to_string_lossy()))?;
        drop(guard);
        if !status.success() {
            return Err(KeysceneError::render(format!(
                "viewer '{}' exited with {status}",
                viewer.to_string_lossy()
            )));
        }
        Ok(())
    }

    fn save(&mut self, surface: &Surface, path: &Path) -> KeysceneResult<()> {
        write_image(surface, path)
    }
}

/// Records every call; used by tests and by callers that post-process frames themselves.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    pub displayed: Vec<Surface>,
    pub saved: Vec<(PathBuf, Surface)>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved_paths(&self) -> Vec<&Path> {
        self.saved.iter().map(|(p, _)| p.as_path()).collect()
    }
}

impl OutputBackend for MemoryBackend {
    fn display(&mut self, surface: &Surface) -> KeysceneResult<()> {
        self.displayed.push(surface.clone());
        Ok(())
    }

    fn save(&mut self, surface: &Surface, path: &Path) -> KeysceneResult<()> {
        self.saved.push((path.to_path_buf(), surface.clone()));
        Ok(())
    }
}

/// Create `path`'s parent directory if needed.
pub fn ensure_parent_dir(path: &Path) -> KeysceneResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_image(surface: &Surface, path: &Path) -> KeysceneResult<()> {
    let format = image::ImageFormat::from_path(path).map_err(|e| {
        KeysceneError::render(format!("output format for '{}': {e}", path.display()))
    })?;
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        surface.data(),
        surface.width(),
        surface.height(),
        image::ColorType::Rgb8,
        format,
    )
    .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/output.rs"]
mod tests;
