//! Drawing surfaces, rasterization and output backends.

pub(crate) mod output;
pub(crate) mod raster;
pub(crate) mod surface;
