use super::*;
use crate::foundation::core::{Canvas, Rgb8};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_output").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn file_backend_writes_png_and_creates_dirs() {
    let dir = scratch_dir("png");
    let path = dir.join("nested").join("frame0.png");

    let mut surface = Surface::new(Canvas::new(3, 2).unwrap(), Rgb8::WHITE);
    surface.plot(0, 0, Rgb8::new(200, 10, 30));
    FileBackend::headless().save(&surface, &path).unwrap();

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (3, 2));
    // Scene origin is bottom-left.
    assert_eq!(img.get_pixel(0, 1).0, [200, 10, 30]);
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
}

#[test]
fn unknown_extension_is_a_render_error() {
    let surface = Surface::new(Canvas::new(1, 1).unwrap(), Rgb8::WHITE);
    let err = FileBackend::headless()
        .save(&surface, Path::new("target/unit_output/frame.nope"))
        .unwrap_err();
    assert!(matches!(err, KeysceneError::Render(_)));
}

#[test]
fn headless_display_is_a_no_op() {
    let surface = Surface::new(Canvas::new(1, 1).unwrap(), Rgb8::WHITE);
    FileBackend::headless().display(&surface).unwrap();
}

#[test]
fn memory_backend_records_calls_in_order() {
    let surface = Surface::new(Canvas::new(1, 1).unwrap(), Rgb8::BLACK);
    let mut mem = MemoryBackend::new();
    mem.save(&surface, Path::new("a.png")).unwrap();
    mem.display(&surface).unwrap();
    mem.save(&surface, Path::new("b.png")).unwrap();
    assert_eq!(mem.saved_paths(), [Path::new("a.png"), Path::new("b.png")]);
    assert_eq!(mem.displayed.len(), 1);
}
