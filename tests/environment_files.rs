use envmap_engine::codec::LdrConversion;
use envmap_engine::config::EngineConfig;
use envmap_engine::environment::cube_face_paths;
use envmap_engine::{EnvironmentError, EnvironmentImage, Image2D, SampleSource};
use glam::Vec3;
use image::{Rgb, RgbImage};
use std::path::Path;
use tempfile::tempdir;

fn write_panorama(path: &Path, width: u32, height: u32) {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, ((x + y) * 7 % 256) as u8]);
    }
    img.save(path).expect("save panorama");
}

#[test]
fn cross_and_face_exports_reimport_to_identical_faces() {
    let dir = tempdir().expect("temp dir");
    let panorama = dir.path().join("pano.png");
    write_panorama(&panorama, 32, 16);

    let mut env = EnvironmentImage::new();
    env.load_lat_long(&panorama).expect("load lat-long");
    env.save_cube_cross(dir.path().join("cross.png")).expect("save cross");
    env.save_cube_faces(dir.path().join("faces.png")).expect("save faces");
    for path in cube_face_paths(&dir.path().join("faces.png")) {
        assert!(path.exists(), "missing {}", path.display());
    }

    let mut from_cross = EnvironmentImage::new();
    from_cross.load_cube_cross(dir.path().join("cross.png")).expect("load cross");
    let mut from_faces = EnvironmentImage::new();
    from_faces.load_cube_faces_from(dir.path().join("faces.png")).expect("load faces");

    assert_eq!(from_cross.cube_face_size(), (8, 8));
    assert_eq!(from_cross.lat_long_size(), (32, 16));
    assert_eq!(from_cross.cube_faces(), from_faces.cube_faces());
    assert_eq!(from_cross.cube_cross(), from_faces.cube_cross());
}

#[test]
fn hdr_lat_long_keeps_its_dynamic_range() {
    let dir = tempdir().expect("temp dir");
    let mut env = EnvironmentImage::new();
    env.set_lat_long(Image2D::filled(16, 8, Vec3::new(8.0, 4.0, 2.0))).expect("set");
    let path = dir.path().join("bright.hdr");
    env.save_lat_long(&path).expect("save hdr");

    let mut reloaded = EnvironmentImage::new();
    reloaded.load_lat_long(&path).expect("load hdr");
    let color = reloaded.sample(Vec3::new(0.1, 0.2, 0.9).normalize(), SampleSource::Cube).expect("sample");
    assert!((color - Vec3::new(8.0, 4.0, 2.0)).abs().max_element() < 0.1, "{color:?}");
}

#[test]
fn ldr_export_clamps_by_default_and_wraps_on_request() {
    let dir = tempdir().expect("temp dir");
    let overexposed = Image2D::filled(8, 4, Vec3::new(2.0, 0.5, -1.0));

    let mut env = EnvironmentImage::new();
    env.set_lat_long(overexposed.clone()).expect("set");
    let clamped = dir.path().join("clamped.png");
    env.save_lat_long(&clamped).expect("save clamped");
    let pixel = image::open(&clamped).expect("open").to_rgb8().get_pixel(0, 0).0;
    assert_eq!(pixel, [255, 127, 0]);

    let mut config = EngineConfig::default();
    config.export.ldr_conversion = LdrConversion::Wrap;
    let mut legacy = EnvironmentImage::with_config(config);
    legacy.set_lat_long(overexposed).expect("set");
    let wrapped = dir.path().join("wrapped.png");
    legacy.save_lat_long(&wrapped).expect("save wrapped");
    let pixel = image::open(&wrapped).expect("open").to_rgb8().get_pixel(0, 0).0;
    // -255 keeps its low byte too.
    assert_eq!(pixel, [254, 127, 1]);
}

#[test]
fn face_export_stops_at_the_first_failure() {
    let dir = tempdir().expect("temp dir");
    let mut env = EnvironmentImage::new();
    env.set_lat_long(Image2D::filled(8, 4, Vec3::splat(0.5))).expect("set");

    let base = dir.path().join("sky.png");
    let paths = cube_face_paths(&base);
    // A directory squatting on the +Y name makes the third write fail.
    std::fs::create_dir(&paths[2]).expect("create blocking dir");

    let err = env.save_cube_faces(&base).unwrap_err();
    assert!(matches!(err, EnvironmentError::Encode { .. } | EnvironmentError::Io { .. }), "{err:?}");
    assert!(paths[0].exists() && paths[1].exists());
    assert!(!paths[3].exists() && !paths[4].exists() && !paths[5].exists());
}

#[test]
fn face_import_requires_matching_sizes() {
    let dir = tempdir().expect("temp dir");
    let base = dir.path().join("odd.png");
    let paths = cube_face_paths(&base);
    for (i, path) in paths.iter().enumerate() {
        let size = if i == 4 { 3 } else { 2 };
        RgbImage::new(size, size).save(path).expect("save face");
    }
    let mut env = EnvironmentImage::new();
    let err = env.load_cube_faces(&paths).unwrap_err();
    assert!(
        matches!(err, EnvironmentError::FaceSizeMismatch { expected: (2, 2), found: (3, 3), .. }),
        "{err:?}"
    );
    assert!(env.is_empty());
}

#[test]
fn missing_face_file_is_reported() {
    let dir = tempdir().expect("temp dir");
    let mut env = EnvironmentImage::new();
    let err = env.load_cube_faces_from(dir.path().join("absent.png")).unwrap_err();
    assert!(matches!(err, EnvironmentError::Io { .. }), "{err:?}");
}
