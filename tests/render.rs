use tempdir::TempDir;

use mandelgray::config::RenderConfig;
use mandelgray::coord::{ImageSpec, ViewWindow};
use mandelgray::errors::ErrorKind;
use mandelgray::solver::Strategy;
use mandelgray::{mandelbrot, Mandelbrot};

fn scene(strategy: Strategy) -> RenderConfig {
    RenderConfig::new(
        ImageSpec::new(16, 8),
        ViewWindow::new(-0.1, 0.8, 0.2, 0.2),
        50,
        strategy,
    )
}

#[test]
fn scalar_and_simd_scenes_match() {
    let scalar = mandelbrot(scene(Strategy::Scalar)).unwrap();
    let simd = mandelbrot(scene(Strategy::Simd)).unwrap();
    assert_eq!(scalar.width(), 16);
    assert_eq!(scalar.height(), 8);
    assert_eq!(scalar.as_bytes(), simd.as_bytes());
    // the scene straddles the set boundary
    assert!(simd.as_bytes().iter().any(|&b| b == 255));
    assert!(simd.as_bytes().iter().any(|&b| b < 255));
}

#[test]
fn png_round_trip() {
    let dir = TempDir::new("mandelgray").unwrap();
    let path = dir.path().join("out.png");
    let raster = mandelbrot(scene(Strategy::Simd)).unwrap();
    raster.save_png(&path).unwrap();

    let decoded = image::open(&path).unwrap().into_luma8();
    assert_eq!(decoded.dimensions(), (16, 8));
    assert_eq!(decoded.as_raw().as_slice(), raster.as_bytes());
}

#[test]
fn failed_encode_keeps_raster() {
    let dir = TempDir::new("mandelgray").unwrap();
    let path = dir.path().join("missing").join("out.png");
    let raster = mandelbrot(scene(Strategy::Scalar)).unwrap();
    let before = raster.clone();
    assert!(raster.save_png(&path).is_err());
    assert_eq!(raster, before);
}

#[test]
fn odd_width_rejected_for_simd() {
    let mut config = scene(Strategy::Simd);
    config.image = ImageSpec::new(15, 8);
    match Mandelbrot::new(config) {
        Err(e) => assert!(matches!(e.kind(), ErrorKind::InvalidConfig(_))),
        Ok(_) => panic!("width 15 accepted for 8-lane groups"),
    }
    config.strategy = Strategy::Scalar;
    let raster = mandelbrot(config).unwrap();
    assert_eq!(raster.len(), 15 * 8);
}

#[test]
fn short_height_rejected_for_simd() {
    let mut config = scene(Strategy::Simd);
    config.image = ImageSpec::new(16, 5);
    match Mandelbrot::new(config) {
        Err(e) => assert!(matches!(e.kind(), ErrorKind::InvalidConfig(_))),
        Ok(_) => panic!("height 5 accepted for 8-lane groups"),
    }
    config.strategy = Strategy::Scalar;
    let raster = mandelbrot(config).unwrap();
    assert_eq!(raster.len(), 16 * 5);
}
