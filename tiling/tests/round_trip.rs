//! End-to-end tests: split an image to files on disk and reassemble it.

use std::path::PathBuf;

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use tempfile::TempDir;
use tiling::{
    assemble_detailed, ColorMode, FilterThresholds, FsCodec, GridConfig, TileInput, TilingError,
    Tiling, WriteOptions,
};

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

fn write_source(dir: &TempDir, name: &str, image: &DynamicImage) -> PathBuf {
    let path = dir.path().join(name);
    image.save(&path).unwrap();
    path
}

fn sorted_files(dir: &std::path::Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

#[test]
fn test_split_and_reassemble_from_disk() {
    let dir = TempDir::new().unwrap();
    let source = gradient(96, 64);
    let source_path = write_source(&dir, "field.png", &source);
    let tiles_dir = dir.path().join("tiles");

    let mut tiling = Tiling::new(GridConfig::new(32, None).unwrap());
    tiling.apply(source_path.as_path()).unwrap();
    let summary = tiling.write_tiles(&WriteOptions::new(&tiles_dir)).unwrap();
    assert_eq!(summary.tiles_written, 6);

    let files = sorted_files(&tiles_dir);
    assert_eq!(files.len(), 6);
    assert!(files[0].ends_with("field_x_00000_y_00000.png"));

    let canvas = tiling.assemble(files, ColorMode::Rgb).unwrap();
    assert_eq!(canvas.to_rgb8(), source.to_rgb8());
}

#[test]
fn test_derivatives_on_disk_are_skipped_on_assembly() {
    let dir = TempDir::new().unwrap();
    let source = gradient(40, 40);
    let tiles_dir = dir.path().join("tiles");

    let mut tiling = Tiling::new(GridConfig::new(20, None).unwrap());
    let grid = tiling.apply(source.clone()).unwrap().clone();
    let options = WriteOptions::new(&tiles_dir)
        .with_prefix("aug")
        .with_rotate(true)
        .with_flip(true);
    let summary = tiling.write_tiles(&options).unwrap();
    assert_eq!(summary.total(), 4 * 8);

    let files = sorted_files(&tiles_dir);
    assert_eq!(files.len(), 32);

    let assembly = assemble_detailed(&grid, &FsCodec::new(), files, ColorMode::Rgb).unwrap();
    assert_eq!(assembly.placed, 4);
    assert_eq!(assembly.skipped, 28);
    assert_eq!(assembly.canvas.to_rgb8(), source.to_rgb8());
}

#[test]
fn test_rotated_file_pixels() {
    let dir = TempDir::new().unwrap();
    let tiles_dir = dir.path().join("tiles");
    let source = gradient(10, 10);

    let mut tiling = Tiling::new(GridConfig::new(10, None).unwrap());
    tiling.apply(source.clone()).unwrap();
    tiling
        .write_tiles(&WriteOptions::new(&tiles_dir).with_prefix("r").with_rotate(true))
        .unwrap();

    let rotated = image::open(tiles_dir.join("r_x_00000_y_00000_rot_90.png")).unwrap();
    // counter-clockwise: the top-right source pixel lands top-left
    assert_eq!(rotated.get_pixel(0, 0), source.get_pixel(9, 0));
}

#[test]
fn test_filter_then_assemble_textured_tiles() {
    let mut img = RgbImage::from_pixel(40, 20, Rgb([255, 255, 255]));
    for x in 20..40 {
        for y in 0..20 {
            img.put_pixel(x, y, Rgb([100, 100, 100]));
        }
    }

    let mut tiling = Tiling::new(GridConfig::new(20, None).unwrap());
    tiling.apply(DynamicImage::ImageRgb8(img)).unwrap();

    let kept: Vec<_> = tiling
        .filter_tiles(FilterThresholds::new(0.0, 255.0))
        .unwrap()
        .collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].0.as_tuple(), (20, 0, 40, 20));

    let canvas = tiling
        .assemble(kept.into_iter().map(TileInput::from), ColorMode::L)
        .unwrap();
    let gray = canvas.to_luma8();
    assert_eq!(gray.get_pixel(0, 0).0, [0]);
    assert_eq!(gray.get_pixel(25, 5).0, [100]);
}

#[test]
fn test_missing_source_reports_codec_error() {
    let dir = TempDir::new().unwrap();
    let mut tiling = Tiling::new(GridConfig::new(16, None).unwrap());
    let result = tiling.apply(dir.path().join("absent.png"));
    assert!(matches!(result, Err(TilingError::Codec(_))));
}

#[test]
fn test_malformed_identifier_aborts_assembly() {
    let dir = TempDir::new().unwrap();
    let bogus = write_source(&dir, "no_coordinates.png", &gradient(8, 8));

    let mut tiling = Tiling::new(GridConfig::new(8, None).unwrap());
    tiling.apply(gradient(16, 16)).unwrap();
    let result = tiling.assemble(vec![bogus], ColorMode::Rgb);
    assert!(matches!(result, Err(TilingError::Parse(_))));
}
