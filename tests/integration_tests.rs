use image::{ImageFormat, Rgba as ImageRgba, RgbaImage};
use pixel_svg::validate::{rasterize_svg, validate_conversion};
use pixel_svg::{
    convert_bytes, convert_if_missing, convert_one, ConvertError, ConvertOptions, PixelGrid, Rgba,
};
use std::io::Cursor;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("Failed to encode PNG");
    buf
}

fn save_png(path: &Path, img: &RgbaImage) {
    img.save(path).expect("Failed to write PNG");
}

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, ImageRgba(rgba))
}

#[test]
fn test_convert_one_writes_next_to_destination() {
    init_logging();
    let dir = tempdir().expect("Failed to create temp dir");
    let png = dir.path().join("red.png");
    let svg = dir.path().join("red.svg");
    save_png(&png, &solid(2, 1, [255, 0, 0, 255]));

    let report = convert_one(&png, &svg, &ConvertOptions::default()).expect("conversion failed");
    assert_eq!((report.width, report.height), (2, 1));
    assert_eq!(report.stats.rectangles, 1);
    assert_eq!(report.stats.merged, 1);

    let written = std::fs::read_to_string(&svg).unwrap();
    assert_eq!(written.len(), report.bytes);
    assert!(written.starts_with("<?xml"));
    assert!(written.contains(r##"<rect width="2" height="1" fill="#ff0000"/>"##));
    assert!(!written.contains('\n'));
}

#[test]
fn test_quantized_red_uses_keyword() {
    let options = ConvertOptions::new().with_quantize_colors(true);
    let svg = convert_bytes(&png_bytes(&solid(2, 1, [255, 0, 0, 255])), &options).unwrap();
    let svg = String::from_utf8(svg).unwrap();
    assert!(svg.contains(r#"<rect width="2" height="1" fill="red"/>"#));
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let err = convert_one(
        dir.path().join("absent.png"),
        dir.path().join("absent.svg"),
        &ConvertOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
    assert!(!dir.path().join("absent.svg").exists());
}

#[test]
fn test_undecodable_input_is_decode_error() {
    let err = convert_bytes(b"definitely not an image", &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Decode(_)));
}

#[test]
fn test_fully_transparent_image_has_no_rects() {
    let svg = convert_bytes(&png_bytes(&solid(4, 3, [9, 9, 9, 0])), &ConvertOptions::default())
        .unwrap();
    let rendered = rasterize_svg(&svg).unwrap();
    assert_eq!(rendered.dimensions(), (4, 3));
    assert_eq!(rendered.rect_count(), 0);
}

#[test]
fn test_driver_skips_existing_documents() {
    init_logging();
    let rasters = tempdir().unwrap();
    let vectors = tempdir().unwrap();
    save_png(&rasters.path().join("a.png"), &solid(3, 3, [10, 20, 30, 255]));
    save_png(&rasters.path().join("b.png"), &solid(3, 3, [40, 50, 60, 255]));
    let original = b"<svg>keep me</svg>".to_vec();
    std::fs::write(vectors.path().join("a.svg"), &original).unwrap();

    let report = convert_if_missing(rasters.path(), vectors.path()).unwrap();
    assert!(report.is_success());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.converted.len(), 1);

    assert_eq!(std::fs::read(vectors.path().join("a.svg")).unwrap(), original);
    let b = std::fs::read(vectors.path().join("b.svg")).unwrap();
    let rendered = rasterize_svg(&b).unwrap();
    assert_eq!(rendered.pixel(1, 1), Some([40, 50, 60]));

    // Running again converts nothing
    let again = convert_if_missing(rasters.path(), vectors.path()).unwrap();
    assert!(again.converted.is_empty());
    assert_eq!(again.skipped.len(), 2);
}

#[test]
fn test_grid_from_decoded_png_matches_source() {
    let mut img = solid(2, 2, [1, 2, 3, 255]);
    img.put_pixel(1, 1, ImageRgba([200, 100, 50, 0]));
    let grid = PixelGrid::load(&png_bytes(&img)).unwrap();
    assert_eq!(grid.color_at(0, 0), Rgba::opaque(1, 2, 3));
    assert!(grid.is_covered(1, 1));
    assert_eq!(grid.opaque_count(), 3);
}

#[test]
fn test_cli_writes_to_stdout() {
    let dir = tempdir().unwrap();
    let png = dir.path().join("dot.png");
    save_png(&png, &solid(1, 1, [171, 205, 239, 255]));

    let output = Command::new(env!("CARGO_BIN_EXE_pixel_svg"))
        .arg("-l")
        .arg("-o")
        .arg("-")
        .arg(&png)
        .output()
        .expect("Failed to run pixel_svg");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(r##"fill="#ace""##));
    assert!(!dir.path().join("dot.svg").exists());
}

#[test]
fn test_cli_default_output_path() {
    let dir = tempdir().unwrap();
    let png = dir.path().join("dot.png");
    save_png(&png, &solid(2, 2, [0, 128, 128, 255]));

    let status = Command::new(env!("CARGO_BIN_EXE_pixel_svg"))
        .arg(&png)
        .status()
        .expect("Failed to run pixel_svg");
    assert!(status.success());
    let svg = std::fs::read_to_string(dir.path().join("dot.svg")).unwrap();
    assert!(svg.contains(r#"fill="teal""#));
}

#[test]
fn test_cli_rejects_unknown_flag() {
    let status = Command::new(env!("CARGO_BIN_EXE_pixel_svg"))
        .arg("-z")
        .arg("x.png")
        .status()
        .expect("Failed to run pixel_svg");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn test_validate_round_trip_of_plain_png() {
    let img = solid(5, 4, [77, 66, 55, 255]);
    let svg = convert_bytes(&png_bytes(&img), &ConvertOptions::default()).unwrap();
    let source = vec![Rgba::opaque(77, 66, 55); 20];
    let rendered = validate_conversion(&svg, 5, 4, &source).unwrap();
    assert_eq!(rendered.rect_count(), 1);
}
