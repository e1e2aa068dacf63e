use chrono::TimeZone as _;

use super::*;
use crate::foundation::core::Wallet;
use crate::output::encode::WebpEncoder;
use crate::render::backend::RenderMetadata;

fn seed() -> Seed {
    let w = Wallet::parse("0x2222222222222222222222222222222222222222").unwrap();
    Seed::from_parts(&w, 7, "00001234")
}

fn result() -> RenderResult {
    let mut metadata = RenderMetadata::new("Cream", 12);
    metadata.extra.insert("colorPalette".into(), "Austin".into());
    RenderResult {
        frame: FrameRGBA::filled(16, 20, [200, 100, 50]),
        metadata,
    }
}

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 20, 30).unwrap() + TimeDelta::milliseconds(456)
}

#[test]
fn base_name_is_iso_timestamp_plus_seed() {
    assert_eq!(
        base_name(at(), &seed()),
        format!("2024-03-01T10:20:30.456Z-{}.png", seed())
    );
}

#[test]
fn writes_image_and_sidecar_sharing_a_base() {
    let dir = tempfile::tempdir().unwrap();
    let mut w = OutputWriter::new(dir.path(), &WebpEncoder).unwrap();
    let rec = w.write_at(at(), &seed(), &result()).unwrap();

    assert_eq!(rec.image_path, dir.path().join(format!("{}.webp", rec.base_name)));
    assert_eq!(rec.sidecar_path, dir.path().join(format!("{}.txt", rec.base_name)));
    assert!(rec.image_path.is_file());
    assert!(rec.png_path.is_none());
    assert!(rec.overlay_path.is_none());

    let sidecar: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&rec.sidecar_path).unwrap()).unwrap();
    assert_eq!(sidecar["backgroundColor"], "Cream");
    assert_eq!(sidecar["numPoints"], 12);
    assert_eq!(sidecar["colorPalette"], "Austin");
}

#[test]
fn existing_files_are_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let mut w = OutputWriter::new(dir.path(), &WebpEncoder).unwrap();
    w.write_at(at(), &seed(), &result()).unwrap();
    let err = w.write_at(at(), &seed(), &result()).unwrap_err();
    assert!(matches!(err, QqlError::Write(_)));
}

#[test]
fn stamps_strictly_increase() {
    let dir = tempfile::tempdir().unwrap();
    let mut w = OutputWriter::new(dir.path(), &WebpEncoder).unwrap();
    let a = w.next_stamp(at());
    let b = w.next_stamp(at());
    let c = w.next_stamp(at() - TimeDelta::seconds(5));
    assert!(a < b && b < c);
    assert_eq!(b - a, TimeDelta::milliseconds(1));
}

#[test]
fn overlay_is_written_when_asset_loads() {
    let dir = tempfile::tempdir().unwrap();
    let asset = dir.path().join("mark.png");
    image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 0, 255]))
        .save(&asset)
        .unwrap();
    let out = dir.path().join("out");

    let mut w = OutputWriter::new(&out, &WebpEncoder)
        .unwrap()
        .with_overlay(Some(asset));
    let rec = w.write_at(at(), &seed(), &result()).unwrap();
    let overlay = rec.overlay_path.unwrap();
    assert_eq!(
        overlay.file_name().unwrap().to_string_lossy(),
        format!("yun_{}.webp", rec.base_name)
    );
    assert!(overlay.is_file());
}

#[test]
fn overlay_failure_does_not_fail_the_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut w = OutputWriter::new(dir.path(), &WebpEncoder)
        .unwrap()
        .with_overlay(Some(dir.path().join("missing.png")));
    let rec = w.write_at(at(), &seed(), &result()).unwrap();
    assert!(rec.overlay_path.is_none());
    assert!(rec.image_path.is_file());
    assert!(rec.sidecar_path.is_file());
}

#[test]
fn keep_png_writes_the_bare_base() {
    let dir = tempfile::tempdir().unwrap();
    let mut w = OutputWriter::new(dir.path(), &WebpEncoder)
        .unwrap()
        .with_keep_png(true);
    let rec = w.write_at(at(), &seed(), &result()).unwrap();
    assert_eq!(rec.png_path, Some(dir.path().join(&rec.base_name)));
}
