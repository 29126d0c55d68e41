//! End-to-end tests of the split pipeline with the real image backend.
//!
//! Sources are generated in memory, uploaded through a [`Session`], and the
//! resulting strips are decoded again and compared against the source rows.

use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use simple_split::decode::UploadFile;
use simple_split::export::{DirectoryHost, ExportOutcome, Exporter, PacedQueue};
use simple_split::imaging::RustBackend;
use simple_split::session::{Phase, Session};
use simple_split::split::{SplitError, SplitSettings};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

/// Pixel `(x, y)` is `[y, x, 200, 255]`, so every row is identifiable.
fn source_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(y % 256) as u8, (x % 256) as u8, 200, 255])
    }))
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
            .write_to(&mut buf, format)
            .unwrap(),
        _ => image.write_to(&mut buf, format).unwrap(),
    }
    buf.into_inner()
}

fn upload(name: &str, media_type: &str, image: &DynamicImage, format: ImageFormat) -> UploadFile {
    UploadFile::new(Some(name.into()), media_type, encode(image, format))
}

fn session() -> Session<RustBackend> {
    Session::new(Arc::new(RustBackend::new()), SplitSettings::default())
}

fn names(session: &Session<RustBackend>) -> Vec<String> {
    session.artifacts().iter().map(|a| a.file_name()).collect()
}

#[tokio::test]
async fn png_source_splits_into_four_png_strips() {
    let mut session = session();
    let source = source_image(100, 400);

    session
        .upload(upload("tall.png", "image/png", &source, ImageFormat::Png))
        .await
        .unwrap();

    assert_eq!(session.state().phase(), Phase::Split);
    assert_eq!(
        names(&session),
        vec!["split-1.png", "split-2.png", "split-3.png", "split-4.png"]
    );

    let source = source.to_rgba8();
    for artifact in session.artifacts() {
        assert_eq!(artifact.media_type, "image/png");
        let strip = image::load_from_memory_with_format(&artifact.bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(strip.dimensions(), (100, 100));

        let offset = artifact.index as u32 * 100;
        for y in [0, 50, 99] {
            assert_eq!(
                strip.get_pixel(7, y),
                source.get_pixel(7, y + offset),
                "strip {} row {}",
                artifact.index,
                y
            );
        }
    }
}

#[tokio::test]
async fn non_image_upload_is_rejected_without_state_change() {
    let mut session = session();
    let file = UploadFile::new(Some("notes.txt".into()), "text/plain", b"hello".to_vec());

    let result = session.upload(file).await;

    assert!(matches!(result, Err(SplitError::InvalidInputKind { .. })));
    assert_eq!(session.state().phase(), Phase::Empty);
    assert!(session.artifacts().is_empty());
}

#[tokio::test]
async fn corrupt_image_is_a_decode_failure() {
    let mut session = session();
    let file = UploadFile::new(None, "image/png", b"not really a png".to_vec());

    let result = session.upload(file).await;

    assert!(matches!(result, Err(SplitError::DecodeFailure(_))));
    assert_eq!(session.state().phase(), Phase::Empty);
}

#[tokio::test]
async fn jpeg_with_fractional_quarter_truncates_strip_height() {
    let mut session = session();
    let source = source_image(200, 199);

    session
        .upload(upload("odd.jpg", "image/jpeg", &source, ImageFormat::Jpeg))
        .await
        .unwrap();

    assert_eq!(
        names(&session),
        vec!["split-1.jpg", "split-2.jpg", "split-3.jpg", "split-4.jpg"]
    );
    for artifact in session.artifacts() {
        assert_eq!(artifact.media_type, "image/jpeg");
        assert_eq!(
            image::guess_format(&artifact.bytes).unwrap(),
            ImageFormat::Jpeg
        );
        let strip = image::load_from_memory(&artifact.bytes).unwrap();
        assert_eq!(strip.dimensions(), (200, 49));
    }
}

#[tokio::test]
async fn webp_source_produces_webp_strips() {
    let mut session = session();
    let source = source_image(12, 40);

    session
        .upload(upload("s.webp", "image/webp", &source, ImageFormat::WebP))
        .await
        .unwrap();

    assert_eq!(names(&session)[0], "split-1.webp");
    let strip = image::load_from_memory(&session.artifacts()[2].bytes)
        .unwrap()
        .to_rgba8();
    assert_eq!(strip.dimensions(), (12, 10));
    assert_eq!(strip.get_pixel(0, 0).0, [20, 0, 200, 255]);
}

#[tokio::test]
async fn other_image_types_become_png() {
    let mut session = session();
    let source = source_image(10, 20);

    session
        .upload(upload("s.bmp", "image/bmp", &source, ImageFormat::Bmp))
        .await
        .unwrap();

    for artifact in session.artifacts() {
        assert_eq!(artifact.extension, "png");
        assert_eq!(
            image::guess_format(&artifact.bytes).unwrap(),
            ImageFormat::Png
        );
    }
}

#[tokio::test]
async fn splitting_the_same_file_twice_is_byte_identical() {
    let mut session = session();
    let file = upload("tall.png", "image/png", &source_image(30, 60), ImageFormat::Png);

    session.upload(file.clone()).await.unwrap();
    let first: Vec<String> = session.artifacts().iter().map(|a| a.digest()).collect();

    session.reset();
    assert_eq!(session.state().phase(), Phase::Empty);

    session.upload(file).await.unwrap();
    let second: Vec<String> = session.artifacts().iter().map(|a| a.digest()).collect();
    assert_eq!(first, second);
}

#[tokio::test]
async fn failed_upload_keeps_the_previous_split() {
    let mut session = session();
    session
        .upload(upload(
            "tall.png",
            "image/png",
            &source_image(8, 16),
            ImageFormat::Png,
        ))
        .await
        .unwrap();
    let before = names(&session);

    let broken = UploadFile::new(None, "image/jpeg", vec![0xFF, 0xD8, 0x00]);
    assert!(session.upload(broken).await.is_err());

    assert_eq!(session.state().phase(), Phase::Split);
    assert_eq!(names(&session), before);
}

#[tokio::test]
async fn save_all_writes_four_files() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut session = session();
    session
        .upload(upload(
            "tall.png",
            "image/png",
            &source_image(20, 80),
            ImageFormat::Png,
        ))
        .await
        .unwrap();

    let exporter = Exporter::with_queue(
        DirectoryHost::new(tmp.path().join("out")),
        PacedQueue::new(Duration::from_millis(1)),
    );
    let outcomes = exporter.save_all(session.artifacts()).await.unwrap();

    assert_eq!(outcomes, vec![ExportOutcome::Saved; 4]);
    for artifact in session.artifacts() {
        let written = std::fs::read(exporter.host().saved_path(&artifact.file_name())).unwrap();
        assert_eq!(written, artifact.bytes);
    }
}

#[tokio::test]
async fn share_all_without_share_command_falls_back_to_saving() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut session = session();
    session
        .upload(upload(
            "tall.jpg",
            "image/jpeg",
            &source_image(20, 80),
            ImageFormat::Jpeg,
        ))
        .await
        .unwrap();

    let exporter = Exporter::with_queue(
        DirectoryHost::new(tmp.path()),
        PacedQueue::new(Duration::ZERO),
    );
    let outcomes = exporter.share_all(session.artifacts()).await.unwrap();

    assert_eq!(outcomes, vec![ExportOutcome::Saved; 4]);
    for n in 1..=4 {
        assert!(tmp.path().join(format!("split-{n}.jpg")).is_file());
    }
}
