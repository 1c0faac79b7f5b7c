//! High-level fit operations.
//!
//! Each operation runs the same sequence: validate the target box, decode
//! the source, resolve the fit instruction, resample, create destination
//! parent directories, encode. Validation comes first, so an invalid box
//! never creates a destination file.
//!
//! Everything is synchronous and owns its decoded buffer for the duration of
//! the call; concurrent calls share no state.

use crate::encoder::{self, EncoderOptions};
use crate::error::{Error, Result};
use crate::fit::{BoundingBox, Dimensions, FitStrategy, ResizeInstruction, ResizeMode, resolve};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};

/// An encoded source image: raw bytes or a file on disk.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Bytes(&'a [u8]),
    Path(&'a Path),
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Source::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Source<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Source::Path(path)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(path: &'a str) -> Self {
        Source::Path(Path::new(path))
    }
}

/// Scale preserving aspect ratio so the image fits entirely within the box.
/// Upscales smaller sources.
pub fn contain<'a>(
    source: impl Into<Source<'a>>,
    destination: impl AsRef<Path>,
    width: u32,
    height: u32,
    encoder: Option<EncoderOptions>,
) -> Result<Dimensions> {
    generate(source, destination, width, height, FitStrategy::Contain, encoder)
}

/// Scale preserving aspect ratio so the image covers the whole box, then
/// center-crop the overflow. The output equals the box exactly.
pub fn cover<'a>(
    source: impl Into<Source<'a>>,
    destination: impl AsRef<Path>,
    width: u32,
    height: u32,
    encoder: Option<EncoderOptions>,
) -> Result<Dimensions> {
    generate(source, destination, width, height, FitStrategy::Cover, encoder)
}

/// Stretch each axis independently to exactly match the box, ignoring
/// aspect ratio.
pub fn fill<'a>(
    source: impl Into<Source<'a>>,
    destination: impl AsRef<Path>,
    width: u32,
    height: u32,
    encoder: Option<EncoderOptions>,
) -> Result<Dimensions> {
    generate(source, destination, width, height, FitStrategy::Fill, encoder)
}

/// Like [`contain`], but never upscale: a source already within the box is
/// re-encoded at its original dimensions.
pub fn scale_down<'a>(
    source: impl Into<Source<'a>>,
    destination: impl AsRef<Path>,
    width: u32,
    height: u32,
    encoder: Option<EncoderOptions>,
) -> Result<Dimensions> {
    generate(source, destination, width, height, FitStrategy::ScaleDown, encoder)
}

/// General entry point: fit `source` into a `width`×`height` box with the
/// given strategy and write it to `destination`.
///
/// Returns the dimensions of the written image. Parent directories of
/// `destination` are created if absent.
pub fn generate<'a>(
    source: impl Into<Source<'a>>,
    destination: impl AsRef<Path>,
    width: u32,
    height: u32,
    strategy: FitStrategy,
    encoder: Option<EncoderOptions>,
) -> Result<Dimensions> {
    let target = BoundingBox::new(width, height)?;
    let destination = destination.as_ref();

    let image = decode(source.into())?;
    let natural = Dimensions::new(image.width(), image.height());
    let instruction = resolve(natural, target, strategy);
    log::debug!(
        "{strategy:?}: {}x{} into {width}x{height} -> {:?} at {}x{}",
        natural.width,
        natural.height,
        instruction.mode,
        instruction.canvas.width,
        instruction.canvas.height
    );

    let output = apply(image, &instruction);

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    encoder::save(&output, destination, encoder.as_ref())?;
    Ok(instruction.canvas)
}

fn decode(source: Source<'_>) -> Result<DynamicImage> {
    match source {
        Source::Bytes(bytes) => image::load_from_memory(bytes).map_err(Error::Decode),
        Source::Path(path) => ImageReader::open(path)?.decode().map_err(Error::Decode),
    }
}

/// Execute a resolved instruction. The instruction's canvas is authoritative:
/// every mode produces exactly those dimensions.
fn apply(image: DynamicImage, instruction: &ResizeInstruction) -> DynamicImage {
    let Dimensions { width, height } = instruction.canvas;
    match instruction.mode {
        ResizeMode::Skip => image,
        ResizeMode::Fit | ResizeMode::Stretch => {
            image.resize_exact(width, height, FilterType::Lanczos3)
        }
        // resize_to_fill crops from the center, matching the instruction anchor
        ResizeMode::Crop => image.resize_to_fill(width, height, FilterType::Lanczos3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, RgbImage};

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        image::codecs::jpeg::JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    fn written_dimensions(path: &Path) -> (u32, u32) {
        image::image_dimensions(path).unwrap()
    }

    #[test]
    fn contain_height_bound_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let out = tmp.path().join("contain.jpg");
        let canvas = contain(&source, &out, 200, 30, None).unwrap();
        assert_eq!((canvas.width, canvas.height), (40, 30));
        assert_eq!(written_dimensions(&out), (40, 30));
    }

    #[test]
    fn contain_upscales_past_source_size() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let out = tmp.path().join("contain.jpg");
        contain(&source, &out, 320, 480, None).unwrap();
        assert_eq!(written_dimensions(&out), (320, 240));
    }

    #[test]
    fn cover_output_equals_box() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        // Twice the width, half the height: output is the box exactly
        let out = tmp.path().join("cover.jpg");
        cover(&source, &out, 320, 60, None).unwrap();
        assert_eq!(written_dimensions(&out), (320, 60));
    }

    #[test]
    fn fill_output_equals_box() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let out = tmp.path().join("fill.jpg");
        fill(&source, &out, 160, 60, None).unwrap();
        assert_eq!(written_dimensions(&out), (160, 60));
    }

    #[test]
    fn scale_down_passes_small_source_through() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let out = tmp.path().join("scaledown.jpg");
        let canvas = scale_down(&source, &out, 320, 240, None).unwrap();
        assert_eq!((canvas.width, canvas.height), (160, 120));
        assert_eq!(written_dimensions(&out), (160, 120));
    }

    #[test]
    fn scale_down_resizes_large_source_as_contain() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let out = tmp.path().join("scaledown.jpg");
        scale_down(&source, &out, 80, 60, None).unwrap();
        assert_eq!(written_dimensions(&out), (80, 60));
    }

    #[test]
    fn invalid_width_creates_no_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let out = tmp.path().join("never.jpg");
        let result = cover(&source, &out, 0, 100, None);
        assert!(matches!(
            result,
            Err(Error::InvalidDimension { name: "width" })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn invalid_height_creates_no_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let out = tmp.path().join("never.jpg");
        let result = cover(&source, &out, 100, 0, None);
        assert!(matches!(
            result,
            Err(Error::InvalidDimension { name: "height" })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn bytes_source_behaves_like_path_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);
        let bytes = std::fs::read(&source).unwrap();

        let out = tmp.path().join("from_bytes.jpg");
        contain(&bytes, &out, 80, 80, None).unwrap();
        assert_eq!(written_dimensions(&out), (80, 60));
    }

    #[test]
    fn destination_parent_directories_are_created() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let out = tmp.path().join("a").join("b").join("nested.png");
        contain(&source, &out, 80, 80, None).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("never.jpg");
        let garbage: &[u8] = b"not an image at all";
        let result = contain(garbage, &out, 100, 100, None);
        assert!(matches!(result, Err(Error::Decode(_))));
        assert!(!out.exists());
    }

    #[test]
    fn missing_source_path_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("never.jpg");
        let result = contain(Path::new("/nonexistent/image.jpg"), &out, 100, 100, None);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn explicit_gif_encoder_writes_decodable_gif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let out = tmp.path().join("out.gif");
        cover(&source, &out, 64, 64, Some(EncoderOptions::Gif)).unwrap();
        assert_eq!(written_dimensions(&out), (64, 64));
    }

    #[test]
    fn jpeg_quality_zero_is_smaller_than_quality_hundred() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let low = tmp.path().join("q0.jpg");
        let high = tmp.path().join("q100.jpg");
        contain(&source, &low, 160, 120, Some(EncoderOptions::Jpeg { quality: Some(0) })).unwrap();
        contain(&source, &high, 160, 120, Some(EncoderOptions::Jpeg { quality: Some(100) }))
            .unwrap();

        let low_size = std::fs::metadata(&low).unwrap().len();
        let high_size = std::fs::metadata(&high).unwrap().len();
        assert!(low_size < high_size, "{low_size} !< {high_size}");
    }

    #[test]
    fn png_level_one_is_no_smaller_than_level_nine() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        let fast = tmp.path().join("c1.png");
        let best = tmp.path().join("c9.png");
        contain(&source, &fast, 160, 120, Some(EncoderOptions::Png { compression: Some(1) }))
            .unwrap();
        contain(&source, &best, 160, 120, Some(EncoderOptions::Png { compression: Some(9) }))
            .unwrap();

        let fast_size = std::fs::metadata(&fast).unwrap().len();
        let best_size = std::fs::metadata(&best).unwrap().len();
        assert!(fast_size >= best_size, "{fast_size} < {best_size}");
    }

    #[test]
    fn default_encoders_omit_parameters() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        for options in [
            EncoderOptions::Jpeg { quality: None },
            EncoderOptions::Png { compression: None },
        ] {
            let out = tmp.path().join("default_params.img");
            fill(&source, &out, 50, 50, Some(options)).unwrap();
            assert!(std::fs::metadata(&out).unwrap().len() > 0);
        }
    }

    #[test]
    fn written_dimensions_match_returned_canvas_for_every_strategy() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 160, 120);

        for (strategy, name) in [
            (FitStrategy::Contain, "contain.png"),
            (FitStrategy::Cover, "cover.png"),
            (FitStrategy::Fill, "fill.png"),
            (FitStrategy::ScaleDown, "scaledown.png"),
        ] {
            let out = tmp.path().join(name);
            let canvas = generate(&source, &out, 90, 70, strategy, None).unwrap();
            assert_eq!(
                written_dimensions(&out),
                (canvas.width, canvas.height),
                "{strategy:?}"
            );
        }
    }
}
