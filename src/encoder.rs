//! Encoder option translation.
//!
//! [`EncoderOptions`] describes *what* format and parameters to encode with,
//! not *how* — the `image` crate does the actual encoding. When no options
//! are supplied, format selection is deferred entirely to
//! [`DynamicImage::save`], which picks an encoder from the destination
//! extension.
//!
//! Parameter ranges are the `image` crate's concern: its JPEG encoder clamps
//! quality to 1–100 itself. PNG is the one place translation is lossy —
//! `image` exposes categorical compression (`Fast`/`Default`/`Best`) rather
//! than a numeric 1–9 level, so levels are bucketed.

use crate::error::{Error, Result};
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{self, CompressionType, PngEncoder};
use image::{DynamicImage, ExtendedColorType};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output format plus its optional format-specific parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderOptions {
    /// GIF output. No parameters.
    Gif,
    /// JPEG output. `quality` is 0–100; `None` uses the `image` crate's
    /// default quality.
    Jpeg { quality: Option<u8> },
    /// PNG output. `compression` is 1–9 (higher = smaller output, slower);
    /// `None` uses the `image` crate's default compression.
    Png { compression: Option<u8> },
}

/// Map a numeric 1–9 compression level onto the `image` crate's categories.
///
/// 1–3 → Fast, 4–6 → Default, 7–9 → Best. Out-of-range values get Default;
/// rejecting them is not this adapter's job.
fn png_compression(level: u8) -> CompressionType {
    match level {
        1..=3 => CompressionType::Fast,
        7..=9 => CompressionType::Best,
        _ => CompressionType::Default,
    }
}

/// Encode `img` to `path`.
///
/// With options, the matching `image` crate encoder is constructed and the
/// destination is written through a [`BufWriter`]. Without options, the
/// format is implied by the destination extension.
pub(crate) fn save(
    img: &DynamicImage,
    path: &Path,
    options: Option<&EncoderOptions>,
) -> Result<()> {
    let Some(options) = options else {
        return img.save(path).map_err(Error::Encode);
    };

    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    match options {
        EncoderOptions::Gif => {
            let rgba = img.to_rgba8();
            let mut encoder = GifEncoder::new(writer);
            encoder
                .encode(
                    rgba.as_raw(),
                    rgba.width(),
                    rgba.height(),
                    ExtendedColorType::Rgba8,
                )
                .map_err(Error::Encode)
        }
        EncoderOptions::Jpeg { quality } => {
            let encoder = match quality {
                Some(q) => JpegEncoder::new_with_quality(writer, *q),
                None => JpegEncoder::new(writer),
            };
            // JPEG has no alpha channel
            img.to_rgb8().write_with_encoder(encoder).map_err(Error::Encode)
        }
        EncoderOptions::Png { compression } => {
            let encoder = match compression {
                Some(level) => PngEncoder::new_with_quality(
                    writer,
                    png_compression(*level),
                    png::FilterType::Adaptive,
                ),
                None => PngEncoder::new(writer),
            };
            img.write_with_encoder(encoder).map_err(Error::Encode)
        }
    }
}
