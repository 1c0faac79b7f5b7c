//! # imgfit
//!
//! Fit a raster image into a bounding box with one of four strategies, then
//! re-encode it. All pixel work (decoding, Lanczos3 resampling, cropping,
//! encoding) is done by the [`image`] crate; this crate contributes the fit
//! resolution logic, parameter validation, and encoder-option translation.
//!
//! ```no_run
//! use imgfit::{EncoderOptions, cover};
//!
//! // Scale to cover a 400x300 box, center-crop the overflow, save as JPEG.
//! let canvas = cover(
//!     "photo.jpg",
//!     "thumbs/photo.jpg",
//!     400,
//!     300,
//!     Some(EncoderOptions::Jpeg { quality: Some(85) }),
//! )?;
//! assert_eq!((canvas.width, canvas.height), (400, 300));
//! # Ok::<(), imgfit::Error>(())
//! ```
//!
//! # Strategies
//!
//! | Strategy | Output canvas | Aspect ratio |
//! |----------|---------------|--------------|
//! | [`contain`] | largest aspect-preserving size within the box | preserved |
//! | [`cover`] | the box exactly (center-cropped) | preserved |
//! | [`fill`] | the box exactly (stretched) | distorted |
//! | [`scale_down`] | as `contain`, or untouched if already inside the box | preserved |
//!
//! Sources may be file paths or in-memory encoded bytes; parent directories
//! of the destination are created as needed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fit`] | Pure fit resolution: strategy + box + source size → [`ResizeInstruction`] |
//! | [`encoder`] | [`EncoderOptions`] and translation to `image` crate encoders |
//! | [`pipeline`] | decode → resolve → resample → encode orchestration |
//! | [`error`] | [`Error`] taxonomy: invalid dimensions, decode, encode, IO |
//!
//! Each call is a pure function of its inputs: no global state, no caching,
//! no coordination needed between concurrent calls.

pub mod encoder;
pub mod error;
pub mod fit;
pub mod pipeline;

pub use encoder::EncoderOptions;
pub use error::{Error, Result};
pub use fit::{
    Anchor, BoundingBox, Dimensions, FitStrategy, ResizeInstruction, ResizeMode, resolve,
};
pub use pipeline::{Source, contain, cover, fill, generate, scale_down};
