//! Error taxonomy for fit operations.
//!
//! Decode and encode failures are propagated unchanged from the `image`
//! crate; nothing is retried or recovered. [`Error::InvalidDimension`] is the
//! only error this crate raises itself, and it is raised before any image
//! work begins.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A target dimension was zero. `name` identifies which one.
    #[error("{name} must be greater than zero")]
    InvalidDimension { name: &'static str },

    /// The source bytes or file could not be decoded as an image.
    #[error("failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),

    /// Encoding or writing the destination image failed.
    #[error("failed to encode destination image: {0}")]
    Encode(#[source] image::ImageError),

    /// IO error opening the source or creating the destination.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fit operations.
pub type Result<T> = std::result::Result<T, Error>;
