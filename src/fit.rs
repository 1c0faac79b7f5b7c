//! Pure fit-resolution logic.
//!
//! Everything here is a pure function of dimensions — no I/O, no pixels.
//! [`resolve`] maps a [`FitStrategy`] plus a source size plus a target
//! [`BoundingBox`] to a [`ResizeInstruction`] that the pipeline hands to the
//! resampler.

use crate::error::{Error, Result};

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Validated target box. Both dimensions are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    width: u32,
    height: u32,
}

impl BoundingBox {
    /// Construct a box, rejecting zero dimensions.
    ///
    /// The error names the offending dimension so callers can report it:
    ///
    /// ```
    /// # use imgfit::BoundingBox;
    /// assert!(BoundingBox::new(0, 100).is_err());
    /// assert!(BoundingBox::new(100, 100).is_ok());
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width < 1 {
            return Err(Error::InvalidDimension { name: "width" });
        }
        if height < 1 {
            return Err(Error::InvalidDimension { name: "height" });
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }
}

/// How the source image should be fitted into the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStrategy {
    /// Preserve aspect ratio, fit entirely within the box. May upscale.
    Contain,
    /// Preserve aspect ratio, cover the whole box, crop the overflow.
    Cover,
    /// Stretch each axis independently to exactly match the box.
    Fill,
    /// Like Contain, but never upscale: sources already inside the box
    /// pass through untouched.
    ScaleDown,
}

/// What the resampler should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Aspect-preserving resize to the instruction canvas.
    Fit,
    /// Aspect-preserving resize to cover the canvas, then center-crop.
    Crop,
    /// Axis-independent resize to the canvas.
    Stretch,
    /// No resize at all; the source passes through as-is.
    Skip,
}

/// Crop anchor. This system only ever crops from the center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    Center,
}

/// Resolved resize operation: the exact output canvas plus how to reach it.
///
/// `canvas` is authoritative — for every mode the written image has exactly
/// these dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeInstruction {
    pub mode: ResizeMode,
    pub canvas: Dimensions,
    pub anchor: Anchor,
}

/// Resolve a fit strategy against a source size and a target box.
///
/// Pure computation; the only error path in the whole module is
/// [`BoundingBox::new`], which runs before this.
///
/// ```
/// # use imgfit::{BoundingBox, Dimensions, FitStrategy, ResizeMode, resolve};
/// let source = Dimensions::new(1600, 1200);
/// let target = BoundingBox::new(2000, 300).unwrap();
/// let instruction = resolve(source, target, FitStrategy::Contain);
/// assert_eq!(instruction.mode, ResizeMode::Fit);
/// assert_eq!(instruction.canvas, Dimensions::new(400, 300));
/// ```
pub fn resolve(source: Dimensions, target: BoundingBox, strategy: FitStrategy) -> ResizeInstruction {
    let (mode, canvas) = match strategy {
        FitStrategy::Contain => (ResizeMode::Fit, contain_dimensions(source, target)),
        FitStrategy::Cover => (
            ResizeMode::Crop,
            Dimensions::new(target.width(), target.height()),
        ),
        FitStrategy::Fill => (
            ResizeMode::Stretch,
            Dimensions::new(target.width(), target.height()),
        ),
        FitStrategy::ScaleDown => {
            // Non-strict per-axis comparison: either axis exceeding the box
            // triggers a Contain resize, never Cover or Fill.
            if source.width <= target.width() && source.height <= target.height() {
                (ResizeMode::Skip, source)
            } else {
                (ResizeMode::Fit, contain_dimensions(source, target))
            }
        }
    };

    ResizeInstruction {
        mode,
        canvas,
        anchor: Anchor::Center,
    }
}

/// Largest aspect-preserving size of `source` that fits inside `target`.
///
/// The binding axis matches the box exactly; the other axis is rounded and
/// floored at 1 px so extreme aspect ratios never collapse to zero.
fn contain_dimensions(source: Dimensions, target: BoundingBox) -> Dimensions {
    let width_ratio = target.width() as f64 / source.width as f64;
    let height_ratio = target.height() as f64 / source.height as f64;
    let scale = width_ratio.min(height_ratio);

    Dimensions {
        width: (source.width as f64 * scale).round().max(1.0) as u32,
        height: (source.height as f64 * scale).round().max(1.0) as u32,
    }
}
