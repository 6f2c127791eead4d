//! Icon types: pixel geometry and rendered icon images.
//!
//! All geometry is expressed in whole pixels of a square canvas. Coordinates
//! are edge-aligned: a [`RectPx`] at `x = 6, width = 36` covers the span
//! from the left edge of pixel 6 to the left edge of pixel 42.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A rectangle defined in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the canvas
    pub x: u32,
    /// Y offset from the top edge of the canvas
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Creates a rectangle from its left/top and right/bottom edges.
    ///
    /// Edges that cross collapse to a zero-sized rectangle.
    pub fn from_edges(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    /// Creates a square of side `2 * radius` centered on `center`.
    ///
    /// A zero radius still covers the center pixel.
    pub fn around(center: PointPx, radius: u32) -> Self {
        Self::from_edges(
            center.x.saturating_sub(radius),
            center.y.saturating_sub(radius),
            center.x + radius,
            center.y + radius,
        )
        .at_least(1, 1)
    }

    /// Grows the rectangle to at least `min_width x min_height`, keeping its origin.
    pub fn at_least(self, min_width: u32, min_height: u32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
            ..self
        }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns true if the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the rectangle shifted by `(dx, dy)`.
    pub fn translate(&self, dx: u32, dy: u32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointPx {
    pub x: u32,
    pub y: u32,
}

impl PointPx {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Returns the point shifted by `(dx, dy)`.
    pub fn translate(&self, dx: u32, dy: u32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// Which flavour of the icon to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// The browser window on a transparent background.
    #[default]
    Standard,
    /// Full-bleed background with the window shrunk into the maskable safe zone.
    Maskable,
}

/// A rendered icon and the metadata needed to export it.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in RGBA format (straight, not premultiplied, alpha).
    pub data: RgbaImage,

    /// The variant this image was drawn as.
    pub variant: Variant,

    /// The region occupied by the browser window.
    ///
    /// For [`Variant::Maskable`] this lies inside the safe zone; for
    /// [`Variant::Standard`] it is the window rectangle itself.
    pub content_bounds: RectPx,
}

impl IconImage {
    /// Creates a new icon image with the given data and metadata.
    pub fn new(data: RgbaImage, variant: Variant, content_bounds: RectPx) -> Self {
        Self {
            data,
            variant,
            content_bounds,
        }
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns the edge length of the (square) icon.
    pub fn size(&self) -> u32 {
        self.data.width()
    }

    /// Encodes the image as an RGBA PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.data
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
