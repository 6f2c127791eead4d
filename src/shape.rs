//! Immutable shape descriptors.
//!
//! A [`Shape`] carries everything needed to paint one primitive: geometry in
//! pixel coordinates, colours and stroke widths. Shapes have no identity; a
//! layout produces an ordered list of them and the canvas paints that list
//! front to back.

use image::Rgba;

use crate::icon::{PointPx, RectPx};

/// A stroke drawn along a shape's outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub color: Rgba<u8>,
    pub width: u32,
}

impl Outline {
    pub fn new(color: Rgba<u8>, width: u32) -> Self {
        Self { color, width }
    }
}

/// A single drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// An axis-aligned filled rectangle with circular corners.
    RoundedRect {
        rect: RectPx,
        radius: u32,
        fill: Rgba<u8>,
    },

    /// An ellipse inscribed in `bounds`, filled and/or outlined.
    ///
    /// Outlines are drawn inside the bounds.
    Ellipse {
        bounds: RectPx,
        fill: Option<Rgba<u8>>,
        outline: Option<Outline>,
    },

    /// A straight segment. The stroke is centered on the pixels it joins.
    Line {
        from: PointPx,
        to: PointPx,
        color: Rgba<u8>,
        width: u32,
    },
}

impl Shape {
    /// Returns the shape shifted by `(dx, dy)` pixels.
    pub fn translate(&self, dx: u32, dy: u32) -> Self {
        match *self {
            Shape::RoundedRect { rect, radius, fill } => Shape::RoundedRect {
                rect: rect.translate(dx, dy),
                radius,
                fill,
            },
            Shape::Ellipse {
                bounds,
                fill,
                outline,
            } => Shape::Ellipse {
                bounds: bounds.translate(dx, dy),
                fill,
                outline,
            },
            Shape::Line {
                from,
                to,
                color,
                width,
            } => Shape::Line {
                from: from.translate(dx, dy),
                to: to.translate(dx, dy),
                color,
                width,
            },
        }
    }

    /// Returns true if painting this shape would leave no mark.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Shape::RoundedRect { rect, .. } => rect.is_empty(),
            Shape::Ellipse {
                bounds,
                fill,
                outline,
            } => {
                bounds.is_empty()
                    || (fill.is_none() && outline.is_none_or(|o| o.width == 0))
            }
            Shape::Line { from, to, width, .. } => from == to || *width == 0,
        }
    }
}
