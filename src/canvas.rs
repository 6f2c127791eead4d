//! Rasterization of shape descriptors.
//!
//! [`Canvas`] owns a tiny-skia pixmap and knows how to paint each [`Shape`]
//! variant onto it with anti-aliasing and source-over blending. The layout
//! code never touches the pixmap; it only hands over descriptors.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{
    FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, PremultipliedColorU8, Rect, Stroke,
    Transform,
};

use crate::error::{Error, Result};
use crate::icon::RectPx;
use crate::shape::{Outline, Shape};

/// Cubic bezier handle length for a quarter circle: 4/3 * tan(pi/8).
const KAPPA: f32 = 0.552_284_8;

/// Largest edge length whose pixmap rows still fit tiny-skia's `i32` stride.
pub const MAX_CANVAS_SIZE: u32 = i32::MAX as u32 / 4;

/// A square RGBA drawing surface, fully transparent when created.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Allocates a transparent `size x size` canvas.
    ///
    /// Fails with [`Error::InvalidSize`] for a zero size, a size above
    /// [`MAX_CANVAS_SIZE`], or a pixmap that cannot be allocated.
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 || size > MAX_CANVAS_SIZE {
            return Err(Error::InvalidSize(size));
        }
        let pixmap = Pixmap::new(size, size).ok_or(Error::InvalidSize(size))?;
        Ok(Self { pixmap })
    }

    /// Returns the edge length of the canvas.
    pub fn size(&self) -> u32 {
        self.pixmap.width()
    }

    /// Paints every shape in order, later shapes over earlier ones.
    pub fn paint_all<'a>(&mut self, shapes: impl IntoIterator<Item = &'a Shape>) {
        for shape in shapes {
            self.paint(shape);
        }
    }

    /// Paints a single shape. Degenerate shapes leave the canvas untouched.
    pub fn paint(&mut self, shape: &Shape) {
        if shape.is_degenerate() {
            log::trace!("skipping degenerate shape {:?}", shape);
            return;
        }

        match *shape {
            Shape::RoundedRect { rect, radius, fill } => {
                if let Some(path) = rounded_rect_path(rect, radius as f32) {
                    self.fill(&path, fill);
                }
            }
            Shape::Ellipse {
                bounds,
                fill,
                outline,
            } => {
                if let Some(color) = fill {
                    if let Some(path) = skia_rect(bounds, 0.0).and_then(PathBuilder::from_oval) {
                        self.fill(&path, color);
                    }
                }
                if let Some(Outline { color, width }) = outline {
                    // Keep the stroke inside the bounds.
                    let half = width as f32 / 2.0;
                    if let Some(path) = skia_rect(bounds, half).and_then(PathBuilder::from_oval) {
                        self.stroke(&path, color, width as f32, LineCap::Butt);
                    }
                }
            }
            Shape::Line {
                from,
                to,
                color,
                width,
            } => {
                let mut pb = PathBuilder::new();
                pb.move_to(from.x as f32 + 0.5, from.y as f32 + 0.5);
                pb.line_to(to.x as f32 + 0.5, to.y as f32 + 0.5);
                if let Some(path) = pb.finish() {
                    // Square caps make a one pixel line cover both end pixels fully.
                    self.stroke(&path, color, width as f32, LineCap::Square);
                }
            }
        }
    }

    /// Consumes the canvas and returns its pixels with straight alpha.
    pub fn into_image(self) -> RgbaImage {
        let mut img = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            *dst = unpremultiply(*src);
        }
        img
    }

    fn fill(&mut self, path: &Path, color: Rgba<u8>) {
        let paint = paint_for(color);
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke(&mut self, path: &Path, color: Rgba<u8>, width: f32, line_cap: LineCap) {
        let paint = paint_for(color);
        let stroke = Stroke {
            width,
            line_cap,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }
}

fn paint_for(color: Rgba<u8>) -> Paint<'static> {
    let [r, g, b, a] = color.0;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Converts a pixel rectangle to a tiny-skia rectangle shrunk by `inset` on every side.
fn skia_rect(rect: RectPx, inset: f32) -> Option<Rect> {
    Rect::from_ltrb(
        rect.x as f32 + inset,
        rect.y as f32 + inset,
        rect.right() as f32 - inset,
        rect.bottom() as f32 - inset,
    )
}

/// Builds a rectangle path with circular corners.
///
/// The radius is clamped to half the shorter side.
fn rounded_rect_path(rect: RectPx, radius: f32) -> Option<Path> {
    let bounds = skia_rect(rect, 0.0)?;
    let (x, y, w, h) = (bounds.x(), bounds.y(), bounds.width(), bounds.height());
    let r = radius.min(w.min(h) / 2.0);

    if r <= 0.0 {
        return Some(PathBuilder::from_rect(bounds));
    }

    let k = r * KAPPA;
    let mut pb = PathBuilder::new();

    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();

    pb.finish()
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(pixel: PremultipliedColorU8) -> Rgba<u8> {
    let a = pixel.alpha();
    if a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let a_f = a as f32 / 255.0;
    let channel = |c: u8| (c as f32 / a_f).round().min(255.0) as u8;
    Rgba([
        channel(pixel.red()),
        channel(pixel.green()),
        channel(pixel.blue()),
        a,
    ])
}
