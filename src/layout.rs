//! Proportional layout of the browser icon.
//!
//! Every dimension is derived from the canvas size with integer arithmetic;
//! there are no free parameters. [`IconLayout::compute`] captures the derived
//! metrics and [`IconLayout::shapes`] turns them into the ordered list of
//! primitives the canvas paints. Later shapes paint over earlier ones.
//!
//! # Example
//!
//! ```
//! use browser_icon::IconLayout;
//!
//! let layout = IconLayout::compute(48);
//! assert_eq!(layout.padding, 6);
//! assert_eq!(layout.browser.width, 36);
//! assert_eq!(layout.browser.height, 27);
//! assert_eq!(layout.corner_radius, 2);
//! ```

use crate::icon::{PointPx, RectPx, Variant};
use crate::shape::{Outline, Shape};
use crate::theme::Theme;

/// Maskable icons draw the window into this fraction (numerator / 5) of the canvas.
const MASKABLE_SCALE_FIFTHS: u32 = 4;

/// Derived geometry for one icon size.
///
/// Metric fields are relative to the drawing square, which starts `inset`
/// pixels from the canvas origin (zero for [`Variant::Standard`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconLayout {
    /// Edge length of the output canvas.
    pub canvas_size: u32,
    pub variant: Variant,
    /// Offset of the drawing square from the canvas origin.
    pub inset: u32,
    /// Edge length of the drawing square the proportions are derived from.
    pub size: u32,

    pub padding: u32,
    /// The browser window.
    pub browser: RectPx,
    pub corner_radius: u32,
    /// The darker strip across the top fifth of the window.
    pub address_bar: RectPx,

    /// Centers of the three window controls.
    pub controls: [PointPx; 3],
    pub control_radius: u32,
    pub control_spacing: u32,

    /// The translucent pill in the middle third of the address bar.
    pub address_field: RectPx,
    pub address_field_radius: u32,

    /// Bounding square of the globe.
    pub globe: RectPx,
    pub globe_center: PointPx,
    /// X positions of the two vertical chords (left, right).
    pub chords: [u32; 2],
    /// Width of the globe outline.
    pub stroke_width: u32,
    /// Width of the globe's inner lines.
    pub line_width: u32,
}

impl IconLayout {
    /// Computes the standard layout for a `size x size` canvas.
    pub fn compute(size: u32) -> Self {
        Self::derive(size, size, 0, Variant::Standard)
    }

    /// Computes the layout for the given variant.
    pub fn for_variant(size: u32, variant: Variant) -> Self {
        match variant {
            Variant::Standard => Self::compute(size),
            Variant::Maskable => {
                let inner = size / 5 * MASKABLE_SCALE_FIFTHS + size % 5 * MASKABLE_SCALE_FIFTHS / 5;
                Self::derive(size, inner, (size - inner) / 2, Variant::Maskable)
            }
        }
    }

    fn derive(canvas_size: u32, size: u32, inset: u32, variant: Variant) -> Self {
        let padding = size / 8;
        let browser_width = size - padding * 2;
        // Same as `browser_width * 3 / 4` without overflowing near `u32::MAX`
        let browser_height = browser_width / 4 * 3 + browser_width % 4 * 3 / 4;
        let browser = RectPx::new(
            padding,
            (size - browser_height) / 2,
            browser_width,
            browser_height,
        );
        let corner_radius = size / 24;

        let address_bar = RectPx::new(browser.x, browser.y, browser.width, browser.height / 5);

        let control_radius = size / 40;
        let control_spacing = size / 20;
        let controls_y = address_bar.y + address_bar.height / 2;
        let first_control = browser.x + control_spacing;
        let controls = [0, 1, 2].map(|i| PointPx::new(first_control + i * control_spacing, controls_y));

        let field_x = browser.x + browser.width / 3;
        let field_half_height = size / 32 / 2;
        // Small icons keep a one-pixel field rather than dropping it
        let address_field = RectPx::from_edges(
            field_x,
            controls_y.saturating_sub(field_half_height),
            field_x + browser.width / 3,
            controls_y + field_half_height,
        )
        .at_least(1, 1);

        let content_y = address_bar.bottom() + padding / 2;
        let content_height = browser.height.saturating_sub(address_bar.height + padding);
        let globe_size = browser.width.min(content_height) / 3;
        let globe = RectPx::new(
            browser.x + (browser.width - globe_size) / 2,
            content_y + (content_height - globe_size) / 2,
            globe_size,
            globe_size,
        );
        let globe_center = PointPx::new(globe.x + globe_size / 2, globe.y + globe_size / 2);
        // The left chord rounds away from the center, the right one toward it.
        let chords = [
            globe_center.x.saturating_sub(globe_size.div_ceil(4)),
            globe_center.x + globe_size / 4,
        ];

        let stroke_width = (size / 120).max(2);

        Self {
            canvas_size,
            variant,
            inset,
            size,
            padding,
            browser,
            corner_radius,
            address_bar,
            controls,
            control_radius,
            control_spacing,
            address_field,
            address_field_radius: field_half_height,
            globe,
            globe_center,
            chords,
            stroke_width,
            line_width: stroke_width / 2,
        }
    }

    /// The browser window in canvas coordinates.
    pub fn content_bounds(&self) -> RectPx {
        self.browser.translate(self.inset, self.inset)
    }

    /// Returns the shapes to paint, in paint order, in canvas coordinates.
    pub fn shapes(&self, theme: &Theme) -> Vec<Shape> {
        let mut shapes = Vec::with_capacity(11);

        if self.variant == Variant::Maskable {
            shapes.push(Shape::RoundedRect {
                rect: RectPx::from_size(self.canvas_size, self.canvas_size),
                radius: 0,
                fill: theme.maskable_background,
            });
        }

        let mut window = vec![
            Shape::RoundedRect {
                rect: self.browser,
                radius: self.corner_radius,
                fill: theme.accent,
            },
            Shape::RoundedRect {
                rect: self.address_bar,
                radius: self.corner_radius,
                fill: theme.address_bar,
            },
        ];

        window.extend(self.controls.iter().map(|&center| Shape::Ellipse {
            bounds: RectPx::around(center, self.control_radius),
            fill: Some(theme.controls),
            outline: None,
        }));

        window.push(Shape::RoundedRect {
            rect: self.address_field,
            radius: self.address_field_radius,
            fill: theme.address_field,
        });

        window.push(Shape::Ellipse {
            bounds: self.globe,
            fill: None,
            outline: Some(Outline::new(theme.glyph, self.stroke_width)),
        });

        window.push(Shape::Line {
            from: PointPx::new(self.globe.x, self.globe_center.y),
            to: PointPx::new(self.globe.right(), self.globe_center.y),
            color: theme.glyph,
            width: self.line_width,
        });

        window.extend(self.chords.iter().map(|&x| Shape::Line {
            from: PointPx::new(x, self.globe.y),
            to: PointPx::new(x, self.globe.bottom()),
            color: theme.glyph,
            width: self.line_width,
        }));

        shapes.extend(window.iter().map(|shape| shape.translate(self.inset, self.inset)));
        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT_SIZES: [u32; 8] = [48, 72, 96, 144, 192, 512, 192, 32];

    #[test]
    fn layout_for_48() {
        let layout = IconLayout::compute(48);
        assert_eq!(layout.padding, 6);
        assert_eq!(layout.browser, RectPx::new(6, 10, 36, 27));
        assert_eq!(layout.corner_radius, 2);
        assert_eq!(layout.address_bar, RectPx::new(6, 10, 36, 5));
        assert_eq!(layout.control_radius, 1);
        assert_eq!(
            layout.controls,
            [PointPx::new(8, 12), PointPx::new(10, 12), PointPx::new(12, 12)]
        );
        // size / 32 == 1, so the pill collapses to nothing
        assert_eq!(layout.address_field, RectPx::new(18, 12, 12, 1));
        assert_eq!(layout.globe, RectPx::new(21, 23, 5, 5));
        assert_eq!(layout.globe_center, PointPx::new(23, 25));
        assert_eq!(layout.chords, [21, 24]);
        assert_eq!(layout.stroke_width, 2);
        assert_eq!(layout.line_width, 1);
    }

    #[test]
    fn layout_for_512() {
        let layout = IconLayout::compute(512);
        assert_eq!(layout.padding, 64);
        assert_eq!(layout.browser, RectPx::new(64, 112, 384, 288));
        assert_eq!(layout.corner_radius, 21);
        assert_eq!(layout.address_bar.height, 57);
        assert_eq!(layout.address_field, RectPx::new(192, 132, 128, 16));
        assert_eq!(layout.address_field_radius, 8);
        assert_eq!(layout.stroke_width, 4);
        assert_eq!(layout.line_width, 2);
    }

    #[test]
    fn proportions_hold_for_every_export_size() {
        for size in EXPORT_SIZES {
            let layout = IconLayout::compute(size);
            assert_eq!(layout.address_bar.height, layout.browser.height / 5, "size {size}");
            assert_eq!(layout.corner_radius, size / 24, "size {size}");
            assert_eq!(layout.browser.width, size - 2 * (size / 8), "size {size}");
            assert_eq!(layout.browser.height, layout.browser.width * 3 / 4, "size {size}");
            assert!(layout.browser.right() <= size);
            assert!(layout.browser.bottom() <= size);
            assert!(layout.globe.bottom() <= layout.browser.bottom(), "size {size}");
        }
    }

    #[test]
    fn standard_shapes_in_paint_order() {
        let theme = Theme::default();
        let layout = IconLayout::compute(192);
        let shapes = layout.shapes(&theme);
        assert_eq!(shapes.len(), 10);

        assert!(matches!(
            shapes[0],
            Shape::RoundedRect { rect, fill, .. } if rect == layout.browser && fill == theme.accent
        ));
        assert!(matches!(
            shapes[1],
            Shape::RoundedRect { rect, fill, .. } if rect == layout.address_bar && fill == theme.address_bar
        ));
        for dot in &shapes[2..5] {
            assert!(matches!(dot, Shape::Ellipse { fill: Some(_), outline: None, .. }));
        }
        assert!(matches!(shapes[5], Shape::RoundedRect { fill, .. } if fill == theme.address_field));
        assert!(matches!(
            shapes[6],
            Shape::Ellipse { bounds, fill: None, outline: Some(o) } if bounds == layout.globe && o.width == 2
        ));
        for line in &shapes[7..] {
            assert!(matches!(line, Shape::Line { width: 1, .. }));
        }
    }

    #[test]
    fn favicon_keeps_controls_and_address_field() {
        let layout = IconLayout::compute(32);
        assert_eq!(layout.control_radius, 0);
        assert_eq!(
            layout.controls,
            [PointPx::new(5, 8), PointPx::new(6, 8), PointPx::new(7, 8)]
        );
        assert_eq!(layout.address_field, RectPx::new(12, 8, 8, 1));

        let shapes = layout.shapes(&Theme::default());
        assert_eq!(shapes.len(), 10);
        assert!(shapes.iter().take(6).all(|shape| !shape.is_degenerate()));
    }

    #[test]
    fn huge_sizes_do_not_overflow() {
        let layout = IconLayout::compute(u32::MAX);
        assert!(layout.browser.right() < u32::MAX);
        assert_eq!(layout.browser.height, layout.browser.width / 4 * 3);

        let maskable = IconLayout::for_variant(u32::MAX, Variant::Maskable);
        assert_eq!(maskable.size, u32::MAX / 5 * 4 + u32::MAX % 5 * 4 / 5);
        assert!(maskable.content_bounds().right() < u32::MAX);

        let big = IconLayout::for_variant(2_000_000_000, Variant::Maskable);
        assert_eq!(big.size, 1_600_000_000);
        assert_eq!(big.inset, 200_000_000);
    }

    #[test]
    fn shapes_are_deterministic() {
        let theme = Theme::default();
        assert_eq!(
            IconLayout::compute(144).shapes(&theme),
            IconLayout::compute(144).shapes(&theme)
        );
    }

    #[test]
    fn maskable_window_stays_in_safe_zone() {
        for size in [192, 512] {
            let layout = IconLayout::for_variant(size, Variant::Maskable);
            let bounds = layout.content_bounds();
            let center = size as f64 / 2.0;
            let safe_radius = size as f64 * 0.4;
            for (x, y) in [
                (bounds.x, bounds.y),
                (bounds.right(), bounds.y),
                (bounds.x, bounds.bottom()),
                (bounds.right(), bounds.bottom()),
            ] {
                let dist = (x as f64 - center).hypot(y as f64 - center);
                assert!(dist <= safe_radius, "size {size}: corner ({x}, {y}) outside safe zone");
            }
        }
    }

    #[test]
    fn maskable_shapes_start_with_full_bleed_background() {
        let theme = Theme::default();
        let layout = IconLayout::for_variant(192, Variant::Maskable);
        assert_eq!(layout.canvas_size, 192);
        assert_eq!(layout.size, 153);
        assert_eq!(layout.inset, 19);

        let shapes = layout.shapes(&theme);
        assert_eq!(shapes.len(), 11);
        assert_eq!(
            shapes[0],
            Shape::RoundedRect {
                rect: RectPx::from_size(192, 192),
                radius: 0,
                fill: theme.maskable_background,
            }
        );
        assert!(matches!(
            shapes[1],
            Shape::RoundedRect { rect, .. } if rect == layout.content_bounds()
        ));
    }
}
