//! Icon rendering: layout, paint, and a per-size cache.

use std::collections::HashMap;

use crate::canvas::Canvas;
use crate::error::Result;
use crate::icon::{IconImage, Variant};
use crate::layout::IconLayout;
use crate::theme::Theme;

/// Renders the standard icon at `size x size` with the default theme.
///
/// This is a pure function of `size`: the same input always produces
/// pixel-identical output.
///
/// # Example
///
/// ```
/// let icon = browser_icon::render_icon(96).unwrap();
/// assert_eq!(icon.size(), 96);
/// ```
pub fn render_icon(size: u32) -> Result<IconImage> {
    draw(&IconLayout::compute(size), &Theme::default())
}

/// Paints a computed layout onto a fresh canvas.
pub fn draw(layout: &IconLayout, theme: &Theme) -> Result<IconImage> {
    let mut canvas = Canvas::new(layout.canvas_size)?;
    canvas.paint_all(&layout.shapes(theme));
    Ok(IconImage::new(
        canvas.into_image(),
        layout.variant,
        layout.content_bounds(),
    ))
}

/// Key for cached renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    size: u32,
    variant: Variant,
}

impl CacheKey {
    pub fn new(size: u32, variant: Variant) -> Self {
        Self { size, variant }
    }
}

/// Renders icons with a fixed theme, reusing earlier results.
///
/// # Example
///
/// ```
/// use browser_icon::{IconRenderer, Variant};
///
/// let mut renderer = IconRenderer::default();
/// let plain = renderer.render(192, Variant::Standard).unwrap();
/// let maskable = renderer.render(192, Variant::Maskable).unwrap();
/// assert_ne!(plain.data, maskable.data);
/// ```
#[derive(Default)]
pub struct IconRenderer {
    theme: Theme,
    cache: HashMap<CacheKey, IconImage>,
}

impl IconRenderer {
    /// Creates a renderer that paints with the given theme.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            cache: HashMap::new(),
        }
    }

    /// Returns the theme used for painting.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Renders one icon, or returns the cached render for the same size and variant.
    pub fn render(&mut self, size: u32, variant: Variant) -> Result<IconImage> {
        let key = CacheKey::new(size, variant);
        if let Some(cached) = self.cache.get(&key) {
            log::debug!("reusing {:?} render at {}px", variant, size);
            return Ok(cached.clone());
        }

        log::debug!("rendering {:?} icon at {}px", variant, size);
        let icon = draw(&IconLayout::for_variant(size, variant), &self.theme)?;
        self.cache.insert(key, icon.clone());
        Ok(icon)
    }

    /// Renders every requested size of one variant.
    pub fn render_all(&mut self, sizes: &[u32], variant: Variant) -> Result<Vec<IconImage>> {
        sizes.iter().map(|&size| self.render(size, variant)).collect()
    }

    /// Returns the number of cached renders.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Drops all cached renders. Useful for freeing memory.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
