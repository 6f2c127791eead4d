//! Colours used by the icon.

use image::Rgba;
use palette::{Hsl, IntoColor, Srgb};

/// Primary accent colour of the browser window.
pub const ACCENT: Rgba<u8> = Rgba([102, 126, 234, 255]);

/// Slightly darker shade used for the address bar strip.
pub const ACCENT_DARK: Rgba<u8> = Rgba([82, 106, 214, 255]);

/// Semi-transparent white for the window controls.
pub const CONTROL: Rgba<u8> = Rgba([255, 255, 255, 200]);

/// Translucent white for the address field pill.
pub const ADDRESS_FIELD: Rgba<u8> = Rgba([255, 255, 255, 150]);

/// Solid white for the globe glyph.
pub const GLYPH: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Opaque backdrop behind maskable icons.
pub const MASKABLE_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// The full set of colours painted by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Rgba<u8>,
    pub address_bar: Rgba<u8>,
    pub controls: Rgba<u8>,
    pub address_field: Rgba<u8>,
    pub glyph: Rgba<u8>,
    pub maskable_background: Rgba<u8>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: ACCENT,
            address_bar: ACCENT_DARK,
            controls: CONTROL,
            address_field: ADDRESS_FIELD,
            glyph: GLYPH,
            maskable_background: MASKABLE_BACKGROUND,
        }
    }
}

impl Theme {
    /// Builds a theme around a different accent colour.
    ///
    /// The address bar shade is derived by lowering the accent's HSL lightness.
    pub fn from_accent(accent: Rgba<u8>) -> Self {
        Self {
            accent,
            address_bar: darken_color(accent, 0.04),
            ..Self::default()
        }
    }
}

/// Darkens an RGBA color by reducing its lightness. Alpha is preserved.
pub fn darken_color(color: Rgba<u8>, amount: f32) -> Rgba<u8> {
    let [r, g, b, a] = color.0;
    let rgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness - amount).max(0.0);
    let darkened: Srgb = hsl.into_color();
    Rgba([
        (darkened.red * 255.0).round() as u8,
        (darkened.green * 255.0).round() as u8,
        (darkened.blue * 255.0).round() as u8,
        a,
    ])
}
