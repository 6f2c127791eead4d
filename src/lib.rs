//! browser-icon: procedural browser-window app icon
//!
//! This crate draws a stylized browser window (address bar, window controls
//! and a globe glyph) at any square size and exports it into the Android
//! launcher and web icon layouts.
//!
//! Rendering is split in two: [`IconLayout`] derives every dimension from the
//! canvas size and produces an ordered list of [`Shape`] descriptors, and
//! [`Canvas`] paints those descriptors. Exporting is driven by an
//! [`ExportPlan`] written through an [`IconSink`].
//!
//! # Example
//!
//! ```
//! use browser_icon::{render_icon, IconLayout};
//!
//! let layout = IconLayout::compute(48);
//! assert_eq!(layout.address_bar.height, layout.browser.height / 5);
//!
//! let icon = render_icon(48).unwrap();
//! assert_eq!(icon.dimensions().width, 48);
//! ```
//!
//! # Exporting
//!
//! ```no_run
//! use browser_icon::{DirSink, ExportPlan, Exporter};
//!
//! let mut sink = DirSink::new(".");
//! Exporter::default()
//!     .export(&ExportPlan::standard(), &mut sink, |written| {
//!         println!("Created {}", written.path.display());
//!     })
//!     .unwrap();
//! ```

mod canvas;
mod error;
mod export;
mod icon;
mod layout;
mod plan;
mod renderer;
mod shape;
mod theme;

pub use canvas::{Canvas, MAX_CANVAS_SIZE};
pub use error::{Error, Result};
pub use export::{DirSink, ExportReport, Exporter, IconSink, MemorySink, WrittenIcon};
pub use icon::{IconImage, PointPx, RectPx, SizePx, Variant};
pub use layout::IconLayout;
pub use plan::{
    ANDROID_RES_DIR, Density, ExportPlan, ExportTarget, FAVICON_SIZE, WEB_DIR, WEB_ICON_SIZES,
};
pub use renderer::{CacheKey, IconRenderer, draw, render_icon};
pub use shape::{Outline, Shape};
pub use theme::{Theme, darken_color};
