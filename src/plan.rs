//! Export targets: which sizes go to which files.
//!
//! An [`ExportPlan`] is an ordered list of [`ExportTarget`]s. The standard
//! plan covers the Android launcher densities and the web icon set; callers
//! can build their own plan or load one from JSON.
//!
//! # Example
//!
//! ```
//! use browser_icon::ExportPlan;
//!
//! let plan = ExportPlan::standard();
//! assert_eq!(plan.len(), 10);
//!
//! let json = plan.to_json().unwrap();
//! let restored = ExportPlan::from_json(&json).unwrap();
//! assert_eq!(restored, plan);
//! ```

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::icon::Variant;

/// Default root of the Android resource tree.
pub const ANDROID_RES_DIR: &str = "android/app/src/main/res";

/// Default root of the web assets.
pub const WEB_DIR: &str = "web";

/// Sizes exported for the web manifest (plain and maskable).
pub const WEB_ICON_SIZES: [u32; 2] = [192, 512];

/// Size of the browser tab favicon.
pub const FAVICON_SIZE: u32 = 32;

// ============================================================================
// Density
// ============================================================================

/// Android screen density buckets for launcher icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    /// All buckets from lowest to highest resolution.
    pub const ALL: [Density; 5] = [
        Density::Mdpi,
        Density::Hdpi,
        Density::Xhdpi,
        Density::Xxhdpi,
        Density::Xxxhdpi,
    ];

    /// Launcher icon edge length for this bucket.
    pub fn icon_size(self) -> u32 {
        match self {
            Density::Mdpi => 48,
            Density::Hdpi => 72,
            Density::Xhdpi => 96,
            Density::Xxhdpi => 144,
            Density::Xxxhdpi => 192,
        }
    }

    /// Resource qualifier, e.g. `xhdpi`.
    pub fn name(self) -> &'static str {
        match self {
            Density::Mdpi => "mdpi",
            Density::Hdpi => "hdpi",
            Density::Xhdpi => "xhdpi",
            Density::Xxhdpi => "xxhdpi",
            Density::Xxxhdpi => "xxxhdpi",
        }
    }
}

// ============================================================================
// ExportTarget
// ============================================================================

/// One output file: a size, a variant and a path relative to the sink root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExportTarget {
    /// Human-readable name, used in logs.
    pub label: String,

    /// Edge length of the square icon in pixels.
    pub size: u32,

    /// Destination path, relative to the sink root.
    pub path: PathBuf,

    #[serde(default)]
    pub variant: Variant,
}

impl ExportTarget {
    /// Creates a standard-variant target.
    pub fn new(label: impl Into<String>, size: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            size,
            path: path.into(),
            variant: Variant::Standard,
        }
    }

    /// Sets the variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

// ============================================================================
// ExportPlan
// ============================================================================

/// An ordered list of export targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExportPlan {
    pub targets: Vec<ExportTarget>,
}

impl Default for ExportPlan {
    fn default() -> Self {
        Self::standard()
    }
}

impl ExportPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// The full set: Android launcher icons followed by the web icons.
    pub fn standard() -> Self {
        Self::android(ANDROID_RES_DIR).merge(Self::web(WEB_DIR))
    }

    /// One `mipmap-<density>/ic_launcher.png` per density bucket under `res_dir`.
    pub fn android(res_dir: impl AsRef<Path>) -> Self {
        let res_dir = res_dir.as_ref();
        let targets = Density::ALL
            .iter()
            .map(|density| {
                let dir = format!("mipmap-{}", density.name());
                let path = res_dir.join(&dir).join("ic_launcher.png");
                ExportTarget::new(dir, density.icon_size(), path)
            })
            .collect();
        Self { targets }
    }

    /// `icons/Icon-<n>.png`, `icons/Icon-maskable-<n>.png` and `favicon.png` under `web_dir`.
    pub fn web(web_dir: impl AsRef<Path>) -> Self {
        let web_dir = web_dir.as_ref();
        let icons_dir = web_dir.join("icons");
        let mut plan = Self::new();

        for size in WEB_ICON_SIZES {
            plan = plan
                .with_target(ExportTarget::new(
                    format!("web-icon-{size}"),
                    size,
                    icons_dir.join(format!("Icon-{size}.png")),
                ))
                .with_target(
                    ExportTarget::new(
                        format!("web-icon-maskable-{size}"),
                        size,
                        icons_dir.join(format!("Icon-maskable-{size}.png")),
                    )
                    .with_variant(Variant::Maskable),
                );
        }

        plan.with_target(ExportTarget::new(
            "favicon",
            FAVICON_SIZE,
            web_dir.join("favicon.png"),
        ))
    }

    /// Appends a target.
    pub fn with_target(mut self, target: ExportTarget) -> Self {
        self.targets.push(target);
        self
    }

    /// Appends every target of `other`.
    pub fn merge(mut self, other: ExportPlan) -> Self {
        self.targets.extend(other.targets);
        self
    }

    /// Returns the number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if the plan has no targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Returns an iterator over the targets in export order.
    pub fn iter(&self) -> impl Iterator<Item = &ExportTarget> {
        self.targets.iter()
    }

    /// Checks that every size is non-zero and no path is written twice.
    ///
    /// Paths are compared after dropping `.` components and repeated
    /// separators, so `web/favicon.png` and `./web//favicon.png` collide.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.size == 0 {
                return Err(Error::InvalidPlan(format!(
                    "target '{}' has zero size",
                    target.label
                )));
            }
            if !seen.insert(normalize(&target.path)) {
                return Err(Error::InvalidPlan(format!(
                    "path {} appears more than once",
                    target.path.display()
                )));
            }
        }
        Ok(())
    }

    /// Serializes the plan to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the plan to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a plan from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// JSON schema describing the plan format.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ExportPlan)
    }
}

/// Drops `.` components; `components()` already folds repeated separators.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

impl<'a> IntoIterator for &'a ExportPlan {
    type Item = &'a ExportTarget;
    type IntoIter = std::slice::Iter<'a, ExportTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}
