//! Export driver: render every target of a plan and hand the PNGs to a sink.
//!
//! The driver is a single linear pass. Targets are written in plan order and
//! the first failure aborts the batch; files written before the failure stay
//! on disk. Re-running overwrites every target.
//!
//! # Example
//!
//! ```
//! use browser_icon::{ExportPlan, Exporter, MemorySink};
//!
//! let mut sink = MemorySink::new();
//! let report = Exporter::default()
//!     .export(&ExportPlan::standard(), &mut sink, |_| {})
//!     .unwrap();
//!
//! assert_eq!(report.len(), 10);
//! assert!(sink.get("web/favicon.png").is_some());
//! ```

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::plan::{ExportPlan, ExportTarget};
use crate::renderer::{CacheKey, IconRenderer};

// ============================================================================
// Sinks
// ============================================================================

/// Destination for encoded icons.
pub trait IconSink {
    /// Stores `png` at `path`, replacing anything already there.
    fn write_png(&mut self, path: &Path, png: &[u8]) -> Result<()>;
}

/// Writes icons below a root directory, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory targets are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl IconSink for DirSink {
    fn write_png(&mut self, path: &Path, png: &[u8]) -> Result<()> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&full, png).map_err(|e| Error::io(&full, e))
    }
}

/// Keeps icons in memory, keyed by path. Used for testing and previews.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes stored at `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }

    /// Returns the number of stored files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over stored files in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.files.iter().map(|(p, b)| (p.as_path(), b.as_slice()))
    }
}

impl IconSink for MemorySink {
    fn write_png(&mut self, path: &Path, png: &[u8]) -> Result<()> {
        self.files.insert(path.to_path_buf(), png.to_vec());
        Ok(())
    }
}

// ============================================================================
// Report
// ============================================================================

/// A file the exporter has written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenIcon {
    pub label: String,
    pub path: PathBuf,
    pub size: u32,
    /// Length of the encoded PNG.
    pub bytes: usize,
}

/// Every file written by one export run, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub written: Vec<WrittenIcon>,
}

impl ExportReport {
    pub fn len(&self) -> usize {
        self.written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    /// Total number of PNG bytes written.
    pub fn total_bytes(&self) -> usize {
        self.written.iter().map(|w| w.bytes).sum()
    }
}

// ============================================================================
// Exporter
// ============================================================================

/// Renders the targets of an [`ExportPlan`] and writes them to an [`IconSink`].
///
/// Encoded PNGs are kept per `(size, variant)`, so targets sharing a size
/// and variant are rendered and encoded once.
#[derive(Default)]
pub struct Exporter {
    renderer: IconRenderer,
    encoded: HashMap<CacheKey, Vec<u8>>,
}

impl Exporter {
    /// Creates an exporter drawing with the given renderer.
    pub fn new(renderer: IconRenderer) -> Self {
        Self {
            renderer,
            encoded: HashMap::new(),
        }
    }

    /// Returns the underlying renderer.
    pub fn renderer(&self) -> &IconRenderer {
        &self.renderer
    }

    /// Returns the number of cached PNG encodings.
    pub fn encoded(&self) -> usize {
        self.encoded.len()
    }

    /// Drops every cached render and encoding.
    pub fn clear_cache(&mut self) {
        self.renderer.clear_cache();
        self.encoded.clear();
    }

    /// Exports every target of `plan` into `sink`.
    ///
    /// `on_written` is called after each file is stored. The plan is
    /// validated before anything is written.
    pub fn export<S, F>(
        &mut self,
        plan: &ExportPlan,
        sink: &mut S,
        mut on_written: F,
    ) -> Result<ExportReport>
    where
        S: IconSink + ?Sized,
        F: FnMut(&WrittenIcon),
    {
        plan.validate()?;

        let mut report = ExportReport::default();
        for target in plan {
            let written = self.export_target(target, sink)?;
            log::info!(
                "wrote {} ({}px, {} bytes)",
                written.path.display(),
                written.size,
                written.bytes
            );
            on_written(&written);
            report.written.push(written);
        }

        log::debug!(
            "exported {} icons, {} bytes total",
            report.len(),
            report.total_bytes()
        );
        Ok(report)
    }

    /// Renders and writes a single target.
    pub fn export_target<S>(&mut self, target: &ExportTarget, sink: &mut S) -> Result<WrittenIcon>
    where
        S: IconSink + ?Sized,
    {
        let png = match self.encoded.entry(CacheKey::new(target.size, target.variant)) {
            Entry::Occupied(entry) => {
                log::debug!("reusing encoded {}px {:?} PNG", target.size, target.variant);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                let icon = self.renderer.render(target.size, target.variant)?;
                entry.insert(icon.to_png()?)
            }
        };
        sink.write_png(&target.path, png)?;

        Ok(WrittenIcon {
            label: target.label.clone(),
            path: target.path.clone(),
            size: target.size,
            bytes: png.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::Variant;
    use crate::theme::MASKABLE_BACKGROUND;

    fn decode(png: &[u8]) -> image::RgbaImage {
        image::load_from_memory(png).unwrap().to_rgba8()
    }

    #[test]
    fn standard_plan_into_memory() {
        let plan = ExportPlan::standard();
        let mut sink = MemorySink::new();
        let mut seen = Vec::new();

        let report = Exporter::default()
            .export(&plan, &mut sink, |w| seen.push(w.path.clone()))
            .unwrap();

        assert_eq!(report.len(), 10);
        assert_eq!(sink.len(), 10);
        assert!(sink.iter().all(|(_, png)| !png.is_empty()));
        let expected: Vec<_> = plan.iter().map(|t| t.path.clone()).collect();
        assert_eq!(seen, expected);

        for target in &plan {
            let png = sink.get(&target.path).unwrap();
            assert!(!png.is_empty());
            let img = decode(png);
            assert_eq!(img.dimensions(), (target.size, target.size), "{}", target.label);
        }
    }

    #[test]
    fn maskable_icons_differ_from_plain_ones() {
        let mut sink = MemorySink::new();
        Exporter::default()
            .export(&ExportPlan::standard(), &mut sink, |_| {})
            .unwrap();

        for size in [192, 512] {
            let plain = decode(sink.get(format!("web/icons/Icon-{size}.png")).unwrap());
            let maskable = decode(sink.get(format!("web/icons/Icon-maskable-{size}.png")).unwrap());
            assert_ne!(plain, maskable);
            assert_eq!(plain.get_pixel(0, 0).0[3], 0);
            assert_eq!(*maskable.get_pixel(0, 0), MASKABLE_BACKGROUND);
        }
    }

    #[test]
    fn same_size_targets_share_bytes() {
        let mut sink = MemorySink::new();
        Exporter::default()
            .export(&ExportPlan::standard(), &mut sink, |_| {})
            .unwrap();

        assert_eq!(
            sink.get("android/app/src/main/res/mipmap-xxxhdpi/ic_launcher.png"),
            sink.get("web/icons/Icon-192.png")
        );
    }

    #[test]
    fn invalid_plan_writes_nothing() {
        let plan = ExportPlan::new()
            .with_target(ExportTarget::new("ok", 16, "ok.png"))
            .with_target(ExportTarget::new("bad", 0, "bad.png"));
        let mut sink = MemorySink::new();

        let result = Exporter::default().export(&plan, &mut sink, |_| {});
        assert!(matches!(result, Err(Error::InvalidPlan(_))));
        assert!(sink.is_empty());
    }

    struct FailingSink {
        fail_on: PathBuf,
        written: usize,
    }

    impl IconSink for FailingSink {
        fn write_png(&mut self, path: &Path, _png: &[u8]) -> Result<()> {
            if path == self.fail_on {
                return Err(Error::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.written += 1;
            Ok(())
        }
    }

    #[test]
    fn first_failure_aborts_the_batch() {
        let plan = ExportPlan::standard();
        let mut sink = FailingSink {
            fail_on: PathBuf::from("web/icons/Icon-192.png"),
            written: 0,
        };

        let err = Exporter::default()
            .export(&plan, &mut sink, |_| {})
            .unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("Icon-192.png"));
        // The five Android icons went out before the failure.
        assert_eq!(sink.written, 5);
    }

    #[test]
    fn dir_sink_creates_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirSink::new(dir.path());
        assert_eq!(sink.root(), dir.path());

        let nested = Path::new("a/b/c/icon.png");
        sink.write_png(nested, b"first").unwrap();
        sink.write_png(nested, b"second").unwrap();

        assert_eq!(fs::read(dir.path().join(nested)).unwrap(), b"second");
    }

    #[test]
    fn export_to_directory_and_restore_deleted_file() {
        let dir = tempfile::tempdir().unwrap();
        let plan = ExportPlan::standard();
        let mut sink = DirSink::new(dir.path());
        let mut exporter = Exporter::default();

        exporter.export(&plan, &mut sink, |_| {}).unwrap();

        let snapshot: Vec<Vec<u8>> = plan
            .iter()
            .map(|t| fs::read(dir.path().join(&t.path)).unwrap())
            .collect();
        for (target, bytes) in plan.iter().zip(&snapshot) {
            assert!(!bytes.is_empty());
            let img = decode(bytes);
            assert_eq!(img.width(), target.size);
        }

        let victim = dir.path().join("android/app/src/main/res/mipmap-hdpi/ic_launcher.png");
        fs::remove_file(&victim).unwrap();
        assert!(!victim.exists());

        Exporter::default().export(&plan, &mut sink, |_| {}).unwrap();

        for (target, bytes) in plan.iter().zip(&snapshot) {
            assert_eq!(&fs::read(dir.path().join(&target.path)).unwrap(), bytes);
        }
    }

    #[test]
    fn dir_sink_reports_unwritable_root() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let mut sink = DirSink::new(&blocker);
        let err = sink.write_png(Path::new("icons/x.png"), b"png").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn renderer_cache_is_shared_across_targets() {
        let mut exporter = Exporter::default();
        let mut sink = MemorySink::new();
        exporter
            .export(&ExportPlan::standard(), &mut sink, |_| {})
            .unwrap();

        // 48, 72, 96, 144, 192, 512, 32 standard + 192, 512 maskable
        assert_eq!(exporter.renderer().cached(), 9);
    }

    #[test]
    fn shared_targets_are_encoded_once() {
        let mut exporter = Exporter::default();
        let mut sink = MemorySink::new();
        exporter
            .export(&ExportPlan::standard(), &mut sink, |_| {})
            .unwrap();

        // The xxxhdpi launcher icon and web/icons/Icon-192.png share one encoding
        assert_eq!(exporter.encoded(), 9);
        assert_eq!(
            sink.get("android/app/src/main/res/mipmap-xxxhdpi/ic_launcher.png"),
            sink.get("web/icons/Icon-192.png")
        );

        // A second run reuses every encoding
        exporter
            .export(&ExportPlan::standard(), &mut sink, |_| {})
            .unwrap();
        assert_eq!(exporter.encoded(), 9);

        exporter.clear_cache();
        assert_eq!(exporter.encoded(), 0);
        assert_eq!(exporter.renderer().cached(), 0);
    }

    #[test]
    fn custom_plan_with_single_target() {
        let plan = ExportPlan::new().with_target(
            ExportTarget::new("preview", 64, "preview.png").with_variant(Variant::Maskable),
        );
        let mut sink = MemorySink::new();
        let report = Exporter::default().export(&plan, &mut sink, |_| {}).unwrap();

        assert_eq!(report.written[0].label, "preview");
        assert_eq!(report.written[0].bytes, sink.get("preview.png").unwrap().len());
        assert_eq!(report.total_bytes(), report.written[0].bytes);
    }
}
