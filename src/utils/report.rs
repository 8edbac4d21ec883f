//! Batch export reporting
//!
//! Tracks what a batch run produced: export counts per channel name and
//! the list of image prefixes that got at least one output file. The
//! prefix list is written to `all.csv` in the output directory so
//! downstream tooling can enumerate the processed images.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use log::info;

use crate::czi::errors::{CziError, CziResult};

/// Running tallies for one batch run
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Exported image count per channel name, ordered for stable output
    counts: BTreeMap<String, u64>,
    /// Image prefixes with at least one written file, first-written order
    prefixes: Vec<String>,
    /// Membership lookup over `prefixes`
    prefix_set: HashSet<String>,
    /// Manifest rows that were skipped with a warning
    skipped: u64,
}

impl ExportReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one successful channel export
    ///
    /// # Arguments
    /// * `channel_name` - Channel name from the manifest row
    /// * `prefix` - Image prefix the output file(s) belong to
    pub fn record_export(&mut self, channel_name: &str, prefix: &str) {
        *self.counts.entry(channel_name.to_string()).or_insert(0) += 1;

        if self.prefix_set.insert(prefix.to_string()) {
            self.prefixes.push(prefix.to_string());
        }
    }

    /// Records a manifest row that was skipped
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Export count for one channel name
    pub fn count(&self, channel_name: &str) -> u64 {
        self.counts.get(channel_name).copied().unwrap_or(0)
    }

    /// Number of distinct image files that produced output
    pub fn image_count(&self) -> usize {
        self.prefixes.len()
    }

    /// Number of rows skipped with a warning
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Prefixes of the images that produced output, in first-written order
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Logs the final per-channel summary
    pub fn log_summary(&self) {
        info!("Exported:");
        for (channel, count) in &self.counts {
            info!("{} {} channel images", count, channel);
        }
        info!("from {} image files.", self.prefixes.len());

        if self.skipped > 0 {
            info!("{} manifest rows skipped, see warnings above", self.skipped);
        }
    }

    /// Writes the prefix manifest `all.csv` into the output directory
    ///
    /// One prefix per line, no header, first-written order.
    ///
    /// # Arguments
    /// * `output_dir` - Directory the batch wrote its images into
    ///
    /// # Returns
    /// The path of the written manifest
    pub fn write_prefix_manifest(&self, output_dir: &Path) -> CziResult<PathBuf> {
        let path = output_dir.join("all.csv");

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(|e| CziError::GenericError(format!("Cannot write {}: {}", path.display(), e)))?;

        for prefix in &self.prefixes {
            writer.write_record([prefix.as_str()])
                .map_err(|e| CziError::GenericError(format!("Cannot write {}: {}", path.display(), e)))?;
        }

        writer.flush()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn counts_accumulate_per_channel() {
        let mut report = ExportReport::new();
        report.record_export("DAPI", "a");
        report.record_export("DAPI", "b");
        report.record_export("Actin", "a");

        assert_eq!(report.count("DAPI"), 2);
        assert_eq!(report.count("Actin"), 1);
        assert_eq!(report.count("GFP"), 0);
        assert_eq!(report.image_count(), 2);
    }

    #[test]
    fn prefixes_keep_first_written_order_without_duplicates() {
        let mut report = ExportReport::new();
        report.record_export("DAPI", "b");
        report.record_export("Actin", "a");
        report.record_export("Actin", "b");

        assert_eq!(report.prefixes(), ["b", "a"]);
    }

    #[test]
    fn prefix_manifest_is_one_prefix_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = ExportReport::new();
        report.record_export("DAPI", "img1");
        report.record_export("DAPI", "img2");

        let path = report.write_prefix_manifest(dir.path()).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, "img1\nimg2\n");
    }
}
