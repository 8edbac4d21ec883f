//! Manifest loading and selection filtering
//!
//! This module reads the channel manifest CSV and runs the first pass of
//! the pipeline: deciding which image files the batch will process, based
//! on the channel-name filter and per-file existence checks.

use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};
use regex::Regex;

use crate::czi::errors::{CziError, CziResult};
use super::record::ChannelRecord;

/// Loaded channel manifest
#[derive(Debug)]
pub struct Manifest {
    /// Path the manifest was loaded from, kept for reporting
    path: String,
    /// All rows in file order
    records: Vec<ChannelRecord>,
}

impl Manifest {
    /// Loads a manifest CSV file
    ///
    /// The file must carry a header row naming the four columns; rows that
    /// fail to deserialize abort the load, since a half-read manifest would
    /// silently drop work.
    ///
    /// # Arguments
    /// * `path` - Path to the manifest CSV file
    pub fn load(path: &str) -> CziResult<Self> {
        info!("Loading manifest: {}", path);

        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| CziError::InvalidManifest(format!("{}: {}", path, e)))?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: ChannelRecord = row
                .map_err(|e| CziError::InvalidManifest(format!("{}: {}", path, e)))?;
            records.push(record);
        }

        info!("Manifest has {} rows", records.len());

        Ok(Manifest {
            path: path.to_string(),
            records,
        })
    }

    /// Path the manifest was loaded from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All manifest rows in file order
    pub fn records(&self) -> &[ChannelRecord] {
        &self.records
    }

    /// Number of rows in the manifest
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the manifest holds no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Channel-name filter for the selection pass
///
/// `ALL` selects every row. Anything else matches a row when it equals the
/// channel name exactly, or when it is a valid regular expression matching
/// the whole name. Plain stain names like `DAPI` behave identically under
/// both rules.
#[derive(Debug)]
pub struct ChannelFilter {
    spec: String,
    pattern: Option<Regex>,
}

/// Filter spec selecting every channel
pub const ALL_CHANNELS: &str = "ALL";

impl ChannelFilter {
    /// Builds a filter from the CLI/config spec string
    pub fn new(spec: &str) -> Self {
        let pattern = if spec == ALL_CHANNELS {
            None
        } else {
            match Regex::new(&format!("^(?:{})$", spec)) {
                Ok(re) => Some(re),
                Err(e) => {
                    // Stain names with regex metacharacters still work via
                    // the exact-match rule
                    warn!("Channel filter {} is not a valid pattern ({}), using exact match only",
                          spec, e);
                    None
                }
            }
        };

        ChannelFilter {
            spec: spec.to_string(),
            pattern,
        }
    }

    /// Whether this filter selects every channel
    pub fn is_all(&self) -> bool {
        self.spec == ALL_CHANNELS
    }

    /// The filter string as given, for reporting
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Whether a channel name passes the filter
    pub fn matches(&self, channel_name: &str) -> bool {
        if self.is_all() || channel_name == self.spec {
            return true;
        }

        self.pattern.as_ref()
            .map(|re| re.is_match(channel_name))
            .unwrap_or(false)
    }
}

/// Result of the selection pass over the manifest
#[derive(Debug)]
pub struct Selection {
    /// Prefixes of the image files that exist, in first-seen order
    prefixes: Vec<String>,
    /// Fast membership lookup over `prefixes`
    prefix_set: HashSet<String>,
    /// Number of manifest images that were not found on disk
    missing: usize,
}

impl Selection {
    /// Runs the selection pass: one walk over the manifest rows
    ///
    /// A row contributes its image to the selection when its channel name
    /// passes the filter and the file exists under the data directory.
    /// Each image file is checked once; missing files are warned about
    /// and tallied.
    ///
    /// # Arguments
    /// * `manifest` - The loaded manifest
    /// * `filter` - Channel-name filter
    /// * `data_path` - Root directory the manifest folders are relative to
    pub fn build(manifest: &Manifest, filter: &ChannelFilter, data_path: &Path) -> Self {
        let mut prefixes = Vec::new();
        let mut prefix_set = HashSet::new();
        let mut missing_files = HashSet::new();

        for record in manifest.records() {
            if !filter.matches(&record.channel_name) {
                continue;
            }

            let prefix = record.prefix();
            if prefix_set.contains(&prefix) {
                continue;
            }

            let path = data_path.join(record.relative_path());
            if path.exists() {
                prefix_set.insert(prefix.clone());
                prefixes.push(prefix);
            } else if missing_files.insert(path.clone()) {
                warn!("File {} does not exist", path.display());
            }
        }

        let missing = missing_files.len();

        Selection {
            prefixes,
            prefix_set,
            missing,
        }
    }

    /// Whether an image prefix was selected
    pub fn contains(&self, prefix: &str) -> bool {
        self.prefix_set.contains(prefix)
    }

    /// Selected prefixes in first-seen order
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Number of image files found
    pub fn found(&self) -> usize {
        self.prefixes.len()
    }

    /// Number of image files that were missing on disk
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Logs the `found/total` line the operator expects after the pass
    pub fn log_summary(&self, manifest: &Manifest, filter: &ChannelFilter) {
        let total = self.found() + self.missing();
        if filter.is_all() {
            info!("{}/{} images found in {}", self.found(), total, manifest.path());
        } else {
            info!("{}/{} images found in {} with channel name {}",
                  self.found(), total, manifest.path(), filter.spec());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn filter_all_matches_everything() {
        let filter = ChannelFilter::new(ALL_CHANNELS);
        assert!(filter.is_all());
        assert!(filter.matches("DAPI"));
        assert!(filter.matches("anything"));
    }

    #[test]
    fn filter_exact_name() {
        let filter = ChannelFilter::new("DAPI");
        assert!(filter.matches("DAPI"));
        assert!(!filter.matches("Actin"));
        assert!(!filter.matches("DAPI2"));
    }

    #[test]
    fn filter_accepts_patterns() {
        let filter = ChannelFilter::new("DAPI|Hoechst");
        assert!(filter.matches("DAPI"));
        assert!(filter.matches("Hoechst"));
        assert!(!filter.matches("Actin"));
    }

    #[test]
    fn filter_metacharacter_name_falls_back_to_exact() {
        // "CD4+(" is not a valid pattern but must still match itself
        let filter = ChannelFilter::new("CD4+(");
        assert!(filter.matches("CD4+("));
        assert!(!filter.matches("CD4"));
    }

    #[test]
    fn selection_checks_existence_and_dedups() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("plate1");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("a.czi"), b"stub").unwrap();

        let manifest_path = dir.path().join("manifest.csv");
        fs::write(&manifest_path, "\
folder,image,channel_nr,channel_name\n\
plate1,a.czi,0,DAPI\n\
plate1,a.czi,1,Actin\n\
plate1,b.czi,0,DAPI\n\
plate1,b.czi,1,Actin\n").unwrap();

        let manifest = Manifest::load(manifest_path.to_str().unwrap()).unwrap();
        let filter = ChannelFilter::new(ALL_CHANNELS);
        let selection = Selection::build(&manifest, &filter, dir.path());

        assert_eq!(selection.prefixes(), ["a"]);
        assert_eq!(selection.found(), 1);
        // b.czi is missing and counted once even though two rows name it
        assert_eq!(selection.missing(), 1);
        assert!(selection.contains("a"));
        assert!(!selection.contains("b"));
    }

    #[test]
    fn selection_honors_channel_filter() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("plate1");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("a.czi"), b"stub").unwrap();

        let manifest_path = dir.path().join("manifest.csv");
        fs::write(&manifest_path, "\
folder,image,channel_nr,channel_name\n\
plate1,a.czi,0,DAPI\n\
plate1,a.czi,1,Actin\n").unwrap();

        let manifest = Manifest::load(manifest_path.to_str().unwrap()).unwrap();
        let filter = ChannelFilter::new("Missing");
        let selection = Selection::build(&manifest, &filter, dir.path());

        assert_eq!(selection.found(), 0);
        assert_eq!(selection.missing(), 0);
    }
}
