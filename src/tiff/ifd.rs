//! Image File Directory (IFD) structures for the writer
//!
//! A written TIFF is a chain of IFDs, one per page, each a sorted list of
//! tag entries. The writer only ever emits values that fit inline in the
//! 4-byte value field, which keeps offset planning trivial.

use std::collections::HashSet;
use std::fmt;

/// Represents an entry in an Image File Directory
#[derive(Debug, Clone)]
pub struct IfdEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u32,
    /// Inline value (left-justified in the 4-byte field when shorter)
    pub value: u32,
}

impl IfdEntry {
    /// Creates a new IFD entry
    pub fn new(tag: u16, field_type: u16, count: u32, value: u32) -> Self {
        Self {
            tag,
            field_type,
            count,
            value,
        }
    }
}

/// Represents one Image File Directory in the output file
#[derive(Debug, Clone, Default)]
pub struct Ifd {
    /// Entries in this IFD, in insertion order until serialization
    pub entries: Vec<IfdEntry>,
}

impl Ifd {
    /// Creates a new empty IFD
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds an entry to this IFD
    pub fn add_entry(&mut self, entry: IfdEntry) {
        self.entries.push(entry);
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.entries.iter().any(|e| e.tag == tag)
    }

    /// Gets a tag's inline value
    pub fn get_tag_value(&self, tag: u16) -> Option<u32> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| e.value)
    }

    /// Gets the number of entries in this IFD
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries sorted by tag id with duplicates removed
    ///
    /// The TIFF specification requires ascending tag order and unique
    /// tags; the last occurrence of a duplicated tag wins.
    pub fn sorted_unique_entries(&self) -> Vec<IfdEntry> {
        let mut seen = HashSet::new();
        let mut unique: Vec<IfdEntry> = self.entries.iter().rev()
            .filter(|entry| seen.insert(entry.tag))
            .cloned()
            .collect();

        unique.sort_by_key(|entry| entry.tag);
        unique
    }

    /// Serialized size of this IFD in bytes
    ///
    /// Entry count word, twelve bytes per entry, next-IFD pointer.
    pub fn serialized_size(&self) -> u64 {
        2 + 12 * self.sorted_unique_entries().len() as u64 + 4
    }
}

impl fmt::Display for Ifd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD with {} entries", self.entries.len())?;
        for entry in &self.entries {
            writeln!(f, "  Tag {}: type={}, count={}, value={}",
                     entry.tag, entry.field_type, entry.count, entry.value)?;
        }
        Ok(())
    }
}
