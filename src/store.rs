//! Reduction store: distinct filter records with the markers that produced them

use std::collections::HashMap;
use std::fmt;

use crate::config::MarkerOrder;
use crate::record::FilterRecord;

/// Distinct provenance markers, kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvenanceSet {
    markers: Vec<String>,
}

impl ProvenanceSet {
    /// Add a marker; returns false if it was already present
    pub fn insert(&mut self, marker: impl Into<String>) -> bool {
        let marker = marker.into();
        if self.markers.contains(&marker) {
            return false;
        }
        self.markers.push(marker);
        true
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }

    /// Markers in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    /// Bracketed, comma separated list, e.g. `[module-a, module-b]`
    pub fn render(&self, order: MarkerOrder) -> String {
        let mut markers: Vec<&str> = self.iter().collect();
        if order == MarkerOrder::Sorted {
            markers.sort_unstable();
        }
        format!("[{}]", markers.join(", "))
    }
}

impl fmt::Display for ProvenanceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(MarkerOrder::FirstSeen))
    }
}

/// Insertion-ordered map from filter record to provenance
#[derive(Debug, Clone, Default)]
pub struct ReductionStore {
    index: HashMap<FilterRecord, usize>,
    entries: Vec<(FilterRecord, ProvenanceSet)>,
    occurrences: usize,
}

impl ReductionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `record` under `marker`
    ///
    /// Returns true if the record had not been seen before.
    pub fn record_occurrence(&mut self, record: FilterRecord, marker: impl Into<String>) -> bool {
        self.occurrences += 1;
        if let Some(&slot) = self.index.get(&record) {
            self.entries[slot].1.insert(marker);
            return false;
        }

        let mut markers = ProvenanceSet::default();
        markers.insert(marker);
        self.index.insert(record.clone(), self.entries.len());
        self.entries.push((record, markers));
        true
    }

    /// Number of distinct records
    pub fn distinct_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of records seen, duplicates included
    pub fn total_occurrences(&self) -> usize {
        self.occurrences
    }

    /// Markers recorded for `record`, if it has been seen
    pub fn provenance(&self, record: &FilterRecord) -> Option<&ProvenanceSet> {
        self.index.get(record).map(|&slot| &self.entries[slot].1)
    }

    /// Distinct records in order of first occurrence
    pub fn entries(&self) -> impl Iterator<Item = (&FilterRecord, &ProvenanceSet)> {
        self.entries.iter().map(|(record, markers)| (record, markers))
    }
}
