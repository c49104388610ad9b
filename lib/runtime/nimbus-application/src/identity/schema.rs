//! Label-schema reconciliation.
//!
//! Every family surfaced under one name must expose the same label keys. The
//! accumulated schema only ever grows, so keys seen in earlier cycles keep being
//! backfilled.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use tracing::debug;

use nimbus_domain::{EmittedRecord, LabelSet, Labels};

/// Family name to every label key observed for it.
pub type SchemaMap = HashMap<String, LabelSet>;

/// Widens `schema` with the keys in `records`, backfills every record to its
/// family's full key set and drops later records repeating a (name, labels) pair.
pub fn reconcile(records: Vec<EmittedRecord>, schema: &mut SchemaMap) -> Vec<EmittedRecord> {
    for record in &records {
        let keys = schema.entry(record.name.clone()).or_default();
        keys.extend(record.labels.keys().cloned());
    }

    let mut seen: HashSet<(String, Labels)> = HashSet::with_capacity(records.len());
    let before = records.len();
    let reconciled: Vec<EmittedRecord> = records
        .into_iter()
        .filter_map(|mut record| {
            if let Some(keys) = schema.get(&record.name) {
                for key in keys {
                    record.labels.entry(key.clone()).or_default();
                }
            }
            seen.insert((record.name.clone(), record.labels.clone())).then_some(record)
        })
        .collect();

    let dropped = before - reconciled.len();
    if dropped > 0 {
        debug!(target: "records", dropped, "removed duplicate records");
    }
    reconciled
}

/// A schema shared by concurrent scrape pipelines. Each reconcile holds the lock
/// for its whole read-modify-write.
#[derive(Debug, Default)]
pub struct LabelSchema {
    families: Mutex<SchemaMap>,
}

impl LabelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reconcile(&self, records: Vec<EmittedRecord>) -> Vec<EmittedRecord> {
        let mut families = self.families.lock();
        reconcile(records, &mut families)
    }

    pub fn labels_for(&self, family: &str) -> Option<LabelSet> {
        self.families.lock().get(family).cloned()
    }

    pub fn snapshot(&self) -> SchemaMap {
        self.families.lock().clone()
    }

    pub fn family_count(&self) -> usize {
        self.families.lock().len()
    }

    /// Forgets every family, typically between scrape cycles.
    pub fn reset(&self) {
        self.families.lock().clear();
    }
}
