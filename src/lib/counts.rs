use crate::model::Observation;
use ahash::AHashMap as HashMap;
use anyhow::{Result, anyhow, bail};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::io::Read as IoRead;

/// One row of a variant count table: observed successes out of trials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRecord {
    pub variant: String,
    pub successes: u64,
    pub trials: u64,
}

impl CountRecord {
    pub fn observation(&self) -> Result<Observation> {
        Observation::new(self.successes, self.trials)
    }
}

/// Reads a headered tab-separated count table: `variant successes trials`.
///
/// Every record is validated on the way in; a malformed or inconsistent row
/// fails the whole read rather than being silently dropped.
pub fn read_count_records<R: IoRead>(inner: R) -> Result<Vec<CountRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(inner);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: CountRecord =
            result.map_err(|e| anyhow!("Could not parse count record: {}", e))?;
        if record.variant.is_empty() {
            bail!("Count record with empty variant name");
        }
        if record.successes > record.trials {
            bail!(
                "Variant '{}' has successes ({}) above trials ({})",
                record.variant,
                record.successes,
                record.trials
            );
        }
        records.push(record);
    }
    Ok(records)
}

/// Sums duplicate variant rows into one record per variant.
/// First-seen order is preserved.
pub fn merge_by_variant(records: &[CountRecord]) -> Vec<CountRecord> {
    let mut merged: Vec<CountRecord> = Vec::new();
    let mut index_by_variant: HashMap<String, usize> = HashMap::new();
    for record in records {
        match index_by_variant.get(&record.variant) {
            Some(&idx) => {
                merged[idx].successes += record.successes;
                merged[idx].trials += record.trials;
            }
            None => {
                index_by_variant.insert(record.variant.clone(), merged.len());
                merged.push(record.clone());
            }
        }
    }
    merged
}
