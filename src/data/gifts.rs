//! Gift record loading for the focus-area co-occurrence network.
//!
//! The gifts file is a JSON array of grant documents. Each document's
//! declared focus areas form one co-occurrence group; everything else in
//! the document is ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// One gift document, reduced to the field the network needs.
#[derive(Debug, Clone, Deserialize)]
pub struct GiftRecord {
    /// Focus areas declared by the receiving organization. Missing in some
    /// documents, hence the default.
    #[serde(default)]
    pub org_reported_focus_areas: Vec<String>,
}

/// Loads the gifts JSON array.
pub fn load_gifts(path: &str) -> Result<Vec<GiftRecord>> {
    log::info!("Reading gifts JSON: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let file = File::open(path)?;
    let records: Vec<GiftRecord> = serde_json::from_reader(BufReader::new(file))?;
    log::info!("Loaded {} gift records", records.len());
    Ok(records)
}

/// Extracts one group per record from its declared focus areas. Records
/// without any areas are skipped; single-area records are kept since they
/// still contribute node weight.
pub fn focus_area_groups(records: &[GiftRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .filter(|r| !r.org_reported_focus_areas.is_empty())
        .map(|r| r.org_reported_focus_areas.clone())
        .collect()
}
