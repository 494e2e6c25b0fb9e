//! Eurovision vote loading and aggregation.
//!
//! The processed votes CSV has one row per (year, awarding country,
//! receiving country) with the points awarded. Rows are aggregated into a
//! directed network: country codes as node ids, summed points as edge
//! weights, and total received points as node weight.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{anyhow, Result};
use polars::prelude::*;

use crate::graph::{EdgeSpec, NodeSpec};

/// Display-name cleanups applied on load, long-form ISO names first.
const NAME_REPLACEMENTS: [(&str, &str); 6] = [
    ("Moldova (the Republic of)", "Moldova"),
    ("Netherlands (the)", "Netherlands"),
    ("Russian Federation (the)", "Russia"),
    (
        "United Kingdom of Great Britain and Northern Ireland (the)",
        "U.K.",
    ),
    ("Serbia and Montenegro", "Serbia & Montenegro"),
    ("Bosnia and Herzegovina", "Bosnia & Herzegovina"),
];

/// Flag-derived node colors keyed by display name. Countries missing here
/// fall back to the shared palette.
const COUNTRY_COLORS: [(&str, &str); 52] = [
    ("Albania", "#ED1C24"),
    ("Andorra", "#D52B1E"),
    ("Armenia", "#D62612"),
    ("Australia", "#00008B"),
    ("Austria", "#FF0000"),
    ("Azerbaijan", "#3F9D2F"),
    ("Belarus", "#D52B1E"),
    ("Belgium", "#ED1C24"),
    ("Bosnia and Herzegovina", "#0D5EAF"),
    ("Bulgaria", "#00966E"),
    ("Croatia", "#FF0000"),
    ("Cyprus", "#FF0000"),
    ("Czechia", "#D7141A"),
    ("Denmark", "#C60C30"),
    ("Estonia", "#4891D9"),
    ("Finland", "#004FA3"),
    ("France", "#0055A4"),
    ("Georgia", "#FF0000"),
    ("Germany", "#000000"),
    ("Greece", "#0D5EAF"),
    ("Hungary", "#C21F2C"),
    ("Iceland", "#02529C"),
    ("Ireland", "#169B62"),
    ("Israel", "#13277A"),
    ("Italy", "#009246"),
    ("Latvia", "#9D2A28"),
    ("Lithuania", "#FDB913"),
    ("Luxembourg", "#D52B1E"),
    ("Malta", "#CF142B"),
    ("Moldova", "#FFD700"),
    ("Monaco", "#D52B1E"),
    ("Montenegro", "#C8102E"),
    ("Morocco", "#006233"),
    ("Netherlands", "#21468B"),
    ("North Macedonia", "#D2A429"),
    ("Norway", "#EF2B2D"),
    ("Poland", "#D52B1E"),
    ("Portugal", "#FF0000"),
    ("Romania", "#002B7F"),
    ("Russia", "#D52B1E"),
    ("San Marino", "#0033A0"),
    ("Serbia", "#D52B1E"),
    ("Serbia and Montenegro", "#D52B1E"),
    ("Slovakia", "#EE1C25"),
    ("Slovenia", "#007A2E"),
    ("Spain", "#C60B1E"),
    ("Sweden", "#0051BA"),
    ("Switzerland", "#FF0000"),
    ("Turkey", "#E30A17"),
    ("U.K.", "#00247D"),
    ("Ukraine", "#FFD500"),
    ("Yugoslavia", "#ED1C24"),
];

/// One vote row after load-time cleanup.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteRecord {
    pub year: String,
    pub from_code: String,
    pub from_name: String,
    pub to_code: String,
    pub to_name: String,
    pub points: f64,
}

/// Loads the processed votes CSV. All columns are read as strings and
/// parsed on the Rust side; codes are upper-cased and display names run
/// through the replacement table.
pub fn load_votes(path: &str) -> Result<Vec<VoteRecord>> {
    log::info!("Reading votes CSV: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;

    log::info!("Loaded {} vote rows", df.height());

    let year_col = df.column("year")?.str()?;
    let from_code_col = df.column("from_country")?.str()?;
    let to_code_col = df.column("to_country")?.str()?;
    let from_name_col = df.column("from_country_name")?.str()?;
    let to_name_col = df.column("to_country_name")?.str()?;
    let points_col = df.column("total_points")?.str()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let year = year_col.get(i).unwrap_or_default();
        let from_code = from_code_col.get(i).unwrap_or_default();
        let to_code = to_code_col.get(i).unwrap_or_default();
        if year.is_empty() || from_code.is_empty() || to_code.is_empty() {
            continue;
        }

        let points: f64 = points_col
            .get(i)
            .unwrap_or("0")
            .trim()
            .parse()
            .unwrap_or(0.0);

        records.push(VoteRecord {
            year: year.to_string(),
            from_code: from_code.to_uppercase(),
            from_name: replace_name(from_name_col.get(i).unwrap_or_default()),
            to_code: to_code.to_uppercase(),
            to_name: replace_name(to_name_col.get(i).unwrap_or_default()),
            points,
        });
    }

    Ok(records)
}

/// Aggregates vote rows for the selected years (empty selection = all
/// years) into builder declarations.
///
/// Edges sum points per ordered (from, to) pair, so repeated pairings
/// across the selection collapse into one weighted edge. Nodes are the
/// union of every code that appears on either end; a country that only
/// awards points gets node weight 0. Output is lexicographic by code.
pub fn aggregate_relations(
    records: &[VoteRecord],
    years: &[String],
) -> (Vec<NodeSpec>, Vec<EdgeSpec>) {
    let mut pair_points: BTreeMap<(String, String), f64> = BTreeMap::new();
    let mut received: BTreeMap<String, f64> = BTreeMap::new();
    let mut names: HashMap<String, String> = HashMap::new();

    for record in records {
        if !years.is_empty() && !years.contains(&record.year) {
            continue;
        }

        *pair_points
            .entry((record.from_code.clone(), record.to_code.clone()))
            .or_insert(0.0) += record.points;

        names
            .entry(record.from_code.clone())
            .or_insert_with(|| record.from_name.clone());
        names
            .entry(record.to_code.clone())
            .or_insert_with(|| record.to_name.clone());

        received.entry(record.from_code.clone()).or_insert(0.0);
        *received.entry(record.to_code.clone()).or_insert(0.0) += record.points;
    }

    let nodes = received
        .iter()
        .map(|(code, &total)| {
            let label = names.get(code).cloned().unwrap_or_else(|| code.clone());
            let mut spec = NodeSpec::new(code.clone(), total).with_label(label.clone());
            if let Some(color) = country_color(&label) {
                spec = spec.with_color(color);
            }
            spec
        })
        .collect();

    let edges = pair_points
        .into_iter()
        .map(|((from, to), points)| EdgeSpec::new(from, to, points))
        .collect();

    (nodes, edges)
}

fn replace_name(name: &str) -> String {
    for (long, short) in NAME_REPLACEMENTS {
        if name == long {
            return short.to_string();
        }
    }
    name.to_string()
}

fn country_color(name: &str) -> Option<&'static str> {
    COUNTRY_COLORS
        .iter()
        .find(|(country, _)| *country == name)
        .map(|(_, hex)| *hex)
}
