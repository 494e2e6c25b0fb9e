//! Results persistence module

use anyhow::Result;
use petgraph::EdgeType;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::analysis::{CentralityReport, Clique, Community};
use crate::graph::Network;

/// Save analysis results to the specified directory
pub fn save_report<Ty: EdgeType>(
    net: &Network<Ty>,
    report: &CentralityReport,
    communities: &[Community],
    cliques: &[Clique],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving analysis results to {}", output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(net, report, communities, cliques, output_dir)?;
    save_rankings(report, output_dir)?;
    save_communities(communities, output_dir)?;
    save_cliques(cliques, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save graph and result counts
fn save_summary<Ty: EdgeType>(
    net: &Network<Ty>,
    report: &CentralityReport,
    communities: &[Community],
    cliques: &[Clique],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let summary = json!({
        "graph": {
            "node_count": net.node_count(),
            "edge_count": net.edge_count(),
            "directed": net.is_directed(),
            "total_edge_weight": net.total_edge_weight(),
        },
        "results": {
            "measures_computed": report.columns.len(),
            "measures_failed": report.failures.len(),
            "community_count": communities.len(),
            "largest_community_size": communities.iter().map(|c| c.len()).max().unwrap_or(0),
            "clique_count": cliques.len(),
            "largest_clique_size": cliques.first().map_or(0, |c| c.len()),
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save the per-measure ranking columns and the failures list
fn save_rankings(report: &CentralityReport, output_dir: &str) -> Result<()> {
    log::info!("Saving centrality rankings");

    let path = Path::new(output_dir).join("rankings.json");
    let mut file = File::create(path)?;

    let rankings = json!({
        "columns": report.columns,
        "failures": report.failures,
    });

    file.write_all(to_string_pretty(&rankings)?.as_bytes())?;

    Ok(())
}

/// Save detected communities with their display summaries
fn save_communities(communities: &[Community], output_dir: &str) -> Result<()> {
    log::info!("Saving {} communities", communities.len());

    let path = Path::new(output_dir).join("communities.json");
    let mut file = File::create(path)?;

    let communities_json = json!({
        "communities": communities.iter().map(|c| {
            json!({
                "members": c.members,
                "summary": c.summary(),
                "size": c.len(),
                "weight_inside": c.weight_inside,
                "contribution": c.contribution,
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&communities_json)?.as_bytes())?;

    Ok(())
}

/// Save the largest maximal cliques
fn save_cliques(cliques: &[Clique], output_dir: &str) -> Result<()> {
    log::info!("Saving {} cliques", cliques.len());

    let path = Path::new(output_dir).join("cliques.json");
    let mut file = File::create(path)?;

    let cliques_json = json!({
        "cliques": cliques.iter().map(|c| {
            json!({
                "members": c.members,
                "summary": c.summary(),
                "size": c.len(),
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&cliques_json)?.as_bytes())?;

    Ok(())
}
