//! Visualization generation module

use anyhow::Result;
use petgraph::EdgeType;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::graph::Network;

/// Generate the interactive network view for a built graph
pub fn export_network<Ty: EdgeType>(net: &Network<Ty>, output_dir: &str) -> Result<()> {
    log::info!(
        "Exporting network view ({} nodes, {} edges)",
        net.node_count(),
        net.edge_count()
    );

    // Create visualizations directory
    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    let (nodes, edges) = network_datasets(net);
    write_network_data(&nodes, &edges, &viz_dir)?;
    write_network_page(&nodes, &edges, net.is_directed(), &viz_dir)?;

    log::info!("Visualization generated successfully");

    Ok(())
}

/// Build the renderer-facing node and edge records
fn network_datasets<Ty: EdgeType>(
    net: &Network<Ty>,
) -> (Vec<serde_json::Value>, Vec<serde_json::Value>) {
    let nodes = net
        .node_indices()
        .map(|ix| {
            let attrs = net.attrs(ix);
            json!({
                "id": attrs.id,
                "label": attrs.label,
                "value": attrs.weight,
                "color": attrs.color,
            })
        })
        .collect();

    let edges = net
        .edges()
        .map(|(u, v, w)| {
            json!({
                "from": net.attrs(u).id,
                "to": net.attrs(v).id,
                "value": w,
            })
        })
        .collect();

    (nodes, edges)
}

/// Write the raw network data for external tools
fn write_network_data(
    nodes: &[serde_json::Value],
    edges: &[serde_json::Value],
    viz_dir: &Path,
) -> Result<()> {
    log::info!("Writing network data file");

    let path = viz_dir.join("network.json");
    let mut file = File::create(path)?;

    let network = json!({
        "nodes": nodes,
        "edges": edges,
    });
    file.write_all(to_string_pretty(&network)?.as_bytes())?;

    Ok(())
}

/// Write a self-contained HTML page rendering the network with vis-network
fn write_network_page(
    nodes: &[serde_json::Value],
    edges: &[serde_json::Value],
    directed: bool,
    viz_dir: &Path,
) -> Result<()> {
    log::info!("Writing interactive HTML page");

    let path = viz_dir.join("network.html");
    let mut file = File::create(path)?;

    writeln!(file, "<!DOCTYPE html>")?;
    writeln!(file, "<html lang=\"en\">")?;
    writeln!(file, "<head>")?;
    writeln!(file, "  <meta charset=\"UTF-8\">")?;
    writeln!(file, "  <title>Network Analysis</title>")?;
    writeln!(
        file,
        "  <script src=\"https://unpkg.com/vis-network/standalone/umd/vis-network.min.js\"></script>"
    )?;
    writeln!(file, "  <style>")?;
    writeln!(
        file,
        "    body {{ margin: 0; background-color: #222222; }}"
    )?;
    writeln!(
        file,
        "    #network {{ width: 100%; height: 800px; border: 1px solid #444; }}"
    )?;
    writeln!(file, "  </style>")?;
    writeln!(file, "</head>")?;
    writeln!(file, "<body>")?;
    writeln!(file, "  <div id=\"network\"></div>")?;
    writeln!(file, "  <script>")?;
    writeln!(
        file,
        "    const nodes = new vis.DataSet({});",
        serde_json::to_string(&nodes)?
    )?;
    writeln!(
        file,
        "    const edges = new vis.DataSet({});",
        serde_json::to_string(&edges)?
    )?;
    writeln!(file, "    const options = {{")?;
    writeln!(file, "      nodes: {{ font: {{ color: \"white\" }} }},")?;
    writeln!(
        file,
        "      edges: {{ arrows: {{ to: {{ enabled: {} }} }} }},",
        directed
    )?;
    writeln!(file, "      physics: {{")?;
    writeln!(file, "        solver: \"repulsion\",")?;
    writeln!(file, "        repulsion: {{")?;
    writeln!(file, "          nodeDistance: 420,")?;
    writeln!(file, "          centralGravity: 0.33,")?;
    writeln!(file, "          springLength: 110,")?;
    writeln!(file, "          springConstant: 0.10,")?;
    writeln!(file, "          damping: 0.95")?;
    writeln!(file, "        }}")?;
    writeln!(file, "      }}")?;
    writeln!(file, "    }};")?;
    writeln!(
        file,
        "    new vis.Network(document.getElementById(\"network\"), {{ nodes, edges }}, options);"
    )?;
    writeln!(file, "  </script>")?;
    writeln!(file, "</body>")?;
    writeln!(file, "</html>")?;

    Ok(())
}
