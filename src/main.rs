use anyhow::Result;
use clap::{Parser, ValueEnum};
use petgraph::EdgeType;

mod analysis;
mod config;
mod data;
mod error;
mod format;
mod graph;
mod storage;
mod viz;

use analysis::CentralityKind;
use config::Config;
use graph::{build_network, DirectedNetwork, Network, UndirectedNetwork};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Dataset {
    /// Eurovision-style point awards (directed network)
    Votes,
    /// Grant focus-area co-occurrence (undirected network)
    Gifts,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Measure {
    Eigenvector,
    Pagerank,
    Betweenness,
    Closeness,
    Degree,
    SecondOrder,
}

impl From<Measure> for CentralityKind {
    fn from(measure: Measure) -> Self {
        match measure {
            Measure::Eigenvector => CentralityKind::Eigenvector,
            Measure::Pagerank => CentralityKind::PageRank,
            Measure::Betweenness => CentralityKind::Betweenness,
            Measure::Closeness => CentralityKind::Closeness,
            Measure::Degree => CentralityKind::Degree,
            Measure::SecondOrder => CentralityKind::SecondOrder,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "relation-network-analyzer",
    about = "Weighted network construction and analysis for voting and co-occurrence data"
)]
struct Cli {
    /// Path to the input file (CSV for votes, JSON for gifts)
    #[clap(long)]
    input: String,

    /// Which dataset the input file contains
    #[clap(long, value_enum, default_value = "votes")]
    dataset: Dataset,

    /// Comma-separated list of years to keep (votes only, empty = all)
    #[clap(long, value_delimiter = ',')]
    years: Vec<String>,

    /// Output directory for results
    #[clap(long, default_value = "analysis_results")]
    output_dir: String,

    /// Number of top nodes to keep per centrality measure
    #[clap(long, default_value = "10")]
    top_k: usize,

    /// Minimum community size
    #[clap(long, default_value = "3")]
    community_cutoff: usize,

    /// Maximum number of communities to report
    #[clap(long, default_value = "5")]
    max_communities: usize,

    /// Maximum number of cliques to report
    #[clap(long, default_value = "5")]
    max_cliques: usize,

    /// Comma-separated centrality measures to run (empty = all)
    #[clap(long, value_enum, value_delimiter = ',')]
    algorithms: Vec<Measure>,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting network analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // Create output directory
    std::fs::create_dir_all(&args.output_dir)?;

    let cfg = Config::new(
        args.top_k,
        args.community_cutoff,
        args.max_communities,
        args.max_cliques,
    );
    let kinds: Vec<CentralityKind> = if args.algorithms.is_empty() {
        CentralityKind::ALL.to_vec()
    } else {
        args.algorithms.iter().copied().map(Into::into).collect()
    };

    match args.dataset {
        Dataset::Votes => run_votes(&args, &cfg, &kinds),
        Dataset::Gifts => run_gifts(&args, &cfg, &kinds),
    }
}

fn run_votes(args: &Cli, cfg: &Config, kinds: &[CentralityKind]) -> Result<()> {
    // 1. Load data
    let records = data::votes::load_votes(&args.input)?;
    log::info!("Loaded {} vote records", records.len());

    // 2. Build the directed network
    let (nodes, edges) = data::votes::aggregate_relations(&records, &args.years);
    let net: DirectedNetwork = build_network(nodes, edges)?;
    log::info!(
        "Built network with {} nodes and {} edges",
        net.node_count(),
        net.edge_count()
    );

    analyze(&net, args, cfg, kinds)
}

fn run_gifts(args: &Cli, cfg: &Config, kinds: &[CentralityKind]) -> Result<()> {
    // 1. Load data
    let records = data::gifts::load_gifts(&args.input)?;
    log::info!("Loaded {} gift records", records.len());

    // 2. Build the undirected co-occurrence network
    let groups = data::gifts::focus_area_groups(&records);
    let totals = data::cooccurrence::aggregate_groups(&groups);
    let (nodes, edges) = totals.into_specs();
    let net: UndirectedNetwork = build_network(nodes, edges)?;
    log::info!(
        "Built network with {} nodes and {} edges",
        net.node_count(),
        net.edge_count()
    );

    analyze(&net, args, cfg, kinds)
}

fn analyze<Ty: EdgeType + Sync>(
    net: &Network<Ty>,
    args: &Cli,
    cfg: &Config,
    kinds: &[CentralityKind],
) -> Result<()> {
    // 3. Rank nodes by centrality
    let report = analysis::rank_nodes(net, kinds, cfg.top_k, cfg);

    // 4. Detect communities
    let communities = analysis::detect_communities(net, cfg);

    // 5. Enumerate cliques
    let cliques = analysis::find_cliques(net, cfg);

    // 6. Save results
    storage::save_report(net, &report, &communities, &cliques, &args.output_dir)?;

    // 7. Generate visualizations if requested
    if !args.skip_viz {
        viz::export_network(net, &args.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
