//! Shopgraph CLI: generate a synthetic e-commerce graph and export it
//!
//! Runs the generator into an embedded store, prints what was created and
//! optionally writes a Cypher import script and/or a JSON snapshot.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use shopgraph::export::{write_cypher_file, write_json_file};
use shopgraph::{
    DatasetGenerator, GeneratorConfig, GraphStatistics, GraphStore, PipelineReport,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shopgraph", version, about = "Synthetic e-commerce graph generator")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset
    Generate(GenerateArgs),
    /// Print the default configuration as YAML
    Config,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// YAML configuration file
    #[arg(long, env = "SHOPGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Seed of the random source
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    customers: Option<usize>,

    #[arg(long)]
    products: Option<usize>,

    #[arg(long)]
    orders: Option<usize>,

    #[arg(long)]
    reviews: Option<usize>,

    #[arg(long)]
    transactions: Option<usize>,

    #[arg(long)]
    suppliers: Option<usize>,

    #[arg(long)]
    campaigns: Option<usize>,

    /// Write a Cypher import script to this file
    #[arg(long)]
    cypher: Option<PathBuf>,

    /// Write a JSON snapshot to this file
    #[arg(long)]
    json: Option<PathBuf>,
}

impl GenerateArgs {
    fn load_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        let counts = &mut config.counts;
        for (flag, target) in [
            (self.customers, &mut counts.customers),
            (self.products, &mut counts.products),
            (self.orders, &mut counts.orders),
            (self.reviews, &mut counts.reviews),
            (self.transactions, &mut counts.transactions),
            (self.suppliers, &mut counts.suppliers),
            (self.campaigns, &mut counts.campaigns),
        ] {
            if let Some(value) = flag {
                *target = value;
            }
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Generate(args) => run_generate(args, &cli.format),
        Commands::Config => run_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_generate(args: &GenerateArgs, format: &OutputFormat) -> Result<()> {
    let config = args.load_config()?;
    let generator = DatasetGenerator::new(config).context("invalid configuration")?;

    let mut store = GraphStore::new();
    let report = generator
        .run(&mut store)
        .context("dataset generation failed")?;
    let stats = store.statistics();

    if let Some(path) = &args.cypher {
        write_cypher_file(&store, path)
            .with_context(|| format!("writing Cypher script to {}", path.display()))?;
        info!(path = %path.display(), "cypher script written");
    }
    if let Some(path) = &args.json {
        write_json_file(&store, path)
            .with_context(|| format!("writing JSON snapshot to {}", path.display()))?;
        info!(path = %path.display(), "json snapshot written");
    }

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "report": report,
                "statistics": stats,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Table => print_summary(&report, &stats),
    }
    Ok(())
}

fn run_config() -> Result<()> {
    print!("{}", GeneratorConfig::default().to_yaml()?);
    Ok(())
}

fn print_summary(report: &PipelineReport, stats: &GraphStatistics) {
    let mut stages = Table::new();
    stages.set_content_arrangement(ContentArrangement::Dynamic);
    stages.set_header(vec!["Stage", "Nodes", "Edges"]);
    for stage in &report.stages {
        stages.add_row(vec![
            stage.stage.to_string(),
            stage.nodes_created.to_string(),
            stage.edges_created.to_string(),
        ]);
    }
    stages.add_row(vec![
        "total".to_string(),
        report.total_nodes().to_string(),
        report.total_edges().to_string(),
    ]);

    println!("Seed: {}", report.seed);
    println!("{}", stages);

    let mut counts = Table::new();
    counts.set_content_arrangement(ContentArrangement::Dynamic);
    counts.set_header(vec!["Kind", "Name", "Count"]);
    for (label, count) in &stats.label_counts {
        counts.add_row(vec!["node".to_string(), label.clone(), count.to_string()]);
    }
    for (edge_type, count) in &stats.edge_type_counts {
        counts.add_row(vec!["edge".to_string(), edge_type.clone(), count.to_string()]);
    }

    println!("{}", counts);
    println!("{} node(s), {} edge(s)", stats.node_count, stats.edge_count);
}
