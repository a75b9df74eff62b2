//! Graphforge CLI: run command batches and analytics against a local graph
//!
//! The graph lives in memory for the duration of one invocation. `--snapshot`
//! seeds it from a JSON snapshot file and `--save` writes it back.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use graphforge::algo::GraphAnalysis;
use graphforge::query::{BatchResult, OutcomeDetail};
use graphforge::{analyze, EngineConfig, GraphSnapshot, GraphStats, GraphStore, QueryExecutor};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graphforge", version, about = "Graphforge graph engine CLI")]
struct Cli {
    /// JSON snapshot to load before running
    #[arg(long, global = true, env = "GRAPHFORGE_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// YAML engine configuration
    #[arg(long, global = true, env = "GRAPHFORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Write the resulting graph to this snapshot file
    #[arg(long, global = true)]
    save: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a newline-separated command batch
    Query {
        /// Batch text; read from --file or stdin when omitted
        text: Option<String>,

        /// Read the batch from a file
        #[arg(long, short)]
        file: Option<PathBuf>,
    },
    /// Run degree centrality, connected components and PageRank
    Analyze {
        /// Rows shown per ranking in table output
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Show node and relationship counts by type
    Stats,
    /// Start an interactive shell
    Shell,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let mut store = GraphStore::with_config(config.store.clone());
    if let Some(path) = &cli.snapshot {
        load_snapshot(&mut store, path)?;
    }

    let ok = match &cli.command {
        Commands::Query { text, file } => {
            let batch = read_batch(text.as_deref(), file.as_deref())?;
            run_query(&mut store, &batch, cli.format)?
        }
        Commands::Analyze { top } => {
            print_analysis(&analyze(&store, &config.analytics), *top, cli.format)?;
            true
        }
        Commands::Stats => {
            print_stats(&store.get_graph_stats(), cli.format)?;
            true
        }
        Commands::Shell => {
            run_shell(&mut store, &config, cli.format)?;
            true
        }
    };

    if let Some(path) = &cli.save {
        GraphSnapshot::from_store(&store, None)
            .write_to(path)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        info!(path = %path.display(), "snapshot written");
    }

    if !ok {
        bail!("batch failed");
    }
    Ok(())
}

fn load_snapshot(store: &mut GraphStore, path: &Path) -> Result<()> {
    let snapshot = GraphSnapshot::read_from(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    store
        .restore(snapshot.into_data())
        .with_context(|| format!("restoring snapshot {}", path.display()))?;
    info!(
        path = %path.display(),
        nodes = store.node_count(),
        relationships = store.relationship_count(),
        "snapshot loaded"
    );
    Ok(())
}

fn read_batch(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (text, file) {
        (Some(_), Some(_)) => bail!("pass the batch as an argument or with --file, not both"),
        (Some(text), None) => Ok(text.to_string()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading batch {}", path.display())),
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Returns whether the batch succeeded
fn run_query(store: &mut GraphStore, batch: &str, format: OutputFormat) -> Result<bool> {
    let result = QueryExecutor::new(store).run(batch);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => print_batch_table(&result),
    }

    Ok(result.is_success())
}

fn print_batch_table(result: &BatchResult) {
    let summary = match result {
        BatchResult::Success(summary) => summary,
        BatchResult::Failure(failure) => {
            eprintln!("Batch failed: {}", failure.error);
            return;
        }
    };

    if summary.commands.is_empty() {
        println!("(no commands)");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Type", "Command", "Result", "OK"]);

    for (i, outcome) in summary.commands.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            outcome.kind.clone(),
            outcome.command.clone(),
            describe(&outcome.result),
            if outcome.success { "yes" } else { "no" }.to_string(),
        ]);
    }

    println!("{}", table);
    println!(
        "{} command(s) executed, {} node(s), {} relationship(s)",
        summary.executed_commands,
        summary.graph_stats.node_count,
        summary.graph_stats.relationship_count
    );
}

fn describe(detail: &OutcomeDetail) -> String {
    match detail {
        OutcomeDetail::Created(created) => format!("created {}", created.node_id),
        OutcomeDetail::Matched(matched) => {
            format!("{} match(es) for {}", matched.count, matched.pattern)
        }
        OutcomeDetail::Message(message) => message.clone(),
    }
}

fn print_stats(stats: &GraphStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Kind", "Type", "Count"]);
            for (t, count) in &stats.node_types {
                table.add_row(vec!["node".to_string(), t.clone(), count.to_string()]);
            }
            for (t, count) in &stats.relationship_types {
                table.add_row(vec!["relationship".to_string(), t.clone(), count.to_string()]);
            }
            println!("{}", table);
            println!("Nodes:          {}", stats.node_count);
            println!("Relationships:  {}", stats.relationship_count);
            println!("Average degree: {:.3}", stats.average_degree());
            println!("Density:        {:.4}", stats.density());
        }
    }
    Ok(())
}

fn print_analysis(analysis: &GraphAnalysis, top: usize, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(analysis)?);
        return Ok(());
    }

    let mut degrees = Table::new();
    degrees.set_header(vec!["Node", "Degree"]);
    for d in analysis.top_degree(top) {
        degrees.add_row(vec![d.node_id.to_string(), d.degree.to_string()]);
    }
    println!("Degree centrality\n{}", degrees);

    let mut ranks = Table::new();
    ranks.set_header(vec!["Node", "PageRank"]);
    for r in analysis.top_page_rank(top) {
        ranks.add_row(vec![r.node_id.to_string(), format!("{:.6}", r.score)]);
    }
    println!(
        "PageRank ({} iteration(s), {})\n{}",
        analysis.page_rank_iterations,
        if analysis.page_rank_converged { "converged" } else { "iteration cap" },
        ranks
    );

    println!(
        "{} connected component(s), largest has {} node(s)",
        analysis.components.len(),
        analysis.largest_component().map_or(0, |c| c.len())
    );
    Ok(())
}

fn run_shell(store: &mut GraphStore, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    println!("Graphforge Interactive Shell");
    println!("Type commands, or :help for shell commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("graphforge> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let outcome = match trimmed.split_once(' ').unwrap_or((trimmed, "")) {
            (":quit" | ":exit" | ":q", _) => break,
            (":help" | ":h", _) => {
                println!("Commands:");
                println!("  :stats        Show graph statistics");
                println!("  :analyze      Run analytics");
                println!("  :save <path>  Write a JSON snapshot");
                println!("  :load <path>  Replace the graph with a JSON snapshot");
                println!("  :quit         Exit shell");
                println!("  <command>     CREATE / MATCH / CLEAR");
                Ok(())
            }
            (":stats", _) => print_stats(&store.get_graph_stats(), format),
            (":analyze", _) => print_analysis(&analyze(store, &config.analytics), 10, format),
            (":save", path) if !path.trim().is_empty() => GraphSnapshot::from_store(store, None)
                .write_to(path.trim())
                .map_err(Into::into),
            (":load", path) if !path.trim().is_empty() => load_snapshot(store, Path::new(path.trim())),
            (cmd, _) if cmd.starts_with(':') => {
                Err(anyhow::anyhow!("unknown shell command {}, try :help", cmd))
            }
            _ => run_query(store, trimmed, format).map(|_| ()),
        };

        if let Err(e) = outcome {
            eprintln!("Error: {:#}", e);
        }
    }

    println!("Bye!");
    Ok(())
}
