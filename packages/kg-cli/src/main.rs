//! Knowledge graph generator and visualizer.
//!
//! Reads a text document, extracts subject-predicate-object triples via
//! an OpenAI-compatible chat service, standardizes entity names, infers
//! bridging relationships, and writes an interactive HTML graph plus a
//! JSON sidecar with the raw triples.

mod config;
mod render;
mod sample;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use knowledge_graph::{GraphConfig, Pipeline, Triple};
use llm_client::ChatClient;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kg", about = "Knowledge graph generator and visualizer")]
struct Cli {
    /// Path to the input text file (required unless --test is used)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output HTML file path
    #[arg(long, default_value = "knowledge_graph.html")]
    output: PathBuf,

    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable debug output (raw LLM responses and parsed JSON)
    #[arg(long)]
    debug: bool,

    /// Disable entity standardization
    #[arg(long)]
    no_standardize: bool,

    /// Disable relationship inference
    #[arg(long)]
    no_inference: bool,

    /// Render a bundled sample graph instead of running extraction
    #[arg(long)]
    test: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    dotenvy::dotenv().ok();

    let mut config = config::load_config(&cli.config)?;
    if cli.no_standardize {
        config.standardization.enabled = false;
    }
    if cli.no_inference {
        config.inference.enabled = false;
    }

    if cli.test {
        println!("Rendering sample graph...");
        finish(&sample::sample_triples(), &cli.output)?;
        return Ok(());
    }

    let Some(input) = &cli.input else {
        // usage message and a clean exit, not a crash
        eprintln!("error: --input is required unless --test is used\n");
        Cli::command().print_help()?;
        return Ok(());
    };

    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read input file {}", input.display()))?;
    println!("Using input text from file: {}", input.display());

    let llm = build_client(&config)?;
    let output = match Pipeline::new(llm, config).run(&text).await {
        Ok(output) => output,
        Err(e) => bail!("knowledge graph generation failed: {e}"),
    };

    finish(&output.triples, &cli.output)
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn build_client(config: &GraphConfig) -> Result<ChatClient> {
    if config.llm.api_key.is_empty() {
        bail!("no API key: set llm.api_key in the config file or OPENAI_API_KEY");
    }
    Ok(ChatClient::new(&config.llm.api_key)
        .with_base_url(&config.llm.base_url)
        .with_model(&config.llm.model)
        .with_max_tokens(config.llm.max_tokens)
        .with_temperature(config.llm.temperature))
}

/// Write outputs and print the final summary.
///
/// The JSON sidecar is best-effort: a failed cache write must not cost
/// the user their visualization. The HTML write is fatal.
fn finish(triples: &[Triple], output: &std::path::Path) -> Result<()> {
    if let Err(e) = render::write_json_sidecar(triples, output) {
        warn!(error = %e, "could not save raw graph data, continuing");
    }

    let stats = render::render_html(triples, output)?;

    println!("\nKnowledge Graph Statistics:");
    println!("Nodes: {}", stats.nodes);
    println!("Edges: {}", stats.edges);
    println!("Communities: {}", stats.communities);

    let absolute = output
        .canonicalize()
        .unwrap_or_else(|_| output.to_path_buf());
    println!("\nTo view the visualization, open the following file in your browser:");
    println!("file://{}", absolute.display());
    Ok(())
}
