use clap::Parser;
use itertools::Itertools;
use mise::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Replays a recipe flow document as a model stream and prints the laid-out result
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow document JSON file
    document_path: String,

    /// Number of characters delivered per simulated stream fragment
    #[arg(short, long, default_value_t = 24)]
    chunk_size: usize,

    /// Viewport width used for the layout
    #[arg(short = 'w', long)]
    viewport_width: Option<f64>,

    /// Optional path to a layout configuration JSON file
    #[arg(short, long)]
    layout_config: Option<String>,

    /// Print each incremental step
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let document = fs::read_to_string(&cli.document_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read document file '{}': {}",
            &cli.document_path, e
        ))
    });

    let mut config = match &cli.layout_config {
        Some(path) => load_layout_config(path),
        None => LayoutConfig::default(),
    };
    if cli.viewport_width.is_some() {
        config.viewport_width = cli.viewport_width;
    }
    let engine = LayoutEngine::builder().config(config).build();

    // --- 2. Simulated Stream ---
    let chunk_size = cli.chunk_size.max(1);
    let chars: Vec<char> = document.chars().collect();
    let mut session = FlowSession::new(engine);
    let stream_start = Instant::now();
    let mut fragments = 0usize;

    for chunk in chars.chunks(chunk_size) {
        let fragment: String = chunk.iter().collect();
        fragments += 1;
        let update = session
            .feed(&fragment)
            .unwrap_or_else(|e| exit_with_error(&format!("Stream replay failed: {}", e)));
        if update.changed() {
            tracing::info!(
                fragment = fragments,
                nodes = %update.added_nodes.iter().join(", "),
                edges = %update.added_edges.iter().join(", "),
                on_screen = session.graph().len(),
                "incremental update"
            );
        }
        for dropped in &update.dropped_nodes {
            tracing::warn!(node = %dropped, "node dropped during streaming");
        }
    }
    let stream_duration = stream_start.elapsed();

    // --- 3. Final Document ---
    let complete_start = Instant::now();
    let graph = session
        .complete(&document)
        .unwrap_or_else(|e| exit_with_error(&format!("Final document rejected: {}", e)));
    let complete_duration = complete_start.elapsed();

    let output = serde_json::to_string_pretty(&to_document(graph))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to render output: {}", e)));
    println!("{}", output);

    tracing::info!(
        fragments,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        stream = ?stream_duration,
        complete = ?complete_duration,
        total = ?total_start.elapsed(),
        "done"
    );
}

fn load_layout_config(path: &str) -> LayoutConfig {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read layout config '{}': {}", path, e))
    });
    serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse layout config: {}", e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
