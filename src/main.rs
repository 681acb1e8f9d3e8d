//! tree-scatter CLI entry point
//!
//! Land-aware random tree placement - CLI + HTTP API

use tree_scatter::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
