//! Generate FORMULAS.md from the formula registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-formulas
//! ```
//!
//! The generated file is written to `gear_core/FORMULAS.md`, relative to the
//! workspace root. Set `RUST_LOG` to change log verbosity.

use std::fs;
use std::path::Path;

use gear_core::standards::generate_formulas_markdown;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gen_formulas=info,gear_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Generating FORMULAS.md");

    let markdown = generate_formulas_markdown();
    let output_path = Path::new("gear_core/FORMULAS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            tracing::info!(bytes = markdown.len(), path = %output_path.display(), "FORMULAS.md updated");
        }
        Err(e) => {
            tracing::error!(path = %output_path.display(), error = %e, "failed to write FORMULAS.md");
            std::process::exit(1);
        }
    }
}
