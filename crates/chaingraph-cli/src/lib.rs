//! CLI logic for the chaingraph tool.
//!
//! Reads an `rmod` document, builds every chain, and writes one DOT file
//! and one rendered image per chain into the output directory.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use chaingraph::{ChaingraphError, DiagramBuilder};

/// Run the chaingraph CLI application
///
/// Every chain is parsed and built before the first file is written, so an
/// invalid chain anywhere in the document leaves the output directory
/// untouched.
///
/// # Errors
///
/// Returns `ChaingraphError` for:
/// - File I/O and configuration errors
/// - Parse and structure diagnostics
/// - Artifact write and rendering errors
pub fn run(args: &Args) -> Result<(), ChaingraphError> {
    info!(
        input_path = args.input,
        output_dir = args.output_dir;
        "Processing document"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        app_config.render_mut().set_format(format);
    }
    if args.no_render {
        app_config.render_mut().set_enabled(false);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let chains = builder.parse(&source)?;
    let artifacts = builder.emit_all(&chains, &args.output_dir)?;

    info!(
        chains_count = chains.len(),
        files_count = artifacts.len() + artifacts.iter().filter(|a| a.image().is_some()).count();
        "Artifacts written"
    );

    Ok(())
}
