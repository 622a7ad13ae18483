//! Command-line argument definitions for the chaingraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, render overrides, and logging verbosity.

use clap::Parser;

use chaingraph::config::ImageFormat;

/// Command-line arguments for the chaingraph tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input rmod XML document
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Directory receiving one `.dot` file and one image per chain
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Image format, overrides `render.format` (svg, pdf, eps)
    #[arg(long)]
    pub format: Option<ImageFormat>,

    /// Only write `.dot` files, overrides `render.enabled`
    #[arg(long)]
    pub no_render: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
