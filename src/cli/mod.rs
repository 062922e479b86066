//! CLI module for ClipGen
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// ClipGen
///
/// Splits a downloaded or local video into fixed-length GIF or MP4 clips
/// using ffmpeg.
#[derive(Parser, Debug)]
#[command(name = "clipgen")]
#[command(about = "ClipGen - Split videos into fixed-length clips and GIFs")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (defaults to clipgen.toml lookup)
    #[arg(long, global = true, env = "CLIPGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overwrite behavior for existing clips (always, never)
    #[arg(long, global = true)]
    pub overwrite: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download or open a video and split it into clips
    Split(args::SplitArgs),
    /// Download a video without splitting it
    Fetch(args::FetchArgs),
    /// Print the duration of a video file
    Probe(args::ProbeArgs),
}
