//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::model::MAX_CHUNK_DURATION;

fn chunk_seconds(s: &str) -> Result<u32, String> {
    clap_num::number_range(s, 1, MAX_CHUNK_DURATION)
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Video URL to download first (takes precedence over --input)
    #[arg(short, long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Local video file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory that receives the download and the clips
    #[arg(short, long = "output-dir")]
    pub output_dir: PathBuf,

    /// Length of each clip in seconds [default: 10]
    #[arg(short = 'd', long, value_parser = chunk_seconds)]
    pub chunk_duration: Option<u32>,

    /// Scale filter as WIDTH:HEIGHT, -1 keeps the aspect ratio [default: 480:-1]
    #[arg(short, long)]
    pub scale: Option<String>,

    /// Clip format: gif or mp4 [default: gif]
    #[arg(short, long)]
    pub format: Option<String>,

    /// Emit the trailing partial segment as a final shorter clip
    #[arg(long)]
    pub include_tail: bool,

    /// Continue with the next clip when one fails
    #[arg(long)]
    pub keep_going: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Video URL
    #[arg(short, long)]
    pub url: String,

    /// Directory that receives the download
    #[arg(short, long = "output-dir")]
    pub output_dir: PathBuf,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Also show how many full clips of this length the video yields
    #[arg(short = 'd', long, value_parser = chunk_seconds)]
    pub chunk_duration: Option<u32>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
