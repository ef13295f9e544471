use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "chirp",
    version,
    about = "Post the next pending photo, retrying with the next one on failure"
)]
pub struct Cli {
    /// Working directory holding photos/, posted_photos/ and photos_rejected/
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Maximum publish attempts in one run
    #[arg(long, default_value_t = chirp_core::DEFAULT_CEILING)]
    pub max_attempts: u32,

    /// Activity log path (default: <root>/post_log.txt)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Env file with the API credentials (default: .env if present)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}
