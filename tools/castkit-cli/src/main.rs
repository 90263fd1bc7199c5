//! Castkit CLI: list capturable sources and record them.
//!
//! Usage:
//!   castkit displays             List connected displays
//!   castkit windows              List recordable windows
//!   castkit permission           Show or request screen capture permission
//!   castkit record [OPTIONS]     Record a display or window
//!   castkit check                Check system capabilities
//!   castkit config               Show or create the config file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "castkit",
    about = "Record displays, windows, and system audio",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List connected displays
    Displays,

    /// List windows that can be recorded
    Windows {
        /// Include untitled and tiny windows
        #[arg(long)]
        all: bool,

        /// Minimum window width when filtering
        #[arg(long, default_value = "100")]
        min_width: u32,

        /// Minimum window height when filtering
        #[arg(long, default_value = "100")]
        min_height: u32,
    },

    /// Show screen capture permission, optionally prompting for it
    Permission {
        /// Ask the OS for permission if it is not granted (may block)
        #[arg(long)]
        request: bool,
    },

    /// Record a display or window until Ctrl+C or the duration elapses
    Record(RecordArgs),

    /// Check system capabilities
    Check,

    /// Show the active configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        write_default: bool,
    },
}

#[derive(Args)]
pub struct RecordArgs {
    /// Output file (.mp4/.mov for AAC audio, anything else is Matroska)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Display id from `castkit displays`
    #[arg(long, conflicts_with = "window", required_unless_present = "window")]
    pub display: Option<String>,

    /// Window id from `castkit windows`
    #[arg(long)]
    pub window: Option<String>,

    /// Output width (defaults to the source width)
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<i64>,

    /// Output height (defaults to the source height)
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<i64>,

    /// Target FPS
    #[arg(long)]
    pub fps: Option<i64>,

    /// Stop after this many seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// Disable system audio capture
    #[arg(long)]
    pub no_audio: bool,

    /// Do not draw the cursor
    #[arg(long)]
    pub no_cursor: bool,

    /// Include this process's own windows in display captures
    #[arg(long)]
    pub show_self: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = castkit_common::config::AppConfig::load();
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    castkit_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Displays => commands::sources::displays(&config, cli.json),
        Commands::Windows {
            all,
            min_width,
            min_height,
        } => commands::sources::windows(&config, all, min_width, min_height, cli.json),
        Commands::Permission { request } => {
            commands::permission::run(&config, request, cli.json).await
        }
        Commands::Record(args) => commands::record::run(&config, args, cli.json).await,
        Commands::Check => commands::check::run(&config, cli.json),
        Commands::Config { write_default } => commands::config::run(&config, write_default),
    }
}
