use std::path::PathBuf;

use clap::Parser;

use crate::server::Mode;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "deploy-mcp",
    version,
    about = "Weather-gated deployment advisor, spoken over line-delimited JSON on stdin/stdout"
)]
pub struct Cli {
    /// Path to a TOML config file; defaults to the platform config directory.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the debug log here instead of the configured path.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Answer a single request and exit, even when stdin is a pipe.
    #[arg(long, conflicts_with = "pipe")]
    pub once: bool,

    /// Keep reading requests until end-of-input, even from a terminal.
    #[arg(long)]
    pub pipe: bool,
}

impl Cli {
    /// Resolve the serve mode: explicit flags win, stdin detection otherwise.
    pub fn mode(&self) -> Mode {
        if self.once {
            Mode::Interactive
        } else if self.pipe {
            Mode::Piped
        } else {
            Mode::detect()
        }
    }
}
