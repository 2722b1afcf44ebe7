//! Mirror — periodic one-way directory synchronization.
//!
//! # Usage
//!
//! ```text
//! mirror <source> <replica> <interval_secs> <log_file> [--once]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mirror_daemon::{run_single_pass, start_blocking, MirrorConfig};

#[derive(Parser, Debug)]
#[command(
    name = "mirror",
    version,
    about = "Keep a replica directory in one-way sync with a source directory",
    long_about = None,
)]
struct Cli {
    /// Directory to mirror from.
    source: PathBuf,

    /// Directory to mirror into; created if absent.
    replica: PathBuf,

    /// Seconds to wait between the end of one pass and the start of the next.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    interval_secs: u64,

    /// File every activity line is appended to; created if absent.
    log_file: PathBuf,

    /// Run a single pass and exit instead of looping forever.
    #[arg(long)]
    once: bool,
}

impl Cli {
    fn run(self) -> Result<()> {
        let config = MirrorConfig::new(
            self.source,
            self.replica,
            self.interval_secs,
            self.log_file,
        )
        .context("invalid configuration")?;

        if self.once {
            run_single_pass(config).context("sync pass failed")?;
        } else {
            start_blocking(config).context("scheduler exited with error")?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    Cli::parse().run()
}
