use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "imagefx", version, about = "Apply image effects and keep a history of the results")]
pub struct Cli {
    /// Configuration file; created with defaults when missing.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Upload an image and apply an effect to it.
    Process {
        /// PNG or JPEG image to process.
        file: PathBuf,

        /// Effect name, see `imagefx effects`.
        #[arg(long, short)]
        effect: String,
    },
    /// List processed images, newest first.
    History {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List the available effects.
    Effects,
    /// Delete one history record.
    Remove { id: i64 },
    /// Delete every history record.
    Clear,
}
