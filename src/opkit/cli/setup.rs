use clap::{Parser, Subcommand};
use opkit::transform::TransformKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "opkit", bin_name = "opkit", version)]
#[command(
    about = "Encode, decode, quote and reflow big pasted id lists, one page at a time",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config.json (defaults to the user config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Characters per page, overriding the configured value
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<usize>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform a list once and print a page of the result
    #[command(alias = "r")]
    Run {
        /// encrypt, decrypt, format-flip, add-quotes, strip-quotes, normalize-comma
        #[arg(value_parser = parse_kind)]
        kind: TransformKind,

        /// Read the list from a file instead of stdin
        #[arg(short, long, value_name = "PATH", conflicts_with = "clipboard")]
        file: Option<PathBuf>,

        /// Read the list from the system clipboard
        #[arg(long)]
        clipboard: bool,

        /// Output page to print
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Print the whole result instead of one page
        #[arg(short, long, conflicts_with = "page")]
        all: bool,

        /// Copy the whole result to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Interactive session: paste once, transform and page repeatedly
    #[command(alias = "sh")]
    Shell,

    /// Get or set configuration
    Config {
        /// Configuration key (page-size, batch-size, salt, min-length, alphabet)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

fn parse_kind(s: &str) -> Result<TransformKind, String> {
    s.parse().map_err(|e: opkit::error::OpkitError| e.to_string())
}
