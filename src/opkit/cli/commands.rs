//! # CLI Layer
//!
//! This module is **one possible UI client** for opkit, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Talks to the system clipboard
//! - Handles argument parsing
//! - Sets up the log subscriber
//!
//! Data (page text, config values) goes to stdout; page labels and command
//! messages go to stderr, so `opkit run encrypt < ids.txt > out.txt` writes
//! nothing but the list.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves the config directory and loads the config
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::clipboard::{copy_to_clipboard, get_from_clipboard};
use super::print::print_messages;
use super::setup::{Cli, Commands};
use super::shell::Shell;
use clap::Parser;
use directories::ProjectDirs;
use opkit::api::OpkitApi;
use opkit::commands::Engine;
use opkit::config::{OpkitConfig, KEYS};
use opkit::error::{OpkitError, Result};
use opkit::store::BufferKind;
use opkit::transform::TransformKind;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "OPKIT_LOG";

struct AppContext {
    config: OpkitConfig,
    config_dir: PathBuf,
    page_size: Option<usize>,
}

impl AppContext {
    /// Builds the API from the loaded config. The codec is fixed from here on.
    fn api(&self) -> Result<OpkitApi> {
        let mut engine = Engine::from_config(&self.config)?;
        if let Some(page_size) = self.page_size {
            engine = engine.with_page_size(page_size);
        }
        Ok(OpkitApi::new(engine))
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Run {
            kind,
            file,
            clipboard,
            page,
            all,
            copy,
        }) => handle_run(&ctx, kind, file.as_deref(), clipboard, page, all, copy),
        Some(Commands::Shell) => handle_shell(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_shell(&ctx),
    }
}

/// Logs go to stderr. `OPKIT_LOG` takes any `EnvFilter` directive; without it
/// the level is `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "opkit", "opkit")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| OpkitError::Config("Could not determine config dir".into()))?,
    };
    let config = OpkitConfig::load(&config_dir)?;
    debug!(config_dir = %config_dir.display(), ?config, "config loaded");

    if cli.page_size == Some(0) {
        return Err(OpkitError::Config("--page-size must be greater than 0".into()));
    }

    Ok(AppContext {
        config,
        config_dir,
        page_size: cli.page_size,
    })
}

fn handle_run(
    ctx: &AppContext,
    kind: TransformKind,
    file: Option<&Path>,
    clipboard: bool,
    page: usize,
    all: bool,
    copy: bool,
) -> Result<()> {
    let text = if let Some(path) = file {
        std::fs::read_to_string(path)?
    } else if clipboard {
        get_from_clipboard()?
    } else {
        if std::io::stdin().is_terminal() {
            eprintln!("Reading the list from stdin, end with Ctrl-D");
        }
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let api = ctx.api()?;
    let loaded = api.set_input(&text);
    let transformed = api.transform(kind, "");
    let paged = (page != 1).then(|| api.goto_page(BufferKind::Output, page));
    let result = paged.as_ref().unwrap_or(&transformed);

    if all {
        let blob = api.current_output_blob();
        if !blob.is_empty() {
            println!("{}", blob);
        }
    } else {
        if !result.text().is_empty() {
            println!("{}", result.text());
        }
        let label = result.label();
        if !label.is_empty() {
            eprintln!("{}", label);
        }
    }

    print_messages(&loaded.messages);
    print_messages(&transformed.messages);
    if let Some(paged) = &paged {
        print_messages(&paged.messages);
    }

    if copy {
        copy_to_clipboard(&api.current_output_blob())?;
        eprintln!("Copied the full result to the clipboard");
    }
    Ok(())
}

fn handle_shell(ctx: &AppContext) -> Result<()> {
    let api = ctx.api()?;
    let stdin = std::io::stdin();
    let prompt = stdin.is_terminal();
    if prompt {
        println!("opkit shell, type 'help' for commands");
    }
    Shell::new(api, stdin.lock(), std::io::stdout().lock()).run(prompt)
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            for key in KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
        }
        (Some(key), None) => println!("{}", ctx.config.get(key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(key, &value)?;
            ctx.config.save(&ctx.config_dir)?;
            eprintln!("{} = {}", key, value);
        }
    }
    Ok(())
}
