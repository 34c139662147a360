use crate::config::{Config, CONFIG_PATH_ENV};
use crate::kernel::{ExecutionContext, Fatal, FormatError};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "unwind")]
#[command(about = "Unwind - control kernel diagnostics for a Lisp runtime", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Maximum frame depth (overrides config file and env vars)
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved configuration as TOML
    Config,

    /// Recurse through labelled frames and report the backtrace at the bottom
    Probe {
        /// Number of nested frames to push
        #[arg(short = 'n', long = "frames", default_value = "3")]
        frames: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments
pub fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

fn run_cli_with_args(cli: Cli) -> Result<()> {
    if let Some(config_path) = &cli.config {
        std::env::set_var(CONFIG_PATH_ENV, config_path);
    }

    let mut config = Config::load()?;
    if let Some(max_depth) = cli.max_depth {
        config.runtime.max_depth = max_depth;
        config.validate()?;
    }

    init_logging(&config.logging.filter);

    match cli.command {
        Commands::Config => {
            print!("{}", config.to_toml().context("Failed to render configuration")?);
        }

        Commands::Probe { frames, json } => {
            let mut ctx = ExecutionContext::from_config(&config.runtime);
            ctx.register_formatter(format_directive)?;

            info!(frames, limit = ctx.limit(), "probing frame ledger");
            let (status, report) = match descend(&mut ctx, frames) {
                Ok(backtrace) => ("ok", backtrace),
                Err(Fatal::StackOverflow { report, .. }) => ("overflow", report.to_string()),
                Err(other) => return Err(other.into()),
            };

            if json {
                let out = serde_json::json!({
                    "frames": frames,
                    "limit": ctx.limit(),
                    "status": status,
                    "report": report,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", report);
            }
        }
    }

    Ok(())
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Push `frames` labelled frames, take the backtrace at the deepest one,
/// then pop everything that was pushed
///
/// Frames are pushed in a loop so the probe depth never turns into native
/// recursion.
fn descend(ctx: &mut ExecutionContext<String>, frames: usize) -> Result<String, Fatal> {
    let mut pushed = 0;
    let mut outcome = Ok(());
    while pushed < frames {
        if let Err(fatal) = ctx.push_frame(format!("probe {}", pushed)) {
            outcome = Err(fatal);
            break;
        }
        pushed += 1;
    }
    let outcome = outcome.map(|()| ctx.backtrace());
    for _ in 0..pushed {
        ctx.pop_frame()?;
    }
    outcome
}

/// Minimal printer for probe frames: `~A` inserts a datum, `~S` quotes it
fn format_directive(directive: &str, data: &[String]) -> Result<String, FormatError> {
    let mut out = String::new();
    let mut data = data.iter();
    let mut chars = directive.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('A') | Some('a') => out.push_str(next_datum(&mut data, directive)?),
            Some('S') | Some('s') => {
                out.push('"');
                out.push_str(next_datum(&mut data, directive)?);
                out.push('"');
            }
            Some('%') => out.push('\n'),
            Some('~') => out.push('~'),
            Some(other) => {
                return Err(FormatError::new(format!("unknown directive ~{}", other)));
            }
            None => return Err(FormatError::new("directive ends with ~")),
        }
    }
    Ok(out)
}

fn next_datum<'a>(
    data: &mut std::slice::Iter<'a, String>,
    directive: &str,
) -> Result<&'a str, FormatError> {
    data.next()
        .map(String::as_str)
        .ok_or_else(|| FormatError::new(format!("not enough data for {:?}", directive)))
}
