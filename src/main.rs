mod commands;
mod core;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::context::WorkspaceContext;
use crate::core::error::ResultExt;
use crate::core::exit::{Failure, terminate};

/// Merge dependency-bot PRs and cascade new versions through a tiered package ecosystem
#[derive(Parser)]
#[command(name = "dep-cascade")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Directory holding every repository checkout (default: current directory)
  #[arg(long, global = true)]
  root: Option<PathBuf>,

  /// Configuration file (default: cascade.toml under the root, else the built-in ecosystem)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Log debug output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Emit logs as JSON lines
  #[arg(long, global = true)]
  json_logs: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Merge pending bot PRs and propagate versions, tier by tier
  Update {
    /// Registry wait in seconds before the top-level tier (overrides config)
    #[arg(long)]
    wait_secs: Option<u64>,
    /// Write a JSON run report to this file
    #[arg(long)]
    report: Option<PathBuf>,
  },

  /// Run every release script in validation mode
  Check {
    /// Log every failing repository and finish the sweep instead of stopping at the first failure
    #[arg(long)]
    keep_going: bool,
  },

  /// Clone and update every repository of the ecosystem
  Clone,

  /// Show the tier plan
  Plan {
    /// Output the plan in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  ui::logging::init_tracing(cli.json_logs, ui::logging::default_level(cli.verbose));

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir().context("Failed to get current directory") {
      Ok(dir) => dir,
      Err(e) => terminate(e.into()),
    },
  };

  // Built once: config and tier plan are shared by every command
  let ctx = match WorkspaceContext::build(&root, cli.config.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => terminate(e.into()),
  };

  let result: Result<(), Failure> = match cli.command {
    Commands::Update { wait_secs, report } => commands::run_update(&ctx, wait_secs, report.as_deref()),
    Commands::Check { keep_going } => commands::run_check(&ctx, keep_going),
    Commands::Clone => commands::run_clone(&ctx).map_err(Failure::from),
    Commands::Plan { json } => commands::run_plan(&ctx, json).map_err(Failure::from),
  };

  if let Err(failure) = result {
    terminate(failure);
  }
}
