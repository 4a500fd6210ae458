//! BOM Convergence Grid CLI.

use bom_cli::config::{API_URL_ENV, SourceOverrides, load_settings, resolve_source};
use bom_cli::logging::{LogConfig, LogFormat, init_logging};
use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::info;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    AppContext, run_co_review, run_columns, run_dashboard, run_export, run_grid, run_search,
    run_values,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let settings = load_settings(cli.config.as_deref());
    let overrides = SourceOverrides {
        api_url: cli.api_url.clone(),
        snapshot: cli.snapshot.clone(),
        sample: cli.sample,
    };
    let source = resolve_source(&overrides, std::env::var(API_URL_ENV).ok(), &settings.source);
    info!(source = %source, "resolved data source");
    let ctx = AppContext { settings, source };

    let result = match &cli.command {
        Command::Grid(args) => run_grid(&ctx, args),
        Command::Values(args) => run_values(&ctx, args),
        Command::CoReview(args) => run_co_review(&ctx, args),
        Command::Dashboard => run_dashboard(&ctx),
        Command::Export(args) => run_export(&ctx, args).map(|path| {
            println!("Wrote {}", path.display());
        }),
        Command::Search(args) => run_search(&ctx, args),
        Command::Columns(args) => {
            run_columns(&ctx, args);
            Ok(())
        }
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
