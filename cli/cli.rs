mod cli_args;
mod commands;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::*;
use std::path::Path;
use std::process;

use cli_args::{Cli, Commands, ConfigOpts, IgnoreOpts};
use treepick_core::{AppError, Config, IgnoreSet};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);
    let quiet = cli_args.quiet;
    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let exit_code = match e.downcast_ref::<AppError>() {
                Some(AppError::Config(_)) => 1,
                Some(AppError::TomlParse(_)) => 1,
                Some(AppError::Io(_)) => 2,
                Some(AppError::Enumeration { .. }) => 2,
                Some(AppError::FileRead { .. }) => 2,
                Some(AppError::FileWrite { .. }) => 2,
                Some(AppError::InvalidArgument(_)) => 5,
                Some(AppError::JsonSerialize(_)) => 6,
                Some(_) => 1,
                None => 1,
            };

            if !quiet || exit_code == 1 || exit_code == 5 {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            } else {
                log::error!("Application failed: {:#}", e);
            }
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool) -> Result<()> {
    match cli.command {
        None => {
            Cli::command().print_help()?;
        }
        Some(command) => match command {
            Commands::Tree(args) => {
                log::debug!("Executing 'tree' command...");
                commands::tree::handle_tree_command(&args, quiet)?;
            }
            Commands::Extensions(args) => {
                log::debug!("Executing 'extensions' command...");
                commands::extensions::handle_extensions_command(&args, quiet)?;
            }
            Commands::Extract(args) => {
                log::debug!("Executing 'extract' command...");
                commands::extract::handle_extract_command(&args, quiet)?;
            }
            Commands::Serve(args) => {
                log::debug!("Executing 'serve' command...");
                commands::serve::handle_serve_command(&args, quiet)?;
            }
        },
    }
    Ok(())
}

/// Loads the optional config file for a command, honoring `--config` /
/// `--no-config-file`.
pub fn load_config_for_command(dir: &Path, opts: &ConfigOpts) -> Result<Config> {
    let config_path =
        Config::resolve_config_path(dir, opts.config_file.as_ref(), opts.no_config_file)?;
    let config = match &config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::default(),
    };
    Ok(config)
}

/// The effective ignore set: built-in defaults (unless disabled), config
/// extras, then `--ignore` names.
pub fn resolve_ignores(config: &Config, opts: &IgnoreOpts) -> IgnoreSet {
    let set = config.ignore_set(&opts.ignore, opts.no_default_ignores);
    log::debug!("Effective ignore set: {} names", set.len());
    set
}
