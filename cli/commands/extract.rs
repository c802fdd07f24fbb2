use crate::cli_args::ExtractArgs;
use crate::output::print_success;
use crate::{load_config_for_command, resolve_ignores};
use anyhow::{Context, Result};
use std::fs;
use treepick_core::{AppError, DiskSource, Session};

pub fn handle_extract_command(args: &ExtractArgs, quiet: bool) -> Result<()> {
    if !args.all && args.select.is_empty() {
        return Err(AppError::InvalidArgument(
            "Nothing selected: pass --all or at least one --select PATH".to_string(),
        )
        .into());
    }

    let config = load_config_for_command(&args.root, &args.config_opts)
        .context("Failed to load configuration")?;
    let ignored = resolve_ignores(&config, &args.ignore_opts);

    let source = DiskSource::new(&args.root)
        .with_context(|| format!("Cannot open root directory {}", args.root.display()))?;
    let mut session = Session::new(Box::new(source), ignored);
    session
        .rebuild()
        .with_context(|| format!("Failed to build tree for {}", args.root.display()))?;

    if args.all {
        let count = session.select_all()?;
        log::info!("Selected all {count} files");
    } else {
        for selector in &args.select {
            // Normalize away a trailing slash so "src/" selects the dir.
            let path = selector.trim_end_matches('/');
            session.toggle_path(path, true)?;
        }
        log::info!("Selected {} files", session.selection().len());
    }

    let document = session.extract()?;

    match &args.output {
        Some(path) => {
            fs::write(path, &document).map_err(|source| AppError::FileWrite {
                path: path.clone(),
                source,
            })?;
            print_success(
                &format!(
                    "Wrote {} files ({} bytes) to {}",
                    session.selection().len(),
                    document.len(),
                    path.display()
                ),
                quiet,
            );
        }
        None => println!("{document}"),
    }
    Ok(())
}
