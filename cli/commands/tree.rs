use crate::cli_args::{OutputFormat, TreeArgs};
use crate::{load_config_for_command, resolve_ignores};
use anyhow::{Context, Result};
use treepick_core::{DiskSource, Session};

pub fn handle_tree_command(args: &TreeArgs, _quiet: bool) -> Result<()> {
    let config = load_config_for_command(&args.root, &args.config_opts)
        .context("Failed to load configuration")?;
    let ignored = resolve_ignores(&config, &args.ignore_opts);

    let source = DiskSource::new(&args.root)
        .with_context(|| format!("Cannot open root directory {}", args.root.display()))?;
    let mut session = Session::new(Box::new(source), ignored);
    session
        .rebuild()
        .with_context(|| format!("Failed to build tree for {}", args.root.display()))?;

    match args.format {
        OutputFormat::Text => println!("{}", session.tree_text()?),
        OutputFormat::Json => {
            let tree = session.tree().expect("tree was just built");
            println!("{}", serde_json::to_string_pretty(tree)?);
        }
    }
    Ok(())
}
