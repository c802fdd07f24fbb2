use crate::cli_args::{ExtensionsArgs, OutputFormat};
use crate::output::print_warning;
use crate::{load_config_for_command, resolve_ignores};
use anyhow::{Context, Result};
use treepick_core::{DiskSource, Session};

pub fn handle_extensions_command(args: &ExtensionsArgs, quiet: bool) -> Result<()> {
    let config = load_config_for_command(&args.root, &args.config_opts)
        .context("Failed to load configuration")?;
    let ignored = resolve_ignores(&config, &args.ignore_opts);

    let source = DiskSource::new(&args.root)
        .with_context(|| format!("Cannot open root directory {}", args.root.display()))?;
    let mut session = Session::new(Box::new(source), ignored);
    session
        .rebuild()
        .with_context(|| format!("Failed to build tree for {}", args.root.display()))?;

    let extensions = session.extensions()?;
    if extensions.is_empty() {
        print_warning("No files found in the tree.", quiet);
        return Ok(());
    }

    match args.format {
        OutputFormat::Text => {
            for ext in &extensions {
                if ext.is_empty() {
                    println!("(no extension)");
                } else {
                    println!("{ext}");
                }
            }
        }
        OutputFormat::Json => {
            let list: Vec<&String> = extensions.iter().collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
    }
    Ok(())
}
