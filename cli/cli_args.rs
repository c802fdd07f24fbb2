use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "treepick",
    version,
    about = "Browse a directory tree, select files, and concatenate their contents"
)]
pub struct Cli {
    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and print the file tree of a directory
    Tree(TreeArgs),
    /// List the distinct file extensions found in a directory tree
    Extensions(ExtensionsArgs),
    /// Select files and concatenate their contents into one document
    Extract(ExtractArgs),
    /// Serve the browser client over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub struct IgnoreOpts {
    /// Directory bare-name to skip during tree building (repeatable)
    #[arg(short = 'i', long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Do not apply the built-in ignored directory names
    #[arg(long)]
    pub no_default_ignores: bool,
}

#[derive(Args, Debug, Default)]
pub struct ConfigOpts {
    /// Use a specific config file instead of ./treepick.toml
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long)]
    pub no_config_file: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Root directory to walk
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub ignore_opts: IgnoreOpts,

    #[command(flatten)]
    pub config_opts: ConfigOpts,
}

#[derive(Args, Debug)]
pub struct ExtensionsArgs {
    /// Root directory to walk
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub ignore_opts: IgnoreOpts,

    #[command(flatten)]
    pub config_opts: ConfigOpts,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Root directory to walk
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Path (relative to ROOT) to select; a directory selects its whole
    /// subtree (repeatable)
    #[arg(short = 's', long = "select", value_name = "PATH")]
    pub select: Vec<String>,

    /// Select every file in the tree
    #[arg(short = 'a', long, conflicts_with = "select")]
    pub all: bool,

    /// Write the document to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub ignore_opts: IgnoreOpts,

    #[command(flatten)]
    pub config_opts: ConfigOpts,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides the PORT env var and the config file)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    #[command(flatten)]
    pub config_opts: ConfigOpts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn extract_parses_selectors_and_ignores() {
        let cli = Cli::parse_from([
            "treepick", "extract", "proj", "-s", "src", "-s", "README.md", "-i", "dist",
        ]);
        match cli.command {
            Some(Commands::Extract(args)) => {
                assert_eq!(args.root, PathBuf::from("proj"));
                assert_eq!(args.select, vec!["src", "README.md"]);
                assert_eq!(args.ignore_opts.ignore, vec!["dist"]);
                assert!(!args.all);
            }
            other => panic!("expected extract, got {other:?}"),
        }
    }
}
