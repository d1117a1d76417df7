use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daymap")]
#[command(about = "Who touched which file on which day: per-day attribution tables from git history")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, global = true, help = "Include merge commits", default_value_t = true, action = ArgAction::Set)]
    pub include_merges: bool,

    #[arg(long, global = true, help = "Start from this commit or date (RFC3339, YYYY-MM-DD, or relative)")]
    pub since: Option<String>,

    #[arg(long, global = true, help = "End at this commit or date (RFC3339, YYYY-MM-DD, or relative)")]
    pub until: Option<String>,

    #[arg(long, global = true, default_value = "0", allow_hyphen_values = true, help = "Folder depth for grouping paths (0 = per file)")]
    pub depth: String,

    #[arg(long = "hide", global = true, value_name = "TEXT", help = "Hide groups containing this literal text (repeatable)")]
    pub hide: Vec<String>,

    #[arg(long = "only", global = true, value_name = "REGEX", help = "Show only groups matching this regex (repeatable)")]
    pub only: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the attribution matrix
    Matrix {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(help = "Only rows whose group starts with this path")]
        path: Option<String>,
    },
    /// List contributors with their codes
    Authors {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Summarize each visible group
    Groups {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(help = "Only groups whose key starts with this path")]
        path: Option<String>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Matrix { json, ndjson, path } => {
                crate::report::exec_matrix(self.common, json, ndjson, path)
            }
            Commands::Authors { json } => crate::report::exec_authors(self.common, json),
            Commands::Groups { json, path } => crate::report::exec_groups(self.common, json, path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn repeatable_patterns_and_defaults() {
        let cli = Cli::try_parse_from([
            "daymap", "--hide", "test", "--hide", "vendor", "--only", "^src/", "matrix", "--json",
        ])
        .unwrap();
        assert_eq!(cli.common.hide, vec!["test", "vendor"]);
        assert_eq!(cli.common.only, vec!["^src/"]);
        assert_eq!(cli.common.depth, "0");
        assert!(cli.common.include_merges);
        assert!(matches!(cli.command, Commands::Matrix { json: true, ndjson: false, path: None }));
    }

    #[test]
    fn negative_depth_reaches_validation() {
        let cli = Cli::try_parse_from(["daymap", "--depth", "-2", "matrix"]).unwrap();
        assert_eq!(cli.common.depth, "-2");
    }

    #[test]
    fn merges_can_be_switched_off() {
        let cli = Cli::try_parse_from(["daymap", "--include-merges", "false", "authors"]).unwrap();
        assert!(!cli.common.include_merges);
    }
}
