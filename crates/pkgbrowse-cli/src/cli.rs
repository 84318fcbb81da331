use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Read the catalog from this file or URL instead of the configured snapshot
    #[arg(short, long, global = true)]
    pub snapshot: Option<String>,

    /// Set user agent
    #[arg(required = false, long, short = 'A', global = true)]
    pub user_agent: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Facet and paging options shared by `list` and `search`.
#[derive(ClapArgs, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Only show packages from these repositories
    #[arg(required = false, short, long, value_delimiter = ',')]
    pub repo: Vec<String>,

    /// Only show packages built for any of these architectures
    #[arg(required = false, short, long, value_delimiter = ',')]
    pub arch: Vec<String>,

    /// Page to show, starting at 1
    #[arg(required = false, short, long, default_value_t = 1)]
    pub page: usize,

    /// Packages per page (defaults to the configured page size)
    #[arg(required = false, long)]
    pub page_size: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the configuration file to stdout
    Config,

    /// Generate default config
    #[clap(name = "defconfig")]
    DefConfig,

    /// View env
    Env,

    /// List packages in the catalog
    #[clap(name = "list", visible_alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Search packages by name or description
    #[command(arg_required_else_help = true)]
    #[clap(name = "search", visible_alias = "s", visible_alias = "find")]
    Search {
        /// Query to search
        #[arg(required = true)]
        query: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show detailed information about a package
    #[command(arg_required_else_help = true)]
    #[clap(name = "show", visible_alias = "info", visible_alias = "Q")]
    Show {
        /// Package name
        #[arg(required = true)]
        name: String,
    },

    /// Show catalog statistics
    #[clap(name = "stats")]
    Stats,

    /// Download the latest snapshot from the configured remote
    #[clap(name = "update", visible_alias = "sync", visible_alias = "S")]
    Update {
        /// Download even if the local snapshot is still fresh
        #[arg(required = false, short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_with_facets() {
        let args = Args::try_parse_from([
            "pkgbrowse",
            "search",
            "shell",
            "--repo",
            "main,community",
            "-a",
            "x86_64",
            "--page",
            "2",
        ])
        .unwrap();

        match args.command {
            Commands::Search {
                query,
                filters,
            } => {
                assert_eq!(query, "shell");
                assert_eq!(filters.repo, ["main", "community"]);
                assert_eq!(filters.arch, ["x86_64"]);
                assert_eq!(filters.page, 2);
                assert!(filters.page_size.is_none());
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args =
            Args::try_parse_from(["pkgbrowse", "-vv", "list", "--snapshot", "/tmp/p.json"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.snapshot.as_deref(), Some("/tmp/p.json"));
        assert!(matches!(args.command, Commands::List { .. }));
    }

    #[test]
    fn test_update_force() {
        let args = Args::try_parse_from(["pkgbrowse", "update", "--force"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Update {
                force: true
            }
        ));
    }
}
