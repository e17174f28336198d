use clap::{ArgAction, Parser, Subcommand};

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

    /// Override the registry database file
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new package entry
    #[command(arg_required_else_help = true)]
    #[clap(name = "insert", visible_alias = "add")]
    Insert {
        /// Package name
        #[arg(required = false)]
        name: Option<String>,

        /// Package version
        #[arg(required = false)]
        version: Option<String>,

        /// Define the NAME for the package
        #[arg(required = false, short = 'n', long = "name", value_name = "NAME")]
        name_flag: Option<String>,

        /// Define the VERSION
        #[arg(
            required = false,
            short = 'V',
            long = "version",
            value_name = "VERSION"
        )]
        version_flag: Option<String>,

        /// Define the HOMEPAGE
        #[arg(required = false, short = 'p', long)]
        homepage: Option<String>,

        /// Define the MAINTAINER
        #[arg(required = false, short, long)]
        maintainer: Option<String>,

        /// Define the EMAIL
        #[arg(required = false, short, long)]
        email: Option<String>,

        /// Mark the package as nothing but a dependency for another package
        #[arg(required = false, short, long, conflicts_with = "standalone")]
        dependency: bool,

        /// Mark the package as its own program
        #[arg(required = false, short = 'D', long)]
        standalone: bool,

        /// Mark the package as installed
        #[arg(required = false, short, long, conflicts_with = "uninstalled")]
        installed: bool,

        /// Mark the package as not yet installed
        #[arg(required = false, short = 'I', long)]
        uninstalled: bool,

        /// Perform a dry run, don't perform any writes
        #[arg(required = false, long)]
        dry_run: bool,
    },

    /// Make updates to an existing package entry
    #[command(arg_required_else_help = true)]
    #[clap(name = "update", visible_alias = "modify")]
    Update {
        /// Package to update, a SQL LIKE pattern
        #[arg(required = false)]
        name: Option<String>,

        /// Version to match, a SQL LIKE pattern
        #[arg(required = false)]
        version: Option<String>,

        /// Select the package by its registry id instead of a pattern
        #[arg(required = false, long)]
        id: Option<i64>,

        /// Set a new NAME for the package
        #[arg(required = false, short = 'n', long = "name", value_name = "NAME")]
        new_name: Option<String>,

        /// Set a new VERSION
        #[arg(
            required = false,
            short = 'V',
            long = "version",
            value_name = "VERSION"
        )]
        new_version: Option<String>,

        /// Set the HOMEPAGE
        #[arg(required = false, short = 'p', long)]
        homepage: Option<String>,

        /// Set the MAINTAINER
        #[arg(required = false, short, long)]
        maintainer: Option<String>,

        /// Set the EMAIL
        #[arg(required = false, short, long)]
        email: Option<String>,

        /// Mark the package as nothing but a dependency for another package
        #[arg(required = false, short, long, conflicts_with = "standalone")]
        dependency: bool,

        /// Mark the package as its own program
        #[arg(required = false, short = 'D', long)]
        standalone: bool,

        /// Mark the package as installed
        #[arg(required = false, short, long, conflicts_with = "uninstalled")]
        installed: bool,

        /// Mark the package as not yet installed
        #[arg(required = false, short = 'I', long)]
        uninstalled: bool,
    },

    /// Remove package entries
    #[command(arg_required_else_help = true)]
    #[clap(name = "remove", visible_alias = "del")]
    Remove {
        /// Packages to remove, a SQL LIKE pattern
        #[arg(required = false)]
        name: Option<String>,

        /// Version to match, a SQL LIKE pattern
        #[arg(required = false)]
        version: Option<String>,

        /// Select the package by its registry id instead of a pattern
        #[arg(required = false, long)]
        id: Option<i64>,

        /// Show what would be removed without touching the registry
        #[arg(required = false, long)]
        dry_run: bool,
    },

    /// Search for package entries
    #[command(arg_required_else_help = true)]
    #[clap(name = "search", visible_alias = "find")]
    Search {
        /// Query to search, a SQL LIKE pattern
        #[arg(required = true)]
        query: String,

        /// Version to match, a SQL LIKE pattern
        #[arg(required = false)]
        version: Option<String>,

        /// Limit number of results
        #[arg(required = false, long)]
        limit: Option<usize>,
    },

    /// Generate the default config file
    #[clap(name = "defconfig")]
    DefConfig,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn insert_accepts_positional_and_flag_forms() {
        let args = Args::try_parse_from([
            "larder",
            "insert",
            "feh",
            "3.10.1",
            "-m",
            "Daniel Friesel",
        ])
        .unwrap();
        match args.command {
            Commands::Insert {
                name,
                version,
                maintainer,
                installed,
                uninstalled,
                ..
            } => {
                assert_eq!(name.as_deref(), Some("feh"));
                assert_eq!(version.as_deref(), Some("3.10.1"));
                assert_eq!(maintainer.as_deref(), Some("Daniel Friesel"));
                assert!(!installed);
                assert!(!uninstalled);
            }
            _ => panic!("expected insert"),
        }

        let args =
            Args::try_parse_from(["larder", "add", "-n", "feh", "-V", "3.10.1", "-D", "-I"])
                .unwrap();
        match args.command {
            Commands::Insert {
                name,
                name_flag,
                version_flag,
                standalone,
                uninstalled,
                ..
            } => {
                assert_eq!(name, None);
                assert_eq!(name_flag.as_deref(), Some("feh"));
                assert_eq!(version_flag.as_deref(), Some("3.10.1"));
                assert!(standalone);
                assert!(uninstalled);
            }
            _ => panic!("expected insert"),
        }
    }

    #[test]
    fn conflicting_flag_pairs_are_rejected() {
        assert!(Args::try_parse_from(["larder", "insert", "feh", "1.0", "-d", "-D"]).is_err());
        assert!(Args::try_parse_from(["larder", "insert", "feh", "1.0", "-i", "-I"]).is_err());
    }

    #[test]
    fn update_selects_by_id() {
        let args =
            Args::try_parse_from(["larder", "update", "--id", "7", "-m", "Grace Hopper"]).unwrap();
        match args.command {
            Commands::Update {
                id,
                maintainer,
                name,
                ..
            } => {
                assert_eq!(id, Some(7));
                assert_eq!(maintainer.as_deref(), Some("Grace Hopper"));
                assert_eq!(name, None);
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let args = Args::try_parse_from([
            "larder", "search", "rip%", "--limit", "5", "-v", "--json",
        ])
        .unwrap();
        assert_eq!(args.verbose, 1);
        assert!(args.json);
        match args.command {
            Commands::Search {
                query,
                version,
                limit,
            } => {
                assert_eq!(query, "rip%");
                assert_eq!(version, None);
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected search"),
        }
    }
}
