use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DelogConfig;
use crate::matcher::{TargetError, TargetSpec};

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.delog.toml):
  Create this file in your project root to set defaults.

  [delog]
  namespaces = [\"console\", \"window.console\"]
  methods = [\"log\", \"info\", \"assert\"]
  # targets = [\"logger.debug\"]   # Replaces namespaces x methods when set
  strategy = \"null\"            # comment | null | any text containing {call}
  remove_semicolon = false     # Swallow the `;` after a removed call

  # Path filters
  exclude_folders = [\"dist\", \"vendor\"]
  include_folders = [\"coverage\"]  # Force-include these
  extensions = [\"js\", \"mjs\", \"cjs\", \"jsx\"]

  The same keys are read from a \"delog\" object in package.json.
";

/// Which calls to match.
#[derive(Args, Debug, Default, Clone)]
pub struct TargetArgs {
    /// Namespace whose methods are matched (repeatable).
    /// Defaults to `console` and `window.console`.
    #[arg(long = "namespace", short = 'N', value_name = "NAMESPACE")]
    pub namespaces: Vec<String>,

    /// Method matched on every namespace (repeatable).
    /// Defaults to `log`, `info` and `assert`.
    #[arg(long = "method", short = 'm', value_name = "METHOD")]
    pub methods: Vec<String>,

    /// Explicit dotted target such as `logger.debug` (repeatable).
    /// Overrides --namespace and --method.
    #[arg(long = "target", short = 't', value_name = "TARGET")]
    pub targets: Vec<String>,
}

impl TargetArgs {
    /// Combine command-line targets with the configuration file.
    ///
    /// Command-line values win; explicit `--target`s win over everything.
    pub fn resolve(&self, config: &DelogConfig) -> Result<TargetSpec, TargetError> {
        let mut merged = config.clone();
        if !self.namespaces.is_empty() || !self.methods.is_empty() {
            merged.targets = None;
        }
        if !self.namespaces.is_empty() {
            merged.namespaces = Some(self.namespaces.clone());
        }
        if !self.methods.is_empty() {
            merged.methods = Some(self.methods.clone());
        }
        if !self.targets.is_empty() {
            merged.targets = Some(self.targets.clone());
        }
        merged.target_spec()
    }
}

/// Which files to look at.
#[derive(Args, Debug, Default, Clone)]
pub struct DiscoveryArgs {
    /// Files or directories to process. Defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Folders to exclude.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include (overrides default exclusions).
    #[arg(long, alias = "include-folder")]
    pub include_folders: Vec<String>,

    /// File extensions to process, without the dot (repeatable).
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,
}

/// How matched calls are replaced and where results go.
#[derive(Args, Debug, Default, Clone)]
pub struct RewriteArgs {
    /// Replacement strategy: `comment`, `null`, or any text containing `{call}`.
    /// Defaults to `comment` with --remove-semicolon and `null` otherwise.
    #[arg(long, short = 's')]
    pub strategy: Option<String>,

    /// Swallow the semicolon that directly follows a removed call.
    #[arg(long)]
    pub remove_semicolon: bool,

    /// Show what would change without writing any file.
    #[arg(long, conflicts_with_all = ["check", "stdout", "out_dir"])]
    pub dry_run: bool,

    /// Like --dry-run, but exit with code 1 if any file would change.
    #[arg(long, conflicts_with_all = ["stdout", "out_dir"])]
    pub check: bool,

    /// Print the rewritten source of a single file instead of writing it.
    #[arg(long, conflicts_with = "out_dir")]
    pub stdout: bool,

    /// Write results under this directory instead of in place.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows configuration and unchanged files).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: only report changes and errors, no summary table.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments of the `scan` subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct ScanArgs {
    /// File discovery options.
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Target selection.
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List matching logging calls without modifying any file.
    Scan(ScanArgs),
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "delog - Strip or neutralize console logging calls from JavaScript sources",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute; without one, files are rewritten.
    pub command: Option<Commands>,

    /// File discovery options.
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Target selection.
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Rewrite options.
    #[command(flatten)]
    pub rewrite: RewriteArgs,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,
}
