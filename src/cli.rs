use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "caseledger",
    version,
    about = "caseledger - Test case lifecycle tracking and reporting",
    long_about = "Registers manual and automated test cases in suites, records their results, exports them as CSV and prints execution summaries.",
    disable_version_flag = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample suite manifest
    Init {
        /// Manifest path (defaults to suite.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },

    /// Execute a suite, export its results and print the summary
    Run {
        /// Suite manifest (TOML)
        manifest: PathBuf,

        /// Results file (defaults to the configured results path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Take results from a previous export instead of prompting
        #[arg(long, conflicts_with = "stdin")]
        from: Option<PathBuf>,

        /// Read one result per line from standard input. Ctrl-C stops the run
        /// once the current line has been read (Enter or EOF)
        #[arg(long)]
        stdin: bool,
    },

    /// Summarize an exported results file
    Summary {
        /// Results file (CSV)
        results: PathBuf,
    },

    /// List the cases in an exported results file
    #[command(alias = "ls")]
    Show {
        /// Results file (CSV)
        results: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
