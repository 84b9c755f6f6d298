// ABOUTME: CLI argument definitions for the ghi application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand, ValueEnum};
use ghi_sdk::StateFilter;

#[derive(Parser, Debug)]
#[command(name = "ghi")]
#[command(about = "Work with GitHub issues from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Select another repository using the OWNER/REPO format
    #[arg(long, short = 'R', global = true, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List and filter issues in this repository
    List {
        /// Open the browser to list the issues
        #[arg(long, short)]
        web: bool,

        /// Filter by state (default "open")
        #[arg(long, short, value_enum)]
        state: Option<StateArg>,

        /// Filter by labels
        #[arg(long, short)]
        label: Vec<String>,

        /// Filter by assignee
        #[arg(long, short)]
        assignee: Option<String>,

        /// Filter by author
        #[arg(long, short = 'A')]
        author: Option<String>,

        /// Filter by mention
        #[arg(long)]
        mention: Option<String>,

        /// Filter by milestone name
        #[arg(long, short)]
        milestone: Option<String>,

        /// Maximum number of issues to fetch
        #[arg(long, short = 'L', default_value = "30", value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },
    /// Show status of relevant issues
    Status,
    /// View an issue
    View {
        /// Issue number or URL
        issue: String,

        /// Open the issue in the browser
        #[arg(long, short)]
        web: bool,
    },
    /// Create a new issue
    Create {
        /// Supply a title. Will prompt for one otherwise.
        #[arg(long, short)]
        title: Option<String>,

        /// Supply a body. Will prompt for one otherwise.
        #[arg(long, short)]
        body: Option<String>,

        /// Open the browser to create an issue
        #[arg(long, short)]
        web: bool,

        /// Assign people by their login
        #[arg(long, short, value_name = "LOGIN")]
        assignee: Vec<String>,

        /// Add labels by name
        #[arg(long, short, value_name = "NAME")]
        label: Vec<String>,

        /// Add the issue to projects by name
        #[arg(long, short, value_name = "NAME")]
        project: Vec<String>,

        /// Add the issue to a milestone by name
        #[arg(long, short, value_name = "NAME")]
        milestone: Option<String>,
    },
    /// Close an issue
    Close {
        /// Issue number or URL
        issue: String,
    },
    /// Reopen an issue
    Reopen {
        /// Issue number or URL
        issue: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Open,
    Closed,
    All,
}

impl From<StateArg> for StateFilter {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Open => StateFilter::Open,
            StateArg::Closed => StateFilter::Closed,
            StateArg::All => StateFilter::All,
        }
    }
}
