// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "showcase")]
#[command(about = "Showcase - portfolio data from GitHub and LeetCode", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the JSON API for the portfolio frontend
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Show the repository showcase for a GitHub user
    Projects {
        /// GitHub username (defaults to GITHUB_USERNAME)
        #[arg(short, long)]
        username: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show problem-solving statistics for a LeetCode user
    Leetcode {
        /// LeetCode username (defaults to LEETCODE_USERNAME)
        #[arg(short, long)]
        username: Option<String>,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Check whether an outbound URL passes the request guard
    CheckUrl {
        /// URL to check
        url: String,
    },
}
