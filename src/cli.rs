use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compose-lens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analyze and validate Docker Compose files")]
#[command(
    long_about = "A line-oriented analyzer for Docker Compose files. Counts services, networks, and volumes, extracts the service structure, and validates documents against YAML syntax rules, Compose requirements, and best practices."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate Compose files and report issues
    Check {
        /// Compose files to validate
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output format (stylish, json, github)
        #[arg(short, long, default_value = "stylish")]
        format: String,

        /// Exit non-zero when issues at or above this severity exist
        #[arg(long, value_enum, default_value_t = FailLevel::Error)]
        fail_on: FailLevel,
    },

    /// Count services, networks, and volumes in a Compose file
    Overview {
        /// Compose file to analyze
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Dump the parsed service structure of a Compose file
    Structure {
        /// Compose file to analyze
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },
}

/// Severity threshold for the check exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailLevel {
    Error,
    Warning,
    Info,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from(["compose-lens", "check", "docker-compose.yml"]).unwrap();
        match cli.command {
            Commands::Check {
                files,
                format,
                fail_on,
            } => {
                assert_eq!(files.len(), 1);
                assert_eq!(format, "stylish");
                assert_eq!(fail_on, FailLevel::Error);
            }
            _ => panic!("expected check command"),
        }
    }
}
