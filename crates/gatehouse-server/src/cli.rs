//! Server CLI implementation.
//!
//! Command-line argument parsing for the gatehouse server binary.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use gatehouse_core::config::SessionOptions;
use gatehouse_core::constants::DEFAULT_LISTEN_PORT;
use gatehouse_core::inventory::SortKey;
use gatehouse_core::resolver::SearchSpec;

/// Log output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CliLogFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// Structured JSON output.
    Json,
}

impl From<CliLogFormat> for gatehouse_core::LogFormat {
    fn from(fmt: CliLogFormat) -> Self {
        match fmt {
            CliLogFormat::Text => gatehouse_core::LogFormat::Text,
            CliLogFormat::Json => gatehouse_core::LogFormat::Json,
        }
    }
}

/// Sort key for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CliSortKey {
    /// Order listings by host identifier.
    #[default]
    Hostname,
    /// Order listings by network address.
    Address,
}

impl From<CliSortKey> for SortKey {
    fn from(key: CliSortKey) -> Self {
        match key {
            CliSortKey::Hostname => SortKey::Hostname,
            CliSortKey::Address => SortKey::Address,
        }
    }
}

/// gatehouse server - interactive bastion access gateway.
#[derive(Debug, Parser)]
#[command(
    name = "gatehouse-server",
    version,
    about = "gatehouse - interactive bastion access gateway"
)]
pub struct Cli {
    /// Address to listen on
    #[arg(short = 'b', long = "bind", default_value = "0.0.0.0")]
    pub bind_addr: IpAddr,

    /// Port to listen on
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_LISTEN_PORT)]
    pub port: u16,

    /// Inventory file (JSON)
    #[arg(short = 'i', long = "inventory", value_name = "FILE")]
    pub inventory_file: PathBuf,

    /// User label attached to sessions
    #[arg(long = "user", default_value = "operator")]
    pub user: String,

    /// Sort key for resource listings
    #[arg(long = "sort-by", default_value = "hostname")]
    pub sort_by: CliSortKey,

    /// Match search tokens case-insensitively
    #[arg(long = "ignore-case")]
    pub ignore_case: bool,

    /// Terminal width used for table layout
    #[arg(long = "term-width", default_value = "80")]
    pub term_width: usize,

    /// Increase verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Log to file instead of stderr
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(long = "log-format", default_value = "text")]
    pub log_format: CliLogFormat,
}

impl Cli {
    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Build the per-session options from the parsed flags.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions::new()
            .with_sort_key(self.sort_by.into())
            .with_term_width(self.term_width)
            .with_search(SearchSpec {
                case_insensitive: self.ignore_case,
                ..SearchSpec::default()
            })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_values() {
        let cli = Cli::try_parse_from(["gatehouse-server", "-i", "inventory.json"]).unwrap();
        assert_eq!(cli.port, DEFAULT_LISTEN_PORT);
        assert_eq!(cli.user, "operator");
        assert_eq!(cli.sort_by, CliSortKey::Hostname);
        assert!(!cli.ignore_case);
        assert_eq!(cli.term_width, 80);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.log_format, CliLogFormat::Text);
    }

    #[test]
    fn inventory_file_is_required() {
        assert!(Cli::try_parse_from(["gatehouse-server"]).is_err());
    }

    #[test]
    fn parse_bind_and_port() {
        let cli = Cli::try_parse_from([
            "gatehouse-server",
            "-i",
            "inventory.json",
            "-b",
            "127.0.0.1",
            "-p",
            "9922",
        ])
        .unwrap();
        assert_eq!(
            cli.socket_addr(),
            "127.0.0.1:9922".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn parse_sort_by() {
        let cli = Cli::try_parse_from([
            "gatehouse-server",
            "-i",
            "inventory.json",
            "--sort-by",
            "address",
        ])
        .unwrap();
        assert_eq!(cli.sort_by, CliSortKey::Address);
        assert_eq!(cli.session_options().sort_key, SortKey::Address);
    }

    #[test]
    fn parse_ignore_case() {
        let cli = Cli::try_parse_from([
            "gatehouse-server",
            "-i",
            "inventory.json",
            "--ignore-case",
        ])
        .unwrap();
        assert!(cli.session_options().search.case_insensitive);
    }

    #[test]
    fn parse_verbosity() {
        let cli =
            Cli::try_parse_from(["gatehouse-server", "-i", "inventory.json", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn parse_log_format() {
        let cli = Cli::try_parse_from([
            "gatehouse-server",
            "-i",
            "inventory.json",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.log_format, CliLogFormat::Json);
    }
}
