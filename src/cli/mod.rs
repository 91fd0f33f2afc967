//! CLI definitions using clap derive API
//!
//! - workload: toolchain overrides shared by the lifecycle commands

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod workload;

pub use workload::WorkloadArgs;

/// elskom-check - Elskom workload manager
///
/// Install, update and uninstall the Elskom .NET SDK workload.
#[derive(Parser, Debug)]
#[command(
    name = "elskom-check",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Manage the Elskom .NET SDK workload",
    long_about = "elskom-check installs the Elskom workload packs into a .NET SDK installation, \
                  keeps them up to date and removes them again.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  elskom-check install --feed ./feed             \x1b[90m# Install the workload\x1b[0m\n   \
                  elskom-check update --feed ./feed              \x1b[90m# Update installed packs\x1b[0m\n   \
                  elskom-check uninstall                         \x1b[90m# Remove the workload\x1b[0m\n   \
                  elskom-check install --sdk 8.0.100 --rid win-x64 \x1b[90m# Skip detection\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// .NET SDK root directory (detected when omitted)
    #[arg(long, global = true, env = "DOTNET_ROOT", value_name = "DIR")]
    pub dotnet_root: Option<PathBuf>,

    /// Package feed directory to resolve and fetch packs from
    #[arg(long, global = true, env = "ELSKOM_CHECK_FEED", value_name = "DIR")]
    pub feed: Option<PathBuf>,

    /// Bundle definition file (defaults to the built-in elskom workload)
    #[arg(long, global = true, env = "ELSKOM_CHECK_BUNDLE", value_name = "FILE")]
    pub bundle_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install the workload
    Install(WorkloadArgs),

    /// Update the installed workload packs
    Update(WorkloadArgs),

    /// Uninstall the workload
    Uninstall(WorkloadArgs),

    /// Show version information
    #[command(hide = true)]
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_cli_parsing_update() {
        let cli = Cli::try_parse_from(["elskom-check", "update"]).unwrap();
        assert!(matches!(cli.command, Commands::Update(_)));
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["elskom-check", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let root = if cfg!(windows) {
            r"C:\dotnet"
        } else {
            "/opt/dotnet"
        };
        let cli = Cli::try_parse_from([
            "elskom-check",
            "install",
            "-v",
            "--dotnet-root",
            root,
            "--feed",
            "feed",
            "--bundle-file",
            "bundle.yaml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.dotnet_root, Some(PathBuf::from(root)));
        assert_eq!(cli.feed, Some(PathBuf::from("feed")));
        assert_eq!(cli.bundle_file, Some(PathBuf::from("bundle.yaml")));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["elskom-check"]).is_err());
    }

    #[test]
    #[serial]
    fn test_cli_options_from_environment() {
        let original = std::env::var("ELSKOM_CHECK_FEED").ok();
        unsafe {
            std::env::set_var("ELSKOM_CHECK_FEED", "env-feed");
        }

        let from_env = Cli::try_parse_from(["elskom-check", "update"]).unwrap();
        let from_flag =
            Cli::try_parse_from(["elskom-check", "update", "--feed", "flag-feed"]).unwrap();

        unsafe {
            if let Some(o) = original {
                std::env::set_var("ELSKOM_CHECK_FEED", o);
            } else {
                std::env::remove_var("ELSKOM_CHECK_FEED");
            }
        }

        assert_eq!(from_env.feed, Some(PathBuf::from("env-feed")));
        assert_eq!(from_flag.feed, Some(PathBuf::from("flag-feed")));
    }
}
