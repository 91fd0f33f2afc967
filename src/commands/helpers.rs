//! Command helper utilities

use std::path::PathBuf;

use crate::cli::{Cli, WorkloadArgs};
use crate::config::BundleDefinition;
use crate::error::Result;
use crate::operations::{LifecycleContext, LifecycleReport};
use crate::source::{LocalFeed, NoFeed, PackFetcher, VersionOracle};
use crate::toolchain::{ToolchainInfo, detection};

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub dotnet_root: Option<PathBuf>,
    pub feed: Option<PathBuf>,
    pub bundle_file: Option<PathBuf>,
    pub verbose: bool,
}

impl From<&Cli> for GlobalOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            dotnet_root: cli.dotnet_root.clone(),
            feed: cli.feed.clone(),
            bundle_file: cli.bundle_file.clone(),
            verbose: cli.verbose,
        }
    }
}

/// Toolchain and bundle a lifecycle command operates on
pub struct Session {
    pub root: PathBuf,
    pub toolchain: ToolchainInfo,
    pub bundle: BundleDefinition,
}

impl Session {
    pub fn open(options: &GlobalOptions, args: &WorkloadArgs) -> Result<Self> {
        let bundle = BundleDefinition::load_or_default(options.bundle_file.as_deref())?;
        let root = detection::locate_root(options.dotnet_root.as_deref())?;
        let toolchain = ToolchainInfo::resolve(&root, args.sdk.as_deref(), args.rid.as_deref())?;
        Ok(Self {
            root,
            toolchain,
            bundle,
        })
    }
}

/// Build the lifecycle context for `session` and run `operation` with it
pub fn run_lifecycle<F>(options: &GlobalOptions, session: Session, operation: F) -> Result<LifecycleReport>
where
    F: FnOnce(&LifecycleContext<'_>) -> Result<LifecycleReport>,
{
    let feed = options.feed.as_deref().map(LocalFeed::new);
    let oracle: &dyn VersionOracle = match &feed {
        Some(feed) => feed,
        None => &NoFeed,
    };
    let fetcher: &dyn PackFetcher = match &feed {
        Some(feed) => feed,
        None => &NoFeed,
    };
    tracing::debug!(
        root = %session.root.display(),
        feed = ?feed.as_ref().map(|f| f.root().display().to_string()),
        bundle = %session.bundle.name,
        "starting lifecycle operation"
    );

    let layout = session.toolchain.layout(&session.root);
    let ctx = LifecycleContext::new(layout, session.toolchain, session.bundle, oracle, fetcher)
        .with_progress(!options.verbose);
    let report = operation(&ctx)?;

    tracing::debug!(
        packs = report.packs.len(),
        manifest_saved = report.manifest_saved,
        version = ?report.manifest_version,
        "lifecycle operation finished"
    );
    Ok(report)
}
