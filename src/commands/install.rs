//! Install command implementation

use crate::cli::WorkloadArgs;
use crate::error::Result;
use crate::operations::InstallOperation;
use crate::operations::display::summary_line;

use super::helpers::{GlobalOptions, Session, run_lifecycle};

/// Run install command
pub fn run(options: &GlobalOptions, args: WorkloadArgs) -> Result<()> {
    let session = Session::open(options, &args)?;
    let bundle = session.bundle.name.clone();

    let report = run_lifecycle(options, session, |ctx| InstallOperation::new(ctx).execute())?;

    println!(
        "{}",
        summary_line("Installed", &bundle, report.manifest_version.as_deref())
    );
    Ok(())
}
