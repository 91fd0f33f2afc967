//! Update command implementation

use crate::cli::WorkloadArgs;
use crate::error::Result;
use crate::operations::UpdateOperation;
use crate::operations::display::summary_line;

use super::helpers::{GlobalOptions, Session, run_lifecycle};

/// Run update command
pub fn run(options: &GlobalOptions, args: WorkloadArgs) -> Result<()> {
    let session = Session::open(options, &args)?;
    let bundle = session.bundle.name.clone();

    let report = run_lifecycle(options, session, |ctx| UpdateOperation::new(ctx).execute())?;

    if report.manifest_saved {
        println!(
            "{}",
            summary_line("Updated", &bundle, report.manifest_version.as_deref())
        );
    }
    Ok(())
}
