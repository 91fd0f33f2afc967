//! Uninstall command implementation

use crate::cli::WorkloadArgs;
use crate::error::Result;
use crate::operations::UninstallOperation;
use crate::operations::display::summary_line;

use super::helpers::{GlobalOptions, Session, run_lifecycle};

/// Run uninstall command
pub fn run(options: &GlobalOptions, args: WorkloadArgs) -> Result<()> {
    let session = Session::open(options, &args)?;
    let bundle = session.bundle.name.clone();

    run_lifecycle(options, session, |ctx| UninstallOperation::new(ctx).execute())?;

    println!("{}", summary_line("Uninstalled", &bundle, None));
    Ok(())
}
