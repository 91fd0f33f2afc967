use clap::Args;

/// Toolchain overrides shared by install, update and uninstall
#[derive(Args, Debug, Clone, Default)]
pub struct WorkloadArgs {
    /// .NET SDK version to register the workload for (detected when omitted)
    #[arg(long, value_name = "VERSION")]
    pub sdk: Option<String>,

    /// Runtime identifier to install runtime packs for (detected when omitted)
    #[arg(long, value_name = "RID")]
    pub rid: Option<String>,
}
