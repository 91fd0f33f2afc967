//! `WorkloadManifest.targets` build-integration file
//!
//! Only the runtime pack version changes between writes.

/// Render the targets file content
pub fn render(sdk_pack: &str, framework_property: &str, runtime_version: &str) -> String {
    format!(
        r"<Project>

  <PropertyGroup>
    <!--Set the Framework version for the Sdk to use. -->
    <{framework_property}>{runtime_version}</{framework_property}>
  </PropertyGroup>

  <!--
      If we import the workload Sdk here for some reason
      it would get imported for all projects and not just specific ones.

      That behavior is never intended so all applications needing to use it
      will have to set their Project Sdk node to {sdk_pack}.
  -->

</Project>
"
    )
}
