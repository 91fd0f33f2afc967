//! Host toolchain detection
//!
//! Locates the .NET SDK root, the newest installed SDK (for its feature band)
//! and the host runtime identifier. Everything here only reads the filesystem.

use std::path::{Path, PathBuf};

use crate::domain::version::{self, PackVersion};
use crate::domain::VersionBand;
use crate::error::{CheckError, Result, toolchain::unsupported_sdk};

/// Directory under the root holding one directory per installed SDK version
const SDK_DIR: &str = "sdk";

fn dotnet_executable() -> &'static str {
    if cfg!(windows) { "dotnet.exe" } else { "dotnet" }
}

/// Platform-specific locations the .NET installers use
pub fn well_known_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if cfg!(windows) {
        for var in ["ProgramFiles", "ProgramFiles(x86)"] {
            if let Ok(dir) = std::env::var(var) {
                roots.push(PathBuf::from(dir).join("dotnet"));
            }
        }
    } else if cfg!(target_os = "macos") {
        roots.push(PathBuf::from("/usr/local/share/dotnet"));
    } else {
        if let Some(home) = dirs::home_dir() {
            roots.push(home.join("share").join("dotnet"));
            roots.push(home.join(".dotnet"));
        }
        roots.push(PathBuf::from("/usr/share/dotnet"));
        roots.push(PathBuf::from("/usr/lib/dotnet"));
    }

    roots
}

/// Find the toolchain root
///
/// An explicit root (from `--dotnet-root` or `DOTNET_ROOT`) wins when the
/// directory exists; otherwise the well-known install locations are searched
/// for a `dotnet` executable.
pub fn locate_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        if root.is_dir() {
            return Ok(dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()));
        }
        tracing::warn!(
            root = %root.display(),
            "configured .NET root does not exist, searching well-known locations"
        );
    }

    let candidates = well_known_roots();
    if let Some(root) = candidates
        .iter()
        .find(|root| root.join(dotnet_executable()).is_file())
    {
        tracing::debug!(root = %root.display(), "found .NET root");
        return Ok(root.clone());
    }

    let mut searched: Vec<String> = explicit
        .map(|p| p.display().to_string())
        .into_iter()
        .collect();
    searched.extend(candidates.iter().map(|p| p.display().to_string()));
    Err(CheckError::ToolchainNotFound {
        searched: searched.join(", "),
    })
}

/// Newest SDK version installed under `root`
///
/// A version directory holding a single file is a leftover
/// `EnableWorkloadResolver.sentinel` of an uninstalled SDK and is ignored.
pub fn newest_sdk_version(root: &Path) -> Result<String> {
    let sdk_dir = root.join(SDK_DIR);
    let not_detected = || CheckError::SdkNotDetected {
        path: sdk_dir.display().to_string(),
    };

    let entries = std::fs::read_dir(&sdk_dir).map_err(|_| not_detected())?;
    let mut versions: Vec<String> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if PackVersion::parse(name).is_none() {
            tracing::debug!(dir = %path.display(), "skipping non-version SDK directory");
            continue;
        }
        if count_files(&path) <= 1 {
            tracing::debug!(dir = %path.display(), "skipping leftover SDK directory");
            continue;
        }
        versions.push(name.to_string());
    }

    versions
        .into_iter()
        .max_by(|a, b| version::total_order(a, b))
        .ok_or_else(not_detected)
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
                .count()
        })
        .unwrap_or(0)
}

/// Feature band for an SDK version, rejecting bands older than 8.0.100
pub fn supported_band(sdk_version: &str) -> Result<VersionBand> {
    let band = VersionBand::from_version(sdk_version)?;
    if !band.is_supported() {
        return Err(unsupported_sdk(sdk_version));
    }
    Ok(band)
}

/// Runtime identifier of the host (`<os>-<arch>`, e.g. `linux-x64`)
pub fn host_runtime_identifier() -> String {
    runtime_identifier_for(std::env::consts::OS, std::env::consts::ARCH)
}

fn runtime_identifier_for(os: &str, arch: &str) -> String {
    let os = match os {
        "windows" => "win",
        "macos" => "osx",
        other => other,
    };
    let arch = match arch {
        "x86" => "x86",
        "x86_64" => "x64",
        "arm" => "arm",
        "aarch64" => "arm64",
        other => other,
    };
    format!("{os}-{arch}")
}
