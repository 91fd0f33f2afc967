//! Common file system operations with unified error handling

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Name an extracted runtime pack's versions file is stored under
pub const RUNTIME_VERSION_FILE: &str = ".version";

#[derive(Default, Clone)]
pub struct CopyOptions {
    pub exclude: Vec<String>,
}

impl CopyOptions {
    /// Skip the OPC bookkeeping entries every package archive carries
    pub fn exclude_package_metadata() -> Self {
        Self {
            exclude: vec![
                "_rels".to_string(),
                "package".to_string(),
                "[Content_Types].xml".to_string(),
            ],
        }
    }
}

/// Copy a directory recursively with options
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2, options: CopyOptions) -> io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let entry_path = entry.path();
        let file_name = entry.file_name();

        if options
            .exclude
            .iter()
            .any(|excluded| file_name.to_str() == Some(excluded.as_str()))
        {
            continue;
        }

        let dst_path = dst_ref.join(&file_name);

        if entry_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&entry_path, &dst_path, options.clone())?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Copy only one runtime identifier's assets out of a runtime package, flattened
///
/// Returns the number of files written to `dst`.
pub fn copy_runtime_assets(
    src: &Path,
    dst: &Path,
    runtime_identifier: &str,
    target_framework: &str,
    versions_file: &str,
) -> io::Result<usize> {
    let lib_prefix = Path::new("runtimes")
        .join(runtime_identifier)
        .join("lib")
        .join(target_framework);
    let native_prefix = Path::new("runtimes").join(runtime_identifier).join("native");

    fs::create_dir_all(dst)?;

    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(src) else {
            continue;
        };
        let file_name = entry.file_name();

        let target = if relative.starts_with(&lib_prefix) || relative.starts_with(&native_prefix) {
            dst.join(file_name)
        } else if file_name.to_str() == Some(versions_file) {
            dst.join(RUNTIME_VERSION_FILE)
        } else {
            continue;
        };

        fs::copy(path, &target)?;
        copied += 1;
    }

    Ok(copied)
}

/// Remove a directory tree; returns `false` when it did not exist
pub fn remove_dir_all_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Remove a file; returns `false` when it did not exist
pub fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Remove `dir` and then its ancestors while they are empty, stopping at `stop`
pub fn prune_empty_dirs(dir: &Path, stop: &Path) {
    let mut current = Some(dir);
    while let Some(path) = current {
        if path == stop || !path.starts_with(stop) {
            break;
        }
        if fs::remove_dir(path).is_err() {
            break;
        }
        current = path.parent();
    }
}

/// Write an empty marker file, creating parent directories
pub fn touch(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, b"")
}
