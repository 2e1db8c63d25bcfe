// src/exec/files.rs

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::errors::ActionError;

/// Copy `from` to `to`, creating missing parent directories of `to`.
///
/// The copy keeps the permissions of `from` unless `mode` is given, in which
/// case `to` gets exactly those permission bits.
///
/// Returns `Ok(false)` when `from` does not exist and `missing_ok` is set; in
/// that case any existing `to` is removed so it does not outlive its source.
pub async fn copy_file(
    from: &Path,
    to: &Path,
    missing_ok: bool,
    mode: Option<u32>,
) -> Result<bool, ActionError> {
    let copy_error = |source| ActionError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    match fs::metadata(from).await {
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound && missing_ok => {
            debug!(from = %from.display(), "source missing and missing_ok is set");
            remove_if_exists(to).await.map_err(copy_error)?;
            return Ok(false);
        }
        Err(err) => return Err(copy_error(err)),
    }

    create_parent_dirs(to).await.map_err(copy_error)?;
    let bytes = fs::copy(from, to).await.map_err(copy_error)?;
    debug!(from = %from.display(), to = %to.display(), bytes, "copied file");

    if let Some(mode) = mode {
        set_mode(to, mode).await.map_err(copy_error)?;
    }

    Ok(true)
}

/// Write `contents` to `path`, creating missing parent directories.
pub async fn write_file(path: &Path, contents: &str) -> Result<(), ActionError> {
    let write_error = |source| ActionError::Write {
        path: path.to_path_buf(),
        source,
    };

    create_parent_dirs(path).await.map_err(write_error)?;
    fs::write(path, contents).await.map_err(write_error)?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");

    Ok(())
}

async fn create_parent_dirs(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}

#[cfg(unix)]
async fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await?;
    debug!(path = %path.display(), mode = %format!("{mode:#o}"), "set file mode");
    Ok(())
}

#[cfg(not(unix))]
async fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    debug!(path = %path.display(), mode, "file modes are not supported here; skipping");
    Ok(())
}

async fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
