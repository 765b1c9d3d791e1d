use crate::error::{Result, XvdlError};
use std::path::Path;

/// Creates `path` and its parents. Succeeds when the directory already exists.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => XvdlError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => XvdlError::from(e),
    })
}

/// Absolute form of `path` for display, without requiring it to exist.
pub fn display_absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
