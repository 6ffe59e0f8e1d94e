//! Template tree enumeration

use crate::error::{Result, ScaffoldError};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffix that marks a file as a template; stripped from the destination name
pub const TEMPLATE_SUFFIX: &str = ".j2";

/// Check whether a file name carries the template suffix
pub fn is_template_file(file_name: &OsStr) -> bool {
    file_name
        .to_str()
        .is_some_and(|name| name.len() > TEMPLATE_SUFFIX.len() && name.ends_with(TEMPLATE_SUFFIX))
}

/// Remove the template suffix from the last component of `relative`
pub fn strip_template_suffix(relative: &Path) -> PathBuf {
    match relative
        .file_name()
        .and_then(OsStr::to_str)
        .and_then(|name| name.strip_suffix(TEMPLATE_SUFFIX))
    {
        Some(stripped) => relative.with_file_name(stripped),
        None => relative.to_path_buf(),
    }
}

/// Lazily enumerate every template file below `root`, in file-name order.
///
/// Symlinks are not followed. Fails up front when `root` is not a directory.
pub fn scan_templates(root: &Path) -> Result<impl Iterator<Item = Result<PathBuf>>> {
    if !root.is_dir() {
        return Err(ScaffoldError::TemplateDirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let files = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() && is_template_file(entry.file_name()) => {
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
            Err(e) => Some(Err(ScaffoldError::from(e))),
        });

    Ok(files)
}
