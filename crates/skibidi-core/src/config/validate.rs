//! Validation for user supplied project name and location
//!
//! Everything here takes the current directory as an argument instead of reading
//! the process working directory, so the rules can be tested in isolation.

use std::path::{Component, Path, PathBuf};

/// Default project name offered by the name prompt
pub const DEFAULT_PROJECT_NAME: &str = "my-skibidi-app";

const INVALID_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Check a project name. Returns the message to show the user on rejection.
///
/// An empty name is accepted here; the prompt substitutes the default for it.
pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.contains(' ') {
        return Err("Project name cannot contain spaces!".to_string());
    }
    if name
        .chars()
        .any(|c| INVALID_NAME_CHARS.contains(&c) || c.is_ascii_control())
    {
        return Err(
            "Project name contains invalid characters! Cannot use: < > : \" / \\ | ? *"
                .to_string(),
        );
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Err("Project name cannot start or end with dots or spaces!".to_string());
    }
    Ok(())
}

/// Resolve a user supplied location against `cwd`, dropping `.` components
pub fn resolve_project_path(input: &str, cwd: &Path) -> PathBuf {
    let raw = Path::new(input);
    let joined = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        cwd.join(raw)
    };
    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Check that the target location does not exist yet and return its absolute form
pub fn validate_project_path(input: &str, cwd: &Path) -> Result<PathBuf, String> {
    if input.trim().is_empty() {
        return Err("Please enter a directory".to_string());
    }
    let path = resolve_project_path(input, cwd);
    if path.exists() {
        return Err("Directory already exists!".to_string());
    }
    Ok(path)
}

/// Suggest a location for `name`: `./<name>`, or `./<name>-<n>` with the first
/// free `n` when that directory is taken
pub fn default_project_path(name: &str, cwd: &Path) -> String {
    if !cwd.join(name).exists() {
        return format!("./{}", name);
    }
    (1..)
        .map(|n| format!("{}-{}", name, n))
        .find(|candidate| !cwd.join(candidate).exists())
        .map(|candidate| format!("./{}", candidate))
        .unwrap_or_else(|| format!("./{}", name))
}

/// Show `path` relative to `cwd` when it lives below it
pub fn display_path(path: &Path, cwd: &Path) -> String {
    match path.strip_prefix(cwd) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}
