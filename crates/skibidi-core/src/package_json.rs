//! `package.json` documents and the shallow manifest merger
//!
//! Generated sub-packages start from a template manifest; backend profiles and
//! features then contribute scripts and dependencies through [`ManifestPatch`]es.
//! Merging is a shallow key replace per mapping, so the patch always wins and
//! applying the same patch twice changes nothing.

use crate::error::{Result, ScaffoldError};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;

/// Mapping of script or dependency names to values
pub type StringMap = IndexMap<String, String>;

/// Typed form of the root `package.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    pub name: String,
    pub version: String,
    pub workspaces: Vec<String>,
    pub scripts: StringMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<StringMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<StringMap>,
}

/// Contributions merged into an existing manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestPatch {
    /// Replaces the manifest name when set
    pub name: Option<String>,
    pub scripts: StringMap,
    pub dependencies: StringMap,
    pub dev_dependencies: StringMap,
}

impl ManifestPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_scripts<I, K, V>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        extend(&mut self.scripts, scripts);
        self
    }

    pub fn with_dependencies<I, K, V>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        extend(&mut self.dependencies, dependencies);
        self
    }

    pub fn with_dev_dependencies<I, K, V>(mut self, dev_dependencies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        extend(&mut self.dev_dependencies, dev_dependencies);
        self
    }

    /// True when applying the patch would leave any manifest unchanged
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.scripts.is_empty()
            && self.dependencies.is_empty()
            && self.dev_dependencies.is_empty()
    }

    fn mappings(&self) -> [(&'static str, &StringMap); 3] {
        [
            ("scripts", &self.scripts),
            ("dependencies", &self.dependencies),
            ("devDependencies", &self.dev_dependencies),
        ]
    }
}

fn extend<I, K, V>(map: &mut StringMap, entries: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    map.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
}

/// Apply `patch` to an in-memory manifest object.
///
/// Returns the offending field name when a mapping field exists but is not an object.
pub fn apply_patch(
    document: &mut Map<String, Value>,
    patch: &ManifestPatch,
) -> std::result::Result<(), String> {
    if let Some(name) = &patch.name {
        document.insert("name".to_string(), Value::String(name.clone()));
    }

    for (field, entries) in patch.mappings() {
        if entries.is_empty() {
            continue;
        }
        let target = document
            .entry(field)
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(target) = target else {
            return Err(format!("field `{}` is not an object", field));
        };
        for (key, value) in entries {
            target.insert(key.clone(), Value::String(value.clone()));
        }
    }

    Ok(())
}

/// Read a manifest as a generic JSON object
pub fn read_manifest(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScaffoldError::ManifestNotFound {
            path: path.to_path_buf(),
        },
        _ => ScaffoldError::io(path, e),
    })?;

    let value: Value =
        serde_json::from_str(&content).map_err(|source| ScaffoldError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ScaffoldError::InvalidManifest {
            path: path.to_path_buf(),
            reason: "top level is not an object".to_string(),
        }),
    }
}

/// Write any serializable manifest with 2-space indentation and a trailing newline
pub fn write_manifest<T: Serialize + ?Sized>(path: &Path, manifest: &T) -> Result<()> {
    let mut content =
        serde_json::to_string_pretty(manifest).map_err(|source| ScaffoldError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;
    content.push('\n');
    fs::write(path, content).map_err(|e| ScaffoldError::io(path, e))
}

/// Merge `patch` into the manifest at `path` and write it back in place
pub fn merge_manifest(path: &Path, patch: &ManifestPatch) -> Result<()> {
    debug!("Merging manifest patch into {}", path.display());

    let mut document = read_manifest(path)?;
    apply_patch(&mut document, patch).map_err(|reason| ScaffoldError::InvalidManifest {
        path: path.to_path_buf(),
        reason,
    })?;
    write_manifest(path, &document)
}
