//! Dependency version lookup

use indexmap::IndexMap;

/// Version used for packages missing from the table
pub const LATEST: &str = "latest";

/// Built-in version ranges for packages written into generated manifests
const BUILTIN_VERSIONS: &[(&str, &str)] = &[
    ("prettier", "^3.4.2"),
    ("prettier-plugin-svelte", "^3.3.3"),
    ("eslint", "^9.17.0"),
    ("@eslint/js", "^9.17.0"),
    ("eslint-plugin-svelte", "^2.46.1"),
    ("typescript-eslint", "^8.18.2"),
    ("globals", "^15.14.0"),
    ("elysia", "^1.2.10"),
    ("@elysiajs/eden", "^1.2.0"),
    ("encore.dev", "^1.46.4"),
    ("tailwindcss", "^4.0.0"),
    ("@tailwindcss/vite", "^4.0.0"),
    ("unocss", "^0.65.3"),
];

/// Immutable package name to semver range table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyVersions {
    versions: IndexMap<String, String>,
}

impl DependencyVersions {
    /// Build a table from explicit entries
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            versions: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The table shipped with the CLI
    pub fn builtin() -> Self {
        Self::new(BUILTIN_VERSIONS.iter().copied())
    }

    /// Version range for `name`, or `latest` when the table has no entry
    pub fn get(&self, name: &str) -> &str {
        self.versions.get(name).map(String::as_str).unwrap_or(LATEST)
    }

    /// `(name, version)` pair ready to go into a dependency map
    pub fn entry(&self, name: &str) -> (String, String) {
        (name.to_string(), self.get(name).to_string())
    }
}

impl Default for DependencyVersions {
    fn default() -> Self {
        Self::builtin()
    }
}
