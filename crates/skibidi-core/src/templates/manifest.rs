//! Template manifest types and parsing

use crate::config::Feature;
use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the optional manifest at the root of the template directory
pub const ROOT_MANIFEST_FILE: &str = "template.yaml";

/// File name patterns gated behind each feature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFiles {
    /// Files that require ESLint to be selected
    #[serde(default)]
    pub eslint: Vec<String>,

    /// Files that require Prettier to be selected
    #[serde(default)]
    pub prettier: Vec<String>,

    /// Files that require the GitHub Actions feature to be selected
    #[serde(default, rename = "gh-actions")]
    pub gh_actions: Vec<String>,
}

impl FeatureFiles {
    /// Gating rules that hold even without a `template.yaml`
    pub fn builtin() -> Self {
        Self {
            prettier: vec!["format-check.yml".to_string()],
            ..Self::default()
        }
    }

    /// Merge another FeatureFiles into this one
    pub fn merge(&mut self, other: &FeatureFiles) {
        for (ours, theirs) in [
            (&mut self.eslint, &other.eslint),
            (&mut self.prettier, &other.prettier),
            (&mut self.gh_actions, &other.gh_actions),
        ] {
            for pattern in theirs {
                if !ours.contains(pattern) {
                    ours.push(pattern.clone());
                }
            }
        }
    }

    /// Check if a filename matches any pattern in a list
    fn matches_any(filename: &str, patterns: &[String]) -> bool {
        patterns.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                // Suffix match: *.yml matches lint.yml
                filename.ends_with(suffix)
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                // Prefix match: format-* matches format-check.yml
                filename.starts_with(prefix)
            } else {
                filename == pattern
            }
        })
    }

    /// Feature governing `file_path`, or `None` for files that are always emitted
    pub fn feature_for_file(&self, file_path: &str) -> Option<Feature> {
        let filename = file_path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(file_path);

        [
            (Feature::Eslint, &self.eslint),
            (Feature::Prettier, &self.prettier),
            (Feature::GhActions, &self.gh_actions),
        ]
        .into_iter()
        .find(|(_, patterns)| Self::matches_any(filename, patterns))
        .map(|(feature, _)| feature)
    }
}

/// Root template manifest (templates/template.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootManifest {
    /// Feature-gated file patterns, merged over [`FeatureFiles::builtin`]
    #[serde(default)]
    pub feature_files: FeatureFiles,
}

impl Default for RootManifest {
    fn default() -> Self {
        Self {
            feature_files: FeatureFiles::builtin(),
        }
    }
}

impl RootManifest {
    /// Load `template.yaml` from `template_root`, falling back to the built-in rules
    pub fn load(template_root: &Path) -> Result<Self> {
        let manifest_path = template_root.join(ROOT_MANIFEST_FILE);
        if !manifest_path.is_file() {
            log::debug!("No {} in {}", ROOT_MANIFEST_FILE, template_root.display());
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(&manifest_path).map_err(|e| ScaffoldError::io(&manifest_path, e))?;
        Self::parse(&content).map_err(|source| ScaffoldError::TemplateManifest {
            path: manifest_path,
            source,
        })
    }

    /// Parse manifest text; the built-in rules are always kept
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let parsed: RootManifest = serde_yaml::from_str(content)?;
        let mut feature_files = FeatureFiles::builtin();
        feature_files.merge(&parsed.feature_files);
        Ok(Self { feature_files })
    }
}
