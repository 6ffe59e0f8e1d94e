//! Project configuration collected by the prompt layer

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Backend framework choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Elysia,
    Encore,
    None,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Elysia, Backend::Encore, Backend::None];

    /// Tag used in template directory names (`with-<tag>`)
    pub fn tag(&self) -> &'static str {
        match self {
            Backend::Elysia => "elysia",
            Backend::Encore => "encore",
            Backend::None => "none",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Backend::Elysia => "Elysia",
            Backend::Encore => "Encore",
            Backend::None => "None",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Backend::Elysia => "Fast and flexible Bun web framework",
            Backend::Encore => "Development platform for building backends",
            Backend::None => "No backend framework",
        }
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self, Backend::None)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Styling solution choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Styling {
    None,
    Tailwind,
    Unocss,
}

impl Styling {
    pub const ALL: [Styling; 3] = [Styling::Tailwind, Styling::Unocss, Styling::None];

    pub fn tag(&self) -> &'static str {
        match self {
            Styling::None => "none",
            Styling::Tailwind => "tailwind",
            Styling::Unocss => "unocss",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Styling::None => "None",
            Styling::Tailwind => "Tailwind CSS",
            Styling::Unocss => "UnoCSS",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Styling::None => "No styling framework",
            Styling::Tailwind => "Utility-first CSS framework",
            Styling::Unocss => "Instant On-demand Atomic CSS",
        }
    }
}

impl fmt::Display for Styling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Optional capabilities, each gating extra files and manifest entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    Eslint,
    Prettier,
    GhActions,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Eslint, Feature::Prettier, Feature::GhActions];

    pub fn tag(&self) -> &'static str {
        match self {
            Feature::Eslint => "eslint",
            Feature::Prettier => "prettier",
            Feature::GhActions => "gh-actions",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Feature::Eslint => "ESLint",
            Feature::Prettier => "Prettier",
            Feature::GhActions => "General GitHub Actions",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Feature::Eslint => "Code linting",
            Feature::Prettier => "Code formatting",
            Feature::GhActions => "CI/CD",
        }
    }

    /// Parse a feature tag (`eslint`, `prettier`, `gh-actions`)
    pub fn from_tag(tag: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.tag() == tag)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Answers collected from the user. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub project_name: String,
    /// Absolute path of the project root
    pub project_path: PathBuf,
    pub backend: Backend,
    pub styling: Styling,
    pub features: BTreeSet<Feature>,
}

impl ProjectConfig {
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn apps_dir(&self) -> PathBuf {
        self.project_path.join("apps")
    }

    pub fn frontend_dir(&self) -> PathBuf {
        self.apps_dir().join("frontend")
    }

    pub fn backend_dir(&self) -> PathBuf {
        self.apps_dir().join("backend")
    }

    pub fn root_manifest_path(&self) -> PathBuf {
        self.project_path.join("package.json")
    }
}
