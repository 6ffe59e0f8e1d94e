//! Template discovery, rendering and materialization
//!
//! This module provides:
//! - Template tree scanning (files ending in `.j2`)
//! - Variable substitution with MiniJinja
//! - Feature-based inclusion rules (`template.yaml`)
//! - The materializer that writes a rendered tree to disk

pub mod filter;
pub mod manifest;
pub mod materializer;
pub mod renderer;
pub mod scanner;

use crate::error::Result;
use std::path::{Path, PathBuf};

pub use filter::{InclusionFilter, TemplateFile};
pub use manifest::{FeatureFiles, RootManifest};
pub use materializer::Materializer;
pub use renderer::{MiniJinjaRenderer, RenderContext, TemplateRenderer};
pub use scanner::{scan_templates, strip_template_suffix, TEMPLATE_SUFFIX};

/// Environment variable overriding the template directory
pub const TEMPLATE_DIR_ENV: &str = "SKIBIDI_TEMPLATE_DIR";

/// Template directory shipped with the sources
pub const BUNDLED_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

/// The template directory and its subtrees
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    root: PathBuf,
}

impl TemplateLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Pick the template directory: explicit path, then `SKIBIDI_TEMPLATE_DIR`,
    /// then the bundled `templates/` directory
    pub fn locate(explicit: Option<&Path>) -> Self {
        let root = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(BUNDLED_TEMPLATE_DIR));
        Self::new(root)
    }

    /// The bundled template directory
    pub fn bundled() -> Self {
        Self::new(BUNDLED_TEMPLATE_DIR)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a named subtree such as `frontend/base`
    pub fn subtree(&self, name: &str) -> PathBuf {
        name.split('/').fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Load the root `template.yaml`
    pub fn manifest(&self) -> Result<RootManifest> {
        RootManifest::load(&self.root)
    }
}
