//! Skibidi Core - project scaffolding for Svelte monorepos
//!
//! This library generates a Bun workspace with a SvelteKit frontend, an optional
//! Elysia or Encore backend, a styling solution and a few tooling features. It is
//! used by the `create-skibidi` binary but keeps the prompt layer separate, so the
//! generation itself can be driven from code and tests.
//!
//! # Architecture
//!
//! - **Templates** - scanning, rendering, per-feature filtering and materialization
//!   of `.j2` template trees
//! - **Manifests** - `package.json` documents and the shallow manifest merger
//! - **Profiles** - what each backend contributes to the generated manifests
//! - **Scaffold** - the fixed pipeline of steps that builds a project
//! - **Runtime** - package manager detection and the install step
//! - **TUI** - cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use skibidi_core::{DependencyVersions, ProjectConfig, Scaffolder, TemplateLibrary};
//!
//! let templates = TemplateLibrary::bundled();
//! let versions = DependencyVersions::builtin();
//! let report = Scaffolder::new(&config, &templates, &versions)?.run()?;
//! ```

pub mod config;
pub mod error;
pub mod package_json;
pub mod profile;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Backend, DependencyVersions, Feature, ProjectConfig, Styling};
pub use error::{Result, ScaffoldError};
pub use package_json::{merge_manifest, ManifestPatch, PackageJson};
pub use profile::BackendProfile;
pub use scaffold::{ScaffoldReport, Scaffolder, Step, StepError, StepProgress};
pub use templates::{Materializer, MiniJinjaRenderer, RenderContext, TemplateLibrary};

#[cfg(feature = "tui")]
pub use tui::run;
