//! The scaffold pipeline
//!
//! A project is generated by a fixed sequence of [`Step`]s. Each step either
//! completes or fails; fatal failures stop the pipeline, the others are reported
//! and the pipeline moves on. Nothing is rolled back.

use crate::config::{Backend, DependencyVersions, Feature, ProjectConfig, Styling};
use crate::error::{Result, ScaffoldError};
use crate::package_json::{merge_manifest, write_manifest, ManifestPatch, PackageJson, StringMap};
use crate::profile::BackendProfile;
use crate::templates::{
    InclusionFilter, Materializer, MiniJinjaRenderer, RenderContext, TemplateLibrary,
    TemplateRenderer,
};
use log::debug;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// One stage of project generation, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Directories,
    RootManifest,
    Features,
    Frontend,
    Backend,
    Styling,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Directories,
        Step::RootManifest,
        Step::Features,
        Step::Frontend,
        Step::Backend,
        Step::Styling,
    ];

    /// Short description used in progress and error messages
    pub fn description(&self) -> &'static str {
        match self {
            Step::Directories => "create project directories",
            Step::RootManifest => "write package.json",
            Step::Features => "set up features",
            Step::Frontend => "set up frontend",
            Step::Backend => "set up backend",
            Step::Styling => "set up styling",
        }
    }

    /// Whether a failure of this step aborts the remaining ones
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Step::Features | Step::Styling)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A step failure, tagged with the step that raised it
#[derive(Debug, Error)]
#[error("Failed to {step}: {source}")]
pub struct StepError {
    pub step: Step,
    #[source]
    pub source: ScaffoldError,
}

/// Outcome of a complete pipeline run
#[derive(Debug, Default)]
pub struct ScaffoldReport {
    pub files_written: usize,
    /// Failures of non-fatal steps
    pub warnings: Vec<StepError>,
}

/// Progress of a single step during [`Scaffolder::run_with`]
#[derive(Debug)]
pub enum StepProgress<'e> {
    Started,
    /// Completed, with the number of files written
    Finished(usize),
    Failed(&'e StepError),
}

/// Root scripts every project starts with
const BASE_ROOT_SCRIPTS: [(&str, &str); 3] = [
    ("frontend", "cd apps/frontend && bun run dev"),
    ("frontend:build", "cd apps/frontend && bun run build"),
    ("dev", "bun run frontend"),
];

/// Generates one project from a [`ProjectConfig`]
pub struct Scaffolder<'a> {
    config: &'a ProjectConfig,
    templates: &'a TemplateLibrary,
    versions: &'a DependencyVersions,
    renderer: Box<dyn TemplateRenderer>,
    context: RenderContext,
    filter: InclusionFilter,
    profile: Option<BackendProfile>,
}

impl<'a> Scaffolder<'a> {
    /// Prepare a scaffolder; loads `template.yaml` from the template library
    pub fn new(
        config: &'a ProjectConfig,
        templates: &'a TemplateLibrary,
        versions: &'a DependencyVersions,
    ) -> Result<Self> {
        let manifest = templates.manifest()?;
        Ok(Self {
            config,
            templates,
            versions,
            renderer: Box::new(MiniJinjaRenderer::new()),
            context: RenderContext::from_config(config),
            filter: InclusionFilter::new(manifest.feature_files, config.features.clone()),
            profile: BackendProfile::for_backend(config.backend, versions),
        })
    }

    /// Run every step in order
    pub fn run(&self) -> std::result::Result<ScaffoldReport, StepError> {
        self.run_with(|_, _| {})
    }

    /// Run every step in order, reporting each one to `progress` as it starts and ends
    pub fn run_with<F>(&self, mut progress: F) -> std::result::Result<ScaffoldReport, StepError>
    where
        F: FnMut(Step, StepProgress<'_>),
    {
        let mut report = ScaffoldReport::default();
        for step in Step::ALL {
            progress(step, StepProgress::Started);
            match self.run_step(step) {
                Ok(written) => {
                    progress(step, StepProgress::Finished(written));
                    report.files_written += written;
                }
                Err(err) => {
                    progress(step, StepProgress::Failed(&err));
                    if step.is_fatal() {
                        return Err(err);
                    }
                    log::warn!("{}", err);
                    report.warnings.push(err);
                }
            }
        }
        Ok(report)
    }

    /// Run a single step, returning the number of files it wrote
    pub fn run_step(&self, step: Step) -> std::result::Result<usize, StepError> {
        debug!("Running step: {}", step);
        let result = match step {
            Step::Directories => self.init_directories().map(|_| 0),
            Step::RootManifest => self.init_package_json().map(|_| 1),
            Step::Features => self.init_features(),
            Step::Frontend => self.init_frontend(),
            Step::Backend => self.init_backend(),
            Step::Styling => self.init_styling(),
        };
        result.map_err(|source| StepError { step, source })
    }

    fn materialize(&self, subtree: &str, destination: &Path) -> Result<usize> {
        let materializer = Materializer::new(self.renderer.as_ref(), &self.context, &self.filter);
        let written = materializer.materialize(&self.templates.subtree(subtree), destination)?;
        Ok(written.len())
    }

    /// Create `apps/frontend` and, with a backend, `apps/backend`
    pub fn init_directories(&self) -> Result<()> {
        let mut dirs = vec![self.config.frontend_dir()];
        if self.config.backend.is_selected() {
            dirs.push(self.config.backend_dir());
        }
        for dir in dirs {
            fs::create_dir_all(&dir).map_err(|e| ScaffoldError::io(&dir, e))?;
        }
        Ok(())
    }

    /// Root manifest before any feature contributions
    pub fn root_package_json(&self) -> PackageJson {
        let mut scripts: StringMap = BASE_ROOT_SCRIPTS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if let Some(profile) = &self.profile {
            scripts.extend(profile.root_scripts.clone());
        }

        PackageJson {
            name: self.config.project_name.clone(),
            version: "1.0.0".to_string(),
            workspaces: vec!["apps/*".to_string()],
            scripts,
            dev_dependencies: None,
            dependencies: None,
        }
    }

    /// Write `<project>/package.json`
    pub fn init_package_json(&self) -> Result<()> {
        write_manifest(&self.config.root_manifest_path(), &self.root_package_json())
    }

    /// Run the initializer of every selected feature
    pub fn init_features(&self) -> Result<usize> {
        let mut written = 0;
        for feature in &self.config.features {
            written += match feature {
                Feature::Prettier => self.init_prettier()?,
                Feature::Eslint => self.init_eslint()?,
                Feature::GhActions => self.init_gh_actions()?,
            };
        }
        Ok(written)
    }

    fn init_prettier(&self) -> Result<usize> {
        let written = self.materialize("features/prettier", &self.config.project_path)?;
        let patch = ManifestPatch::new()
            .with_scripts([
                ("fmt", "prettier apps --write"),
                ("fmt:check", "prettier apps --check"),
            ])
            .with_dev_dependencies([
                self.versions.entry("prettier"),
                self.versions.entry("prettier-plugin-svelte"),
            ]);
        merge_manifest(&self.config.root_manifest_path(), &patch)?;
        Ok(written)
    }

    fn init_eslint(&self) -> Result<usize> {
        let written = self.materialize("features/eslint", &self.config.project_path)?;
        let patch = ManifestPatch::new()
            .with_scripts([("lint", "eslint apps")])
            .with_dev_dependencies([
                self.versions.entry("eslint"),
                self.versions.entry("@eslint/js"),
                self.versions.entry("eslint-plugin-svelte"),
                self.versions.entry("typescript-eslint"),
                self.versions.entry("globals"),
            ]);
        merge_manifest(&self.config.root_manifest_path(), &patch)?;
        Ok(written)
    }

    fn init_gh_actions(&self) -> Result<usize> {
        let workflows_dir = self.config.project_path.join(".github").join("workflows");
        self.materialize("gh-actions", &workflows_dir)
    }

    /// Materialize the frontend app and wire it to the chosen backend
    pub fn init_frontend(&self) -> Result<usize> {
        let frontend_dir = self.config.frontend_dir();
        let mut written = self.materialize("frontend/base", &frontend_dir)?;

        if let Some(profile) = &self.profile {
            let patch = profile.frontend_patch();
            if !patch.is_empty() {
                merge_manifest(&frontend_dir.join("package.json"), &patch)?;
            }
            written += self.materialize(
                &format!("frontend/with-{}", self.config.backend.tag()),
                &frontend_dir,
            )?;
        }

        Ok(written)
    }

    /// Materialize the backend app and merge the backend profile into its manifest
    pub fn init_backend(&self) -> Result<usize> {
        let Some(profile) = &self.profile else {
            debug!("No backend selected");
            return Ok(0);
        };
        debug_assert!(self.config.backend != Backend::None);

        let backend_dir = self.config.backend_dir();
        let written = self.materialize(
            &format!("backend/with-{}", self.config.backend.tag()),
            &backend_dir,
        )?;
        merge_manifest(&backend_dir.join("package.json"), &profile.backend_patch())?;
        Ok(written)
    }

    /// Apply the styling variant on top of the frontend app
    pub fn init_styling(&self) -> Result<usize> {
        let dev_dependencies = match self.config.styling {
            Styling::None => return Ok(0),
            Styling::Tailwind => vec![
                self.versions.entry("tailwindcss"),
                self.versions.entry("@tailwindcss/vite"),
            ],
            Styling::Unocss => vec![self.versions.entry("unocss")],
        };

        let frontend_dir = self.config.frontend_dir();
        let written = self.materialize(
            &format!("frontend/with-{}", self.config.styling.tag()),
            &frontend_dir,
        )?;
        merge_manifest(
            &frontend_dir.join("package.json"),
            &ManifestPatch::new().with_dev_dependencies(dev_dependencies),
        )?;
        Ok(written)
    }
}
