//! Project configuration, input validation and the dependency version table

pub mod project;
pub mod validate;
pub mod versions;

pub use project::{Backend, Feature, ProjectConfig, Styling};
pub use validate::{
    default_project_path, display_path, resolve_project_path, validate_project_name,
    validate_project_path, DEFAULT_PROJECT_NAME,
};
pub use versions::DependencyVersions;
