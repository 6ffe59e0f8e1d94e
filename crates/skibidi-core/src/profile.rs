//! Backend profiles: what each backend framework contributes to the generated manifests

use crate::config::{Backend, DependencyVersions};
use crate::package_json::{ManifestPatch, StringMap};

/// Static contribution bundle for one backend framework
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendProfile {
    /// Scripts merged into the root manifest
    pub root_scripts: StringMap,
    /// Scripts merged into `apps/backend/package.json`
    pub scripts: StringMap,
    /// Dependencies merged into `apps/backend/package.json`
    pub dependencies: StringMap,
    /// Dependencies merged into `apps/frontend/package.json`
    pub frontend_dependencies: StringMap,
}

fn map<const N: usize>(entries: [(&str, &str); N]) -> StringMap {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl BackendProfile {
    /// Profile for `backend`, or `None` when no backend was chosen
    pub fn for_backend(backend: Backend, versions: &DependencyVersions) -> Option<Self> {
        match backend {
            Backend::Elysia => Some(Self::elysia(versions)),
            Backend::Encore => Some(Self::encore(versions)),
            Backend::None => None,
        }
    }

    fn elysia(versions: &DependencyVersions) -> Self {
        Self {
            root_scripts: map([("backend", "cd apps/backend && bun run dev")]),
            scripts: map([("dev", "bun run --watch index.ts")]),
            dependencies: [versions.entry("elysia")].into_iter().collect(),
            frontend_dependencies: [
                versions.entry("@elysiajs/eden"),
                ("backend".to_string(), "workspace:*".to_string()),
            ]
            .into_iter()
            .collect(),
        }
    }

    fn encore(versions: &DependencyVersions) -> Self {
        Self {
            root_scripts: map([
                ("backend", "cd apps/backend && encore run"),
                (
                    "backend:gen",
                    "cd apps/backend && encore gen client svelte-encore-app-id --output=../frontend/src/lib/client.ts --env=local",
                ),
                (
                    "backend:gen:prod",
                    "cd apps/backend && encore gen client svelte-encore-app-id --output=../frontend/src/lib/client.ts --env=staging",
                ),
                ("dev", "bun run backend & bun run frontend"),
                ("boot", "bunx concurrently 'bun run backend' 'bun run frontend'"),
            ]),
            scripts: StringMap::new(),
            dependencies: [versions.entry("encore.dev")].into_iter().collect(),
            frontend_dependencies: StringMap::new(),
        }
    }

    /// Patch for the backend sub-package; also renames it to `backend`
    pub fn backend_patch(&self) -> ManifestPatch {
        ManifestPatch::new()
            .with_name("backend")
            .with_dependencies(self.dependencies.clone())
            .with_scripts(self.scripts.clone())
    }

    /// Patch for the frontend sub-package
    pub fn frontend_patch(&self) -> ManifestPatch {
        ManifestPatch::new().with_dependencies(self.frontend_dependencies.clone())
    }
}
