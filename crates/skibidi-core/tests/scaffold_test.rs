use serde_json::Value;
use skibidi_core::{
    Backend, DependencyVersions, Feature, ProjectConfig, ScaffoldError, Scaffolder, Step,
    StepProgress, Styling, TemplateLibrary,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config(root: &Path, backend: Backend, styling: Styling, features: &[Feature]) -> ProjectConfig {
    ProjectConfig {
        project_name: "demo".to_string(),
        project_path: root.join("demo"),
        backend,
        styling,
        features: features.iter().copied().collect::<BTreeSet<_>>(),
    }
}

fn scaffold(config: &ProjectConfig) -> skibidi_core::ScaffoldReport {
    let templates = TemplateLibrary::bundled();
    let versions = DependencyVersions::builtin();
    Scaffolder::new(config, &templates, &versions)
        .unwrap()
        .run()
        .unwrap()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_minimal_project() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path(), Backend::None, Styling::None, &[]);

    let report = scaffold(&config);
    assert!(report.warnings.is_empty());

    let demo = tmp.path().join("demo");
    let root = read_json(&demo.join("package.json"));
    assert_eq!(root["name"], "demo");
    assert_eq!(root["version"], "1.0.0");
    assert_eq!(root["workspaces"], serde_json::json!(["apps/*"]));
    assert_eq!(root["scripts"]["frontend"], "cd apps/frontend && bun run dev");
    assert_eq!(root["scripts"]["dev"], "bun run frontend");
    assert!(root.get("devDependencies").is_none());

    assert!(demo.join("apps/frontend/package.json").is_file());
    assert!(demo.join("apps/frontend/src/routes/+page.svelte").is_file());
    assert!(!demo.join("apps/backend").exists());
    assert!(!demo.join(".prettierrc").exists());
    assert!(!demo.join(".github").exists());
}

#[test]
fn test_templates_are_rendered_and_suffix_stripped() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path(), Backend::None, Styling::None, &[]);
    scaffold(&config);

    let frontend = tmp.path().join("demo/apps/frontend");
    let html = fs::read_to_string(frontend.join("src/app.html")).unwrap();
    assert!(html.contains("<title>demo</title>"));
    assert!(html.contains("%sveltekit.head%"));
    assert!(frontend.join(".gitignore").is_file());

    let leftover_templates = walk(&frontend)
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "j2"))
        .count();
    assert_eq!(leftover_templates, 0);
}

#[test]
fn test_elysia_backend() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path(), Backend::Elysia, Styling::None, &[]);
    scaffold(&config);

    let demo = tmp.path().join("demo");
    let backend = read_json(&demo.join("apps/backend/package.json"));
    assert_eq!(backend["name"], "backend");
    assert_eq!(
        backend["dependencies"]["elysia"],
        DependencyVersions::builtin().get("elysia")
    );
    assert_eq!(backend["scripts"]["dev"], "bun run --watch index.ts");
    // Template scripts survive the merge
    assert_eq!(backend["scripts"]["start"], "bun run index.ts");

    let frontend = read_json(&demo.join("apps/frontend/package.json"));
    assert_eq!(frontend["dependencies"]["backend"], "workspace:*");
    assert_eq!(frontend["dependencies"]["@elysiajs/eden"], "^1.2.0");
    assert!(demo.join("apps/frontend/src/lib/api.ts").is_file());

    let root = read_json(&demo.join("package.json"));
    assert_eq!(root["scripts"]["backend"], "cd apps/backend && bun run dev");
}

#[test]
fn test_encore_backend() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path(), Backend::Encore, Styling::None, &[]);
    scaffold(&config);

    let demo = tmp.path().join("demo");
    let root = read_json(&demo.join("package.json"));
    assert_eq!(root["scripts"]["dev"], "bun run backend & bun run frontend");

    let encore_app = read_json(&demo.join("apps/backend/encore.app"));
    assert_eq!(encore_app["id"], "demo");

    let backend = read_json(&demo.join("apps/backend/package.json"));
    assert_eq!(backend["name"], "backend");
    assert_eq!(backend["dependencies"]["encore.dev"], "^1.46.4");
    assert!(demo.join("apps/backend/hello/hello.ts").is_file());
}

#[test]
fn test_prettier_and_actions() {
    let tmp = TempDir::new().unwrap();
    let config = config(
        tmp.path(),
        Backend::None,
        Styling::None,
        &[Feature::Prettier, Feature::GhActions],
    );
    scaffold(&config);

    let demo = tmp.path().join("demo");
    let prettierrc = read_json(&demo.join(".prettierrc"));
    assert_eq!(prettierrc["plugins"], serde_json::json!(["prettier-plugin-svelte"]));

    let root = read_json(&demo.join("package.json"));
    assert_eq!(root["scripts"]["fmt:check"], "prettier apps --check");
    assert_eq!(root["devDependencies"]["prettier"], "^3.4.2");
    // Base scripts are kept next to the feature scripts
    assert_eq!(root["scripts"]["dev"], "bun run frontend");

    assert!(demo.join(".github/workflows/ci.yml").is_file());
    assert!(demo.join(".github/workflows/format-check.yml").is_file());
}

#[test]
fn test_format_check_needs_prettier() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path(), Backend::None, Styling::None, &[Feature::GhActions]);
    scaffold(&config);

    let workflows = tmp.path().join("demo/.github/workflows");
    assert!(workflows.join("ci.yml").is_file());
    assert!(!workflows.join("format-check.yml").exists());
}

#[test]
fn test_eslint_feature() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path(), Backend::None, Styling::None, &[Feature::Eslint]);
    scaffold(&config);

    let demo = tmp.path().join("demo");
    assert!(demo.join("eslint.config.js").is_file());
    let root = read_json(&demo.join("package.json"));
    assert_eq!(root["scripts"]["lint"], "eslint apps");
    assert_eq!(root["devDependencies"]["eslint"], "^9.17.0");
}

#[test]
fn test_tailwind_styling_overrides_vite_config() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path(), Backend::Elysia, Styling::Tailwind, &[]);
    scaffold(&config);

    let frontend = tmp.path().join("demo/apps/frontend");
    let vite = fs::read_to_string(frontend.join("vite.config.ts")).unwrap();
    assert!(vite.contains("tailwindcss()"));
    assert!(frontend.join("src/app.css").is_file());

    let manifest = read_json(&frontend.join("package.json"));
    assert_eq!(manifest["devDependencies"]["tailwindcss"], "^4.0.0");
    // The backend wiring from the earlier step is still there
    assert_eq!(manifest["dependencies"]["backend"], "workspace:*");
}

#[test]
fn test_unocss_styling() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path(), Backend::None, Styling::Unocss, &[]);
    scaffold(&config);

    let frontend = tmp.path().join("demo/apps/frontend");
    assert!(frontend.join("uno.config.ts").is_file());
    let manifest = read_json(&frontend.join("package.json"));
    assert_eq!(manifest["devDependencies"]["unocss"], "^0.65.3");
}

#[test]
fn test_missing_frontend_templates_abort_the_run() {
    let templates = TempDir::new().unwrap();
    fs::create_dir_all(templates.path().join("features/prettier")).unwrap();
    let out = TempDir::new().unwrap();
    let config = config(out.path(), Backend::Elysia, Styling::None, &[]);

    let library = TemplateLibrary::new(templates.path());
    let versions = DependencyVersions::builtin();
    let err = Scaffolder::new(&config, &library, &versions)
        .unwrap()
        .run()
        .unwrap_err();

    assert_eq!(err.step, Step::Frontend);
    assert!(matches!(
        err.source,
        ScaffoldError::TemplateDirectoryNotFound { .. }
    ));
    // Earlier steps are not rolled back; the backend step never ran
    assert!(out.path().join("demo/package.json").is_file());
    assert!(!out.path().join("demo/apps/backend/package.json").exists());
}

#[test]
fn test_feature_failures_are_warnings() {
    let tmp = TempDir::new().unwrap();
    let templates = TempDir::new().unwrap();
    let base = templates.path().join("frontend/base");
    fs::create_dir_all(&base).unwrap();
    fs::write(base.join("package.json.j2"), "{ \"name\": \"frontend\" }\n").unwrap();

    let config = config(tmp.path(), Backend::None, Styling::None, &[Feature::Prettier]);
    let library = TemplateLibrary::new(templates.path());
    let versions = DependencyVersions::builtin();
    let report = Scaffolder::new(&config, &library, &versions)
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].step, Step::Features);
    assert!(tmp.path().join("demo/apps/frontend/package.json").is_file());
}

#[test]
fn test_progress_reports_every_step() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path(), Backend::Elysia, Styling::Tailwind, &[Feature::Prettier]);
    let templates = TemplateLibrary::bundled();
    let versions = DependencyVersions::builtin();

    let mut started = Vec::new();
    let mut finished = 0;
    let report = Scaffolder::new(&config, &templates, &versions)
        .unwrap()
        .run_with(|step, progress| match progress {
            StepProgress::Started => started.push(step),
            StepProgress::Finished(written) => finished += written,
            StepProgress::Failed(err) => panic!("{} failed: {}", step, err),
        })
        .unwrap();

    assert_eq!(started, Step::ALL.to_vec());
    assert_eq!(finished, report.files_written);
    assert!(report.files_written > 0);
}

#[test]
fn test_progress_stops_at_fatal_step() {
    let templates = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let config = config(out.path(), Backend::None, Styling::None, &[Feature::Prettier]);
    let library = TemplateLibrary::new(templates.path());
    let versions = DependencyVersions::builtin();

    let mut events = Vec::new();
    let err = Scaffolder::new(&config, &library, &versions)
        .unwrap()
        .run_with(|step, progress| {
            let label = match progress {
                StepProgress::Started => "start",
                StepProgress::Finished(_) => "done",
                StepProgress::Failed(_) => "failed",
            };
            events.push((step, label));
        })
        .unwrap_err();

    assert_eq!(err.step, Step::Frontend);
    assert_eq!(
        events,
        vec![
            (Step::Directories, "start"),
            (Step::Directories, "done"),
            (Step::RootManifest, "start"),
            (Step::RootManifest, "done"),
            (Step::Features, "start"),
            (Step::Features, "failed"),
            (Step::Frontend, "start"),
            (Step::Frontend, "failed"),
        ]
    );
}

fn walk(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            files.extend(walk(&path));
        } else {
            files.push(path);
        }
    }
    files
}
