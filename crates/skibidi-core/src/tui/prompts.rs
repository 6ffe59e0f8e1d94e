//! Charm-style CLI prompts using cliclack

use crate::config::{
    default_project_path, display_path, resolve_project_path, validate_project_name,
    validate_project_path, Backend, DependencyVersions, Feature, ProjectConfig, Styling,
    DEFAULT_PROJECT_NAME,
};
use crate::runtime::{check_bun, install_dependencies, PackageManager, INSTALL_TIMEOUT};
use crate::scaffold::{Scaffolder, StepProgress};
use crate::templates::TemplateLibrary;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;

    cliclack::intro("Skibidi Stack")?;

    // Step 1: Collect answers
    let config = collect_config(&cwd)?;

    // Step 2: Generate the project
    let templates = TemplateLibrary::locate(args.template_dir.as_deref());
    let versions = DependencyVersions::builtin();
    create_project(&config, &templates, &versions)?;

    // Step 3: Optionally install dependencies
    let installed = install(&config).await?;

    // Step 4: Show next steps
    print_next_steps(&config, &cwd, installed)?;

    Ok(())
}

/// Unwrap a prompt answer; a cancelled prompt ends the process with exit code 0
fn answer<T>(result: io::Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => {
            cliclack::outro_cancel("Operation cancelled")?;
            std::process::exit(0);
        }
        Err(e) => Err(e.into()),
    }
}

/// Report a fatal failure and exit with code 1
fn abort(message: impl Display) -> ! {
    let _ = cliclack::outro_cancel(message.to_string());
    std::process::exit(1);
}

fn collect_config(cwd: &Path) -> Result<ProjectConfig> {
    let project_name = select_project_name()?;
    let project_path = select_project_path(&project_name, cwd)?;

    let mut backend_select = cliclack::select("Select your backend framework:");
    for backend in Backend::ALL {
        backend_select = backend_select.item(backend, backend.display_name(), backend.hint());
    }
    let backend: Backend = answer(backend_select.interact())?;

    let mut styling_select = cliclack::select("Choose your styling solution:");
    for styling in Styling::ALL {
        styling_select = styling_select.item(styling, styling.display_name(), styling.hint());
    }
    let styling: Styling = answer(styling_select.interact())?;

    let mut feature_select = cliclack::multiselect("Select additional features:");
    for feature in Feature::ALL {
        feature_select = feature_select.item(feature, feature.display_name(), feature.hint());
    }
    let features: Vec<Feature> = answer(
        feature_select
            .initial_values(vec![Feature::Prettier])
            .required(false)
            .interact(),
    )?;

    Ok(ProjectConfig {
        project_name,
        project_path,
        backend,
        styling,
        features: features.into_iter().collect(),
    })
}

fn select_project_name() -> Result<String> {
    let input: String = answer(
        cliclack::input("What is your project name?")
            .placeholder(DEFAULT_PROJECT_NAME)
            .default_input(DEFAULT_PROJECT_NAME)
            .validate(|input: &String| validate_project_name(input))
            .interact(),
    )?;

    if input.is_empty() {
        Ok(DEFAULT_PROJECT_NAME.to_string())
    } else {
        Ok(input)
    }
}

fn select_project_path(project_name: &str, cwd: &Path) -> Result<PathBuf> {
    let suggestion = default_project_path(project_name, cwd);
    let validate_cwd = cwd.to_path_buf();

    let input: String = answer(
        cliclack::input("Where would you like to create your project?")
            .placeholder(&suggestion)
            .default_input(&suggestion)
            .validate(move |input: &String| {
                validate_project_path(input, &validate_cwd).map(|_| ())
            })
            .interact(),
    )?;

    let input = if input.is_empty() { suggestion } else { input };
    Ok(resolve_project_path(&input, cwd))
}

fn create_project(
    config: &ProjectConfig,
    templates: &TemplateLibrary,
    versions: &DependencyVersions,
) -> Result<()> {
    let scaffolder = match Scaffolder::new(config, templates, versions) {
        Ok(scaffolder) => scaffolder,
        Err(e) => abort(format!("Failed to load templates: {}", e)),
    };

    let mut spinner: Option<cliclack::ProgressBar> = None;
    let result = scaffolder.run_with(|step, progress| match progress {
        StepProgress::Started => {
            let bar = cliclack::spinner();
            bar.start(format!("Running: {}...", step));
            spinner = Some(bar);
        }
        StepProgress::Finished(_) => {
            if let Some(bar) = spinner.take() {
                bar.stop(format!("Done: {}", step));
            }
        }
        StepProgress::Failed(err) => {
            if let Some(bar) = spinner.take() {
                bar.error(format!("Could not {}", step));
            }
            if !step.is_fatal() {
                let _ = cliclack::log::warning(err.to_string());
            }
        }
    });

    let files_written = match result {
        Ok(report) => report.files_written,
        Err(e) => abort(e),
    };

    cliclack::log::success(format!(
        "Created {} files in {}",
        files_written,
        config.project_path.display()
    ))?;

    Ok(())
}

/// Ask about installing dependencies and run the package manager if wanted.
/// Returns whether dependencies were installed.
async fn install(config: &ProjectConfig) -> Result<bool> {
    let confirmed: bool = answer(
        cliclack::confirm("Would you like to install dependencies now?")
            .initial_value(false)
            .interact(),
    )?;
    if !confirmed {
        return Ok(false);
    }

    let manager = PackageManager::bun();
    let bun = check_bun();
    if !bun.available {
        cliclack::log::warning(format!(
            "{} is not installed. Install it from https://bun.sh and run '{}' later.",
            bun.name,
            manager.command_line()
        ))?;
        return Ok(false);
    }

    let spinner = cliclack::spinner();
    spinner.start("Installing dependencies");

    match install_dependencies(&manager, &config.project_path, INSTALL_TIMEOUT).await {
        Ok(outcome) if outcome.success() => {
            spinner.stop("Dependencies installed successfully");
            Ok(true)
        }
        Ok(outcome) => {
            spinner.error("Failed to install dependencies");
            if let Some(line) = outcome.stderr.lines().rev().find(|l| !l.trim().is_empty()) {
                cliclack::log::remark(line.trim())?;
            }
            cliclack::log::warning(format!(
                "Please install them manually with '{}'",
                manager.command_line()
            ))?;
            Ok(false)
        }
        Err(e) => {
            spinner.error("Failed to install dependencies");
            cliclack::log::warning(format!(
                "{}. Please install them manually with '{}'",
                e,
                manager.command_line()
            ))?;
            Ok(false)
        }
    }
}

fn next_steps(config: &ProjectConfig, cwd: &Path, installed: bool) -> Vec<String> {
    let mut steps = vec![format!("cd {}", display_path(&config.project_path, cwd))];
    if !installed {
        steps.push("bun install".to_string());
    }
    steps.push("bun dev".to_string());
    steps
}

fn print_next_steps(config: &ProjectConfig, cwd: &Path, installed: bool) -> Result<()> {
    println!();
    println!("  Next steps");
    println!();

    for (i, step) in next_steps(config, cwd, installed).iter().enumerate() {
        println!("  {}.  {}", i + 1, step.cyan());
    }

    cliclack::outro("Your project is ready!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProjectConfig {
        ProjectConfig {
            project_name: "demo".to_string(),
            project_path: PathBuf::from("/work/demo"),
            backend: Backend::None,
            styling: Styling::None,
            features: Default::default(),
        }
    }

    #[test]
    fn test_next_steps_without_install() {
        let steps = next_steps(&config(), Path::new("/work"), false);
        assert_eq!(steps, vec!["cd demo", "bun install", "bun dev"]);
    }

    #[test]
    fn test_next_steps_after_install() {
        let steps = next_steps(&config(), Path::new("/elsewhere"), true);
        assert_eq!(steps, vec!["cd /work/demo", "bun dev"]);
    }
}
