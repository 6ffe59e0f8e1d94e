//! Variable substitution for template bodies
//!
//! Templates use Jinja-style `{{ name }}` placeholders rendered with MiniJinja.
//! The substitution rules are fixed:
//!
//! - a placeholder whose key is missing from the context renders as an empty string
//! - values are written verbatim, no HTML or JSON escaping is applied
//! - a literal `{{` has to be wrapped in `{% raw %}...{% endraw %}`
//! - trailing newlines of the template are kept

use crate::config::ProjectConfig;
use crate::error::{Result, ScaffoldError};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde_json::{Map, Value};

/// Variables available to a template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    vars: Map<String, Value>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context exposing the project answers as `projectName`, `projectPath`,
    /// `backend`, `styling` and `features`
    pub fn from_config(config: &ProjectConfig) -> Self {
        let mut context = Self::new();
        context.insert("projectName", config.project_name.as_str());
        // Lossy so that a non UTF-8 location never drops the other keys
        context.insert(
            "projectPath",
            config.project_path.to_string_lossy().into_owned(),
        );
        context.insert("backend", config.backend.tag());
        context.insert("styling", config.styling.tag());
        context.insert(
            "features",
            config
                .features
                .iter()
                .map(|f| Value::from(f.tag()))
                .collect::<Vec<_>>(),
        );
        context
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Render `template` with `context`; `name` identifies the template in errors
    fn render(&self, name: &str, template: &str, context: &RenderContext) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Lenient);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, name: &str, template: &str, context: &RenderContext) -> Result<String> {
        self.env
            .render_named_str(name, template, &context.vars)
            .map_err(|source| ScaffoldError::Render {
                name: name.to_string(),
                source,
            })
    }
}
