//! Template materialization: scan, filter, render and write a template tree

use crate::error::{Result, ScaffoldError};
use crate::templates::filter::InclusionFilter;
use crate::templates::renderer::{RenderContext, TemplateRenderer};
use crate::templates::scanner::{scan_templates, strip_template_suffix};
use log::{debug, trace};
use std::fs;
use std::path::{Path, PathBuf};

/// Turns template trees into files, sharing one renderer, context and filter
pub struct Materializer<'a> {
    renderer: &'a dyn TemplateRenderer,
    context: &'a RenderContext,
    filter: &'a InclusionFilter,
}

impl<'a> Materializer<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        context: &'a RenderContext,
        filter: &'a InclusionFilter,
    ) -> Self {
        Self {
            renderer,
            context,
            filter,
        }
    }

    /// Render every template below `template_root` into `destination_root`.
    ///
    /// Existing files are overwritten. The first failure aborts the call and files
    /// written before it are left in place. Returns the written paths.
    pub fn materialize(&self, template_root: &Path, destination_root: &Path) -> Result<Vec<PathBuf>> {
        debug!(
            "Materializing {} into {}",
            template_root.display(),
            destination_root.display()
        );

        let mut written = Vec::new();

        for source_path in scan_templates(template_root)? {
            let source_path = source_path?;
            let relative = source_path
                .strip_prefix(template_root)
                .map(strip_template_suffix)
                .unwrap_or_else(|_| PathBuf::from(source_path.file_name().unwrap_or_default()));

            let file = self.filter.classify(source_path, relative);
            if !self.filter.includes(&file) {
                debug!(
                    "Skipping {} (requires feature {:?})",
                    file.relative_path.display(),
                    file.feature
                );
                continue;
            }

            let target_path = destination_root.join(&file.relative_path);
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
            }

            let template = fs::read_to_string(&file.source_path)
                .map_err(|e| ScaffoldError::io(&file.source_path, e))?;
            let name = file.relative_path.to_string_lossy();
            let content = self.renderer.render(&name, &template, self.context)?;

            fs::write(&target_path, content).map_err(|e| ScaffoldError::io(&target_path, e))?;
            trace!("Wrote {}", target_path.display());

            written.push(target_path);
        }

        Ok(written)
    }
}
