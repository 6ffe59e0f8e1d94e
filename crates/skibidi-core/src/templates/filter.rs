//! Per-file inclusion rules based on the selected features

use crate::config::Feature;
use crate::templates::manifest::FeatureFiles;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A template discovered during one materialization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub source_path: PathBuf,
    /// Destination path relative to the destination root (suffix already stripped)
    pub relative_path: PathBuf,
    /// Feature that must be selected for this file to be emitted
    pub feature: Option<Feature>,
}

/// Decides which template files get emitted
#[derive(Debug, Clone, Default)]
pub struct InclusionFilter {
    feature_files: FeatureFiles,
    active: BTreeSet<Feature>,
}

impl InclusionFilter {
    pub fn new(feature_files: FeatureFiles, active: BTreeSet<Feature>) -> Self {
        Self {
            feature_files,
            active,
        }
    }

    /// Describe a template file, attaching the feature that gates it (if any)
    pub fn classify(&self, source_path: PathBuf, relative_path: PathBuf) -> TemplateFile {
        let feature = self
            .feature_files
            .feature_for_file(&relative_path.to_string_lossy());
        TemplateFile {
            source_path,
            relative_path,
            feature,
        }
    }

    /// Whether a classified file should be written
    pub fn includes(&self, file: &TemplateFile) -> bool {
        file.feature.map_or(true, |f| self.active.contains(&f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(list: &[Feature]) -> InclusionFilter {
        InclusionFilter::new(FeatureFiles::builtin(), list.iter().copied().collect())
    }

    fn emitted(filter: &InclusionFilter, name: &str) -> bool {
        let file = filter.classify(PathBuf::from(format!("/t/{}.j2", name)), PathBuf::from(name));
        filter.includes(&file)
    }

    #[test]
    fn test_format_check_requires_prettier() {
        assert!(!emitted(&filter(&[]), "format-check.yml"));
        assert!(emitted(&filter(&[Feature::Prettier]), "format-check.yml"));
        assert!(!emitted(
            &filter(&[Feature::Eslint, Feature::GhActions]),
            "format-check.yml"
        ));
    }

    #[test]
    fn test_ungated_files_always_included() {
        let filter = filter(&[]);
        assert!(emitted(&filter, "ci.yml"));
        assert!(emitted(&filter, "src/app.html"));
    }

    #[test]
    fn test_classify_marks_conditional_files() {
        let filter = filter(&[]);

        let gated = filter.classify(
            PathBuf::from("/t/format-check.yml.j2"),
            PathBuf::from("format-check.yml"),
        );
        assert_eq!(gated.feature, Some(Feature::Prettier));
        assert!(!filter.includes(&gated));

        let plain = filter.classify(PathBuf::from("/t/ci.yml.j2"), PathBuf::from("ci.yml"));
        assert_eq!(plain.feature, None);
        assert!(filter.includes(&plain));
    }
}
