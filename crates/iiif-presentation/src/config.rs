use crate::document::{to_json_string, try_to_document, Render};
use crate::resource::{Resource, DEFAULT_CONTEXT};
use crate::DocumentError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Defaults applied when building and rendering documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Context attached to new top-level resources.
    #[serde(default = "default_context")]
    pub default_context: String,
    #[serde(default)]
    pub pretty: bool,
    /// Refuse to render a top-level resource without an `@id`.
    #[serde(default)]
    pub strict: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            default_context: default_context(),
            pretty: false,
            strict: false,
        }
    }
}

fn default_context() -> String {
    DEFAULT_CONTEXT.to_owned()
}

impl PresentationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_context(mut self, context: &str) -> Self {
        self.default_context = context.to_owned();
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// A new top-level resource carrying the configured context.
    pub fn top_level<R: Resource>(&self) -> R {
        R::top_level_with_context(self.default_context.as_str())
    }

    /// Render `resource` to JSON according to this configuration.
    pub fn render<R: Render>(&self, resource: &R) -> Result<String, DocumentError> {
        if self.strict {
            try_to_document(resource)?;
        }
        to_json_string(resource, self.pretty)
    }

    /// Load config from `~/.config/iiif-presentation/config.json`.
    pub fn load_default() -> Result<Self, DocumentError> {
        let path = default_config_path()?;
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DocumentError::Config(format!("invalid presentation config: {e}")))
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn default_config_path() -> Result<PathBuf, DocumentError> {
    let home =
        std::env::var("HOME").map_err(|_| DocumentError::Config("HOME not set".to_owned()))?;
    Ok(PathBuf::from(home).join(".config/iiif-presentation/config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Manifest;
    use crate::types::ContextUri;

    #[test]
    fn config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        let config = PresentationConfig::new()
            .with_context("http://iiif.io/api/presentation/2.1/context.json")
            .with_pretty(true)
            .with_strict(true);
        config.save(&path).unwrap();

        let loaded = PresentationConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let loaded = PresentationConfig::load(&path).unwrap();
        assert_eq!(loaded, PresentationConfig::default());
        assert_eq!(loaded.default_context, DEFAULT_CONTEXT);
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = PresentationConfig::load(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Config(_)));
    }

    #[test]
    fn top_level_uses_configured_context() {
        let config =
            PresentationConfig::new().with_context("http://iiif.io/api/presentation/2.1/context.json");
        let manifest: Manifest = config.top_level();
        assert!(manifest.is_top_level());
        assert_eq!(
            manifest.contexts().as_one().map(ContextUri::as_str),
            Some("http://iiif.io/api/presentation/2.1/context.json")
        );
    }

    #[test]
    fn strict_render_rejects_missing_id() {
        let manifest: Manifest = PresentationConfig::new().top_level();
        assert!(PresentationConfig::new().render(&manifest).is_ok());
        assert!(matches!(
            PresentationConfig::new().with_strict(true).render(&manifest),
            Err(DocumentError::MissingId(_))
        ));
    }

    #[test]
    fn pretty_render_spans_lines() {
        let mut manifest: Manifest = PresentationConfig::new().top_level();
        manifest.set_id("https://example.org/m");
        let compact = PresentationConfig::new().render(&manifest).unwrap();
        let pretty = PresentationConfig::new()
            .with_pretty(true)
            .render(&manifest)
            .unwrap();
        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn render_matches_json_string_output() {
        let mut manifest: Manifest = PresentationConfig::new().top_level();
        manifest
            .set_id("https://example.org/m")
            .add_label("Book 1", Some("en"));
        for pretty in [false, true] {
            let config = PresentationConfig::new().with_pretty(pretty).with_strict(true);
            assert_eq!(
                config.render(&manifest).unwrap(),
                to_json_string(&manifest, pretty).unwrap()
            );
        }
    }
}
