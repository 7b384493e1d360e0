//! Template engine for HTML pages using Jinja2 syntax.
//!
//! Page templates are compiled into the binary, so a deployment only needs
//! the executable plus the public assets directory.

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

/// Page templates bundled at build time, keyed by template name
const PAGE_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../../templates/pages/base.html")),
    ("index.html", include_str!("../../../templates/pages/index.html")),
    ("upload.html", include_str!("../../../templates/pages/upload.html")),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to load template '{0}': {1}")]
    LoadError(String, String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Holds the compiled page templates.
///
/// `.html` templates are rendered with HTML auto-escaping, so values such as
/// client-controlled file extensions can be passed in as-is.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Build an engine with all bundled page templates
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_templates(PAGE_TEMPLATES)
    }

    fn with_templates(templates: &[(&'static str, &'static str)]) -> Result<Self, TemplateError> {
        let mut env = Environment::new();

        for &(name, source) in templates {
            env.add_template(name, source)
                .map_err(|e| TemplateError::LoadError(name.to_string(), e.to_string()))?;
            tracing::debug!("Loaded template: {}", name);
        }

        Ok(Self { env })
    }

    /// Render a template with a serializable context
    pub fn render<C: Serialize>(&self, template_name: &str, ctx: &C) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    /// Check if a template exists
    #[cfg(test)]
    pub fn template_exists(&self, template_name: &str) -> bool {
        self.env.get_template(template_name).is_ok()
    }
}
