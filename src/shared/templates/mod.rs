//! HTML page template management module.
//!
//! Templates live in `templates/pages/`, use Jinja2 syntax and are embedded
//! into the binary at build time.

pub mod engine;

pub use engine::{TemplateEngine, TemplateError};
