//! Error types for template loading and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for host/zone template operations.
///
/// All variants are fatal for a run.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Failed to read a template file.
    #[error("Failed to read template '{}': {source}", path.display())]
    Read {
        /// Path to the template file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Template syntax is invalid.
    #[error("Invalid {name} template: {source}")]
    Compile {
        /// Template name (`host` or `zone`)
        name: &'static str,
        /// Handlebars parse error
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// Rendering failed, typically a placeholder without a value.
    #[error("Failed to render {name} template for '{node}': {source}")]
    Render {
        /// Template name (`host` or `zone`)
        name: &'static str,
        /// Node being rendered
        node: String,
        /// Handlebars render error
        #[source]
        source: Box<handlebars::RenderError>,
    },
}
