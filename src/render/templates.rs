//! Host and zone templates.

use std::fmt;
use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use super::TemplateError;

const HOST: &str = "host";
const ZONE: &str = "zone";

/// Values substituted into the host template.
///
/// Placeholders: `{{name}}`, `{{template}}`, `{{address}}`, `{{variables}}`.
#[derive(Debug, Clone, Serialize)]
pub struct HostContext<'a> {
    /// Full node name
    pub name: &'a str,
    /// Icinga2 host template to import
    pub template: &'a str,
    /// Address fragment from [`super::address_string`]
    pub address: &'a str,
    /// Variables fragment from [`super::variables_string`]
    pub variables: &'a str,
}

/// Values substituted into the zone template.
///
/// Placeholders: `{{name}}`, `{{satellite}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneContext<'a> {
    /// Full node name (endpoint and zone name)
    pub name: &'a str,
    /// Parent satellite zone name
    pub satellite: &'a str,
}

/// The compiled host and zone templates.
///
/// Templates are compiled once, in strict mode, so an unknown
/// placeholder fails the run instead of rendering as an empty string.
/// Output is not HTML-escaped.
pub struct TemplateSet {
    registry: Handlebars<'static>,
}

impl fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateSet").finish_non_exhaustive()
    }
}

impl TemplateSet {
    /// Compiles templates from their source text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Compile`] if either template is invalid.
    pub fn from_strings(host: &str, zone: &str) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        for (name, source) in [(HOST, host), (ZONE, zone)] {
            registry
                .register_template_string(name, source)
                .map_err(|e| TemplateError::Compile {
                    name,
                    source: Box::new(e),
                })?;
        }

        Ok(Self { registry })
    }

    /// Reads and compiles the template files.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Read`] if a file cannot be read and
    /// [`TemplateError::Compile`] if its content is invalid.
    pub fn load(host_path: &Path, zone_path: &Path) -> Result<Self, TemplateError> {
        let host = read_template(host_path)?;
        let zone = read_template(zone_path)?;
        Self::from_strings(&host, &zone)
    }

    /// Renders the host object of a node.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if rendering fails.
    pub fn render_host(&self, context: &HostContext<'_>) -> Result<String, TemplateError> {
        self.render(HOST, context.name, context)
    }

    /// Renders the endpoint/zone objects of a node.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if rendering fails.
    pub fn render_zone(&self, context: &ZoneContext<'_>) -> Result<String, TemplateError> {
        self.render(ZONE, context.name, context)
    }

    fn render<T: Serialize>(
        &self,
        name: &'static str,
        node: &str,
        data: &T,
    ) -> Result<String, TemplateError> {
        self.registry
            .render(name, data)
            .map_err(|e| TemplateError::Render {
                name,
                node: node.to_string(),
                source: Box::new(e),
            })
    }
}

fn read_template(path: &Path) -> Result<String, TemplateError> {
    std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })
}
