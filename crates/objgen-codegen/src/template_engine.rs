//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with the built-in Anjay Lite skeleton templates
//! registered. Templates can be replaced from a directory on disk with
//! [`TemplateEngine::from_dir`].
//!
//! # Examples
//!
//! ```
//! use objgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new()?;
//! engine.register_template_string("greeting", "/* {{name}} */")?;
//! assert_eq!(engine.render("greeting", &json!({"name": "On/Off"}))?, "/* On/Off */");
//! # Ok::<(), objgen_core::Error>(())
//! ```

use handlebars::Handlebars;
use objgen_core::{Error, Result};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Name of the single-instance object template.
pub const SINGLE_INSTANCE_TEMPLATE: &str = "single_instance";

/// Name of the multiple-instance object template.
pub const MULTIPLE_INSTANCES_TEMPLATE: &str = "multiple_instances";

/// Extension of template files loaded from disk.
pub const TEMPLATE_EXTENSION: &str = ".c.hbs";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        SINGLE_INSTANCE_TEMPLATE,
        include_str!("../templates/single_instance.c.hbs"),
    ),
    (
        MULTIPLE_INSTANCES_TEMPLATE,
        include_str!("../templates/multiple_instances.c.hbs"),
    ),
];

const BUILTIN_PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../templates/partials/header.c.hbs")),
    (
        "resource_ids",
        include_str!("../templates/partials/resource_ids.c.hbs"),
    ),
    (
        "instance_struct",
        include_str!("../templates/partials/instance_struct.c.hbs"),
    ),
    (
        "init_instance",
        include_str!("../templates/partials/init_instance.c.hbs"),
    ),
    (
        "riid_helpers",
        include_str!("../templates/partials/riid_helpers.c.hbs"),
    ),
    (
        "resource_handlers",
        include_str!("../templates/partials/resource_handlers.c.hbs"),
    ),
    (
        "res_inst_handlers",
        include_str!("../templates/partials/res_inst_handlers.c.hbs"),
    ),
    (
        "handlers_table",
        include_str!("../templates/partials/handlers_table.c.hbs"),
    ),
];

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; rendering takes `&self`.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates a new template engine with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to
    /// compile.
    pub fn new() -> Result<Self> {
        let mut engine = Self::empty();
        for (name, source) in BUILTIN_PARTIALS {
            engine.register_partial(name, source)?;
        }
        for (name, source) in BUILTIN_TEMPLATES {
            engine.register_template_string(name, source)?;
        }
        Ok(engine)
    }

    /// Creates an engine whose templates come from `dir`.
    ///
    /// Built-in templates are registered first; every `*.c.hbs` file
    /// directly in `dir` replaces or adds the template of the same stem
    /// and every file in `dir/partials` a partial.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if `dir` cannot be read and
    /// [`Error::TemplateError`] if a file does not compile.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut engine = Self::new()?;
        engine.load_dir(dir, false)?;
        let partials = dir.join("partials");
        if partials.is_dir() {
            engine.load_dir(&partials, true)?;
        }
        Ok(engine)
    }

    fn empty() -> Self {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);

        // Generated code is C, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { handlebars }
    }

    fn load_dir(&mut self, dir: &Path, partials: bool) -> Result<()> {
        let entries = std::fs::read_dir(dir).map_err(|source| Error::Io {
            context: format!("reading template directory {}", dir.display()),
            source,
        })?;

        let mut files: Vec<_> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        for path in files {
            let Some(name) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(TEMPLATE_EXTENSION))
            else {
                continue;
            };
            let source = std::fs::read_to_string(&path).map_err(|source| Error::Io {
                context: format!("reading template {}", path.display()),
                source,
            })?;
            debug!(
                "Loading {} '{name}' from {}",
                if partials { "partial" } else { "template" },
                path.display()
            );
            if partials {
                self.register_partial(name, &source)?;
            } else {
                self.register_template_string(name, &source)?;
            }
        }
        Ok(())
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered ([`Error::TemplateMissing`])
    /// - Context cannot be serialized or rendering fails
    ///   ([`Error::TemplateError`])
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        if !self.has_template(template_name) {
            return Err(Error::TemplateMissing {
                name: template_name.to_string(),
            });
        }
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("rendering '{template_name}' failed: {e}"),
            })
    }

    /// Registers a custom template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("failed to register template '{name}': {e}"),
            })
    }

    /// Registers a partial usable as `{{> name}}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the partial is invalid.
    pub fn register_partial(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_partial(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("failed to register partial '{name}': {e}"),
            })
    }
}
