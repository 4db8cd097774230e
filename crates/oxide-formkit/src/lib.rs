//! # oxide-formkit
//!
//! Template-driven HTML form field helpers for server-side views.
//!
//! This crate provides:
//! - `{placeholder}` template substitution
//! - A [`FormRenderer`] binding request data, defaults and validation errors
//!   to labels, error lists, inputs, textareas and selects
//! - Overridable field templates, loadable from JSON configuration
//! - Registration of the renderer as a function in a host template engine
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use oxide_formkit::{FieldParams, FormRenderer};
//!
//! let mut form = FormRenderer::new();
//! form.set_request_data(HashMap::from([("name".to_string(), "John".to_string())]));
//! form.set_errors(HashMap::from([(
//!     "name".to_string(),
//!     vec!["Too short".to_string()],
//! )]));
//!
//! let label = form.label("Name", Some("name"), None);
//! assert_eq!(label, r#"<label for="Name">Name</label>"#);
//!
//! let input = form.input(
//!     "name",
//!     FieldParams::new().with("class", "wide").with("data-x", "v"),
//! );
//! assert_eq!(
//!     input,
//!     r#"<input type="text" name="data[name]" id="Name" value="John" class="wide error" data-x="v">"#
//! );
//!
//! assert_eq!(
//!     form.error("name"),
//!     r#"<div class="errors"><ul><li>Too short</li></ul></div>"#
//! );
//! ```
//!
//! ## Selects
//!
//! ```rust
//! use oxide_formkit::{FieldParams, FormRenderer};
//!
//! let form = FormRenderer::new();
//! let html = form.select(
//!     "role",
//!     FieldParams::new()
//!         .with("options", vec![("user", "User"), ("admin", "Administrator")])
//!         .with("value", "admin"),
//! );
//! assert!(html.contains(r#"<option value="admin" selected>Administrator</option>"#));
//! ```
//!
//! ## Custom templates
//!
//! ```rust
//! use oxide_formkit::{FormRenderer, TemplateKey, TemplateSet};
//!
//! let mut form = FormRenderer::new();
//! form.set_templates(TemplateSet::from_json(
//!     r#"{"error": "<p class=\"invalid\">{errors}</p>", "error_item": "{error} "}"#,
//! )?);
//! form.set_template(TemplateKey::Label, r#"<label class="form-label" for="{id}">{label}</label>"#);
//! # Ok::<(), oxide_formkit::FormError>(())
//! ```

pub mod engine;
mod error;
mod format;
mod params;
mod renderer;
mod templates;

pub use engine::{Extension, FormExtension, FunctionRegistry, ViewFunction, ViewFunctions};
pub use error::{FormError, Result};
pub use format::{camelize, format};
pub use params::{FieldParams, ParamValue};
pub use renderer::FormRenderer;
pub use templates::{TemplateKey, TemplateSet};
