//! The form field renderer.

use std::collections::HashMap;

use crate::format::{camelize, format};
use crate::params::{merge_params, FieldParams, ParamValue};
use crate::templates::{TemplateKey, TemplateSet};

/// Slot the selected marker is substituted into.
const SELECTED_SLOT: &str = "{selected}";

/// Renders form fields from templates, bound to one request's data.
///
/// A renderer holds the submitted values, fallback values and validation
/// errors for the request being rendered, plus any template overrides. Values
/// resolve in the order request data, default data, then the `value`
/// parameter passed to the field call.
///
/// ```
/// use std::collections::HashMap;
/// use oxide_formkit::{FieldParams, FormRenderer};
///
/// let mut form = FormRenderer::new();
/// form.set_request_data(HashMap::from([("email".to_string(), "a@b.c".to_string())]));
///
/// assert_eq!(
///     form.input("email", FieldParams::new().with("type", "email")),
///     r#"<input type="email" name="data[email]" id="Email" value="a@b.c" class="">"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRenderer {
    request_data: HashMap<String, String>,
    default_data: HashMap<String, String>,
    errors: HashMap<String, Vec<String>>,
    templates: TemplateSet,
}

impl FormRenderer {
    /// Creates a renderer with no data, errors or template overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer seeded with submitted request data.
    pub fn with_request_data(request_data: HashMap<String, String>) -> Self {
        Self {
            request_data,
            ..Self::default()
        }
    }

    /// Replaces the validation errors.
    pub fn set_errors(&mut self, errors: HashMap<String, Vec<String>>) {
        self.errors = errors;
    }

    /// Replaces the submitted request data.
    pub fn set_request_data(&mut self, data: HashMap<String, String>) {
        self.request_data = data;
    }

    /// Replaces the default data.
    pub fn set_default_data(&mut self, data: HashMap<String, String>) {
        self.default_data = data;
    }

    /// Overrides the template for `key`.
    pub fn set_template(&mut self, key: TemplateKey, template: impl Into<String>) {
        tracing::debug!(template = %key, "overriding form template");
        self.templates.set(key, template);
    }

    /// Applies a batch of template overrides, e.g. loaded from configuration.
    pub fn set_templates(&mut self, templates: TemplateSet) {
        tracing::debug!(count = templates.len(), "applying form template overrides");
        self.templates.extend(templates);
    }

    /// Returns the template in effect for `key`.
    pub fn template(&self, key: TemplateKey) -> &str {
        self.templates.get(key)
    }

    pub fn reset_request_data(&mut self) {
        self.request_data.clear();
    }

    pub fn reset_default_data(&mut self) {
        self.default_data.clear();
    }

    pub fn reset_errors(&mut self) {
        self.errors.clear();
    }

    pub fn reset_templates(&mut self) {
        self.templates.clear();
    }

    /// Clears all data, errors and template overrides.
    pub fn reset(&mut self) {
        tracing::debug!("resetting form renderer");
        self.reset_request_data();
        self.reset_default_data();
        self.reset_errors();
        self.reset_templates();
    }

    /// Renders a label.
    ///
    /// Without an explicit `id`, the label points at the camelized field name.
    pub fn label(&self, label: &str, name: Option<&str>, id: Option<&str>) -> String {
        let id = match (id, name) {
            (Some(id), _) if !id.is_empty() => id.to_string(),
            (_, Some(name)) if !name.is_empty() => camelize(name),
            _ => String::new(),
        };

        format(
            self.template(TemplateKey::Label),
            [("label", label), ("id", id.as_str())],
        )
    }

    /// Renders the error list for a field, or an empty string if it has none.
    pub fn error(&self, name: &str) -> String {
        let Some(messages) = self.field_errors(name) else {
            return String::new();
        };

        let item = self.template(TemplateKey::ErrorItem);
        let items: String = messages
            .iter()
            .map(|error| format(item, [("error", error.as_str())]))
            .collect();

        format(self.template(TemplateKey::Error), [("errors", items)])
    }

    /// Renders an `<input>`.
    ///
    /// Recognised parameters are `class`, `extra`, `id`, `type` and `value`;
    /// anything else is rendered as an extra attribute.
    pub fn input(&self, name: &str, params: FieldParams) -> String {
        let defaults = FieldParams::new()
            .with("class", "")
            .with("extra", "")
            .with("id", ParamValue::Null)
            .with("name", name)
            .with("type", "text")
            .with("value", ParamValue::Null);

        let params = self.build_field_params(defaults, params);
        format(self.template(TemplateKey::Input), &params)
    }

    /// Renders a `<textarea>` with the resolved value as its content.
    pub fn textarea(&self, name: &str, params: FieldParams) -> String {
        let defaults = FieldParams::new()
            .with("class", "")
            .with("extra", "")
            .with("id", ParamValue::Null)
            .with("name", name)
            .with("value", ParamValue::Null);

        let params = self.build_field_params(defaults, params);
        format(self.template(TemplateKey::Textarea), &params)
    }

    /// Renders a `<select>`.
    ///
    /// `options` holds `(value, label)` pairs rendered in order; the option
    /// whose value equals the resolved field value is marked `selected`.
    pub fn select(&self, name: &str, params: FieldParams) -> String {
        let defaults = FieldParams::new()
            .with("class", "")
            .with("extra", "")
            .with("id", ParamValue::Null)
            .with("name", name)
            .with("options", ParamValue::Options(Vec::new()))
            .with("value", ParamValue::Null);

        let mut params = self.build_field_params(defaults, params);

        // An absent value reads as "", selecting an empty-keyed placeholder option.
        let selected = params.text("value");
        let option_template = selectable(self.template(TemplateKey::SelectOption));
        let options: String = params
            .get("options")
            .and_then(ParamValue::as_options)
            .unwrap_or_default()
            .iter()
            .map(|(value, label)| {
                let marker = if *value == selected {
                    " selected"
                } else {
                    ""
                };
                format(
                    &option_template,
                    [
                        ("value", value.as_str()),
                        ("option", label.as_str()),
                        ("selected", marker),
                    ],
                )
            })
            .collect();

        params.set("options", options);
        format(self.template(TemplateKey::Select), &params)
    }

    /// Merges parameters and binds them to this renderer's data and errors.
    fn build_field_params(&self, defaults: FieldParams, overrides: FieldParams) -> FieldParams {
        let mut params = merge_params(defaults, overrides);
        let name = params.text("name");

        if let Some(value) = self
            .request_data
            .get(&name)
            .or_else(|| self.default_data.get(&name))
        {
            params.set("value", value);
        }

        if self.field_errors(&name).is_some() {
            let mut class: Vec<String> = params.text("class").split(' ').map(String::from).collect();
            class.push("error".to_string());
            params.set("class", class.join(" "));
        }

        params
    }

    fn field_errors(&self, name: &str) -> Option<&[String]> {
        self.errors
            .get(name)
            .map(Vec::as_slice)
            .filter(|messages| !messages.is_empty())
    }
}

/// Ensures an option template has a slot for the selected marker.
///
/// Templates that do not place `{selected}` themselves get it just before the
/// `>` closing the opening `<option` tag. The template is patched rather than
/// the rendered markup, so labels containing `<` or `>` cannot move it.
fn selectable(template: &str) -> String {
    if template.contains(SELECTED_SLOT) {
        return template.to_string();
    }

    let Some(end) = template
        .find("<option")
        .and_then(|start| template[start..].find('>').map(|offset| start + offset))
    else {
        tracing::debug!("option template has no <option> tag, selection will not be marked");
        return template.to_string();
    };

    let end = if template[..end].ends_with('/') {
        end - 1
    } else {
        end
    };

    let mut patched = String::with_capacity(template.len() + SELECTED_SLOT.len());
    patched.push_str(&template[..end]);
    patched.push_str(SELECTED_SLOT);
    patched.push_str(&template[end..]);
    patched
}
