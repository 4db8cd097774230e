//! Field templates.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// The kinds of markup a [`FormRenderer`](crate::FormRenderer) produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKey {
    /// Wrapper around the rendered error items (`{errors}`).
    Error,
    /// A single error message (`{error}`).
    ErrorItem,
    /// `<input>` element.
    Input,
    /// `<label>` element (`{label}`, `{id}`).
    Label,
    /// `<select>` element (`{options}` holds the rendered options).
    Select,
    /// A single `<option>` (`{value}`, `{option}`).
    SelectOption,
    /// `<textarea>` element, `{value}` is the content.
    Textarea,
}

impl TemplateKey {
    /// All keys, in a stable order.
    pub const ALL: [Self; 7] = [
        Self::Error,
        Self::ErrorItem,
        Self::Input,
        Self::Label,
        Self::Select,
        Self::SelectOption,
        Self::Textarea,
    ];

    /// Returns the snake_case name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::ErrorItem => "error_item",
            Self::Input => "input",
            Self::Label => "label",
            Self::Select => "select",
            Self::SelectOption => "select_option",
            Self::Textarea => "textarea",
        }
    }

    /// Returns the built-in template for this key.
    pub fn default_template(self) -> &'static str {
        match self {
            Self::Error => r#"<div class="errors"><ul>{errors}</ul></div>"#,
            Self::ErrorItem => "<li>{error}</li>",
            Self::Input => {
                r#"<input type="{type}" name="data[{name}]" id="{id}" value="{value}" class="{class}"{extra}>"#
            }
            Self::Label => r#"<label for="{id}">{label}</label>"#,
            Self::Select => {
                r#"<select name="data[{name}]" id="{id}" class="{class}"{extra}>{options}</select>"#
            }
            Self::SelectOption => r#"<option value="{value}">{option}</option>"#,
            Self::Textarea => {
                r#"<textarea name="data[{name}]" id="{id}" class="{class}"{extra}>{value}</textarea>"#
            }
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKey {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FormError::UnknownTemplate(s.to_string()))
    }
}

/// A set of template overrides keyed by [`TemplateKey`].
///
/// Lookups fall back to the built-in template for keys that were not
/// overridden. The set serializes as a plain map, so overrides can live in
/// application configuration:
///
/// ```
/// use oxide_formkit::{TemplateKey, TemplateSet};
///
/// let set = TemplateSet::from_json(r#"{"label": "<label>{label}</label>"}"#).unwrap();
/// assert_eq!(set.get(TemplateKey::Label), "<label>{label}</label>");
/// assert_eq!(set.get(TemplateKey::ErrorItem), "<li>{error}</li>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSet {
    overrides: BTreeMap<TemplateKey, String>,
}

impl TemplateSet {
    /// Creates an empty set (built-in templates only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object of template overrides.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the override for `key`, or the built-in template.
    pub fn get(&self, key: TemplateKey) -> &str {
        self.overrides
            .get(&key)
            .map_or_else(|| key.default_template(), String::as_str)
    }

    /// Returns the override for `key`, if any.
    pub fn get_override(&self, key: TemplateKey) -> Option<&str> {
        self.overrides.get(&key).map(String::as_str)
    }

    /// Sets an override.
    pub fn set(&mut self, key: TemplateKey, template: impl Into<String>) {
        self.overrides.insert(key, template.into());
    }

    /// Builder method to set an override.
    #[must_use]
    pub fn with(mut self, key: TemplateKey, template: impl Into<String>) -> Self {
        self.set(key, template);
        self
    }

    /// Copies every override of `other` into this set.
    pub fn extend(&mut self, other: Self) {
        self.overrides.extend(other.overrides);
    }

    /// Removes all overrides.
    pub fn clear(&mut self) {
        self.overrides.clear();
    }

    /// Returns whether no template is overridden.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Returns the number of overrides.
    pub fn len(&self) -> usize {
        self.overrides.len()
    }
}
