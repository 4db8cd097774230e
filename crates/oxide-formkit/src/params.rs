//! Field parameters and the parameter merge.

use std::fmt;

use serde_json::{Number, Value};

use crate::error::{FormError, Result};
use crate::format::camelize;

/// A single field parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParamValue {
    /// Absent value; falls through the value chain.
    #[default]
    Null,
    /// Boolean; `true` renders an extra attribute as a bare name.
    Bool(bool),
    /// Text.
    Text(String),
    /// Select options as `(value, label)` pairs, in display order.
    Options(Vec<(String, String)>),
}

impl ParamValue {
    /// Returns whether the value is [`ParamValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text, if this is a [`ParamValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the options, if this is a [`ParamValue::Options`].
    pub fn as_options(&self) -> Option<&[(String, String)]> {
        match self {
            Self::Options(options) => Some(options),
            _ => None,
        }
    }
}

/// The form a value takes when substituted into a template.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Bool(false) | Self::Options(_) => Ok(()),
            Self::Bool(true) => f.write_str("1"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        Self::Text(n.to_string())
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        Self::Text(n.to_string())
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        Self::Text(n.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<String>, L: Into<String>> From<Vec<(K, L)>> for ParamValue {
    fn from(options: Vec<(K, L)>) -> Self {
        Self::Options(
            options
                .into_iter()
                .map(|(k, l)| (k.into(), l.into()))
                .collect(),
        )
    }
}

/// Text form of a JSON number.
///
/// Integral floats drop their fraction, so `1.0` reads as `"1"` like an
/// integer would.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// Text form of a JSON scalar used as an option label.
fn label_text(key: &str, value: Value) -> Result<String> {
    match value {
        Value::Null | Value::Bool(false) => Ok(String::new()),
        Value::Bool(true) => Ok("1".to_string()),
        Value::Number(n) => Ok(number_text(&n)),
        Value::String(s) => Ok(s),
        other => Err(FormError::invalid(
            key,
            format!("option label must be a scalar, got {other}"),
        )),
    }
}

impl TryFrom<Value> for ParamValue {
    type Error = FormError;

    /// Converts a JSON value coming from a template engine.
    ///
    /// Numbers become text. Objects become options keyed by their keys;
    /// arrays become options keyed by position.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Number(n) => Ok(Self::Text(number_text(&n))),
            Value::String(s) => Ok(Self::Text(s)),
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| label_text(&k, v).map(|label| (k, label)))
                .collect::<Result<Vec<_>>>()
                .map(Self::Options),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| {
                    let key = i.to_string();
                    label_text(&key, v).map(|label| (key, label))
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Options),
        }
    }
}

/// An ordered set of field parameters.
///
/// Keys keep their insertion order, which is also the order extra attributes
/// are rendered in.
///
/// ```
/// use oxide_formkit::FieldParams;
///
/// let params = FieldParams::new()
///     .with("type", "password")
///     .with("autofocus", true);
/// assert_eq!(params.get("type").and_then(|v| v.as_text()), Some("password"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldParams {
    entries: Vec<(String, ParamValue)>,
}

impl FieldParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, keeping its position if the key already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder method to set a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Gets a parameter.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Returns the parameter as text, treating anything else as empty.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(ToString::to_string).unwrap_or_default()
    }

    /// Removes a parameter and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Converts a JSON object into parameters, preserving key order.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => {
                let mut params = Self::new();
                for (key, value) in map {
                    params.set(key, ParamValue::try_from(value)?);
                }
                Ok(params)
            }
            other => Err(FormError::invalid(
                "params",
                format!("expected an object, got {other}"),
            )),
        }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for FieldParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

impl<'a> IntoIterator for &'a FieldParams {
    type Item = (&'a str, &'a ParamValue);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Renders overrides that are not part of `defaults` as HTML attributes.
///
/// Returns the attribute string (with a leading space) and the overrides with
/// those keys removed. When there are no extras the string is empty.
fn split_extra_attributes(defaults: &FieldParams, overrides: FieldParams) -> (String, FieldParams) {
    let (extra, known): (Vec<_>, Vec<_>) = overrides
        .entries
        .into_iter()
        .partition(|(k, _)| !defaults.contains_key(k));

    let attrs: Vec<String> = extra
        .iter()
        .map(|(k, v)| match v {
            ParamValue::Bool(true) => k.clone(),
            _ => format!(r#"{k}="{v}""#),
        })
        .collect();

    let rendered = if attrs.is_empty() {
        String::new()
    } else {
        tracing::trace!(attributes = ?attrs, "extracted extra attributes");
        format!(" {}", attrs.join(" "))
    };

    (rendered, FieldParams { entries: known })
}

/// Merges caller parameters over a control's defaults.
///
/// Unknown override keys become the `extra` attribute string; the remaining
/// overrides win over the defaults; `id` falls back to the camelized name.
/// Value resolution and error styling depend on renderer state and are applied
/// by the renderer afterwards.
pub(crate) fn merge_params(defaults: FieldParams, overrides: FieldParams) -> FieldParams {
    let (extra, mut merged) = split_extra_attributes(&defaults, overrides);

    if !extra.is_empty() {
        merged.set("extra", extra);
    }

    for (key, value) in defaults.entries {
        if !merged.contains_key(&key) {
            merged.entries.push((key, value));
        }
    }

    if merged.get("id").map_or(true, ParamValue::is_null) {
        let id = camelize(&merged.text("name"));
        merged.set("id", id);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input_defaults(name: &str) -> FieldParams {
        FieldParams::new()
            .with("class", "")
            .with("extra", "")
            .with("id", ParamValue::Null)
            .with("name", name)
            .with("type", "text")
            .with("value", ParamValue::Null)
    }

    #[test]
    fn test_display() {
        assert_eq!(ParamValue::Null.to_string(), "");
        assert_eq!(ParamValue::Bool(true).to_string(), "1");
        assert_eq!(ParamValue::Bool(false).to_string(), "");
        assert_eq!(ParamValue::from(42_i64).to_string(), "42");
    }

    #[test]
    fn test_set_keeps_position() {
        let mut params = FieldParams::new().with("a", "1").with("b", "2");
        params.set("a", "3");
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(params.text("a"), "3");
    }

    #[test]
    fn test_merge_overrides_win() {
        let merged = merge_params(
            input_defaults("test"),
            FieldParams::new().with("type", "password"),
        );
        assert_eq!(merged.text("type"), "password");
        assert_eq!(merged.text("extra"), "");
        assert_eq!(merged.text("id"), "Test");
    }

    #[test]
    fn test_merge_extra_attributes() {
        let overrides = FieldParams::new()
            .with("data-controller", "testing")
            .with("class", "f")
            .with("required", true)
            .with("hidden", false)
            .with("tabindex", 3_i64);
        let merged = merge_params(input_defaults("test"), overrides);

        assert_eq!(
            merged.text("extra"),
            r#" data-controller="testing" required hidden="" tabindex="3""#
        );
        assert!(!merged.contains_key("data-controller"));
        assert!(!merged.contains_key("required"));
        assert_eq!(merged.text("class"), "f");
    }

    #[test]
    fn test_merge_explicit_id() {
        let merged = merge_params(input_defaults("first_name"), FieldParams::new().with("id", "x"));
        assert_eq!(merged.text("id"), "x");

        let merged = merge_params(input_defaults("first_name"), FieldParams::new());
        assert_eq!(merged.text("id"), "FirstName");
    }

    #[test]
    fn test_from_json_preserves_order() {
        let params = FieldParams::from_json(json!({
            "options": {"2": "Two", "1": "One"},
            "value": 1,
            "disabled": true,
        }))
        .unwrap();

        assert_eq!(
            params.get("options").and_then(ParamValue::as_options),
            Some(&[("2".to_string(), "Two".to_string()), ("1".to_string(), "One".to_string())][..])
        );
        assert_eq!(params.text("value"), "1");
        assert_eq!(params.get("disabled"), Some(&ParamValue::Bool(true)));
    }

    #[test]
    fn test_from_json_list_options() {
        let params = FieldParams::from_json(json!({
            "options": ["Red", "Blue", true, null],
        }))
        .unwrap();

        assert_eq!(
            params.get("options"),
            Some(&ParamValue::from(vec![("0", "Red"), ("1", "Blue"), ("2", "1"), ("3", "")]))
        );
    }

    #[test]
    fn test_from_json_integral_floats() {
        let params = FieldParams::from_json(json!({"value": 1.0, "step": 0.5})).unwrap();
        assert_eq!(params.text("value"), "1");
        assert_eq!(params.text("step"), "0.5");
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(FieldParams::from_json(json!(["a"])).is_err());
        assert!(FieldParams::from_json(json!({"options": [[1]]})).is_err());
        assert!(FieldParams::from_json(json!(null)).unwrap().is_empty());
    }
}
