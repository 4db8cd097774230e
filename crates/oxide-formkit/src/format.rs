//! Placeholder substitution and identifier helpers.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder regex is valid"));

/// Substitutes `{name}` placeholders in `template`.
///
/// Each placeholder whose name appears in `vars` is replaced by the value's
/// string form. Substitution happens in a single pass, so inserted values are
/// never scanned for further placeholders. Placeholders with no matching var
/// are left as they are.
///
/// # Example
///
/// ```
/// use oxide_formkit::format;
///
/// let out = format("{n} and {n} but not {m}", [("n", "Z")]);
/// assert_eq!(out, "Z and Z but not {m}");
/// ```
pub fn format<K, V>(template: &str, vars: impl IntoIterator<Item = (K, V)>) -> String
where
    K: Into<String>,
    V: Display,
{
    let vars: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.to_string()))
        .collect();

    if vars.is_empty() {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            vars.get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Also starts a new word; `is_ascii_whitespace` does not cover it.
const VERTICAL_TAB: char = '\u{b}';

/// Turns a delimited identifier into PascalCase.
///
/// `.`, `_` and `-` act as word separators alongside spaces. The first letter
/// of every word is upper-cased and the separators are dropped.
///
/// ```
/// use oxide_formkit::camelize;
///
/// assert_eq!(camelize("user.first_name"), "UserFirstName");
/// ```
pub fn camelize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;

    for c in s.chars() {
        let c = if matches!(c, '.' | '_' | '-') { ' ' } else { c };

        if word_start {
            out.push(c.to_ascii_uppercase());
        } else if c != ' ' {
            out.push(c);
        }

        word_start = c.is_ascii_whitespace() || c == VERTICAL_TAB;
    }

    out.retain(|c| c != ' ');
    out
}
