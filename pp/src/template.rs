//! Placeholder substitution
//!
//! Templates are plain prose with bracketed tokens such as `[tone]`. Rendering
//! walks the supplied values in order and swaps the token for each key with
//! its value. Values are inserted verbatim: brackets, `$` and any other
//! characters in a value are never escaped or interpreted.
//!
//! Tokens without a value stay in the output as-is. That is the normal result
//! of a field the user never touched, not an error.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Strict token shape used for discovery and validation. Bracketed prose such
/// as `[PASTE YOUR TEXT HERE]` does not match and is never treated as a field.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9_-]+)\]").expect("placeholder pattern is valid"));

/// How many occurrences of a token a single value fills
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionMode {
    /// Only the first occurrence of each token is replaced
    #[default]
    First,
    /// Every occurrence of each token is replaced
    All,
}

impl std::fmt::Display for SubstitutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::All => write!(f, "all"),
        }
    }
}

/// A token found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Field name between the brackets
    pub name: String,
    /// Byte offset of the opening bracket
    pub offset: usize,
}

/// The literal token for a field name, e.g. `tone` -> `[tone]`
pub fn token(name: &str) -> String {
    format!("[{}]", name)
}

/// Render a template, filling the first occurrence of each key's token
pub fn substitute<'a, I>(template: &str, values: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    substitute_with(template, values, SubstitutionMode::First)
}

/// Render a template with an explicit substitution mode
///
/// Replacement runs key by key over the working string in iteration order.
pub fn substitute_with<'a, I>(template: &str, values: I, mode: SubstitutionMode) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    debug!(template_len = template.len(), %mode, "substitute_with: called");
    let mut rendered = template.to_string();
    for (key, value) in values {
        let token = token(key);
        if !rendered.contains(&token) {
            debug!(%key, "substitute_with: token not present, skipping");
            continue;
        }
        rendered = match mode {
            SubstitutionMode::First => rendered.replacen(&token, value, 1),
            SubstitutionMode::All => rendered.replace(&token, value),
        };
    }
    debug!(rendered_len = rendered.len(), "substitute_with: complete");
    rendered
}

/// All tokens in a template, in order of appearance (repeats included)
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(Placeholder {
                name: name.as_str().to_string(),
                offset: whole.start(),
            })
        })
        .collect()
}

/// Distinct token names still present in a rendered prompt, first-seen order
pub fn unfilled(rendered: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    placeholders(rendered)
        .into_iter()
        .filter(|p| seen.insert(p.name.clone()))
        .map(|p| p.name)
        .collect()
}
