//! Form values and the controller that turns them into a prompt

use serde::Serialize;
use tracing::debug;

use crate::catalog::TemplateDescriptor;
use crate::template::{self, SubstitutionMode};

/// Field name -> value for one category page
///
/// Keys keep the position of their first assignment; setting an existing key
/// updates it in place. Fields never set are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues {
    entries: Vec<(String, String)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Entries in iteration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.set(k, v);
        }
        values
    }
}

/// Mediates between input events and the current page's values
///
/// One controller backs the page on screen. Navigating to another category
/// calls `reset`, which drops both the values and the last prompt.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    values: FormValues,
    rendered: Option<String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record user input for a field, no validation or coercion
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        debug!(%name, "FormController::set_field: called");
        self.values.set(name, value);
    }

    /// Start over with an empty form
    pub fn reset(&mut self) {
        debug!(value_count = self.values.len(), "FormController::reset: called");
        self.values.clear();
        self.rendered = None;
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Render the descriptor's template from the current values
    ///
    /// Replaces the previous prompt, if any.
    pub fn generate(&mut self, descriptor: &TemplateDescriptor, mode: SubstitutionMode) -> &str {
        debug!(title = %descriptor.title, %mode, "FormController::generate: called");
        let rendered = template::substitute_with(&descriptor.template, self.values.iter(), mode);
        self.rendered.insert(rendered).as_str()
    }

    /// Last generated prompt
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writing() -> TemplateDescriptor {
        TemplateDescriptor {
            title: "Writing".to_string(),
            description: String::new(),
            fields: Vec::new(),
            template: "Write a [type] with a [tone] tone to [goal].".to_string(),
        }
    }

    #[test]
    fn test_values_upsert_keeps_position() {
        let mut values = FormValues::new();
        values.set("tone", "formal");
        values.set("type", "email");
        values.set("tone", "friendly");

        let entries: Vec<(&str, &str)> = values.iter().collect();
        assert_eq!(entries, vec![("tone", "friendly"), ("type", "email")]);
        assert_eq!(values.get("tone"), Some("friendly"));
        assert_eq!(values.get("goal"), None);
    }

    #[test]
    fn test_values_from_iter() {
        let values: FormValues = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("a"), Some("3"));
    }

    #[test]
    fn test_generate_leaves_unset_fields() {
        let mut form = FormController::new();
        assert!(form.rendered().is_none());

        form.set_field("type", "email");
        form.set_field("tone", "formal");
        let prompt = form.generate(&writing(), SubstitutionMode::First).to_string();

        assert_eq!(prompt, "Write a email with a formal tone to [goal].");
        assert_eq!(form.rendered(), Some(prompt.as_str()));
    }

    #[test]
    fn test_generate_overwrites_previous() {
        let mut form = FormController::new();
        form.set_field("goal", "inform");
        form.generate(&writing(), SubstitutionMode::First);
        form.set_field("goal", "inspire");
        let prompt = form.generate(&writing(), SubstitutionMode::First);
        assert!(prompt.ends_with("to inspire."));
    }

    #[test]
    fn test_reset_clears_values_and_prompt() {
        let mut form = FormController::new();
        form.set_field("type", "story");
        form.generate(&writing(), SubstitutionMode::First);

        form.reset();

        assert!(form.values().is_empty());
        assert!(form.rendered().is_none());
    }
}
