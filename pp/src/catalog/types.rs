//! Catalog data types

use serde::{Deserialize, Serialize};

/// Input control used for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single selection from a fixed option list
    #[serde(alias = "dropdown")]
    Choice,
    /// One line of free text
    #[serde(alias = "textbox")]
    ShortText,
    /// Multi-line free text
    #[serde(alias = "textarea")]
    LongText,
    /// Reserved, not rendered
    Slider,
    /// Reserved, not rendered
    Checkbox,
}

impl FieldKind {
    /// Whether forms know how to collect this kind
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Choice | Self::ShortText | Self::LongText)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Choice => "choice",
            Self::ShortText => "short-text",
            Self::LongText => "long-text",
            Self::Slider => "slider",
            Self::Checkbox => "checkbox",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One user-configurable input of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, matches the `[name]` token in the template
    pub name: String,

    /// Input control
    pub kind: FieldKind,

    /// Human-readable label
    pub label: String,

    /// Allowed values for choice fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Lower bound for slider fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    /// Upper bound for slider fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl FieldDescriptor {
    /// Option list, empty when none is declared
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }
}

/// Everything needed to render one category's form and prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    /// Page title
    pub title: String,

    /// Page description
    #[serde(default)]
    pub description: String,

    /// Fields in display order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    /// Prompt text with `[name]` placeholders
    pub template: String,
}

impl TemplateDescriptor {
    /// Find a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Home-listing card text, falls back to the page title/description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardText {
    pub title: String,
    pub description: String,
}

/// A catalog entry as stored in YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Category identifier, defaults to the file stem when omitted
    #[serde(default)]
    pub id: String,

    /// Emoji or short glyph shown on the listing card
    #[serde(default)]
    pub icon: String,

    /// Listing card text
    #[serde(default)]
    pub card: CardText,

    #[serde(flatten)]
    pub descriptor: TemplateDescriptor,
}

impl CatalogEntry {
    /// Build the listing card for this entry
    pub fn card(&self) -> CategoryCard {
        let title = if self.card.title.is_empty() {
            self.descriptor.title.clone()
        } else {
            self.card.title.clone()
        };
        let description = if self.card.description.is_empty() {
            self.descriptor.description.clone()
        } else {
            self.card.description.clone()
        };
        CategoryCard {
            id: self.id.clone(),
            title,
            description,
            icon: self.icon.clone(),
        }
    }
}

/// One card of the home listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}
