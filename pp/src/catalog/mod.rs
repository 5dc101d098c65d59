//! Template Catalog
//!
//! Maps category ids to template descriptors. The six builtin categories are
//! compiled in from YAML; more can be layered on from catalog directories.
//!
//! Catalog file format:
//!
//! ```yaml
//! id: writing            # optional in single-entry files (defaults to file stem)
//! icon: "✍️"
//! card:                  # optional listing text
//!   title: Writing Assistance
//!   description: Get help with writing emails, resumes, articles.
//! title: "✍️ Writing Assistance"
//! description: Get help with emails, resumes, and creative writing.
//! fields:
//!   - name: tone
//!     kind: choice       # choice | short-text | long-text
//!     label: Tone
//!     options: [formal, friendly, persuasive]
//! template: "Write a [type] with a [tone] tone."
//! ```

mod error;
mod loader;
mod types;
pub mod validate;

pub use error::CatalogError;
pub use loader::Catalog;
pub use types::{CardText, CatalogEntry, CategoryCard, FieldDescriptor, FieldKind, TemplateDescriptor};
pub use validate::{Issue, IssueKind, Severity};
