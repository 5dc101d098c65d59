//! Prompt++ - fill-in-the-blanks prompt templates
//!
//! Pick a task category, answer a few fields, and get a finished prompt for a
//! language model. Each category is a template with bracketed placeholders:
//!
//! ```text
//! Write a [type] with a [tone] tone to [goal]. ...
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - Category -> template lookup, builtin and user-supplied
//! - [`template`] - Placeholder substitution
//! - [`form`] - Form values and prompt generation
//! - [`clipboard`] - Copy action with transient feedback
//! - [`views`] - Terminal rendering
//! - [`session`] - Interactive session
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```
//! use promptplus::{Catalog, FormController, SubstitutionMode};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let descriptor = catalog.lookup("writing").unwrap();
//!
//! let mut form = FormController::new();
//! form.set_field("type", "email");
//! form.set_field("tone", "formal");
//! let prompt = form.generate(descriptor, SubstitutionMode::First);
//! assert!(prompt.starts_with("Write a email with a formal tone to [goal]."));
//! ```

pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod form;
pub mod session;
pub mod template;
pub mod views;

// Re-export commonly used types
pub use catalog::{
    Catalog, CatalogEntry, CatalogError, CategoryCard, FieldDescriptor, FieldKind, Issue, Severity, TemplateDescriptor,
};
pub use clipboard::{Clipboard, ClipboardError, CommandClipboard, CopyAction};
pub use config::{CatalogConfig, ClipboardConfig, Config, SubstitutionConfig};
pub use form::{FormController, FormValues};
pub use session::Session;
pub use template::{SubstitutionMode, placeholders, substitute, substitute_with, unfilled};
