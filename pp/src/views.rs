//! Text views for the home listing, category pages and generated prompts

use colored::Colorize;

use crate::catalog::{CategoryCard, FieldDescriptor, FieldKind, TemplateDescriptor};
use crate::form::FormValues;

/// Home listing with numbered cards
pub fn home(cards: &[CategoryCard]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Prompt++".bright_cyan().bold()));
    out.push_str(&format!("🚀 {}\n", "Craft Smarter Prompts, Faster.".bold()));
    out.push_str(&format!("⬇️  {}\n\n", "Choose a task to begin.".italic()));

    for (i, card) in cards.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} {}  {}\n",
            i + 1,
            card.icon,
            card.title.bold(),
            format!("({})", card.id).dimmed()
        ));
        out.push_str(&format!("     {}\n", card.description));
    }
    out
}

/// Category page header and its fields
pub fn category(id: &str, descriptor: &TemplateDescriptor) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", descriptor.title.bright_cyan().bold(), format!("({})", id).dimmed()));
    if !descriptor.description.is_empty() {
        out.push_str(&format!("{}\n", descriptor.description));
    }
    out.push('\n');

    for field in &descriptor.fields {
        out.push_str(&field_line(field));
    }
    out
}

fn field_line(field: &FieldDescriptor) -> String {
    let mut line = format!("  {:14} {}", field.label.yellow(), field.kind.name().dimmed());
    match field.kind {
        FieldKind::Choice => {
            line.push_str(&format!(": {}", field.options().join(", ")));
        }
        FieldKind::Slider | FieldKind::Checkbox => {
            line.push_str(&format!(" {}", "(not supported yet)".dimmed()));
        }
        FieldKind::ShortText | FieldKind::LongText => {}
    }
    line.push('\n');
    line
}

/// Fallback for an unknown category id
pub fn not_found<'a>(id: &str, known: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Page not found".red().bold()));
    out.push_str(&format!("No category named '{}'.\n\n", id));
    out.push_str(&format!("{} Return Home: pick one of\n", "←".bright_green()));
    for known_id in known {
        out.push_str(&format!("  {}\n", known_id));
    }
    out
}

/// Generated prompt with the copy indicator
pub fn prompt(rendered: &str, copied: bool) -> String {
    let indicator = if copied {
        "✓ copied".green().to_string()
    } else {
        "/copy to copy".dimmed().to_string()
    };
    format!(
        "\n{}  {}\n\n{}\n",
        "Generated Prompt".bright_cyan().bold(),
        indicator,
        rendered
    )
}

/// Current form values, with unset fields marked
pub fn values(descriptor: &TemplateDescriptor, values: &FormValues) -> String {
    let mut out = String::new();
    for field in descriptor.fields.iter().filter(|f| f.kind.is_supported()) {
        let value = match values.get(&field.name) {
            Some(v) => v.to_string(),
            None => "(unset)".dimmed().to_string(),
        };
        out.push_str(&format!("  {:14} {}\n", field.label.yellow(), value));
    }
    out
}
