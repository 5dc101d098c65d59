//! Interactive session: home listing -> category form -> prompt

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::catalog::{Catalog, CategoryCard, FieldDescriptor, FieldKind};
use crate::clipboard::CopyAction;
use crate::form::FormController;
use crate::template::{self, SubstitutionMode};
use crate::views;

/// Line that ends multi-line input
const LONG_TEXT_END: &str = ".";

/// Command typed on a category page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    Generate,
    Copy,
    Set(String),
    Values,
    Back,
    Help,
    Quit,
    Unknown(String),
}

impl PageCommand {
    /// Parse a slash command, `None` when the input is not one
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if !input.starts_with('/') {
            return None;
        }
        let mut parts = input.splitn(2, char::is_whitespace);
        let cmd = parts.next().unwrap_or("");
        let arg = parts.next().map(str::trim).unwrap_or("");

        Some(match cmd {
            "/generate" | "/g" => Self::Generate,
            "/copy" | "/c" => Self::Copy,
            "/set" | "/s" => Self::Set(arg.to_string()),
            "/values" | "/v" => Self::Values,
            "/back" | "/b" | "/home" => Self::Back,
            "/help" | "/h" => Self::Help,
            "/quit" | "/q" | "/exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        })
    }
}

/// Resolve home-listing input (1-based number or id) to a category id
///
/// Unknown input is returned as-is so the caller shows the not-found view.
pub fn resolve_selection(input: &str, cards: &[CategoryCard]) -> String {
    let input = input.trim();
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| cards.get(i))
        .map(|card| card.id.clone())
        .unwrap_or_else(|| input.to_string())
}

/// Resolve a choice answer (1-based number or exact option text)
pub fn resolve_choice(input: &str, options: &[String]) -> Option<String> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).cloned();
    }
    options.iter().find(|o| o.eq_ignore_ascii_case(input)).cloned()
}

/// Outcome of asking for one field
enum FieldInput {
    Value(String),
    Skip,
    Quit,
}

enum Step {
    Continue,
    Quit,
}

/// Interactive session over a catalog
pub struct Session<'a> {
    catalog: &'a Catalog,
    mode: SubstitutionMode,
    copy: CopyAction,
    form: FormController,
    current: Option<String>,
    editor: DefaultEditor,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog, mode: SubstitutionMode, copy: CopyAction) -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self {
            catalog,
            mode,
            copy,
            form: FormController::new(),
            current: None,
            editor,
        })
    }

    /// Run until the user quits, optionally starting on a category page
    pub async fn run(&mut self, start: Option<String>) -> Result<()> {
        info!(?start, "Interactive session started");
        match start {
            Some(id) => {
                if let Step::Quit = self.open(&id)? {
                    return Ok(());
                }
            }
            None => self.print_home(),
        }

        loop {
            let step = match self.current.clone() {
                None => self.home_step()?,
                Some(id) => self.page_step(&id).await?,
            };
            if let Step::Quit = step {
                break;
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_home(&self) {
        println!();
        print!("{}", views::home(&self.catalog.cards()));
        println!();
        println!("Type a number or id to open a task, {} to quit", "/quit".yellow());
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.trim());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                Ok(Some(String::new()))
            }
            Err(ReadlineError::Eof) => {
                println!();
                Ok(None)
            }
            Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
        }
    }

    fn home_step(&mut self) -> Result<Step> {
        let Some(line) = self.read_line(&format!("{} ", "pp>".bright_green()))? else {
            return Ok(Step::Quit);
        };
        let input = line.trim();
        if input.is_empty() {
            return Ok(Step::Continue);
        }

        match PageCommand::parse(input) {
            Some(PageCommand::Quit) => Ok(Step::Quit),
            Some(PageCommand::Help) | Some(PageCommand::Back) => {
                self.print_home();
                Ok(Step::Continue)
            }
            Some(other) => {
                debug!(?other, "home_step: page command on home listing");
                println!("{} Open a task first", "?".yellow());
                Ok(Step::Continue)
            }
            None => {
                let id = resolve_selection(input, &self.catalog.cards());
                self.open(&id)
            }
        }
    }

    /// Navigate to a category page; unknown ids show the fallback view
    fn open(&mut self, id: &str) -> Result<Step> {
        debug!(%id, "Session::open: called");
        let catalog = self.catalog;
        let descriptor = match catalog.lookup(id) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                debug!(error = %e, "Session::open: lookup failed");
                println!();
                print!("{}", views::not_found(id, catalog.ids()));
                self.current = None;
                return Ok(Step::Continue);
            }
        };

        self.form.reset();
        self.current = Some(id.to_string());

        println!();
        print!("{}", views::category(id, descriptor));
        println!();

        for field in &descriptor.fields {
            if let FieldInput::Quit = self.ask_field(field)? {
                return Ok(Step::Quit);
            }
        }

        println!(
            "Type {} to build the prompt, {} for more commands",
            "/generate".yellow(),
            "/help".yellow()
        );
        Ok(Step::Continue)
    }

    async fn page_step(&mut self, id: &str) -> Result<Step> {
        let marker = if self.copy.is_copied() { " ✓".green().to_string() } else { String::new() };
        let Some(line) = self.read_line(&format!("{}{} ", format!("{}>", id).bright_green(), marker))? else {
            return Ok(Step::Quit);
        };
        let input = line.trim();
        if input.is_empty() {
            return Ok(Step::Continue);
        }

        let Some(command) = PageCommand::parse(input) else {
            println!("Commands start with '/'. Type {} for help", "/help".yellow());
            return Ok(Step::Continue);
        };

        let catalog = self.catalog;
        let descriptor = catalog.lookup(id)?;
        match command {
            PageCommand::Generate => {
                let rendered = self.form.generate(descriptor, self.mode).to_string();
                print!("{}", views::prompt(&rendered, false));
                let missing = template::unfilled(&rendered);
                if !missing.is_empty() {
                    println!("{} {}", "Unfilled:".dimmed(), missing.join(", ").dimmed());
                }
                println!();
            }
            PageCommand::Copy => match self.form.rendered() {
                Some(rendered) => {
                    let rendered = rendered.to_string();
                    if self.copy.copy(&rendered).await {
                        println!("{}", "✓ Copied".green());
                    }
                }
                None => println!("{} Generate a prompt first with {}", "?".yellow(), "/generate".yellow()),
            },
            PageCommand::Set(name) => match descriptor.field(&name) {
                Some(field) => {
                    if let FieldInput::Quit = self.ask_field(field)? {
                        return Ok(Step::Quit);
                    }
                }
                None => {
                    let names: Vec<&str> = descriptor.fields.iter().map(|f| f.name.as_str()).collect();
                    println!("{} Unknown field '{}'. Fields: {}", "?".yellow(), name, names.join(", "));
                }
            },
            PageCommand::Values => {
                print!("{}", views::values(descriptor, self.form.values()));
            }
            PageCommand::Back => {
                // Navigation discards the form
                self.form.reset();
                self.current = None;
                self.print_home();
            }
            PageCommand::Help => self.print_help(),
            PageCommand::Quit => return Ok(Step::Quit),
            PageCommand::Unknown(cmd) => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
            }
        }
        Ok(Step::Continue)
    }

    /// Prompt for one field and record the answer
    fn ask_field(&mut self, field: &FieldDescriptor) -> Result<FieldInput> {
        let input = match field.kind {
            FieldKind::Choice => self.ask_choice(field)?,
            FieldKind::ShortText => {
                let prompt = format!("{} {}: ", "Enter".dimmed(), field.label.yellow());
                match self.read_line(&prompt)? {
                    None => FieldInput::Quit,
                    Some(line) if line.trim().is_empty() => FieldInput::Skip,
                    Some(line) => FieldInput::Value(line),
                }
            }
            FieldKind::LongText => self.ask_long_text(field)?,
            FieldKind::Slider | FieldKind::Checkbox => {
                println!("  {} {}", field.label.yellow(), "(not supported yet, skipped)".dimmed());
                FieldInput::Skip
            }
        };

        if let FieldInput::Value(value) = &input {
            self.form.set_field(&field.name, value.clone());
        }
        Ok(input)
    }

    fn ask_choice(&mut self, field: &FieldDescriptor) -> Result<FieldInput> {
        let options = field.options().to_vec();
        println!("{} {}", "Select".dimmed(), field.label.yellow());
        for (i, option) in options.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, option);
        }

        loop {
            let prompt = format!("{} (1-{}, blank to skip): ", field.label, options.len());
            let Some(line) = self.read_line(&prompt)? else {
                return Ok(FieldInput::Quit);
            };
            if line.trim().is_empty() {
                return Ok(FieldInput::Skip);
            }
            match resolve_choice(&line, &options) {
                Some(option) => return Ok(FieldInput::Value(option)),
                None => println!("{} Not one of the options", "?".yellow()),
            }
        }
    }

    fn ask_long_text(&mut self, field: &FieldDescriptor) -> Result<FieldInput> {
        println!(
            "{} {} {}",
            "Enter".dimmed(),
            field.label.yellow(),
            format!("(end with a line containing only '{}')", LONG_TEXT_END).dimmed()
        );

        let mut lines = Vec::new();
        loop {
            let Some(line) = self.read_line("  ")? else {
                return Ok(FieldInput::Quit);
            };
            if line.trim() == LONG_TEXT_END {
                break;
            }
            lines.push(line);
        }

        let text = lines.join("\n");
        if text.trim().is_empty() {
            Ok(FieldInput::Skip)
        } else {
            Ok(FieldInput::Value(text))
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Fill the template with the current values", "/generate".yellow());
        println!("  {:14} Copy the generated prompt", "/copy".yellow());
        println!("  {:14} Change one field", "/set <field>".yellow());
        println!("  {:14} Show the current values", "/values".yellow());
        println!("  {:14} Return to the task list (clears the form)", "/back".yellow());
        println!("  {:14} Exit", "/quit".yellow());
        println!();
    }
}
