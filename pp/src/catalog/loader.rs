//! Catalog loading
//!
//! Entries are loaded from:
//! 1. Builtin (embedded in binary)
//! 2. User global (~/.config/promptplus/catalog/*.yml)
//! 3. Project-specific (.promptplus/catalog/*.yml)
//!
//! A later entry with an existing id replaces the earlier one in place, so the
//! home listing keeps its order. New ids are appended.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::error::CatalogError;
use super::types::{CatalogEntry, CategoryCard, TemplateDescriptor};
use super::validate::{self, Issue, Severity};
use crate::config::CatalogConfig;

/// Builtin categories (embedded in binary), in listing order
const BUILTIN: &[(&str, &str)] = &[
    ("content-creation", include_str!("builtin/content-creation.yml")),
    ("code-generation", include_str!("builtin/code-generation.yml")),
    ("learning", include_str!("builtin/learning.yml")),
    ("brainstorming", include_str!("builtin/brainstorming.yml")),
    ("writing", include_str!("builtin/writing.yml")),
    ("debugging", include_str!("builtin/debugging.yml")),
];

/// Immutable category -> template lookup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Entries in listing order
    entries: Vec<CatalogEntry>,

    /// Position of each id in `entries`
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from the configured sources
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        debug!(?config, "Catalog::load: called");
        let mut catalog = Self::default();

        if config.use_builtin() {
            debug!("Catalog::load: loading builtin entries");
            catalog.load_builtins()?;
        } else {
            debug!("Catalog::load: builtin entries disabled");
        }

        // Later paths override earlier ones
        for path in config.expanded_paths() {
            if path.is_dir() {
                debug!(?path, "Catalog::load: loading from directory");
                catalog.load_from_directory(&path);
            } else {
                debug!(?path, "Catalog::load: directory does not exist, skipping");
            }
        }

        let issues = catalog.validate();
        let errors: Vec<&Issue> = issues.iter().filter(|i| i.severity() == Severity::Error).collect();
        for issue in &issues {
            warn!(severity = %issue.severity(), "Catalog issue: {}", issue);
        }
        if config.strict && !errors.is_empty() {
            return Err(CatalogError::Invalid {
                count: errors.len(),
                first: errors[0].to_string(),
            });
        }

        info!(count = catalog.len(), "Loaded template catalog");
        Ok(catalog)
    }

    /// Catalog with only the compiled-in categories
    pub fn builtin() -> Result<Self, CatalogError> {
        debug!("Catalog::builtin: called");
        let mut catalog = Self::default();
        catalog.load_builtins()?;
        Ok(catalog)
    }

    fn load_builtins(&mut self) -> Result<(), CatalogError> {
        for (id, yaml) in BUILTIN {
            let mut entry: CatalogEntry = serde_yaml::from_str(yaml).map_err(|source| CatalogError::Parse {
                origin: format!("builtin:{}", id),
                source,
            })?;
            entry.id = id.to_string();
            self.insert(entry);
        }
        debug!(count = BUILTIN.len(), "load_builtins: complete");
        Ok(())
    }

    /// Load all .yml/.yaml files from a directory, sorted by filename
    ///
    /// An unreadable directory is skipped like an unreadable file.
    fn load_from_directory(&mut self, dir: &Path) {
        debug!(?dir, "load_from_directory: called");
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(?dir, error = %e, "Failed to read catalog directory, skipping");
                return;
            }
        };

        let mut files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|e| e == "yml" || e == "yaml").unwrap_or(false))
            .collect();
        files.sort();

        for path in files {
            if let Err(e) = self.load_from_file(&path) {
                warn!(?path, error = %e, "Failed to load catalog file");
            }
        }

        debug!(?dir, "load_from_directory: complete");
    }

    /// Load entries from a YAML file
    ///
    /// The file can contain a list of entries, or a single entry whose id
    /// defaults to the file stem.
    fn load_from_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        debug!(?path, "load_from_file: called");
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if let Ok(list) = serde_yaml::from_str::<Vec<CatalogEntry>>(&content) {
            debug!(?path, count = list.len(), "load_from_file: parsed as list");
            for entry in list {
                if entry.id.is_empty() {
                    warn!(?path, title = %entry.descriptor.title, "Catalog entry without id, skipping");
                    continue;
                }
                self.insert(entry);
            }
            return Ok(());
        }

        debug!(?path, "load_from_file: parsing as single entry");
        let mut entry: CatalogEntry = serde_yaml::from_str(&content).map_err(|source| CatalogError::Parse {
            origin: path.display().to_string(),
            source,
        })?;

        if entry.id.is_empty() {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| CatalogError::InvalidFilename {
                    path: path.to_path_buf(),
                })?;
            entry.id = stem.to_string();
        }

        self.insert(entry);
        Ok(())
    }

    fn insert(&mut self, entry: CatalogEntry) {
        match self.index.get(&entry.id) {
            Some(&position) => {
                debug!(id = %entry.id, "insert: replacing existing entry");
                self.entries[position] = entry;
            }
            None => {
                debug!(id = %entry.id, "insert: appending new entry");
                self.index.insert(entry.id.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Get the descriptor for a category
    pub fn lookup(&self, id: &str) -> Result<&TemplateDescriptor, CatalogError> {
        debug!(%id, "Catalog::lookup: called");
        self.entry(id)
            .map(|entry| &entry.descriptor)
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    /// Get the full entry for a category
    pub fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    /// Home listing cards in order
    pub fn cards(&self) -> Vec<CategoryCard> {
        self.entries.iter().map(CatalogEntry::card).collect()
    }

    /// Category ids in listing order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run validation over every entry
    pub fn validate(&self) -> Vec<Issue> {
        self.entries
            .iter()
            .flat_map(|e| validate::validate(&e.id, &e.descriptor))
            .collect()
    }
}
