use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use antmsg_frame::FieldLayout;

use crate::config::{CatalogConfig, DuplicateIdPolicy};
use crate::definition::{DefinitionFile, MessageDef};
use crate::error::{CatalogError, Result};

/// A validated, immutable message definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    id: u8,
    name: String,
    layout: FieldLayout,
    field_names: Option<Arc<[String]>>,
}

impl CatalogEntry {
    /// Validate a definition into an entry.
    ///
    /// The layout spec must parse, and field names (when present) must be
    /// unique and match the layout's data slots one to one.
    pub fn from_def(def: &MessageDef) -> Result<Self> {
        let layout = FieldLayout::parse(&def.layout)?;

        if let Some(fields) = &def.fields {
            if fields.len() != layout.arg_count() {
                return Err(CatalogError::FieldNameCountMismatch {
                    name: def.name.clone(),
                    expected: layout.arg_count(),
                    actual: fields.len(),
                });
            }
            for (i, field) in fields.iter().enumerate() {
                if fields[..i].contains(field) {
                    return Err(CatalogError::DuplicateFieldName {
                        name: def.name.clone(),
                        field: field.clone(),
                    });
                }
            }
        }

        Ok(Self {
            id: def.id,
            name: def.name.clone(),
            layout,
            field_names: def.fields.as_ref().map(|fields| Arc::from(fields.as_slice())),
        })
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Field names in data-slot order, if the entry has them.
    pub fn field_names(&self) -> Option<&[String]> {
        self.field_names.as_deref()
    }

    /// Shared handle to the field names, for results that outlive a borrow.
    pub fn shared_field_names(&self) -> Option<Arc<[String]>> {
        self.field_names.clone()
    }

    /// Position of `field` among the entry's field names.
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.field_names()?.iter().position(|name| name == field)
    }
}

/// Read-only table from message ID to [`CatalogEntry`].
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<u8, CatalogEntry>,
    names: HashMap<String, u8>,
    config: CatalogConfig,
}

impl Catalog {
    /// Build a catalog from definition lists with default config.
    ///
    /// Lists are merged in order; duplicate IDs are rejected.
    pub fn new(lists: &[&[MessageDef]]) -> Result<Self> {
        Self::with_config(lists, CatalogConfig::default())
    }

    /// Build a catalog from definition lists with explicit config.
    pub fn with_config(lists: &[&[MessageDef]], config: CatalogConfig) -> Result<Self> {
        let mut catalog = Self {
            entries: HashMap::new(),
            names: HashMap::new(),
            config,
        };

        for def in lists.iter().flat_map(|list| list.iter()) {
            catalog.insert(CatalogEntry::from_def(def)?)?;
        }

        tracing::debug!(entries = catalog.len(), "catalog built");
        Ok(catalog)
    }

    /// Build from a parsed definition file (outbound, then inbound).
    pub fn from_definitions(file: &DefinitionFile, config: CatalogConfig) -> Result<Self> {
        Self::with_config(&[&file.outbound, &file.inbound], config)
    }

    /// Build from a JSON definition document.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with_config(json, CatalogConfig::default())
    }

    /// Build from a JSON definition document with explicit config.
    pub fn from_json_with_config(json: &str, config: CatalogConfig) -> Result<Self> {
        let file: DefinitionFile = serde_json::from_str(json)?;
        Self::from_definitions(&file, config)
    }

    /// Load a JSON definition file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_config(path, CatalogConfig::default())
    }

    /// Load a JSON definition file with explicit config.
    pub fn from_file_with_config(path: &Path, config: CatalogConfig) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|err| {
            CatalogError::LoadFailed(format!("failed opening {}: {err}", path.display()))
        })?;
        let metadata = file
            .metadata()
            .map_err(|err| CatalogError::LoadFailed(err.to_string()))?;
        if !metadata.is_file() {
            return Err(CatalogError::LoadFailed(format!(
                "not a regular file: {}",
                path.display()
            )));
        }

        let max_bytes = config.max_definition_file_size;
        if metadata.len() > max_bytes as u64 {
            return Err(CatalogError::LoadFailed(format!(
                "definition file too large ({} bytes): {}",
                metadata.len(),
                path.display()
            )));
        }

        let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
        let mut content = String::new();
        file.take(read_limit)
            .read_to_string(&mut content)
            .map_err(|err| {
                CatalogError::LoadFailed(format!("failed reading {}: {err}", path.display()))
            })?;
        if content.len() > max_bytes {
            return Err(CatalogError::LoadFailed(format!(
                "definition file too large while reading: {}",
                path.display()
            )));
        }

        Self::from_json_with_config(&content, config)
    }

    fn insert(&mut self, entry: CatalogEntry) -> Result<()> {
        if let Some(existing) = self.entries.get(&entry.id) {
            match self.config.duplicate_ids {
                DuplicateIdPolicy::Reject => {
                    return Err(CatalogError::DuplicateId {
                        id: entry.id,
                        existing: existing.name.clone(),
                        name: entry.name,
                    });
                }
                DuplicateIdPolicy::LastWins => {
                    tracing::warn!(
                        id = entry.id,
                        replaced = %existing.name,
                        name = %entry.name,
                        "message id redefined, keeping later definition"
                    );
                    if self.names.get(&existing.name) == Some(&entry.id) {
                        let stale = existing.name.clone();
                        self.names.remove(&stale);
                    }
                }
            }
        }

        self.names.insert(entry.name.clone(), entry.id);
        self.entries.insert(entry.id, entry);
        Ok(())
    }

    /// Look up an entry by message ID.
    pub fn lookup(&self, id: u8) -> Result<&CatalogEntry> {
        self.entries
            .get(&id)
            .ok_or(CatalogError::UnknownMessage(id))
    }

    /// Look up an entry by message name.
    pub fn lookup_name(&self, name: &str) -> Result<&CatalogEntry> {
        self.names
            .get(name)
            .and_then(|id| self.entries.get(id))
            .ok_or_else(|| CatalogError::UnknownName(name.to_string()))
    }

    /// Check if an ID has an entry.
    pub fn contains(&self, id: u8) -> bool {
        self.entries.contains_key(&id)
    }

    /// Registered IDs in ascending order.
    pub fn ids(&self) -> Vec<u8> {
        let mut ids: Vec<u8> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Entries in ascending ID order.
    pub fn entries(&self) -> Vec<&CatalogEntry> {
        let mut entries: Vec<&CatalogEntry> = self.entries.values().collect();
        entries.sort_unstable_by_key(|entry| entry.id);
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get catalog configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}
