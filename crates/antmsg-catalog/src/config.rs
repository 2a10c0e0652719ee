/// What to do when two definitions share a message ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateIdPolicy {
    /// Fail catalog construction with `CatalogError::DuplicateId`.
    #[default]
    Reject,
    /// Keep the definition seen last, logging the override.
    LastWins,
}

/// Controls catalog construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Handling of message IDs defined more than once.
    pub duplicate_ids: DuplicateIdPolicy,
    /// Maximum bytes accepted from a definition file.
    pub max_definition_file_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            duplicate_ids: DuplicateIdPolicy::Reject,
            max_definition_file_size: 1024 * 1024,
        }
    }
}
