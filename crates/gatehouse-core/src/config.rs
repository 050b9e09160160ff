//! Session configuration.
//!
//! An explicit options object handed to the session loop at
//! construction. Nothing in here is process-global.

use crate::constants::{DEFAULT_PROMPT, DEFAULT_TERM_WIDTH};
use crate::inventory::SortKey;
use crate::resolver::SearchSpec;

/// Options governing one interactive session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Sort key applied to resource listings.
    pub sort_key: SortKey,
    /// Attribute set and case policy for token resolution.
    pub search: SearchSpec,
    /// Terminal width used for table layout.
    pub term_width: usize,
    /// Prompt shown before each input line.
    pub prompt: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            sort_key: SortKey::default(),
            search: SearchSpec::default(),
            term_width: DEFAULT_TERM_WIDTH,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl SessionOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listing sort key.
    pub fn with_sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    /// Set the search attribute set and case policy.
    pub fn with_search(mut self, search: SearchSpec) -> Self {
        self.search = search;
        self
    }

    /// Set the terminal width used for table layout.
    pub fn with_term_width(mut self, width: usize) -> Self {
        self.term_width = width;
        self
    }

    /// Set the input prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}
