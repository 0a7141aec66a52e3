//! Configuration for prompt construction.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{TransformError, TransformResult};

/// Dataset positions used as few-shot exemplars by default.
pub const DEFAULT_EXEMPLAR_INDICES: [usize; 5] = [1, 3, 5, 7, 9];

/// Instruction header available for prepending to every prompt.
pub const DEFAULT_HEADER: &str = "The following is a multiple-choice question about reading comprehension. You should answer the question based on the given context and you can use commonsense reasoning when necessary. Please reason step-by-step and select the correct answer. You only need to output the option.\n\n";

/// How few-shot exemplars are picked from the dataset.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExemplarSelection {
    /// Dataset positions; the record at each position must declare the same id.
    Positional(Vec<usize>),
    /// Declared record ids, looked up regardless of position.
    ById(Vec<i64>),
}

impl ExemplarSelection {
    /// Number of configured exemplars.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(indices) => indices.len(),
            Self::ById(ids) => ids.len(),
        }
    }

    /// Whether no exemplars are configured (zero-shot prompts).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn has_duplicates(&self) -> bool {
        match self {
            Self::Positional(indices) => {
                let mut seen = HashSet::new();
                !indices.iter().all(|idx| seen.insert(*idx))
            }
            Self::ById(ids) => {
                let mut seen = HashSet::new();
                !ids.iter().all(|id| seen.insert(*id))
            }
        }
    }
}

impl Default for ExemplarSelection {
    fn default() -> Self {
        Self::Positional(DEFAULT_EXEMPLAR_INDICES.to_vec())
    }
}

/// Prompt transformer settings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Few-shot exemplar selection.
    pub exemplars: ExemplarSelection,
    /// Whether `header` is written at the start of every prompt.
    pub include_header: bool,
    /// Instruction header text.
    pub header: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            exemplars: ExemplarSelection::default(),
            include_header: false,
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

impl TransformConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exemplar selection.
    #[must_use]
    pub fn with_exemplars(mut self, exemplars: ExemplarSelection) -> Self {
        self.exemplars = exemplars;
        self
    }

    /// Enable or disable the instruction header.
    #[must_use]
    pub const fn with_include_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Set a custom instruction header and enable it.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self.include_header = true;
        self
    }

    /// Header to prepend, if enabled.
    #[must_use]
    pub fn active_header(&self) -> Option<&str> {
        self.include_header.then_some(self.header.as_str())
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if exemplar keys repeat or an enabled header is empty.
    pub fn validate(&self) -> TransformResult<()> {
        if self.exemplars.has_duplicates() {
            return Err(TransformError::InvalidConfig(
                "exemplars must not repeat".to_string(),
            ));
        }

        if self.include_header && self.header.trim().is_empty() {
            return Err(TransformError::InvalidConfig(
                "header must not be empty when include_header is set".to_string(),
            ));
        }

        Ok(())
    }

    /// Read and validate a JSON config file. Missing fields take defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_path(path: impl AsRef<Path>) -> TransformResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
}
