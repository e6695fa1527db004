//! Notebook-level metadata.
//!
//! Only `language` matters here; every other key is carried through
//! untouched so writing the metadata back does not lose host data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MetadataError;

/// Metadata object stored with a notebook.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of [`NotebookMetadata::ensure_language`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageHint {
    /// The notebook had no language; this one was written.
    Added(String),
    /// The notebook already declared this language. Left untouched.
    AlreadySet(String),
}

impl NotebookMetadata {
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write `default` as the notebook language unless one is already
    /// declared. An empty language string counts as declared.
    pub fn ensure_language(&mut self, default: &str) -> LanguageHint {
        match &self.language {
            Some(language) => LanguageHint::AlreadySet(language.clone()),
            None => {
                self.language = Some(default.to_owned());
                LanguageHint::Added(default.to_owned())
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
