use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read feature list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("feature list is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("feature '{0}' appears more than once in the feature list")]
    Duplicate(String),
}

/// Ordered feature names a trained model expects, plus the name → index map.
///
/// Built once at startup and never mutated; a name's index is its position in
/// the list the model was exported with.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(SchemaError::Duplicate(name.clone()));
            }
        }
        Ok(Self { names, index })
    }

    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let names: Vec<String> = serde_json::from_str(text)?;
        Self::new(names)
    }

    /// Reads the feature list file written next to the exported model.
    pub async fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SchemaError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&text)
    }

    /// Vector dimensionality.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}
