//! Schema catalog
//!
//! The catalog is the immutable lookup table from a key to the schema that
//! governs a data file. The key is the dataset prefix (default) or the
//! schema's root element, depending on [`MatchMode`]. Keys are unique: two
//! schemas landing on the same key abort the load, and no partial catalog is
//! returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use gar_stream::catalog::SchemaCatalog;
//! use gar_stream::config::MatchMode;
//!
//! let catalog = SchemaCatalog::load("gar_schemas", MatchMode::DatasetPrefix)?;
//! let schema = catalog.resolve("AS_HOUSES_PARAMS").unwrap(); // -> AS_PARAM
//! ```

use std::path::{Path, PathBuf};

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use crate::config::MatchMode;
use crate::error::{Error, Result};
use crate::loaders::collect_schema_files;
use crate::prefix::{derive_prefix, lookup_keys};
use crate::schemas::SchemaDescriptor;

/// Lookup table of loaded schemas
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    /// Key kind
    mode: MatchMode,
    /// Key -> schema, in load order
    schemas: IndexMap<String, SchemaDescriptor>,
}

impl SchemaCatalog {
    /// Load every schema in a directory (flat)
    pub fn load(dir: impl AsRef<Path>, mode: MatchMode) -> Result<Self> {
        let dir = dir.as_ref();
        let files = collect_schema_files(dir)?;
        if files.is_empty() {
            return Err(Error::NoSchemasFound {
                dir: dir.to_path_buf(),
            });
        }

        let descriptors = files
            .iter()
            .map(SchemaDescriptor::from_file)
            .collect::<Result<Vec<_>>>()?;

        Self::from_descriptors(descriptors, mode)
    }

    /// Build a catalog from already scanned schemas
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = SchemaDescriptor>,
        mode: MatchMode,
    ) -> Result<Self> {
        let mut schemas: IndexMap<String, SchemaDescriptor> = IndexMap::new();

        for descriptor in descriptors {
            let key = match mode {
                MatchMode::DatasetPrefix => descriptor.dataset_prefix.clone(),
                MatchMode::RootElement => descriptor.root_element.clone(),
            };

            match schemas.entry(key) {
                Entry::Occupied(existing) => {
                    let first = existing.get().path.clone();
                    let second = descriptor.path;
                    let key = existing.key().clone();
                    return Err(match mode {
                        MatchMode::DatasetPrefix => Error::DuplicateSchemaPrefix {
                            prefix: key,
                            first,
                            second,
                        },
                        MatchMode::RootElement => Error::DuplicateRootElement {
                            root: key,
                            first,
                            second,
                        },
                    });
                }
                Entry::Vacant(slot) => {
                    debug!(
                        key = %slot.key(),
                        root = %descriptor.root_element,
                        path = %descriptor.path.display(),
                        "registered schema"
                    );
                    slot.insert(descriptor);
                }
            }
        }

        Ok(Self { mode, schemas })
    }

    /// Matching mode the catalog was keyed by
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Exact key lookup
    pub fn get(&self, key: &str) -> Option<&SchemaDescriptor> {
        self.schemas.get(key)
    }

    /// Prefix lookup: exact key first, then the `_PARAMS` alias
    pub fn resolve(&self, prefix: &str) -> Option<&SchemaDescriptor> {
        lookup_keys(prefix)
            .iter()
            .find_map(|key| self.schemas.get(key))
    }

    /// Schema governing a data file whose root element is already known
    pub fn schema_for(&self, file: &Path, root: &str) -> Result<&SchemaDescriptor> {
        let key = match self.mode {
            MatchMode::DatasetPrefix => {
                let name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                derive_prefix(&name)
            }
            MatchMode::RootElement => root.to_string(),
        };

        let found = match self.mode {
            MatchMode::DatasetPrefix => self.resolve(&key),
            MatchMode::RootElement => self.get(&key),
        };

        found.ok_or_else(|| Error::SchemaNotFound {
            key,
            file: PathBuf::from(file),
        })
    }

    /// Number of schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterate over key/schema pairs in load order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaDescriptor)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }
}
