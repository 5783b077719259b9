//! # Type Catalog
//!
//! The catalog module loads the type metadata document produced by the
//! metadata-extraction pass over a compiled module and classifies every
//! exported type into one of three buckets:
//!
//! - **Entity** - persisted business-object shapes under the reserved
//!   `Entities` namespace segment
//! - **Service** - API-facing view-model shapes under the reserved
//!   `ServiceModels` namespace segment
//! - **Excluded** - marker types, infrastructure shapes, and everything
//!   outside the reserved namespaces
//!
//! Classification depends only on names and namespaces, never on settings
//! or generation order, so a type's bucket is stable across runs.
//!
//! ## Discovery
//!
//! The metadata document has the fixed stem `module.metadata` and is
//! looked up first in the compile-output directory, then in the project
//! bin directory. An unresolved or unparseable document yields an empty
//! catalog - generators then simply produce nothing, and the failure is
//! logged rather than surfaced.

mod classify;
mod load;
mod types;


pub use classify::{classify, Classification, ENTITIES_SEGMENT, SERVICE_MODELS_SEGMENT};
pub use load::{
    discover_metadata, load_metadata_or_empty, parse_metadata, ModuleMetadata, METADATA_FILE_STEM,
};
pub use types::{EnumDescriptor, MemberDescriptor, TypeDescriptor, ValueShape};

use std::path::Path;

use once_cell::sync::OnceCell;

/// Read-only view over the loaded module's types, populated once per run.
///
/// Entity and service listings are memoized on first access; the catalog
/// is never mutated after construction.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: Vec<TypeDescriptor>,
    enums: Vec<EnumDescriptor>,
    entities: OnceCell<Vec<usize>>,
    services: OnceCell<Vec<usize>>,
}

impl TypeCatalog {
    /// Build a catalog from a parsed metadata document.
    ///
    /// Abstract, nested, and non-exported types are dropped here; they are
    /// invisible to every generator.
    pub fn from_metadata(metadata: ModuleMetadata) -> Self {
        let types = metadata
            .types
            .into_iter()
            .map(|t| t.into_descriptor())
            .filter(|t| t.exported && !t.is_abstract && !t.is_nested)
            .collect();
        let enums = metadata
            .enums
            .into_iter()
            .map(|e| e.into_descriptor())
            .collect();
        TypeCatalog {
            types,
            enums,
            entities: OnceCell::new(),
            services: OnceCell::new(),
        }
    }

    /// Discover and load the metadata document under the given build
    /// output paths. Absence is not an error: the catalog comes back
    /// empty and a warning is logged.
    pub fn load(compile_output: &Path, project_bin: &Path) -> Self {
        Self::from_metadata(load_metadata_or_empty(compile_output, project_bin))
    }

    /// Catalog for tests and callers that already hold descriptors.
    pub fn from_types(types: Vec<TypeDescriptor>, enums: Vec<EnumDescriptor>) -> Self {
        TypeCatalog {
            types,
            enums,
            entities: OnceCell::new(),
            services: OnceCell::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All exported, non-abstract, non-nested types of the module.
    pub fn all_types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    pub fn enums(&self) -> &[EnumDescriptor] {
        &self.enums
    }

    /// Entity types in catalog order.
    pub fn entity_types(&self) -> Vec<&TypeDescriptor> {
        self.entities
            .get_or_init(|| self.indices_of(Classification::Entity))
            .iter()
            .map(|&i| &self.types[i])
            .collect()
    }

    /// Service-model types in catalog order.
    pub fn service_types(&self) -> Vec<&TypeDescriptor> {
        self.services
            .get_or_init(|| self.indices_of(Classification::Service))
            .iter()
            .map(|&i| &self.types[i])
            .collect()
    }

    /// Look up a type by simple name.
    pub fn find(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumDescriptor> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Classification of a simple type name, `Excluded` when unknown.
    pub fn classification_of(&self, name: &str) -> Classification {
        self.find(name).map(classify).unwrap_or(Classification::Excluded)
    }

    fn indices_of(&self, wanted: Classification) -> Vec<usize> {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, t)| classify(t) == wanted)
            .map(|(i, _)| i)
            .collect()
    }
}
