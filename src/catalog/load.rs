use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use super::types::{EnumDescriptor, MemberDescriptor, TypeDescriptor, ValueShape};

/// Fixed file stem of the metadata document emitted by the extraction pass.
pub const METADATA_FILE_STEM: &str = "module.metadata";

/// Raw member record as serialized by the metadata-extraction pass.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    /// Compact shape expression, e.g. `string`, `int`, `list<Order>`.
    pub shape: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default = "default_true")]
    pub writable: bool,
}

/// Raw type record as serialized by the metadata-extraction pass.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeRecord {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default = "default_true")]
    pub exported: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, rename = "nested")]
    pub is_nested: bool,
    #[serde(default)]
    pub generic_args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumRecord {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Top-level metadata document describing one compiled module.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleMetadata {
    /// Module identity, informational only.
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub types: Vec<TypeRecord>,
    #[serde(default)]
    pub enums: Vec<EnumRecord>,
}

fn default_true() -> bool {
    true
}

impl TypeRecord {
    pub(crate) fn into_descriptor(self) -> TypeDescriptor {
        let declaring = self.name.clone();
        TypeDescriptor {
            members: self
                .members
                .into_iter()
                .map(|m| MemberDescriptor {
                    shape: ValueShape::parse(&m.shape),
                    name: m.name,
                    nullable: m.nullable,
                    readable: m.readable,
                    writable: m.writable,
                    declaring_type: declaring.clone(),
                })
                .collect(),
            name: self.name,
            namespace: self.namespace,
            base_type: self.base_type,
            exported: self.exported,
            is_abstract: self.is_abstract,
            is_nested: self.is_nested,
            generic_args: self.generic_args,
        }
    }
}

impl EnumRecord {
    pub(crate) fn into_descriptor(self) -> EnumDescriptor {
        EnumDescriptor {
            name: self.name,
            namespace: self.namespace,
            values: self.values,
        }
    }
}

/// Parse a metadata document, choosing the format by file extension the
/// same way the settings and spec files do elsewhere in the workspace.
pub fn parse_metadata(path: &Path) -> anyhow::Result<ModuleMetadata> {
    let content = std::fs::read_to_string(path)?;
    let metadata = if path
        .extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
    {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(metadata)
}

/// Locate the metadata document under the configured build-output paths.
///
/// The compile-output directory wins over the project bin directory; within
/// a directory, `.json` wins over `.yaml`. Returns `None` when no candidate
/// exists.
pub fn discover_metadata(compile_output: &Path, project_bin: &Path) -> Option<PathBuf> {
    for dir in [compile_output, project_bin] {
        for ext in ["json", "yaml", "yml"] {
            let candidate = dir.join(format!("{METADATA_FILE_STEM}.{ext}"));
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Load the metadata document, falling back to an empty one on any failure.
///
/// A missing or unreadable module is a recoverable condition: generators
/// simply produce nothing. The failure is logged, not surfaced.
pub fn load_metadata_or_empty(compile_output: &Path, project_bin: &Path) -> ModuleMetadata {
    let Some(path) = discover_metadata(compile_output, project_bin) else {
        warn!(
            compile_output = %compile_output.display(),
            project_bin = %project_bin.display(),
            "module metadata not found; catalog will be empty"
        );
        return ModuleMetadata::default();
    };
    match parse_metadata(&path) {
        Ok(metadata) => metadata,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to load module metadata");
            ModuleMetadata::default()
        }
    }
}
