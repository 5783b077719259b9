//! # layerforge
//!
//! **layerforge** is a metadata-driven scaffolding generator: it reads the
//! type metadata extracted from a compiled domain module and synthesizes
//! structurally consistent source artifacts for every downstream layer of
//! the solution - data access, web API, server-rendered site, two
//! single-page-app client flavors, and a desktop/mobile presentation
//! layer of delegate-wrapping facades.
//!
//! ## Overview
//!
//! The entity model evolves and the generator reruns repeatedly, so the
//! engine is built around three guarantees:
//!
//! - **Determinism** - every identifier, namespace, and file path derives
//!   purely from type metadata; unchanged inputs regenerate byte-identical
//!   scaffolding.
//! - **Unambiguous overrides** - a flat settings table resolves
//!   per-project/per-type/per-member generation toggles by suffix-matched
//!   lookup, first row wins, caller default otherwise.
//! - **Non-destructive merge** - hand-authored code between sentinel
//!   markers in previously generated files is extracted and re-spliced
//!   into every regeneration, so a rerun is a merge, never an overwrite.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`catalog`]** - Metadata loading and entity/service classification
//! - **[`settings`]** - The suffix-matched generation override table
//! - **[`naming`]** - Pure name/namespace/path derivations per layer
//! - **[`item`]** - The generated-item unit (identity + ordered lines)
//! - **[`protocol`]** - Shared synthesis algorithms (properties,
//!   factories, copy, equality/hash, delegate wrapping)
//! - **[`layers`]** - Per-layer recipes composing the protocol
//! - **[`merge`]** - Custom-region extraction and re-injection
//! - **[`emit`]** - The sequential generation pass and file writes
//! - **[`config`]** - Workspace configuration (`layerforge.toml`)
//! - **[`cli`]** - The `layerforge-gen` command-line interface
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(layerforge-gen)
//!     participant Catalog as catalog::TypeCatalog
//!     participant Settings as settings::SettingsStore
//!     participant Layers as layers::*
//!     participant Merge as merge
//!     participant FS as File System
//!
//!     User->>CLI: layerforge-gen generate --root .
//!     CLI->>Catalog: load(compile_output, bin)
//!     Catalog->>Catalog: classify Entity / Service / Excluded
//!     CLI->>Settings: load(solution_root)
//!     CLI->>Layers: generate_unit(unit) per layer in scope
//!     Layers->>Layers: protocol calls per included type
//!     Layers-->>CLI: Vec<GeneratedItem>
//!     loop each item
//!         CLI->>Merge: extract custom regions from disk
//!         Merge-->>CLI: merged line sequence
//!         CLI->>FS: write target file
//!     end
//!     CLI-->>User: ✅ summary
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use layerforge::config::WorkspaceConfig;
//! use layerforge::emit::{run_generation, GenerationContext, GenerationScope};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = WorkspaceConfig::resolve(None, std::path::Path::new("."))?;
//! let ctx = GenerationContext::initialize(config);
//! let summary = run_generation(&ctx, &GenerationScope::all(), false, false)?;
//! println!("wrote {} files", summary.written.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Inputs
//!
//! - `module.metadata.json` (or `.yaml`) - the type descriptor document
//!   produced by the metadata-extraction pass, discovered under the
//!   configured compile-output path, else the project bin path. Missing
//!   metadata yields an empty catalog and a quiet, empty pass.
//! - `layerforge.settings` - semicolon-delimited override table at the
//!   solution root; absent means pure defaults.
//! - `layerforge.toml` - optional workspace configuration.
//!
//! ## Custom regions
//!
//! Generated files embed two marker pairs as literal comment lines:
//!
//! ```text
//! // <custom-imports>  ...  // </custom-imports>
//! // <custom-code>     ...  // </custom-code>
//! ```
//!
//! Everything between a pair survives regeneration verbatim. A file about
//! to be replaced that carries no markers is copied once to a sibling
//! `*.custom.bak` file, so edits survive even across artifact renames.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod emit;
pub mod item;
pub mod layers;
pub mod merge;
pub mod naming;
pub mod protocol;
pub mod settings;

pub use catalog::{classify, Classification, TypeCatalog};
pub use emit::{run_generation, GenerationContext, GenerationScope};
pub use item::GeneratedItem;
pub use settings::{GenerationSetting, ItemKind, SettingsStore, UnitKind};
