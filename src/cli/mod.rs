//! # CLI Module
//!
//! Command-line interface of the `layerforge-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Run a generation pass over the target solution:
//!
//! ```bash
//! layerforge-gen generate --root ./my-solution
//! ```
//!
//! Options:
//! - `--root <DIR>` - Solution root (settings file, config file, layer
//!   project roots resolve against it)
//! - `--metadata <FILE>` - Explicit metadata document, overriding
//!   discovery under the configured build-output paths
//! - `--config <FILE>` - Explicit `layerforge.toml`
//! - `--force` - Regenerate user-owned inheritance stubs too
//! - `--dry-run` - Report would-be writes without touching disk
//! - `--only <LAYER,...>` - Limit the pass to specific layers
//!
//! ### `inspect`
//!
//! Print how every type in the metadata document classifies, with the
//! artifact paths the entity types would generate:
//!
//! ```bash
//! layerforge-gen inspect --root ./my-solution
//! ```
//!
//! ### `explain-setting`
//!
//! Show which settings row (if any) answers a query - the suffix-matched
//! resolution can be surprising, and this makes it visible:
//!
//! ```bash
//! layerforge-gen explain-setting --root . \
//!     --unit Logic --item Property --name CustomerFilter.Name --setting Generate
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands, OnlyLayer};
