//! # Emission Pass
//!
//! One pass is a sequential walk: for every layer in scope, run its
//! recipe, then finalize and write each item. Finalization reads the
//! *current* on-disk file, extracts the custom regions, and splices them
//! into the fresh synthesis - regeneration is a merge, not an overwrite.
//!
//! Inheritance stubs are the one exception to regeneration: they are
//! generated once and then user-owned, so an existing stub is skipped
//! unless `--force` is given.

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use crate::catalog::TypeCatalog;
use crate::config::WorkspaceConfig;
use crate::item::GeneratedItem;
use crate::layers::generate_unit;
use crate::merge::{backup_before_replace, merge_with_existing, region_kinds_for};
use crate::settings::{ItemKind, SettingsStore, UnitKind};

/// Read-only state of one generation run, constructed once and passed by
/// reference; dropped at end of run.
pub struct GenerationContext {
    pub catalog: TypeCatalog,
    pub settings: SettingsStore,
    pub config: WorkspaceConfig,
}

impl GenerationContext {
    /// Build the run context: discover the metadata document under the
    /// configured paths and load the settings table from the solution
    /// root. Neither source is required to exist.
    pub fn initialize(config: WorkspaceConfig) -> Self {
        let catalog = TypeCatalog::load(&config.compile_output_dir(), &config.project_bin_dir());
        let settings = SettingsStore::load(&config.solution_root);
        GenerationContext {
            catalog,
            settings,
            config,
        }
    }
}

/// Which layers a pass regenerates. Defaults to all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationScope {
    pub logic: bool,
    pub api: bool,
    pub site: bool,
    pub client_app: bool,
    pub client_script: bool,
    pub facade: bool,
}

impl GenerationScope {
    pub fn all() -> Self {
        GenerationScope {
            logic: true,
            api: true,
            site: true,
            client_app: true,
            client_script: true,
            facade: true,
        }
    }

    pub fn none() -> Self {
        GenerationScope {
            logic: false,
            api: false,
            site: false,
            client_app: false,
            client_script: false,
            facade: false,
        }
    }

    pub fn includes(&self, unit: UnitKind) -> bool {
        match unit {
            UnitKind::Logic => self.logic,
            UnitKind::Api => self.api,
            UnitKind::Site => self.site,
            UnitKind::ClientApp => self.client_app,
            UnitKind::ClientScript => self.client_script,
            UnitKind::Facade => self.facade,
        }
    }

    pub fn enable(&mut self, unit: UnitKind) {
        match unit {
            UnitKind::Logic => self.logic = true,
            UnitKind::Api => self.api = true,
            UnitKind::Site => self.site = true,
            UnitKind::ClientApp => self.client_app = true,
            UnitKind::ClientScript => self.client_script = true,
            UnitKind::Facade => self.facade = true,
        }
    }
}

impl Default for GenerationScope {
    fn default() -> Self {
        GenerationScope::all()
    }
}

/// Outcome of one pass.
#[derive(Debug, Default)]
pub struct EmitSummary {
    /// Paths written (or that would be written under `--dry-run`).
    pub written: Vec<PathBuf>,
    /// User-owned stubs left untouched.
    pub skipped: Vec<PathBuf>,
}

/// Synthesize every in-scope item without touching the filesystem.
///
/// Items come back in a deterministic order: layer order, then catalog
/// order, then the layer's fixed artifact order.
pub fn generate_all(
    catalog: &TypeCatalog,
    settings: &SettingsStore,
    scope: &GenerationScope,
) -> anyhow::Result<Vec<GeneratedItem>> {
    let mut items = Vec::new();
    for unit in UnitKind::ALL {
        if scope.includes(unit) {
            items.extend(generate_unit(unit, catalog, settings)?);
        }
    }
    Ok(items)
}

/// Run a full pass: synthesize, merge against current disk state, write.
pub fn run_generation(
    ctx: &GenerationContext,
    scope: &GenerationScope,
    force: bool,
    dry_run: bool,
) -> anyhow::Result<EmitSummary> {
    let items = generate_all(&ctx.catalog, &ctx.settings, scope)?;
    info!(items = items.len(), "synthesized generation items");

    let mut summary = EmitSummary::default();
    for mut item in items {
        let target = item.target_path(&ctx.config.layer_root(item.unit));

        // Inheritance stubs are user-owned once they exist.
        if item.item == ItemKind::Type && target.exists() && !force {
            println!("⚠️  Skipping existing stub: {target:?}");
            summary.skipped.push(target);
            continue;
        }

        let kinds = region_kinds_for(&item.extension);
        let merged = merge_with_existing(item.lines().to_vec(), &target, kinds)?;
        item.finalize(merged);

        if dry_run {
            println!("📝 Would write {target:?}");
            summary.written.push(target);
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        backup_before_replace(&target)?;
        std::fs::write(&target, item.content())
            .with_context(|| format!("failed to write {}", target.display()))?;
        println!("✅ Generated {}: {target:?}", item.logical_name);
        summary.written.push(target);
    }
    Ok(summary)
}
