//! Workspace configuration for a generation run.
//!
//! A `layerforge.toml` file at the solution root pins down where the
//! metadata document is discovered and where each layer's project lives.
//! The file is optional; every field has a default, so a bare solution
//! generates into conventional paths.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::settings::UnitKind;

/// Fixed name of the workspace configuration file.
pub const CONFIG_FILE_NAME: &str = "layerforge.toml";

/// Per-layer project roots, relative to the solution root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayerRoots {
    pub logic: PathBuf,
    pub api: PathBuf,
    pub site: PathBuf,
    pub client_app: PathBuf,
    pub client_script: PathBuf,
    pub facade: PathBuf,
}

impl Default for LayerRoots {
    fn default() -> Self {
        LayerRoots {
            logic: PathBuf::from("Server/Logic"),
            api: PathBuf::from("Server/Api"),
            site: PathBuf::from("Server/Site"),
            client_app: PathBuf::from("Clients/App/src"),
            client_script: PathBuf::from("Clients/Script/src"),
            facade: PathBuf::from("Shell"),
        }
    }
}

/// Workspace configuration loaded from `layerforge.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root of the target solution; other paths resolve against it.
    pub solution_root: PathBuf,
    /// Build-output directory searched first for the metadata document.
    pub compile_output: PathBuf,
    /// Project bin directory searched second.
    pub project_bin: PathBuf,
    pub layers: LayerRoots,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        WorkspaceConfig {
            solution_root: PathBuf::from("."),
            compile_output: PathBuf::from("build/out"),
            project_bin: PathBuf::from("bin"),
            layers: LayerRoots::default(),
        }
    }
}

impl WorkspaceConfig {
    /// Load a configuration file.
    ///
    /// Returns `Ok(None)` when the file does not exist (not an error);
    /// a present-but-malformed file fails with context.
    pub fn load(path: &Path) -> anyhow::Result<Option<WorkspaceConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read workspace config: {}", path.display()))?;
        let config: WorkspaceConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse workspace config: {}", path.display()))?;
        Ok(Some(config))
    }

    /// Resolve the effective configuration.
    ///
    /// Priority: explicitly provided path, then `layerforge.toml` in the
    /// solution root, then built-in defaults.
    pub fn resolve(explicit: Option<&Path>, solution_root: &Path) -> anyhow::Result<WorkspaceConfig> {
        let candidate = match explicit {
            Some(path) => path.to_path_buf(),
            None => solution_root.join(CONFIG_FILE_NAME),
        };
        let mut config = WorkspaceConfig::load(&candidate)?.unwrap_or_default();
        if config.solution_root == Path::new(".") {
            config.solution_root = solution_root.to_path_buf();
        }
        Ok(config)
    }

    /// Absolute-ish path of the compile-output directory.
    pub fn compile_output_dir(&self) -> PathBuf {
        self.solution_root.join(&self.compile_output)
    }

    /// Absolute-ish path of the project bin directory.
    pub fn project_bin_dir(&self) -> PathBuf {
        self.solution_root.join(&self.project_bin)
    }

    /// Project root a layer's artifacts are written under.
    pub fn layer_root(&self, unit: UnitKind) -> PathBuf {
        let relative = match unit {
            UnitKind::Logic => &self.layers.logic,
            UnitKind::Api => &self.layers.api,
            UnitKind::Site => &self.layers.site,
            UnitKind::ClientApp => &self.layers.client_app,
            UnitKind::ClientScript => &self.layers.client_script,
            UnitKind::Facade => &self.layers.facade,
        };
        self.solution_root.join(relative)
    }
}
