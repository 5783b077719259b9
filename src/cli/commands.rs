use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::catalog::{classify, parse_metadata, TypeCatalog};
use crate::config::WorkspaceConfig;
use crate::emit::{run_generation, GenerationContext, GenerationScope};
use crate::naming::{convention, relative_file_path};
use crate::settings::{ItemKind, SettingsStore, UnitKind};

/// Command-line interface for layerforge.
///
/// Provides commands for running generation passes over a target
/// solution and for inspecting how the inputs resolve.
#[derive(Parser)]
#[command(name = "layerforge")]
#[command(about = "layerforge scaffolding generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for layerforge
#[derive(Subcommand)]
pub enum Commands {
    /// Run a generation pass over the target solution
    Generate {
        /// Solution root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Explicit metadata document (JSON or YAML); overrides discovery
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Path to the workspace configuration (layerforge.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Regenerate user-owned inheritance stubs too
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Perform a dry run: show what would change without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Limit the pass to specific layers (comma-separated or repeated)
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        only: Option<Vec<OnlyLayer>>,
    },
    /// Print type classification and derived artifact paths
    Inspect {
        /// Solution root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Explicit metadata document (JSON or YAML); overrides discovery
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Path to the workspace configuration (layerforge.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show which settings row answers a query
    ExplainSetting {
        /// Solution root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Unit kind (Logic, Api, Site, ClientApp, ClientScript, Facade)
        #[arg(long)]
        unit: String,

        /// Item kind (Type, Model, ModelProperty, Property, ...)
        #[arg(long)]
        item: String,

        /// Item name to resolve (e.g. CustomerFilter.Name)
        #[arg(long)]
        name: String,

        /// Setting name (e.g. Generate)
        #[arg(long)]
        setting: String,
    },
}

/// Layers that can be selectively regenerated with `--only`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnlyLayer {
    /// Data-access layer
    Logic,
    /// Web API layer
    Api,
    /// Server-rendered site layer
    Site,
    /// First single-page-app client flavor
    ClientApp,
    /// Second single-page-app client flavor
    ClientScript,
    /// Desktop/mobile presentation layer
    Facade,
}

impl OnlyLayer {
    fn unit(&self) -> UnitKind {
        match self {
            OnlyLayer::Logic => UnitKind::Logic,
            OnlyLayer::Api => UnitKind::Api,
            OnlyLayer::Site => UnitKind::Site,
            OnlyLayer::ClientApp => UnitKind::ClientApp,
            OnlyLayer::ClientScript => UnitKind::ClientScript,
            OnlyLayer::Facade => UnitKind::Facade,
        }
    }
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly named metadata or config file cannot be loaded
/// - A filesystem fault interrupts merging or writing
pub fn run_cli() -> anyhow::Result<()> {
    run_command(Cli::parse())
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate {
            root,
            metadata,
            config,
            force,
            dry_run,
            only,
        } => {
            let ctx = build_context(root, metadata.as_deref(), config.as_deref())?;
            let scope = map_only_to_scope(only.as_deref());
            let summary = run_generation(&ctx, &scope, *force, *dry_run)?;
            println!(
                "Done: {} file(s) {}, {} stub(s) left untouched",
                summary.written.len(),
                if *dry_run { "would be written" } else { "written" },
                summary.skipped.len()
            );
            Ok(())
        }
        Commands::Inspect {
            root,
            metadata,
            config,
        } => {
            let ctx = build_context(root, metadata.as_deref(), config.as_deref())?;
            if ctx.catalog.is_empty() {
                println!("⚠️  No module metadata found; catalog is empty");
                return Ok(());
            }
            for ty in ctx.catalog.all_types() {
                println!("{:<10} {}", classify(ty).to_string(), ty.full_name());
            }
            let logic = convention(UnitKind::Logic);
            for ty in ctx.catalog.entity_types() {
                println!(
                    "  {} → {:?}",
                    ty.name,
                    relative_file_path(ty, logic, ItemKind::Model)
                );
            }
            Ok(())
        }
        Commands::ExplainSetting {
            root,
            unit,
            item,
            name,
            setting,
        } => {
            let unit: UnitKind = unit.parse().map_err(anyhow::Error::msg)?;
            let item: ItemKind = item.parse().map_err(anyhow::Error::msg)?;
            let settings = SettingsStore::load(root);
            match settings.find(unit, item, name, setting) {
                Some(row) => println!(
                    "{unit};{item};{name};{setting} → {:?} (matched row suffix {:?})",
                    row.value, row.name_suffix
                ),
                None => println!("{unit};{item};{name};{setting} → no match; caller default applies"),
            }
            Ok(())
        }
    }
}

fn build_context(
    root: &std::path::Path,
    metadata: Option<&std::path::Path>,
    config: Option<&std::path::Path>,
) -> anyhow::Result<GenerationContext> {
    let config = WorkspaceConfig::resolve(config, root)?;
    match metadata {
        Some(path) => {
            // An explicitly named document must load; silent-empty is
            // only for discovery.
            let metadata = parse_metadata(path)?;
            Ok(GenerationContext {
                catalog: TypeCatalog::from_metadata(metadata),
                settings: SettingsStore::load(&config.solution_root),
                config,
            })
        }
        None => Ok(GenerationContext::initialize(config)),
    }
}

/// Convert CLI `--only` layers to a `GenerationScope`.
///
/// If `only` is `None`, all layers are enabled; otherwise only the named
/// layers run.
pub(crate) fn map_only_to_scope(only: Option<&[OnlyLayer]>) -> GenerationScope {
    match only {
        None => GenerationScope::all(),
        Some(layers) => {
            let mut scope = GenerationScope::none();
            for layer in layers {
                scope.enable(layer.unit());
            }
            scope
        }
    }
}
