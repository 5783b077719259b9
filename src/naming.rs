//! # Name Resolver
//!
//! Deterministic, referentially transparent derivations of every artifact
//! identity: namespace, artifact name, file name, relative path. The merge
//! step relies on these being pure functions of (type descriptor, layer
//! convention) - the same inputs must locate the same prior output file on
//! every run, independent of generation order.
//!
//! Naming follows one shared scheme, styled per layer:
//!
//! - sub-namespace: the descriptor's namespace with the module root (two
//!   leading segments) dropped and the reserved `Entities`/`ServiceModels`
//!   token rewritten to the layer's folder token
//! - artifact name: type-name stem plus a fixed per-artifact suffix; the
//!   stem is pluralized for collection-oriented constructs (access
//!   objects, controllers, services, facades) and left singular for
//!   per-instance constructs (models, edit-models, contracts, views)
//! - file sub-path: sub-namespace segments as directories plus the
//!   artifact file name in the layer's file style and extension

use std::path::PathBuf;

use once_cell::sync::Lazy;

use crate::catalog::{EnumDescriptor, TypeDescriptor, ENTITIES_SEGMENT, SERVICE_MODELS_SEGMENT};
use crate::settings::{ItemKind, UnitKind};

/// File naming style of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStyle {
    /// `CustomersController.cs`
    Pascal,
    /// `customers.service.ts`
    Kebab,
}

/// Property synthesis form a layer selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyForm {
    /// Plain accessor with an optional default-value expression.
    Plain,
    /// Change-notifying accessor with backing field and extension seams.
    Notifying,
}

/// Static naming and policy data for one generation layer.
///
/// Layers are recipes over shared primitives; everything that makes one
/// layer differ from another lives in this table and the per-layer recipe
/// function, never in an inheritance chain.
#[derive(Debug, Clone)]
pub struct LayerConvention {
    pub unit: UnitKind,
    /// Root namespace owning every artifact of this layer.
    pub root_namespace: &'static str,
    /// Replacement for the reserved namespace token.
    pub folder_token: &'static str,
    /// Layer-specific suffix of model artifacts (the API layer pairs a
    /// regenerated `CustomerModel` with a user-owned `Customer` stub).
    pub model_suffix: &'static str,
    /// Default file extension; views override per artifact.
    pub extension: &'static str,
    pub file_style: FileStyle,
    pub property_form: PropertyForm,
    /// Facade-style layers project collections and nested entities lazily
    /// at access time instead of copying eagerly.
    pub lazy_projection: bool,
}

static CONVENTIONS: Lazy<Vec<LayerConvention>> = Lazy::new(|| {
    vec![
        LayerConvention {
            unit: UnitKind::Logic,
            root_namespace: "App.Logic",
            folder_token: "Models",
            model_suffix: "",
            extension: "cs",
            file_style: FileStyle::Pascal,
            property_form: PropertyForm::Plain,
            lazy_projection: false,
        },
        LayerConvention {
            unit: UnitKind::Api,
            root_namespace: "App.Api",
            folder_token: "Models",
            model_suffix: "Model",
            extension: "cs",
            file_style: FileStyle::Pascal,
            property_form: PropertyForm::Plain,
            lazy_projection: false,
        },
        LayerConvention {
            unit: UnitKind::Site,
            root_namespace: "App.Site",
            folder_token: "Models",
            model_suffix: "",
            extension: "cs",
            file_style: FileStyle::Pascal,
            property_form: PropertyForm::Plain,
            lazy_projection: false,
        },
        LayerConvention {
            unit: UnitKind::ClientApp,
            root_namespace: "app.client",
            folder_token: "models",
            model_suffix: "",
            extension: "ts",
            file_style: FileStyle::Kebab,
            property_form: PropertyForm::Plain,
            lazy_projection: false,
        },
        LayerConvention {
            unit: UnitKind::ClientScript,
            root_namespace: "app.script",
            folder_token: "models",
            model_suffix: "",
            extension: "ts",
            file_style: FileStyle::Kebab,
            property_form: PropertyForm::Notifying,
            lazy_projection: false,
        },
        LayerConvention {
            unit: UnitKind::Facade,
            root_namespace: "App.Shell",
            folder_token: "Facades",
            model_suffix: "",
            extension: "cs",
            file_style: FileStyle::Pascal,
            property_form: PropertyForm::Notifying,
            lazy_projection: true,
        },
    ]
});

/// Convention table entry for a unit kind.
pub fn convention(unit: UnitKind) -> &'static LayerConvention {
    CONVENTIONS
        .iter()
        .find(|c| c.unit == unit)
        .expect("every unit kind has a convention row")
}

/// Fixed per-artifact suffix and whether the stem pluralizes.
fn suffix_for(item: ItemKind) -> (&'static str, bool) {
    match item {
        ItemKind::Model | ItemKind::Type | ItemKind::Property | ItemKind::ModelProperty => ("", false),
        ItemKind::EditModel => ("EditModel", false),
        ItemKind::Contract => ("Contract", false),
        ItemKind::View => ("View", false),
        ItemKind::Enum => ("", false),
        ItemKind::Access => ("Access", true),
        ItemKind::Controller => ("Controller", true),
        ItemKind::Service => ("Service", true),
        ItemKind::Facade => ("Facade", true),
        ItemKind::Registration => ("Registry", false),
    }
}

/// Role token used by kebab-style file names (`customer.model.ts`).
fn role_token(item: ItemKind) -> &'static str {
    match item {
        ItemKind::Model => "model",
        ItemKind::EditModel => "edit-model",
        ItemKind::Contract => "contract",
        ItemKind::Service => "service",
        ItemKind::Enum => "enum",
        ItemKind::Controller => "controller",
        ItemKind::Access => "access",
        ItemKind::View => "view",
        ItemKind::Facade => "facade",
        ItemKind::Registration => "registry",
        ItemKind::Type | ItemKind::Property | ItemKind::ModelProperty => "item",
    }
}

/// Pluralize a word stem with the shared rule used by every layer.
pub fn pluralize(stem: &str) -> String {
    let lower = stem.to_ascii_lowercase();
    if let Some(prefix) = stem.strip_suffix('y') {
        let before = prefix.chars().last().unwrap_or('a');
        if !"aeiou".contains(before.to_ascii_lowercase()) {
            return format!("{prefix}ies");
        }
    }
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{stem}es");
    }
    format!("{stem}s")
}

/// Lower the first character (`Customer` → `customer`).
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// PascalCase to kebab-case (`OrderState` → `order-state`).
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Artifact name stem: pluralized for collection-oriented constructs.
pub fn artifact_stem(type_name: &str, item: ItemKind) -> String {
    let (_, plural) = suffix_for(item);
    if plural {
        pluralize(type_name)
    } else {
        type_name.to_string()
    }
}

/// Artifact name: stem plus the fixed per-artifact suffix.
pub fn artifact_name(type_name: &str, item: ItemKind) -> String {
    let (suffix, _) = suffix_for(item);
    format!("{}{}", artifact_stem(type_name, item), suffix)
}

/// Artifact name under a layer convention, honoring the layer's model
/// suffix (`Customer` in Logic, `CustomerModel` in the API layer).
pub fn artifact_name_in(conv: &LayerConvention, type_name: &str, item: ItemKind) -> String {
    if item == ItemKind::Model && !conv.model_suffix.is_empty() {
        format!("{}{}", artifact_stem(type_name, item), conv.model_suffix)
    } else {
        artifact_name(type_name, item)
    }
}

/// Sub-namespace of a descriptor under a layer: module root dropped,
/// reserved token rewritten to the layer's folder token.
pub fn sub_namespace(ty: &TypeDescriptor, conv: &LayerConvention) -> String {
    rewrite_namespace(&ty.namespace, conv)
}

fn rewrite_namespace(namespace: &str, conv: &LayerConvention) -> String {
    namespace
        .split('.')
        .filter(|s| !s.is_empty())
        .skip(2)
        .map(|segment| {
            if segment == ENTITIES_SEGMENT || segment == SERVICE_MODELS_SEGMENT {
                conv.folder_token.to_string()
            } else if conv.file_style == FileStyle::Kebab {
                segment.to_ascii_lowercase()
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Full logical name: layer root namespace, sub-namespace, artifact name.
pub fn full_logical_name(ty: &TypeDescriptor, conv: &LayerConvention, item: ItemKind) -> String {
    let sub = sub_namespace(ty, conv);
    let name = artifact_name_in(conv, &ty.name, item);
    if sub.is_empty() {
        format!("{}.{}", conv.root_namespace, name)
    } else {
        format!("{}.{}.{}", conv.root_namespace, sub, name)
    }
}

/// Namespace the generated artifact is declared in.
pub fn artifact_namespace(ty: &TypeDescriptor, conv: &LayerConvention) -> String {
    let sub = sub_namespace(ty, conv);
    if sub.is_empty() {
        conv.root_namespace.to_string()
    } else {
        format!("{}.{}", conv.root_namespace, sub)
    }
}

/// Extension of an artifact; view partials override the layer default.
pub fn extension_for(conv: &LayerConvention, item: ItemKind) -> &'static str {
    if item == ItemKind::View {
        "cshtml"
    } else {
        conv.extension
    }
}

/// Artifact file name in the layer's file style.
pub fn file_name(type_name: &str, conv: &LayerConvention, item: ItemKind) -> String {
    let ext = extension_for(conv, item);
    match conv.file_style {
        FileStyle::Pascal => format!("{}.{ext}", artifact_name_in(conv, type_name, item)),
        FileStyle::Kebab => format!(
            "{}.{}.{ext}",
            to_kebab_case(&artifact_stem(type_name, item)),
            role_token(item)
        ),
    }
}

/// Project-relative file sub-path: sub-namespace segments as directories
/// plus the artifact file name.
pub fn relative_file_path(ty: &TypeDescriptor, conv: &LayerConvention, item: ItemKind) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in rewrite_namespace(&ty.namespace, conv).split('.') {
        if !segment.is_empty() {
            path.push(segment);
        }
    }
    path.push(file_name(&ty.name, conv, item));
    path
}

/// Relative path of a mirrored enumeration artifact.
pub fn enum_relative_path(en: &EnumDescriptor, conv: &LayerConvention) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in rewrite_namespace(&en.namespace, conv).split('.') {
        if !segment.is_empty() {
            path.push(segment);
        }
    }
    path.push(file_name(&en.name, conv, ItemKind::Enum));
    path
}
