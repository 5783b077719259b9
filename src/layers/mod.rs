//! # Per-Layer Generators
//!
//! One module per generation layer, each a fixed recipe over the shared
//! protocol primitives. A recipe enumerates the catalog's entity types
//! (and service types where relevant), applies the settings-derived
//! inclusion predicate, and assembles one or more [`GeneratedItem`]s per
//! included type. Layers are data plus a recipe function - they share no
//! behavior through inheritance, only through the protocol module and the
//! helpers here.
//!
//! | layer          | artifacts per entity                               |
//! |----------------|----------------------------------------------------|
//! | `logic`        | model, access object                               |
//! | `api`          | model, inheritance stub, edit-model, controller    |
//! | `site`         | model, controller, view partial                    |
//! | `client_app`   | contract, model, service client (+ enum mirrors)   |
//! | `client_script`| change-notifying model, service client (+ mirrors) |
//! | `facade`       | delegate-wrapping facade (+ one registration file) |

pub mod api;
pub mod client_app;
pub mod client_script;
pub mod facade;
pub mod logic;
pub mod site;

pub(crate) mod templates;


use std::collections::BTreeSet;
use std::path::Path;

use crate::catalog::{MemberDescriptor, TypeCatalog, TypeDescriptor, ValueShape};
use crate::item::GeneratedItem;
use crate::naming::{
    artifact_namespace, convention, extension_for, full_logical_name, relative_file_path,
    LayerConvention,
};
use crate::settings::{ItemKind, SettingsStore, UnitKind};

use self::templates::{render_lines, CsFileTemplate};

/// Run the recipe of one layer.
pub fn generate_unit(
    unit: UnitKind,
    catalog: &TypeCatalog,
    settings: &SettingsStore,
) -> anyhow::Result<Vec<GeneratedItem>> {
    match unit {
        UnitKind::Logic => logic::generate(catalog, settings),
        UnitKind::Api => api::generate(catalog, settings),
        UnitKind::Site => site::generate(catalog, settings),
        UnitKind::ClientApp => client_app::generate(catalog, settings),
        UnitKind::ClientScript => client_script::generate(catalog, settings),
        UnitKind::Facade => facade::generate(catalog, settings),
    }
}

/// Layer inclusion predicate: generate unless a `Generate` toggle says
/// otherwise. Applies per type and again per artifact kind.
pub(crate) fn included(settings: &SettingsStore, unit: UnitKind, ty: &TypeDescriptor) -> bool {
    settings.generates(unit, ItemKind::Type, &ty.name)
}

pub(crate) fn artifact_included(
    settings: &SettingsStore,
    unit: UnitKind,
    item: ItemKind,
    ty: &TypeDescriptor,
) -> bool {
    settings.generates(unit, item, &ty.name)
}

/// Members that generate model properties: the per-member `Generate`
/// toggle defaults to true.
pub(crate) fn model_members<'a>(
    ty: &'a TypeDescriptor,
    unit: UnitKind,
    settings: &SettingsStore,
) -> Vec<&'a MemberDescriptor> {
    ty.members
        .iter()
        .filter(|m| settings.generates(unit, ItemKind::ModelProperty, &m.scoped_name()))
        .collect()
}

/// Fresh item with its identity derived from the name resolver.
pub(crate) fn new_item(ty: &TypeDescriptor, conv: &LayerConvention, item: ItemKind) -> GeneratedItem {
    GeneratedItem::new(
        conv.unit,
        item,
        full_logical_name(ty, conv, item),
        relative_file_path(ty, conv, item),
        extension_for(conv, item),
    )
}

/// Assemble a C# artifact through the file shell template.
pub(crate) fn finish_cs_item(
    mut item: GeneratedItem,
    usings: BTreeSet<String>,
    namespace: String,
    body: Vec<String>,
) -> anyhow::Result<GeneratedItem> {
    let shell = CsFileTemplate {
        usings: usings.into_iter().collect(),
        namespace,
        body,
    };
    item.extend(render_lines(&shell)?);
    Ok(item)
}

/// Fully qualified logic-layer model name for a descriptor; the other
/// server layers copy from it.
pub(crate) fn logic_model_name(ty: &TypeDescriptor) -> String {
    let logic = convention(UnitKind::Logic);
    format!("{}.{}", artifact_namespace(ty, logic), ty.name)
}

/// Relative TypeScript import specifier from the directory of one file
/// to another file under the same layer root, extension dropped.
pub(crate) fn ts_relative_import(from_dir: &Path, to_file: &Path) -> String {
    let from: Vec<String> = from_dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let mut to: Vec<String> = to_file
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let file = to.pop().unwrap_or_default();
    let stem = file.strip_suffix(".ts").unwrap_or(&file).to_string();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    if parts.is_empty() {
        parts.push(".".to_string());
    }
    parts.extend(to[common..].iter().cloned());
    parts.push(stem);
    parts.join("/")
}

/// Import lines for every entity model and enum mirror a member set
/// references, relative to the importing item's directory.
pub(crate) fn ts_reference_imports(
    members: &[&MemberDescriptor],
    catalog: &TypeCatalog,
    conv: &LayerConvention,
    from: &Path,
) -> BTreeSet<String> {
    let from_dir = from.parent().unwrap_or_else(|| Path::new(""));
    let mut imports = BTreeSet::new();
    for member in members {
        collect_reference_import(&member.shape, catalog, conv, from_dir, &mut imports);
    }
    imports
}

/// Mirrored enumeration artifact, one per module enum, shared by both
/// client flavors so their models never import across layer roots.
pub(crate) fn enum_mirror_item(
    en: &crate::catalog::EnumDescriptor,
    conv: &LayerConvention,
) -> anyhow::Result<GeneratedItem> {
    use self::templates::TsFileTemplate;

    let mut item = GeneratedItem::new(
        conv.unit,
        ItemKind::Enum,
        format!("{}.{}", conv.root_namespace, en.name),
        crate::naming::enum_relative_path(en, conv),
        conv.extension,
    );

    let mut variants: Vec<String> = Vec::new();
    for (ordinal, value) in en.values.iter().enumerate() {
        variants.push(format!("{value} = {ordinal},"));
    }
    let mut body = Vec::new();
    body.push(format!("export enum {} {{", en.name));
    body.extend(crate::protocol::indent_block(variants, 1));
    body.push("}".to_string());

    let shell = TsFileTemplate { imports: vec![], body };
    item.extend(render_lines(&shell)?);
    Ok(item)
}

/// HTTP service client artifact, shared by both client flavors: the
/// flavors differ in conventions and model form, not in how they reach
/// the API.
pub(crate) fn service_client_item(
    ty: &TypeDescriptor,
    conv: &LayerConvention,
) -> anyhow::Result<GeneratedItem> {
    use crate::naming::{artifact_name, pluralize, to_kebab_case};
    use self::templates::TsFileTemplate;

    let mut item = new_item(ty, conv, ItemKind::Service);
    let service = artifact_name(&ty.name, ItemKind::Service);
    let model = &ty.name;
    let route = format!("/api/{}", to_kebab_case(&pluralize(&ty.name)));

    let from_dir = item
        .relative_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .to_path_buf();
    let model_spec = ts_relative_import(
        &from_dir,
        &relative_file_path(ty, conv, ItemKind::Model),
    );
    let http_spec = ts_relative_import(&from_dir, Path::new("core/http-client.ts"));
    let imports = vec![
        format!("import {{ HttpClient }} from '{http_spec}';"),
        format!("import {{ {model} }} from '{model_spec}';"),
    ];

    let mut class_body: Vec<String> = Vec::new();
    class_body.push("constructor(private readonly http: HttpClient) {}".to_string());
    class_body.push(String::new());
    class_body.push(format!("list(): Promise<{model}[]> {{"));
    class_body.push(format!(
        "    return this.http.get('{route}').then(items => (items ?? []).map(item => {model}.from(item)));"
    ));
    class_body.push("}".to_string());
    class_body.push(String::new());
    class_body.push(format!("find(id: number): Promise<{model}> {{"));
    class_body.push(format!(
        "    return this.http.get(`{route}/${{id}}`).then(item => {model}.from(item));"
    ));
    class_body.push("}".to_string());
    class_body.push(String::new());
    class_body.push(format!("save(model: {model}): Promise<{model}> {{"));
    class_body.push(format!(
        "    return this.http.post('{route}', model).then(item => {model}.from(item));"
    ));
    class_body.push("}".to_string());

    let mut body = Vec::new();
    body.push(format!("export class {service} {{"));
    body.extend(crate::protocol::indent_block(class_body, 1));
    body.push("}".to_string());

    let shell = TsFileTemplate { imports, body };
    item.extend(render_lines(&shell)?);
    Ok(item)
}

fn collect_reference_import(
    shape: &ValueShape,
    catalog: &TypeCatalog,
    conv: &LayerConvention,
    from_dir: &Path,
    imports: &mut BTreeSet<String>,
) {
    match shape {
        ValueShape::Collection(inner) => {
            collect_reference_import(inner, catalog, conv, from_dir, imports)
        }
        ValueShape::Entity(name) => {
            if let Some(target) = catalog.find(name) {
                let path = relative_file_path(target, conv, ItemKind::Model);
                let spec = ts_relative_import(from_dir, &path);
                imports.insert(format!("import {{ {name} }} from '{spec}';"));
            }
        }
        ValueShape::Enum(name) => {
            if let Some(target) = catalog.find_enum(name) {
                let path = crate::naming::enum_relative_path(target, conv);
                let spec = ts_relative_import(from_dir, &path);
                imports.insert(format!("import {{ {name} }} from '{spec}';"));
            }
        }
        _ => {}
    }
}
