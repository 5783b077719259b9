//! Second single-page-app client flavor: change-notifying models over an
//! observable base, the shared HTTP service client, and its own enum
//! mirrors. No contracts - this flavor binds views straight to the
//! models.

use std::path::Path;

use crate::catalog::{TypeCatalog, TypeDescriptor};
use crate::item::GeneratedItem;
use crate::naming::convention;
use crate::protocol::{indent_block, property_lines, ts_factory_lines, TargetLang};
use crate::settings::{ItemKind, SettingsStore, UnitKind};

use super::templates::{render_lines, TsFileTemplate};
use super::{
    artifact_included, enum_mirror_item, included, model_members, new_item, service_client_item,
    ts_reference_imports, ts_relative_import,
};

const UNIT: UnitKind = UnitKind::ClientScript;

pub fn generate(
    catalog: &TypeCatalog,
    settings: &SettingsStore,
) -> anyhow::Result<Vec<GeneratedItem>> {
    let conv = convention(UNIT);
    let mut items = Vec::new();
    for ty in catalog.entity_types() {
        if !included(settings, UNIT, ty) {
            continue;
        }
        if artifact_included(settings, UNIT, ItemKind::Model, ty) {
            items.push(model_item(ty, catalog, settings)?);
        }
        if artifact_included(settings, UNIT, ItemKind::Service, ty) {
            items.push(service_client_item(ty, conv)?);
        }
    }
    for en in catalog.enums() {
        items.push(enum_mirror_item(en, conv)?);
    }
    Ok(items)
}

fn model_item(
    ty: &TypeDescriptor,
    catalog: &TypeCatalog,
    settings: &SettingsStore,
) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let mut item = new_item(ty, conv, ItemKind::Model);

    let members = model_members(ty, UNIT, settings);
    let mut imports = ts_reference_imports(&members, catalog, conv, &item.relative_path);
    let from_dir = item
        .relative_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .to_path_buf();
    let base_spec = ts_relative_import(&from_dir, Path::new("core/observable-base.ts"));
    imports.insert(format!("import {{ ObservableBase }} from '{base_spec}';"));

    let mut class_body: Vec<String> = Vec::new();
    for (index, member) in members.iter().enumerate() {
        if index > 0 {
            class_body.push(String::new());
        }
        class_body.extend(property_lines(member, TargetLang::TypeScript, conv.property_form));
    }
    class_body.push(String::new());
    class_body.extend(ts_factory_lines(ty, UNIT, settings, &ty.name));

    let mut body = Vec::new();
    body.push(format!("export class {} extends ObservableBase {{", ty.name));
    body.extend(indent_block(class_body, 1));
    body.push("}".to_string());

    let shell = TsFileTemplate {
        imports: imports.into_iter().collect(),
        body,
    };
    item.extend(render_lines(&shell)?);
    Ok(item)
}
