//! First single-page-app client flavor: per entity a contract interface,
//! a plain model class with the copy factory, and an HTTP service client;
//! plus one mirrored enumeration per module enum.

use std::path::Path;

use crate::catalog::{TypeCatalog, TypeDescriptor};
use crate::item::GeneratedItem;
use crate::naming::{artifact_name, convention, lower_first, relative_file_path};
use crate::protocol::{indent_block, property_lines, ts_factory_lines, ts_type, TargetLang};
use crate::settings::{ItemKind, SettingsStore, UnitKind};

use super::templates::{render_lines, TsFileTemplate};
use super::{
    artifact_included, enum_mirror_item, included, model_members, new_item, service_client_item,
    ts_reference_imports, ts_relative_import,
};

const UNIT: UnitKind = UnitKind::ClientApp;

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
        if artifact_included(settings, UNIT, ItemKind::Contract, ty) {
            items.push(contract_item(ty, catalog, settings)?);
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

fn contract_item(
    ty: &TypeDescriptor,
    catalog: &TypeCatalog,
    settings: &SettingsStore,
) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let mut item = new_item(ty, conv, ItemKind::Contract);
    let contract = artifact_name(&ty.name, ItemKind::Contract);

    let members = model_members(ty, UNIT, settings);
    let imports = ts_reference_imports(&members, catalog, conv, &item.relative_path);

    let mut fields: Vec<String> = Vec::new();
    for member in &members {
        fields.push(format!(
            "{}: {};",
            lower_first(&member.name),
            ts_type(&member.shape, member.nullable)
        ));
    }

    let mut body = Vec::new();
    body.push(format!("export interface {contract} {{"));
    body.extend(indent_block(fields, 1));
    body.push("}".to_string());

    let shell = TsFileTemplate {
        imports: imports.into_iter().collect(),
        body,
    };
    item.extend(render_lines(&shell)?);
    Ok(item)
}

fn model_item(
    ty: &TypeDescriptor,
    catalog: &TypeCatalog,
    settings: &SettingsStore,
) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let mut item = new_item(ty, conv, ItemKind::Model);
    let contract = artifact_name(&ty.name, ItemKind::Contract);

    let members = model_members(ty, UNIT, settings);
    let mut imports = ts_reference_imports(&members, catalog, conv, &item.relative_path);
    let from_dir = item
        .relative_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .to_path_buf();
    let contract_spec = ts_relative_import(
        &from_dir,
        &relative_file_path(ty, conv, ItemKind::Contract),
    );
    imports.insert(format!("import {{ {contract} }} from '{contract_spec}';"));

    let mut class_body: Vec<String> = Vec::new();
    for member in &members {
        class_body.extend(property_lines(member, TargetLang::TypeScript, conv.property_form));
    }
    class_body.push(String::new());
    class_body.extend(ts_factory_lines(ty, UNIT, settings, &contract));

    let mut body = Vec::new();
    body.push(format!("export class {} implements {contract} {{", ty.name));
    body.extend(indent_block(class_body, 1));
    body.push("}".to_string());

    let shell = TsFileTemplate {
        imports: imports.into_iter().collect(),
        body,
    };
    item.extend(render_lines(&shell)?);
    Ok(item)
}

