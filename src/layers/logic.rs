//! Data-access layer recipe: one model and one repository-style access
//! object per entity. Models carry plain properties, the factory family,
//! and the version-identity equality pair.

use std::collections::BTreeSet;

use crate::catalog::{TypeCatalog, TypeDescriptor};
use crate::item::GeneratedItem;
use crate::naming::{artifact_name, artifact_namespace, convention};
use crate::protocol::{
    equality_lines, factory_lines, hash_lines, indent_block, property_lines, TargetLang,
};
use crate::settings::{ItemKind, SettingsStore, UnitKind};

use super::{artifact_included, finish_cs_item, included, model_members, new_item};

const UNIT: UnitKind = UnitKind::Logic;

pub fn generate(
    catalog: &TypeCatalog,
    settings: &SettingsStore,
) -> anyhow::Result<Vec<GeneratedItem>> {
    let mut items = Vec::new();
    for ty in catalog.entity_types() {
        if !included(settings, UNIT, ty) {
            continue;
        }
        if artifact_included(settings, UNIT, ItemKind::Model, ty) {
            items.push(model_item(ty, settings)?);
        }
        if artifact_included(settings, UNIT, ItemKind::Access, ty) {
            items.push(access_item(ty)?);
        }
    }
    Ok(items)
}

fn model_item(ty: &TypeDescriptor, settings: &SettingsStore) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let item = new_item(ty, conv, ItemKind::Model);

    let mut class_body: Vec<String> = Vec::new();
    for member in model_members(ty, UNIT, settings) {
        class_body.extend(property_lines(member, TargetLang::CSharp, conv.property_form));
    }
    class_body.push(String::new());
    class_body.extend(factory_lines(&ty.name, ty, UNIT, settings, &ty.name));
    let equality = equality_lines(ty);
    if !equality.is_empty() {
        class_body.push(String::new());
        class_body.extend(equality);
    }
    class_body.push(String::new());
    class_body.extend(hash_lines(ty, UNIT, settings));

    let mut body = Vec::new();
    body.push(format!("public partial class {}", ty.name));
    body.push("{".to_string());
    body.extend(indent_block(class_body, 1));
    body.push("}".to_string());

    let usings: BTreeSet<String> = ["System", "System.Collections.Generic", "System.Linq"]
        .into_iter()
        .map(String::from)
        .collect();
    finish_cs_item(item, usings, artifact_namespace(ty, conv), indent_block(body, 1))
}

fn access_item(ty: &TypeDescriptor) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let item = new_item(ty, conv, ItemKind::Access);
    let access = artifact_name(&ty.name, ItemKind::Access);
    let name = &ty.name;

    let mut body = Vec::new();
    body.push(format!("public partial class {access} : AccessBase<{name}>"));
    body.push("{".to_string());
    body.extend(indent_block(
        vec![
            format!("public {name} CreateNew()"),
            "{".to_string(),
            format!("    return {name}.CreateNew();"),
            "}".to_string(),
            String::new(),
            format!("public {name} CreateCopy({name} source)"),
            "{".to_string(),
            format!("    return {name}.CreateFrom(source);"),
            "}".to_string(),
        ],
        1,
    ));
    body.push("}".to_string());

    let usings: BTreeSet<String> = ["System", "System.Collections.Generic"]
        .into_iter()
        .map(String::from)
        .collect();
    finish_cs_item(item, usings, artifact_namespace(ty, conv), indent_block(body, 1))
}
