//! Desktop/mobile presentation layer recipe: one delegate-wrapping facade
//! per entity, forwarding to the logic model it holds, plus a single
//! dependency-registration artifact for the layer.

use std::collections::BTreeSet;

use crate::catalog::{TypeCatalog, TypeDescriptor};
use crate::item::GeneratedItem;
use crate::naming::{artifact_name, artifact_namespace, convention, full_logical_name};
use crate::protocol::{facade_member_lines, indent_block, property_lines, TargetLang};
use crate::settings::{ItemKind, SettingsStore, UnitKind};

use super::templates::{render_lines, RegistrationTemplate};
use super::{artifact_included, finish_cs_item, included, logic_model_name, model_members, new_item};

const UNIT: UnitKind = UnitKind::Facade;

pub fn generate(
    catalog: &TypeCatalog,
    settings: &SettingsStore,
) -> anyhow::Result<Vec<GeneratedItem>> {
    let mut items = Vec::new();
    let mut registered: Vec<String> = Vec::new();
    for ty in catalog.entity_types() {
        if !included(settings, UNIT, ty) || !artifact_included(settings, UNIT, ItemKind::Facade, ty)
        {
            continue;
        }
        items.push(facade_item(ty, settings)?);
        registered.push(full_logical_name(ty, convention(UNIT), ItemKind::Facade));
    }
    // An empty catalog (or a fully toggled-off layer) produces nothing,
    // not an empty registry.
    if !registered.is_empty() {
        items.push(registration_item(&registered)?);
    }
    Ok(items)
}

fn facade_item(ty: &TypeDescriptor, settings: &SettingsStore) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let item = new_item(ty, conv, ItemKind::Facade);
    let facade = artifact_name(&ty.name, ItemKind::Facade);
    let inner = logic_model_name(ty);

    let mut class_body: Vec<String> = Vec::new();
    class_body.push(format!("private readonly {inner} _inner;"));
    class_body.push(String::new());
    class_body.push(format!("public {facade}({inner} inner)"));
    class_body.push("{".to_string());
    class_body.push("    _inner = inner;".to_string());
    class_body.push("}".to_string());
    for member in model_members(ty, UNIT, settings) {
        class_body.push(String::new());
        if conv.lazy_projection {
            class_body.extend(facade_member_lines(member, settings));
        } else {
            class_body.extend(property_lines(member, TargetLang::CSharp, conv.property_form));
        }
    }

    let mut body = Vec::new();
    body.push(format!("public partial class {facade} : FacadeBase"));
    body.push("{".to_string());
    body.extend(indent_block(class_body, 1));
    body.push("}".to_string());

    let usings: BTreeSet<String> = ["System", "System.Collections.Generic", "System.Linq"]
        .into_iter()
        .map(String::from)
        .collect();
    finish_cs_item(item, usings, artifact_namespace(ty, conv), indent_block(body, 1))
}

/// One registration statement per generated facade, emitted as a single
/// layer-level artifact at the project root.
fn registration_item(facades: &[String]) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let mut item = GeneratedItem::new(
        UNIT,
        ItemKind::Registration,
        format!("{}.FacadeRegistry", conv.root_namespace),
        "FacadeRegistry.cs",
        conv.extension,
    );
    let registrations = facades
        .iter()
        .map(|name| format!("services.AddTransient<{name}>();"))
        .collect();
    let template = RegistrationTemplate {
        usings: vec!["Microsoft.Extensions.DependencyInjection".to_string()],
        namespace: conv.root_namespace.to_string(),
        class_name: "FacadeRegistry".to_string(),
        method: "AddFacades".to_string(),
        registrations,
    };
    item.extend(render_lines(&template)?);
    Ok(item)
}
