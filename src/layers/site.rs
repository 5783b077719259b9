//! Server-rendered layer recipe: model, controller, and a Razor view
//! partial per entity.

use std::collections::BTreeSet;

use crate::catalog::{TypeCatalog, TypeDescriptor};
use crate::item::GeneratedItem;
use crate::naming::{artifact_name, artifact_namespace, convention};
use crate::protocol::{factory_lines, indent_block, property_lines, TargetLang};
use crate::settings::{ItemKind, SettingsStore, UnitKind};

use super::templates::{render_lines, ViewField, ViewTemplate};
use super::{
    artifact_included, finish_cs_item, included, logic_model_name, model_members, new_item,
};

const UNIT: UnitKind = UnitKind::Site;

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
        if artifact_included(settings, UNIT, ItemKind::Controller, ty) {
            items.push(controller_item(ty)?);
        }
        if artifact_included(settings, UNIT, ItemKind::View, ty) {
            items.push(view_item(ty, settings)?);
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
    class_body.extend(factory_lines(
        &ty.name,
        ty,
        UNIT,
        settings,
        &logic_model_name(ty),
    ));

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

fn controller_item(ty: &TypeDescriptor) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let item = new_item(ty, conv, ItemKind::Controller);
    let controller = artifact_name(&ty.name, ItemKind::Controller);
    let name = &ty.name;
    let logic = logic_model_name(ty);
    let access = logic
        .rsplit_once('.')
        .map(|(ns, leaf)| format!("{ns}.{}", artifact_name(leaf, ItemKind::Access)))
        .unwrap_or_else(|| artifact_name(name, ItemKind::Access));

    let mut class_body: Vec<String> = Vec::new();
    class_body.push(format!("private readonly {access} _access = new {access}();"));
    class_body.push(String::new());
    class_body.push("public ViewResult Index()".to_string());
    class_body.push("{".to_string());
    class_body.push(format!(
        "    return View(_access.Query().Select(item => {name}.CreateFrom(item)).ToList());"
    ));
    class_body.push("}".to_string());
    class_body.push(String::new());
    class_body.push("public ViewResult Details(int id)".to_string());
    class_body.push("{".to_string());
    class_body.push(format!("    return View({name}.CreateFrom(_access.Fetch(id)));"));
    class_body.push("}".to_string());

    let mut body = Vec::new();
    body.push(format!("public partial class {controller} : SiteControllerBase"));
    body.push("{".to_string());
    body.extend(indent_block(class_body, 1));
    body.push("}".to_string());

    let usings: BTreeSet<String> = ["System", "System.Collections.Generic", "System.Linq"]
        .into_iter()
        .map(String::from)
        .collect();
    finish_cs_item(item, usings, artifact_namespace(ty, conv), indent_block(body, 1))
}

fn view_item(ty: &TypeDescriptor, settings: &SettingsStore) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let mut item = new_item(ty, conv, ItemKind::View);

    // Display rows cover the value-shaped members; collections and nested
    // entities get their own views.
    let fields = model_members(ty, UNIT, settings)
        .into_iter()
        .filter(|m| m.shape.is_value_shaped())
        .map(|m| ViewField {
            label: m.name.clone(),
            member: m.name.clone(),
        })
        .collect();

    let view = ViewTemplate {
        model_type: format!("{}.{}", artifact_namespace(ty, conv), ty.name),
        fields,
    };
    item.extend(render_lines(&view)?);
    Ok(item)
}
