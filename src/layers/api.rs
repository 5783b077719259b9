//! Web API layer recipe. Each entity yields a regenerated model, a
//! user-owned inheritance stub, an edit-model restricted to writable
//! members, and a controller. Service types yield contracts.

use std::collections::BTreeSet;

use crate::catalog::{TypeCatalog, TypeDescriptor};
use crate::item::GeneratedItem;
use crate::naming::{artifact_name, artifact_name_in, artifact_namespace, convention};
use crate::protocol::{
    cs_type, factory_lines, indent_block, is_copyable, property_lines, TargetLang,
};
use crate::settings::{ItemKind, SettingsStore, UnitKind};

use super::{
    artifact_included, finish_cs_item, included, logic_model_name, model_members, new_item,
};

const UNIT: UnitKind = UnitKind::Api;

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
            items.push(stub_item(ty)?);
        }
        if artifact_included(settings, UNIT, ItemKind::EditModel, ty) {
            items.push(edit_model_item(ty, settings)?);
        }
        if artifact_included(settings, UNIT, ItemKind::Controller, ty) {
            items.push(controller_item(ty)?);
        }
    }
    for ty in catalog.service_types() {
        if included(settings, UNIT, ty) && artifact_included(settings, UNIT, ItemKind::Contract, ty)
        {
            items.push(contract_item(ty, settings)?);
        }
    }
    Ok(items)
}

fn server_usings() -> BTreeSet<String> {
    ["System", "System.Collections.Generic", "System.Linq"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn model_item(ty: &TypeDescriptor, settings: &SettingsStore) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let item = new_item(ty, conv, ItemKind::Model);
    let class = artifact_name_in(conv, &ty.name, ItemKind::Model);

    let mut class_body: Vec<String> = Vec::new();
    for member in model_members(ty, UNIT, settings) {
        class_body.extend(property_lines(member, TargetLang::CSharp, conv.property_form));
    }
    class_body.push(String::new());
    class_body.extend(factory_lines(
        &class,
        ty,
        UNIT,
        settings,
        &logic_model_name(ty),
    ));

    let mut body = Vec::new();
    body.push(format!("public partial class {class}"));
    body.push("{".to_string());
    body.extend(indent_block(class_body, 1));
    body.push("}".to_string());

    finish_cs_item(item, server_usings(), artifact_namespace(ty, conv), indent_block(body, 1))
}

/// The inheritance stub: generated once, then owned by hand-written code.
/// Emission skips it when the target already exists.
fn stub_item(ty: &TypeDescriptor) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let item = new_item(ty, conv, ItemKind::Type);
    let model = artifact_name_in(conv, &ty.name, ItemKind::Model);

    let body = vec![
        format!("public partial class {} : {model}", ty.name),
        "{".to_string(),
        "}".to_string(),
    ];
    let usings: BTreeSet<String> = ["System".to_string()].into_iter().collect();
    finish_cs_item(item, usings, artifact_namespace(ty, conv), indent_block(body, 1))
}

fn edit_model_item(ty: &TypeDescriptor, settings: &SettingsStore) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let item = new_item(ty, conv, ItemKind::EditModel);
    let class = artifact_name(&ty.name, ItemKind::EditModel);
    let model = artifact_name_in(conv, &ty.name, ItemKind::Model);

    // Edit-models carry only the writable, copyable subset; the factory
    // then copies exactly the members the artifact declares.
    let edit_ty = TypeDescriptor {
        members: ty
            .members
            .iter()
            .filter(|m| m.writable && is_copyable(m, UNIT, settings))
            .cloned()
            .collect(),
        ..ty.clone()
    };

    let mut class_body: Vec<String> = Vec::new();
    for member in model_members(&edit_ty, UNIT, settings) {
        class_body.extend(property_lines(member, TargetLang::CSharp, conv.property_form));
    }
    class_body.push(String::new());
    class_body.extend(factory_lines(&class, &edit_ty, UNIT, settings, &model));

    let mut body = Vec::new();
    body.push(format!("public partial class {class}"));
    body.push("{".to_string());
    body.extend(indent_block(class_body, 1));
    body.push("}".to_string());

    finish_cs_item(item, server_usings(), artifact_namespace(ty, conv), indent_block(body, 1))
}

fn controller_item(ty: &TypeDescriptor) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let item = new_item(ty, conv, ItemKind::Controller);
    let controller = artifact_name(&ty.name, ItemKind::Controller);
    let model = artifact_name_in(conv, &ty.name, ItemKind::Model);
    let edit = artifact_name(&ty.name, ItemKind::EditModel);
    let logic = logic_model_name(ty);
    let access = logic
        .rsplit_once('.')
        .map(|(ns, name)| format!("{ns}.{}", artifact_name(name, ItemKind::Access)))
        .unwrap_or_else(|| artifact_name(&ty.name, ItemKind::Access));

    let mut class_body: Vec<String> = Vec::new();
    class_body.push(format!("private readonly {access} _access = new {access}();"));
    class_body.push(String::new());
    class_body.push(format!("public {model} Get(int id)"));
    class_body.push("{".to_string());
    class_body.push(format!("    return {model}.CreateFrom(_access.Fetch(id));"));
    class_body.push("}".to_string());
    class_body.push(String::new());
    class_body.push(format!("public List<{model}> List()"));
    class_body.push("{".to_string());
    class_body.push(format!(
        "    return _access.Query().Select(item => {model}.CreateFrom(item)).ToList();"
    ));
    class_body.push("}".to_string());
    class_body.push(String::new());
    class_body.push(format!("public {model} Save({edit} editModel)"));
    class_body.push("{".to_string());
    class_body.push("    var entity = _access.CreateCopy(_access.Fetch(editModel.Id));".to_string());
    class_body.push("    ModelMapper.CopyMatching(editModel, entity);".to_string());
    class_body.push(format!("    return {model}.CreateFrom(_access.Save(entity));"));
    class_body.push("}".to_string());

    let mut body = Vec::new();
    body.push(format!("public partial class {controller} : ApiControllerBase"));
    body.push("{".to_string());
    body.extend(indent_block(class_body, 1));
    body.push("}".to_string());

    finish_cs_item(item, server_usings(), artifact_namespace(ty, conv), indent_block(body, 1))
}

fn contract_item(ty: &TypeDescriptor, settings: &SettingsStore) -> anyhow::Result<GeneratedItem> {
    let conv = convention(UNIT);
    let item = new_item(ty, conv, ItemKind::Contract);
    let contract = artifact_name(&ty.name, ItemKind::Contract);

    let mut members: Vec<String> = Vec::new();
    for member in model_members(ty, UNIT, settings) {
        let ty_expr = cs_type(&member.shape, member.nullable);
        members.push(format!("{ty_expr} {} {{ get; set; }}", member.name));
    }

    let mut body = Vec::new();
    body.push(format!("public partial interface {contract}"));
    body.push("{".to_string());
    body.extend(indent_block(members, 1));
    body.push("}".to_string());

    let usings: BTreeSet<String> = ["System", "System.Collections.Generic"]
        .into_iter()
        .map(String::from)
        .collect();
    finish_cs_item(item, usings, artifact_namespace(ty, conv), indent_block(body, 1))
}
