use crate::catalog::{MemberDescriptor, TypeDescriptor, ValueShape};
use crate::naming::lower_first;
use crate::settings::{ItemKind, SettingsStore, UnitKind};

use super::ts_default;

/// Bookkeeping/version-stamp members never participate in copies; the
/// store assigns them.
pub const BOOKKEEPING_MEMBERS: &[&str] = &["RowVersion", "ModifiedStamp"];

/// A member is copyable when the settings gate allows it (default true)
/// and it is not a bookkeeping member.
pub fn is_copyable(member: &MemberDescriptor, unit: UnitKind, settings: &SettingsStore) -> bool {
    if BOOKKEEPING_MEMBERS.contains(&member.name.as_str()) {
        return false;
    }
    settings.generates(unit, ItemKind::ModelProperty, &member.scoped_name())
}

/// One C# copy statement for a member.
///
/// Scalars copy by value. Collection-shaped members copy element-wise,
/// projecting entity elements through their own factory. Entity-shaped
/// members copy via a null-guarded recursive factory call - exactly one
/// level; the child's factory owns everything deeper.
pub fn copy_statement(member: &MemberDescriptor, source: &str, target: &str) -> String {
    let name = &member.name;
    match &member.shape {
        ValueShape::Collection(element) => match element.as_ref() {
            ValueShape::Entity(child) => format!(
                "{target}.{name} = {source}.{name}?.Select(item => {child}.CreateFrom(item)).ToList();"
            ),
            _ => format!("{target}.{name} = {source}.{name}?.ToList();"),
        },
        ValueShape::Entity(child) => format!(
            "{target}.{name} = {source}.{name} == null ? null : {child}.CreateFrom({source}.{name});"
        ),
        _ => format!("{target}.{name} = {source}.{name};"),
    }
}

/// Copy statements for every copyable member of a type, in member order.
pub fn copy_statements(
    ty: &TypeDescriptor,
    unit: UnitKind,
    settings: &SettingsStore,
    source: &str,
    target: &str,
) -> Vec<String> {
    ty.members
        .iter()
        .filter(|m| is_copyable(m, unit, settings))
        .map(|m| copy_statement(m, source, target))
        .collect()
}

/// TypeScript flavor of the copy algorithm, used by client factories.
pub fn ts_copy_statements(
    ty: &TypeDescriptor,
    unit: UnitKind,
    settings: &SettingsStore,
    source: &str,
    target: &str,
) -> Vec<String> {
    ty.members
        .iter()
        .filter(|m| is_copyable(m, unit, settings))
        .map(|m| ts_copy_statement(m, source, target))
        .collect()
}

fn ts_copy_statement(member: &MemberDescriptor, source: &str, target: &str) -> String {
    let name = lower_first(&member.name);
    match &member.shape {
        ValueShape::Collection(element) => match element.as_ref() {
            ValueShape::Entity(child) => format!(
                "{target}.{name} = ({source}.{name} ?? []).map(item => {child}.from(item));"
            ),
            _ => format!("{target}.{name} = [...({source}.{name} ?? [])];"),
        },
        ValueShape::Entity(child) => {
            if member.nullable {
                format!(
                    "{target}.{name} = {source}.{name} ? {child}.from({source}.{name}) : null;"
                )
            } else {
                format!(
                    "if ({source}.{name}) {{ {target}.{name} = {child}.from({source}.{name}); }}"
                )
            }
        }
        shape => match ts_default(shape, member.nullable) {
            Some(default) => format!("{target}.{name} = {source}.{name} ?? {default};"),
            None => format!("{target}.{name} = {source}.{name}!;"),
        },
    }
}
