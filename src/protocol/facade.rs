use crate::catalog::{MemberDescriptor, ValueShape};
use crate::naming::artifact_name;
use crate::settings::{ItemKind, SettingsStore, UnitKind};

use super::cs_type;

/// Delegate member a facade accessor forwards to: same-named by default,
/// or explicitly paired through the `DelegateMember` setting.
pub fn facade_target_member(member: &MemberDescriptor, settings: &SettingsStore) -> String {
    settings
        .query(
            UnitKind::Facade,
            ItemKind::Property,
            &member.scoped_name(),
            "DelegateMember",
            &member.name,
        )
        .to_string()
}

/// Synthesize one delegate-forwarding accessor for a facade.
///
/// Value-shaped members forward read/write with the change-notifying
/// seams. Entity-shaped and collection-shaped members are projected to
/// their facade counterparts lazily, at access time - the facade never
/// copies the underlying graph.
pub fn facade_member_lines(member: &MemberDescriptor, settings: &SettingsStore) -> Vec<String> {
    let name = &member.name;
    let target = facade_target_member(member, settings);
    let mut lines = Vec::new();
    match &member.shape {
        ValueShape::Collection(element) => {
            lines.push(format!("public IEnumerable<{}> {name}", projected_type(element)));
            lines.push("{".to_string());
            lines.push("    get".to_string());
            lines.push("    {".to_string());
            lines.push(format!("        On{name}Read();"));
            lines.push(format!("        return {}", projected_collection(element, &target)));
            lines.push("    }".to_string());
            lines.push("}".to_string());
            lines.push(String::new());
            lines.push(format!("partial void On{name}Read();"));
        }
        ValueShape::Entity(child) => {
            let facade = artifact_name(child, ItemKind::Facade);
            lines.push(format!("public {facade} {name}"));
            lines.push("{".to_string());
            lines.push("    get".to_string());
            lines.push("    {".to_string());
            lines.push(format!("        On{name}Read();"));
            lines.push(format!(
                "        return _inner.{target} == null ? null : new {facade}(_inner.{target});"
            ));
            lines.push("    }".to_string());
            lines.push("}".to_string());
            lines.push(String::new());
            lines.push(format!("partial void On{name}Read();"));
        }
        shape => {
            let ty = cs_type(shape, member.nullable);
            lines.push(format!("public {ty} {name}"));
            lines.push("{".to_string());
            lines.push("    get".to_string());
            lines.push("    {".to_string());
            lines.push(format!("        On{name}Read();"));
            lines.push(format!("        return _inner.{target};"));
            lines.push("    }".to_string());
            if member.writable {
                lines.push("    set".to_string());
                lines.push("    {".to_string());
                lines.push("        var incoming = value;".to_string());
                lines.push("        var cancel = false;".to_string());
                lines.push(format!("        On{name}Changing(ref incoming, ref cancel);"));
                lines.push(format!("        if (cancel || Equals(_inner.{target}, incoming))"));
                lines.push("        {".to_string());
                lines.push("            return;".to_string());
                lines.push("        }".to_string());
                lines.push(format!("        _inner.{target} = incoming;"));
                lines.push(format!("        RaisePropertyChanged(nameof({name}));"));
                lines.push(format!("        On{name}Changed();"));
                lines.push("    }".to_string());
            }
            lines.push("}".to_string());
            lines.push(String::new());
            lines.push(format!("partial void On{name}Read();"));
            if member.writable {
                lines.push(format!(
                    "partial void On{name}Changing(ref {ty} value, ref bool cancel);"
                ));
                lines.push(format!("partial void On{name}Changed();"));
            }
        }
    }
    lines
}

fn projected_type(element: &ValueShape) -> String {
    match element {
        ValueShape::Entity(child) => artifact_name(child, ItemKind::Facade),
        other => cs_type(other, false),
    }
}

fn projected_collection(element: &ValueShape, target: &str) -> String {
    match element {
        ValueShape::Entity(child) => {
            let facade = artifact_name(child, ItemKind::Facade);
            format!("_inner.{target}?.Select(item => new {facade}(item));")
        }
        _ => format!("_inner.{target};"),
    }
}
