use crate::catalog::TypeDescriptor;
use crate::settings::{SettingsStore, UnitKind};

use super::copy::{copy_statements, ts_copy_statements};
use super::indent_block;

/// Synthesize the C# factory family for a generated class: a static
/// "create empty", a "create by copying an arbitrary compatible object",
/// and a typed overload performing property-wise copy from `source_type`.
/// All three are bracketed by the pre/post creation seams. `class_name`
/// is the generated artifact's own class (which may differ from the
/// descriptor name, e.g. edit-models), `ty` supplies the members.
pub fn factory_lines(
    class_name: &str,
    ty: &TypeDescriptor,
    unit: UnitKind,
    settings: &SettingsStore,
    source_type: &str,
) -> Vec<String> {
    let name = class_name;
    let mut lines = Vec::new();

    lines.push(format!("public static {name} CreateNew()"));
    lines.push("{".to_string());
    lines.push("    OnCreating();".to_string());
    lines.push(format!("    var target = new {name}();"));
    lines.push("    OnCreated(target);".to_string());
    lines.push("    return target;".to_string());
    lines.push("}".to_string());
    lines.push(String::new());

    lines.push(format!("public static {name} CreateFrom(object source)"));
    lines.push("{".to_string());
    lines.push(format!("    if (source is {source_type} typed)"));
    lines.push("    {".to_string());
    lines.push("        return CreateFrom(typed);".to_string());
    lines.push("    }".to_string());
    lines.push("    OnCreating();".to_string());
    lines.push(format!("    var target = new {name}();"));
    lines.push("    ModelMapper.CopyMatching(source, target);".to_string());
    lines.push("    OnCreated(target);".to_string());
    lines.push("    return target;".to_string());
    lines.push("}".to_string());
    lines.push(String::new());

    lines.push(format!("public static {name} CreateFrom({source_type} source)"));
    lines.push("{".to_string());
    lines.push("    OnCreating();".to_string());
    lines.push(format!("    var target = new {name}();"));
    lines.extend(indent_block(
        copy_statements(ty, unit, settings, "source", "target"),
        1,
    ));
    lines.push("    OnCreated(target);".to_string());
    lines.push("    return target;".to_string());
    lines.push("}".to_string());
    lines.push(String::new());

    lines.push("static partial void OnCreating();".to_string());
    lines.push(format!("static partial void OnCreated({name} target);"));
    lines
}

/// TypeScript factory: `empty()` plus `from(source)` performing the same
/// property-wise copy the C# overload does.
pub fn ts_factory_lines(
    ty: &TypeDescriptor,
    unit: UnitKind,
    settings: &SettingsStore,
    contract: &str,
) -> Vec<String> {
    let name = &ty.name;
    let mut lines = Vec::new();
    lines.push(format!("static empty(): {name} {{"));
    lines.push(format!("    return new {name}();"));
    lines.push("}".to_string());
    lines.push(String::new());
    lines.push(format!("static from(source: Partial<{contract}>): {name} {{"));
    lines.push(format!("    const target = new {name}();"));
    lines.extend(indent_block(
        ts_copy_statements(ty, unit, settings, "source", "target"),
        1,
    ));
    lines.push("    return target;".to_string());
    lines.push("}".to_string());
    lines
}
