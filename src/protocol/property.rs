use crate::catalog::MemberDescriptor;
use crate::naming::{lower_first, PropertyForm};

use super::{cs_default, cs_type, ts_default, ts_type, TargetLang};

/// Synthesize one property block in the form the layer policy selects.
pub fn property_lines(
    member: &MemberDescriptor,
    lang: TargetLang,
    form: PropertyForm,
) -> Vec<String> {
    match form {
        PropertyForm::Plain => plain_property_lines(member, lang),
        PropertyForm::Notifying => notifying_property_lines(member, lang),
    }
}

/// Plain accessor with an optional default-value expression.
pub fn plain_property_lines(member: &MemberDescriptor, lang: TargetLang) -> Vec<String> {
    match lang {
        TargetLang::CSharp => plain_cs(member),
        TargetLang::TypeScript => plain_ts(member),
    }
}

fn plain_cs(member: &MemberDescriptor) -> Vec<String> {
    let ty = cs_type(&member.shape, member.nullable);
    let accessors = if member.writable { "{ get; set; }" } else { "{ get; private set; }" };
    match cs_default(&member.shape, member.nullable) {
        Some(default) => vec![format!(
            "public {ty} {} {accessors} = {default};",
            member.name
        )],
        None => vec![format!("public {ty} {} {accessors}", member.name)],
    }
}

fn plain_ts(member: &MemberDescriptor) -> Vec<String> {
    let name = lower_first(&member.name);
    let ty = ts_type(&member.shape, member.nullable);
    match ts_default(&member.shape, member.nullable) {
        Some(default) => vec![format!("{name}: {ty} = {default};")],
        None => vec![format!("{name}!: {ty};")],
    }
}

/// Change-notifying accessor: backing field, three extension seams
/// (on-read; on-pre-change, which may veto or replace the incoming value;
/// on-post-change), and a change notification on effective writes.
pub fn notifying_property_lines(member: &MemberDescriptor, lang: TargetLang) -> Vec<String> {
    match lang {
        TargetLang::CSharp => notifying_cs(member),
        TargetLang::TypeScript => notifying_ts(member),
    }
}

fn notifying_cs(member: &MemberDescriptor) -> Vec<String> {
    let ty = cs_type(&member.shape, member.nullable);
    let name = &member.name;
    let field = format!("_{}", lower_first(name));
    let mut lines = Vec::new();
    match cs_default(&member.shape, member.nullable) {
        Some(default) => lines.push(format!("private {ty} {field} = {default};")),
        None => lines.push(format!("private {ty} {field};")),
    }
    lines.push(String::new());
    lines.push(format!("public {ty} {name}"));
    lines.push("{".to_string());
    lines.push("    get".to_string());
    lines.push("    {".to_string());
    lines.push(format!("        On{name}Read();"));
    lines.push(format!("        return {field};"));
    lines.push("    }".to_string());
    if member.writable {
        lines.push("    set".to_string());
        lines.push("    {".to_string());
        lines.push("        var incoming = value;".to_string());
        lines.push("        var cancel = false;".to_string());
        lines.push(format!("        On{name}Changing(ref incoming, ref cancel);"));
        lines.push(format!("        if (cancel || Equals({field}, incoming))"));
        lines.push("        {".to_string());
        lines.push("            return;".to_string());
        lines.push("        }".to_string());
        lines.push(format!("        {field} = incoming;"));
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
    lines
}

fn notifying_ts(member: &MemberDescriptor) -> Vec<String> {
    let name = lower_first(&member.name);
    let ty = ts_type(&member.shape, member.nullable);
    let field = format!("_{name}");
    let mut lines = Vec::new();
    match ts_default(&member.shape, member.nullable) {
        Some(default) => lines.push(format!("private {field}: {ty} = {default};")),
        None => lines.push(format!("private {field}!: {ty};")),
    }
    lines.push(String::new());
    lines.push(format!("get {name}(): {ty} {{"));
    lines.push(format!("    this.onRead('{name}');"));
    lines.push(format!("    return this.{field};"));
    lines.push("}".to_string());
    if member.writable {
        lines.push(String::new());
        lines.push(format!("set {name}(value: {ty}) {{"));
        // onChanging may veto (undefined) or substitute the incoming value.
        lines.push(format!("    const incoming = this.onChanging('{name}', value);"));
        lines.push(format!(
            "    if (incoming === undefined || incoming === this.{field}) {{"
        ));
        lines.push("        return;".to_string());
        lines.push("    }".to_string());
        lines.push(format!("    this.{field} = incoming;"));
        lines.push(format!("    this.notify('{name}');"));
        lines.push(format!("    this.onChanged('{name}');"));
        lines.push("}".to_string());
    }
    lines
}
