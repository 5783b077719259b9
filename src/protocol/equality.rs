use crate::catalog::{MemberDescriptor, TypeDescriptor, ValueShape};
use crate::settings::{SettingsStore, UnitKind};

use super::copy::is_copyable;

/// The fixed version-identity set: two instances are the same revision of
/// the same row exactly when these members agree.
pub const VERSION_IDENTITY_MEMBERS: &[&str] = &["Id", "RowVersion"];

fn compares_by_value(member: &MemberDescriptor) -> bool {
    match &member.shape {
        ValueShape::Text | ValueShape::Enum(_) => true,
        ValueShape::Scalar(name) => name != "binary",
        _ => false,
    }
}

/// Synthesize the `Equals` override comparing version-identity members.
/// Returns an empty block when the type carries none of them.
pub fn equality_lines(ty: &TypeDescriptor) -> Vec<String> {
    let identity: Vec<&MemberDescriptor> = ty
        .members
        .iter()
        .filter(|m| VERSION_IDENTITY_MEMBERS.contains(&m.name.as_str()))
        .collect();
    if identity.is_empty() {
        return Vec::new();
    }
    let name = &ty.name;
    let comparisons: Vec<String> = identity
        .iter()
        .map(|m| {
            if compares_by_value(m) {
                format!("{0} == other.{0}", m.name)
            } else {
                format!("DeepEquality.Equals({0}, other.{0})", m.name)
            }
        })
        .collect();
    let mut lines = Vec::new();
    lines.push("public override bool Equals(object obj)".to_string());
    lines.push("{".to_string());
    lines.push(format!("    if (obj is not {name} other)"));
    lines.push("    {".to_string());
    lines.push("        return false;".to_string());
    lines.push("    }".to_string());
    lines.push(format!("    return {};", comparisons.join(" && ")));
    lines.push("}".to_string());
    lines
}

/// Synthesize the `GetHashCode` override combining every copyable member
/// through the shared N-ary combinator, falling back to the inherited
/// hash when none qualify.
pub fn hash_lines(ty: &TypeDescriptor, unit: UnitKind, settings: &SettingsStore) -> Vec<String> {
    let members: Vec<&MemberDescriptor> = ty
        .members
        .iter()
        .filter(|m| is_copyable(m, unit, settings))
        .collect();
    let mut lines = Vec::new();
    lines.push("public override int GetHashCode()".to_string());
    lines.push("{".to_string());
    if members.is_empty() {
        lines.push("    return base.GetHashCode();".to_string());
    } else if members.len() <= 8 {
        let args: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        lines.push(format!("    return HashCode.Combine({});", args.join(", ")));
    } else {
        lines.push("    var hash = new HashCode();".to_string());
        for member in &members {
            lines.push(format!("    hash.Add({});", member.name));
        }
        lines.push("    return hash.ToHashCode();".to_string());
    }
    lines.push("}".to_string());
    lines
}
