//! # Generator Protocol
//!
//! The shared synthesis algorithms every layer composes: property
//! accessors, constructor/factory pairs, property-wise copy, equality and
//! hash, and delegate-forwarding accessors. Each function is pure over
//! (descriptors, layer convention, settings) and returns an ordered block
//! of lines at indent level zero relative to the enclosing class body -
//! recipes indent blocks to their slot with [`indent_block`].
//!
//! Layers select *forms* (plain vs. change-notifying properties,
//! eager-copy vs. lazy-delegate projection); the algorithms themselves are
//! identical across layers, which is what keeps the generated families
//! structurally consistent.

mod copy;
mod equality;
mod facade;
mod factory;
mod property;

#[cfg(test)]
mod tests;

pub use copy::{copy_statement, copy_statements, is_copyable, ts_copy_statements, BOOKKEEPING_MEMBERS};
pub use equality::{equality_lines, hash_lines, VERSION_IDENTITY_MEMBERS};
pub use facade::{facade_member_lines, facade_target_member};
pub use factory::{factory_lines, ts_factory_lines};
pub use property::{notifying_property_lines, plain_property_lines, property_lines};

use crate::catalog::ValueShape;
use crate::naming::LayerConvention;

/// Output language of a layer, derived from its convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLang {
    CSharp,
    TypeScript,
}

impl TargetLang {
    pub fn of(conv: &LayerConvention) -> TargetLang {
        if conv.extension == "ts" {
            TargetLang::TypeScript
        } else {
            TargetLang::CSharp
        }
    }
}

/// C# type expression for a value shape.
pub fn cs_type(shape: &ValueShape, nullable: bool) -> String {
    let base = match shape {
        ValueShape::Text => "string".to_string(),
        ValueShape::Scalar(name) => match name.as_str() {
            "date" => "DateTime".to_string(),
            "time" => "TimeSpan".to_string(),
            "guid" => "Guid".to_string(),
            "binary" => "byte[]".to_string(),
            other => other.to_string(),
        },
        ValueShape::Enum(name) | ValueShape::Entity(name) => name.clone(),
        ValueShape::Collection(inner) => format!("List<{}>", cs_type(inner, false)),
    };
    // Only value types take the nullable annotation; reference shapes are
    // nullable by omission of a default.
    let value_type = matches!(shape, ValueShape::Scalar(s) if s != "binary")
        || matches!(shape, ValueShape::Enum(_));
    if nullable && value_type {
        format!("{base}?")
    } else {
        base
    }
}

/// TypeScript type expression for a value shape.
pub fn ts_type(shape: &ValueShape, nullable: bool) -> String {
    let base = match shape {
        ValueShape::Text => "string".to_string(),
        ValueShape::Scalar(name) => match name.as_str() {
            "bool" => "boolean".to_string(),
            "date" | "time" | "guid" | "binary" => "string".to_string(),
            _ => "number".to_string(),
        },
        ValueShape::Enum(name) | ValueShape::Entity(name) => name.clone(),
        ValueShape::Collection(inner) => format!("{}[]", ts_type(inner, false)),
    };
    if nullable {
        format!("{base} | null")
    } else {
        base
    }
}

/// Default-value expression for a C# accessor: empty string for text,
/// empty collection for non-nullable collections, nothing otherwise.
pub fn cs_default(shape: &ValueShape, nullable: bool) -> Option<String> {
    if nullable {
        return None;
    }
    match shape {
        ValueShape::Text => Some("string.Empty".to_string()),
        ValueShape::Collection(inner) => Some(format!("new List<{}>()", cs_type(inner, false))),
        _ => None,
    }
}

/// Default-value expression for a TypeScript class field, or `None` when
/// the field takes a definite-assignment marker instead.
pub fn ts_default(shape: &ValueShape, nullable: bool) -> Option<String> {
    if nullable {
        return Some("null".to_string());
    }
    match shape {
        ValueShape::Text => Some("''".to_string()),
        ValueShape::Scalar(name) => Some(match name.as_str() {
            "bool" => "false".to_string(),
            "date" | "time" | "guid" | "binary" => "''".to_string(),
            _ => "0".to_string(),
        }),
        ValueShape::Collection(_) => Some("[]".to_string()),
        // Enums and entities have no universal literal; the field is
        // declared definitely-assigned and populated by the factory.
        ValueShape::Enum(_) | ValueShape::Entity(_) => None,
    }
}

const INDENT: &str = "    ";

/// Prefix every non-empty line with `level` indentation steps.
pub fn indent_block(lines: impl IntoIterator<Item = String>, level: usize) -> Vec<String> {
    let prefix = INDENT.repeat(level);
    lines
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}
