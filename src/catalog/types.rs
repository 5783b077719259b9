use std::fmt;

/// Shape of a member's value, parsed from the metadata document.
///
/// The shape drives every synthesis decision downstream: default-value
/// expressions, copy statements, equality form, and client type mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueShape {
    /// Text value (`string`).
    Text,
    /// Value-shaped scalar (`int`, `long`, `bool`, `decimal`, `double`,
    /// `date`, `guid`, `binary`).
    Scalar(String),
    /// Named enumeration declared in the same module.
    Enum(String),
    /// Single entity-shaped value referencing another catalog type.
    Entity(String),
    /// Collection of an element shape (`list<...>`).
    Collection(Box<ValueShape>),
}

const SCALAR_NAMES: &[&str] = &[
    "int", "long", "short", "byte", "bool", "decimal", "double", "float", "date", "time", "guid",
    "binary",
];

impl ValueShape {
    /// Parse a compact shape expression from the metadata document.
    ///
    /// Grammar: `string`, a scalar keyword, `enum<Name>`, `list<shape>`,
    /// or a bare name which is taken to be entity-shaped. Unknown input
    /// never fails; a bare name is the total fallback.
    pub fn parse(expr: &str) -> ValueShape {
        let expr = expr.trim();
        if expr == "string" {
            return ValueShape::Text;
        }
        if SCALAR_NAMES.contains(&expr) {
            return ValueShape::Scalar(expr.to_string());
        }
        if let Some(inner) = expr.strip_prefix("list<").and_then(|s| s.strip_suffix('>')) {
            return ValueShape::Collection(Box::new(ValueShape::parse(inner)));
        }
        if let Some(inner) = expr.strip_prefix("enum<").and_then(|s| s.strip_suffix('>')) {
            return ValueShape::Enum(inner.trim().to_string());
        }
        ValueShape::Entity(expr.to_string())
    }

    /// True for text and scalar shapes, which copy and compare by value.
    pub fn is_value_shaped(&self) -> bool {
        matches!(self, ValueShape::Text | ValueShape::Scalar(_) | ValueShape::Enum(_))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ValueShape::Collection(_))
    }

    pub fn is_entity(&self) -> bool {
        matches!(self, ValueShape::Entity(_))
    }

    /// Element shape for collections, `None` otherwise.
    pub fn element(&self) -> Option<&ValueShape> {
        match self {
            ValueShape::Collection(inner) => Some(inner),
            _ => None,
        }
    }

    /// The referenced type name for entity and enum shapes.
    pub fn referenced_type(&self) -> Option<&str> {
        match self {
            ValueShape::Enum(name) | ValueShape::Entity(name) => Some(name),
            ValueShape::Collection(inner) => inner.referenced_type(),
            _ => None,
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Text => write!(f, "string"),
            ValueShape::Scalar(name) => write!(f, "{name}"),
            ValueShape::Enum(name) => write!(f, "enum<{name}>"),
            ValueShape::Entity(name) => write!(f, "{name}"),
            ValueShape::Collection(inner) => write!(f, "list<{inner}>"),
        }
    }
}

/// Immutable property-like member of a catalog type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Member name as declared (`Id`, `Name`, `Orders`).
    pub name: String,
    /// Value shape of the member.
    pub shape: ValueShape,
    /// Whether the member admits an absent value.
    pub nullable: bool,
    /// Whether the member exposes a getter.
    pub readable: bool,
    /// Whether the member exposes a setter.
    pub writable: bool,
    /// Name of the type declaring this member.
    pub declaring_type: String,
}

impl MemberDescriptor {
    /// Scoped name used for settings lookups (`Customer.Orders`).
    pub fn scoped_name(&self) -> String {
        format!("{}.{}", self.declaring_type, self.name)
    }
}

/// Immutable handle over one type from the compiled-module metadata.
///
/// Sourced once per run; classification and naming derive from this data
/// alone, never from generation order or prior output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Simple type name (`Customer`).
    pub name: String,
    /// Declaring namespace (`Acme.Domain.Entities.Sales`).
    pub namespace: String,
    /// Property-like members in declaration order.
    pub members: Vec<MemberDescriptor>,
    /// Base type name, if any.
    pub base_type: Option<String>,
    /// Whether the type is exported from the module.
    pub exported: bool,
    /// Whether the type is abstract.
    pub is_abstract: bool,
    /// Whether the type is nested inside another type.
    pub is_nested: bool,
    /// Generic argument names, empty for non-generic types.
    pub generic_args: Vec<String>,
}

impl TypeDescriptor {
    /// Full type name: namespace plus simple name.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Namespace split into its segments.
    pub fn namespace_segments(&self) -> Vec<&str> {
        self.namespace.split('.').filter(|s| !s.is_empty()).collect()
    }

    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Enumeration declared by the module, mirrored into client layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    pub namespace: String,
    /// Variant names in declaration order.
    pub values: Vec<String>,
}
