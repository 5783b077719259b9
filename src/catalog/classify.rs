use super::types::TypeDescriptor;

/// Classification of a catalog type, determined purely by name and
/// namespace convention. Every type is exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Persisted business-object shape under the entities namespace.
    Entity,
    /// Non-persisted, API-facing shape under the service-models namespace.
    Service,
    /// Everything else; produces no artifacts.
    Excluded,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Classification::Entity => "Entity",
            Classification::Service => "Service",
            Classification::Excluded => "Excluded",
        };
        write!(f, "{s}")
    }
}

/// Reserved namespace segment marking entity types.
pub const ENTITIES_SEGMENT: &str = "Entities";

/// Reserved namespace segment marking service-model types.
pub const SERVICE_MODELS_SEGMENT: &str = "ServiceModels";

/// Framework marker base type that is itself never generated for.
const ENTITY_MARKER: &str = "EntityBase";

/// Service-namespace marker names that are plumbing, not view models.
const SERVICE_MARKERS: &[&str] = &["ServiceModelBase", "PagedResult"];

/// Fixed exclusion suffixes matched against the full type name.
///
/// Infrastructure shapes (accounts, access rules, action logs, revision
/// history) live under the entities namespace but are handled by hand-
/// written code, so the generator never touches them.
const EXCLUSION_SUFFIXES: &[&str] = &["Account", "AccessRule", "ActionLog", "Revision.History"];

/// Classify a type descriptor.
///
/// Referentially transparent over the descriptor: settings never influence
/// classification, only whether a classified type actually generates.
pub fn classify(ty: &TypeDescriptor) -> Classification {
    let segments = ty.namespace_segments();
    if segments.iter().any(|s| *s == ENTITIES_SEGMENT) {
        if ty.name == ENTITY_MARKER {
            return Classification::Excluded;
        }
        let full = ty.full_name();
        if EXCLUSION_SUFFIXES.iter().any(|suffix| full.ends_with(suffix)) {
            return Classification::Excluded;
        }
        return Classification::Entity;
    }
    if segments.iter().any(|s| *s == SERVICE_MODELS_SEGMENT) {
        if SERVICE_MARKERS.contains(&ty.name.as_str()) {
            return Classification::Excluded;
        }
        return Classification::Service;
    }
    Classification::Excluded
}
