use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::config::GameConfig;

/// Opaque reference to a visual asset (sprite path / atlas key). The core never
/// interprets it; it is handed through to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRef(pub String);

impl VisualRef {
    pub fn new(asset: impl Into<String>) -> Self {
        Self(asset.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Immutable element kind. Equality is by id only; the sprite is payload.
#[derive(Debug, Clone)]
pub struct ElementType {
    pub id: String,
    pub sprite: VisualRef,
}

impl ElementType {
    pub fn new(id: impl Into<String>, sprite: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sprite: VisualRef::new(sprite),
        }
    }
}

impl PartialEq for ElementType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ElementType {}

/// Process-unique identity of one placed/draggable element instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

impl ElementId {
    pub fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Read-only lookup from element-type id to its full definition. Built once
/// from configuration; backs persistence type resolution.
#[derive(Debug, Default, Clone)]
pub struct ElementCatalog {
    types: Vec<ElementType>,
}

impl ElementCatalog {
    pub fn new(types: Vec<ElementType>) -> Self {
        Self { types }
    }

    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            types: cfg
                .element_types
                .iter()
                .map(|t| ElementType::new(t.id.clone(), t.sprite.clone()))
                .collect(),
        }
    }

    pub fn resolve(&self, id: &str) -> Option<&ElementType> {
        self.types.iter().find(|t| t.id == id)
    }

    pub fn types(&self) -> &[ElementType] {
        &self.types
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_type_equality_is_by_id() {
        let a = ElementType::new("Red", "sprites/cube_red.png");
        let b = ElementType::new("Red", "sprites/other.png");
        let c = ElementType::new("Blue", "sprites/cube_red.png");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn catalog_resolves_known_ids_only() {
        let catalog = ElementCatalog::new(vec![
            ElementType::new("Red", "r.png"),
            ElementType::new("Blue", "b.png"),
        ]);
        assert_eq!(catalog.resolve("Blue").map(|t| t.sprite.as_str()), Some("b.png"));
        assert!(catalog.resolve("Green").is_none());
    }

    #[test]
    fn element_ids_are_unique() {
        let a = ElementId::next();
        let b = ElementId::next();
        assert_ne!(a, b);
    }
}
