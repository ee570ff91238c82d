use tracing::{debug, info};

use crate::core::element::{ElementCatalog, ElementId, ElementType};
use crate::zones::{ContainerId, ElementOrigin};

/// One undropped element waiting in the pick tray.
#[derive(Debug, Clone, PartialEq)]
pub struct TrayElement {
    pub id: ElementId,
    pub element_type: ElementType,
}

/// Source container for fresh elements. Seeded from configuration; the scroll
/// widget presenting it lives outside the core.
#[derive(Debug)]
pub struct TrayModel {
    id: ContainerId,
    elements: Vec<TrayElement>,
}

impl TrayModel {
    pub fn new() -> Self {
        Self {
            id: ContainerId::next(),
            elements: Vec::new(),
        }
    }

    /// Splits `bottom_cube_count` evenly across the catalog's types, handing
    /// the remainder to the earliest types.
    pub fn initialize_from_catalog(&mut self, catalog: &ElementCatalog, bottom_cube_count: usize) {
        self.elements.clear();
        let types = catalog.types();
        if types.is_empty() || bottom_cube_count == 0 {
            return;
        }
        let per_type = bottom_cube_count / types.len();
        let remainder = bottom_cube_count % types.len();
        for (i, element_type) in types.iter().enumerate() {
            let count = per_type + usize::from(i < remainder);
            for _ in 0..count {
                self.elements.push(TrayElement {
                    id: ElementId::next(),
                    element_type: element_type.clone(),
                });
            }
        }
        info!(
            target: "tray",
            "seeded {} element(s) across {} type(s)",
            self.elements.len(),
            types.len()
        );
    }

    pub fn elements(&self) -> &[TrayElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn first(&self) -> Option<&TrayElement> {
        self.elements.first()
    }

    pub fn first_of_type(&self, type_id: &str) -> Option<&TrayElement> {
        self.elements.iter().find(|e| e.element_type.id == type_id)
    }
}

impl ElementOrigin for TrayModel {
    fn container_id(&self) -> ContainerId {
        self.id
    }

    fn remove_element(&mut self, id: ElementId) {
        match self.elements.iter().position(|e| e.id == id) {
            Some(index) => {
                self.elements.remove(index);
            }
            None => debug!(target: "tray", "remove request for unknown element {id:?}; ignoring"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(ids: &[&str]) -> ElementCatalog {
        ElementCatalog::new(
            ids.iter()
                .map(|id| ElementType::new(*id, format!("{id}.png")))
                .collect(),
        )
    }

    fn count_of(tray: &TrayModel, id: &str) -> usize {
        tray.elements()
            .iter()
            .filter(|e| e.element_type.id == id)
            .count()
    }

    #[test]
    fn even_split_across_types() {
        let mut tray = TrayModel::new();
        tray.initialize_from_catalog(&catalog(&["Red", "Blue"]), 4);
        assert_eq!(tray.len(), 4);
        assert_eq!(count_of(&tray, "Red"), 2);
        assert_eq!(count_of(&tray, "Blue"), 2);
    }

    #[test]
    fn remainder_goes_to_the_earliest_types() {
        let mut tray = TrayModel::new();
        tray.initialize_from_catalog(&catalog(&["Red", "Green", "Blue"]), 5);
        assert_eq!(count_of(&tray, "Red"), 2);
        assert_eq!(count_of(&tray, "Green"), 2);
        assert_eq!(count_of(&tray, "Blue"), 1);
    }

    #[test]
    fn empty_catalog_or_zero_count_seeds_nothing() {
        let mut tray = TrayModel::new();
        tray.initialize_from_catalog(&catalog(&[]), 10);
        assert!(tray.is_empty());
        tray.initialize_from_catalog(&catalog(&["Red"]), 0);
        assert!(tray.is_empty());
    }

    #[test]
    fn removal_is_by_identity_and_idempotent() {
        let mut tray = TrayModel::new();
        tray.initialize_from_catalog(&catalog(&["Red"]), 2);
        let id = tray.first().unwrap().id;
        tray.remove_element(id);
        assert_eq!(tray.len(), 1);
        tray.remove_element(id);
        assert_eq!(tray.len(), 1);
    }
}
