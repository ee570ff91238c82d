use glam::{Vec2, Vec3};
use rand::Rng;
use thiserror::Error;
use tracing::warn;

use crate::core::element::{ElementCatalog, ElementId, ElementType};
use crate::services::save_load::{SavedElement, TowerRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TowerError {
    #[error("element index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One placed element instance. `index` mirrors its array position and is
/// renumbered by the owning model after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct TowerElement {
    pub id: ElementId,
    pub element_type: ElementType,
    pub horizontal_offset: f32,
    pub index: usize,
    pub height: f32,
}

impl TowerElement {
    /// New element with lateral jitter sampled uniformly within ± half the
    /// rendered width.
    pub fn new(element_type: ElementType, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let max_offset = width * 0.5;
        let horizontal_offset = if max_offset > 0.0 {
            rng.gen_range(-max_offset..=max_offset)
        } else {
            0.0
        };
        Self::with_offset_and_height(element_type, horizontal_offset, height)
    }

    /// Deterministic construction (restore from a record, tests).
    pub fn with_offset(element_type: ElementType, horizontal_offset: f32, height: f32) -> Self {
        Self::with_offset_and_height(element_type, horizontal_offset, height)
    }

    fn with_offset_and_height(element_type: ElementType, horizontal_offset: f32, height: f32) -> Self {
        Self {
            id: ElementId::next(),
            element_type,
            horizontal_offset,
            index: 0,
            height,
        }
    }
}

/// Ordered stack of placed elements, bottom to top, with position and height
/// bookkeeping. Owned exclusively by its tower zone.
#[derive(Debug, Default)]
pub struct TowerModel {
    elements: Vec<TowerElement>,
    base_position: Option<Vec2>,
}

impl TowerModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[TowerElement] {
        &self.elements
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Anchor of the bottommost slot. Unset while the tower is empty; the
    /// first accepted drop fixes it.
    pub fn base_position(&self) -> Option<Vec2> {
        self.base_position
    }

    pub fn set_base_position(&mut self, position: Vec2) {
        self.base_position = Some(position);
    }

    pub fn current_height(&self) -> f32 {
        self.elements.iter().map(|e| e.height).sum()
    }

    pub fn add_element(&mut self, mut element: TowerElement) {
        element.index = self.elements.len();
        self.elements.push(element);
    }

    /// Removes the element at `index` and renumbers everything above it.
    /// Removal down to empty clears the base anchor.
    pub fn remove_at(&mut self, index: usize) -> Result<TowerElement, TowerError> {
        if index >= self.elements.len() {
            return Err(TowerError::IndexOutOfRange {
                index,
                len: self.elements.len(),
            });
        }
        let removed = self.elements.remove(index);
        for (i, e) in self.elements.iter_mut().enumerate().skip(index) {
            e.index = i;
        }
        if self.elements.is_empty() {
            self.base_position = None;
        }
        Ok(removed)
    }

    /// Placement point of the slot at `index`. `pivot_y` selects the anchor
    /// within the slot: 0.0 bottom, 0.5 center, 1.0 top.
    pub fn get_element_position(&self, index: usize, pivot_y: f32) -> Option<Vec3> {
        let base = self.base_position?;
        let element = self.elements.get(index)?;
        let below: f32 = self.elements[..index].iter().map(|e| e.height).sum();
        Some(Vec3::new(
            base.x + element.horizontal_offset,
            base.y + below + element.height * pivot_y,
            0.0,
        ))
    }

    /// Position of the topmost slot, or the bare anchor while empty.
    pub fn top_position(&self, pivot_y: f32) -> Option<Vec3> {
        if self.elements.is_empty() {
            return self.base_position.map(|b| b.extend(0.0));
        }
        self.get_element_position(self.elements.len() - 1, pivot_y)
    }

    /// Height-budget gate. An empty tower always accepts; afterwards the
    /// remaining headroom must cover the new element.
    pub fn can_accept(&self, new_height: f32, available_height: f32) -> bool {
        if self.elements.is_empty() {
            return true;
        }
        (available_height - self.current_height()) >= new_height
    }

    pub fn reset(&mut self) {
        self.elements.clear();
        self.base_position = None;
    }

    pub fn to_record(&self) -> TowerRecord {
        TowerRecord {
            elements: self
                .elements
                .iter()
                .map(|e| SavedElement {
                    element_type_id: e.element_type.id.clone(),
                    horizontal_offset: e.horizontal_offset,
                    index: e.index,
                    element_height: e.height,
                })
                .collect(),
            base_position: self.base_position.unwrap_or(Vec2::ZERO).into(),
        }
    }

    /// Replaces the whole sequence from a record. Elements whose type id is
    /// not in the catalog are skipped with a warning; the survivors are
    /// renumbered densely so the index invariant holds even after skips.
    pub fn load_from_record(&mut self, record: &TowerRecord, catalog: &ElementCatalog) {
        self.elements.clear();
        for saved in &record.elements {
            let Some(element_type) = catalog.resolve(&saved.element_type_id) else {
                warn!(
                    target: "tower",
                    "element type '{}' not in catalog; skipping saved element",
                    saved.element_type_id
                );
                continue;
            };
            self.elements.push(TowerElement::with_offset(
                element_type.clone(),
                saved.horizontal_offset,
                saved.element_height,
            ));
        }
        for (i, e) in self.elements.iter_mut().enumerate() {
            e.index = i;
        }
        self.base_position = if self.elements.is_empty() {
            None
        } else {
            Some(record.base_position.to_vec2())
        };
    }
}
