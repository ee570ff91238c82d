pub mod model;

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use crate::core::element::{ElementCatalog, ElementId};
use crate::core::geometry::Rect;
use crate::interaction::drag::DragCandidate;
use crate::services::notifications::{NotificationKey, Notifications};
use crate::services::pool::VisualPool;
use crate::services::presenter::{Presenter, ViewId};
use crate::zones::rules::DropRule;
use crate::zones::{ContainerId, DropZone, ElementOrigin};

use model::{TowerElement, TowerModel};

/// Slot pivot used for every element visual. Views are center-anchored.
const ELEMENT_PIVOT_Y: f32 = 0.5;

/// Pairing of a placed element with its acquired visual; `size` is the
/// rendered bounds captured at acquisition time.
#[derive(Debug, Clone, Copy)]
struct ActiveView {
    element: ElementId,
    view: ViewId,
    size: Vec2,
}

/// The stack zone: hit-testing, drop acceptance with positional side effects,
/// and collapse re-layout on removal. Owns the `TowerModel` exclusively.
pub struct TowerZone {
    id: ContainerId,
    rect: Rect,
    model: TowerModel,
    active: Vec<ActiveView>,
    rules: Vec<Box<dyn DropRule>>,
    pool: Rc<RefCell<dyn VisualPool>>,
    presenter: Rc<dyn Presenter>,
    notifications: Rc<dyn Notifications>,
    collapse_duration: f32,
    rng: StdRng,
}

impl TowerZone {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rect: Rect,
        rules: Vec<Box<dyn DropRule>>,
        pool: Rc<RefCell<dyn VisualPool>>,
        presenter: Rc<dyn Presenter>,
        notifications: Rc<dyn Notifications>,
        collapse_duration: f32,
        rng: StdRng,
    ) -> Self {
        Self {
            id: ContainerId::next(),
            rect,
            model: TowerModel::new(),
            active: Vec::new(),
            rules,
            pool,
            presenter,
            notifications,
            collapse_duration,
            rng,
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn model(&self) -> &TowerModel {
        &self.model
    }

    /// Element id of the slot at `index`, if occupied.
    pub fn element_id_at(&self, index: usize) -> Option<ElementId> {
        self.active.get(index).map(|a| a.element)
    }

    pub fn to_record(&self) -> crate::services::save_load::TowerRecord {
        self.model.to_record()
    }

    /// Restores the model from a record and rebuilds one visual per surviving
    /// element, placed at its computed slot position. Elements whose visual
    /// cannot be acquired are dropped from the model as well, keeping slot `i`
    /// of the model and of the view list the same element throughout.
    pub fn load_from_record(
        &mut self,
        record: &crate::services::save_load::TowerRecord,
        catalog: &ElementCatalog,
    ) {
        self.clear_active_views();
        self.model.load_from_record(record, catalog);
        let mut i = 0;
        while i < self.model.element_count() {
            let element = self.model.elements()[i].clone();
            let Some(instance) = self.pool.borrow_mut().acquire_visual(&element.element_type)
            else {
                error!(target: "tower", "no visual available while restoring; dropping element {i}");
                if let Err(e) = self.model.remove_at(i) {
                    error!(target: "tower", "remove_at({i}) failed: {e}");
                }
                continue;
            };
            self.active.push(ActiveView {
                element: element.id,
                view: instance.id,
                size: instance.size,
            });
            if let Some(pos) = self.model.get_element_position(i, ELEMENT_PIVOT_Y) {
                self.presenter
                    .show_view(instance.id, &element.element_type.sprite, pos);
            }
            i += 1;
        }
        info!(
            target: "tower",
            "restored {} element(s), height {:.1}",
            self.model.element_count(),
            self.model.current_height()
        );
    }

    fn clear_active_views(&mut self) {
        let mut pool = self.pool.borrow_mut();
        for a in self.active.drain(..) {
            pool.release_visual(a.view);
        }
    }

    /// Bounding rect of the topmost placed element, from its model position
    /// and captured view size.
    fn top_element_rect(&self) -> Option<Rect> {
        let top = self.active.last()?;
        let center = self
            .model
            .get_element_position(self.active.len() - 1, ELEMENT_PIVOT_Y)?;
        Some(Rect::from_center_size(center.truncate(), top.size))
    }

    fn notify(&self, key: NotificationKey) {
        self.notifications.request_notification(key);
    }
}

impl DropZone for TowerZone {
    /// Empty tower: anywhere inside the zone rect counts. Non-empty: only the
    /// topmost element's own bounds count, so drops have to land on the stack.
    fn is_inside_zone(&self, point: Vec2) -> bool {
        if self.rect.is_degenerate() {
            return false;
        }
        if self.model.is_empty() {
            return self.rect.contains(point);
        }
        match self.top_element_rect() {
            Some(top) => top.contains(point),
            None => false,
        }
    }

    fn try_drop_element(&mut self, candidate: &DragCandidate, drop_position: Vec2) -> bool {
        // Re-drop of an element that is still part of this very stack.
        if candidate.from_tower && candidate.origin_id == self.id {
            debug!(target: "tower", "rejecting self-drop of an element already in this stack");
            return false;
        }
        if !self
            .rules
            .iter()
            .all(|r| r.can_add_element(&candidate.element_type, &self.model))
        {
            self.notify(NotificationKey::MissCube);
            return false;
        }
        if self.rect.is_degenerate() {
            warn!(target: "tower", "zone rect is degenerate; cannot accept drops");
            return false;
        }
        // Acquired up front: its measured size feeds both the height gate and
        // the stored element height.
        let Some(instance) = self
            .pool
            .borrow_mut()
            .acquire_visual(&candidate.element_type)
        else {
            error!(target: "tower", "no visual available for drop; rejecting");
            return false;
        };
        if !self.model.is_empty() {
            let base_y = match self.model.base_position() {
                Some(base) => base.y,
                None => {
                    error!(target: "tower", "non-empty tower without base anchor; rejecting drop");
                    self.pool.borrow_mut().release_visual(instance.id);
                    return false;
                }
            };
            let available_height = self.rect.top() - base_y;
            if !self.model.can_accept(instance.size.y, available_height) {
                self.pool.borrow_mut().release_visual(instance.id);
                self.notify(NotificationKey::HeightLimit);
                return false;
            }
        }
        if !self.is_inside_zone(drop_position) {
            self.pool.borrow_mut().release_visual(instance.id);
            self.notify(NotificationKey::MissCube);
            return false;
        }
        if self.model.is_empty() {
            // First drop anchors the stack; keep the anchor inside the zone.
            self.model
                .set_base_position(self.rect.clamp_point(drop_position));
        }
        let element = TowerElement::new(
            candidate.element_type.clone(),
            instance.size.x,
            instance.size.y,
            &mut self.rng,
        );
        self.model.add_element(element.clone());
        self.active.push(ActiveView {
            element: element.id,
            view: instance.id,
            size: instance.size,
        });
        let index = self.model.element_count() - 1;
        if let Some(pos) = self.model.get_element_position(index, ELEMENT_PIVOT_Y) {
            self.presenter
                .show_view(instance.id, &candidate.element_type.sprite, pos);
        }
        info!(
            target: "tower",
            "placed '{}' at index {index}, stack height {:.1}",
            candidate.element_type.id,
            self.model.current_height()
        );
        self.notify(NotificationKey::PlaceCube);
        true
    }

    fn landing_position(&self, drop_position: Vec2) -> Vec3 {
        match self.model.top_position(ELEMENT_PIVOT_Y) {
            Some(pos) => pos,
            None => drop_position.extend(0.0),
        }
    }
}

impl ElementOrigin for TowerZone {
    fn container_id(&self) -> ContainerId {
        self.id
    }

    /// Removes by identity, releases the visual, and tweens every surviving
    /// element above the hole down into its new slot.
    fn remove_element(&mut self, id: ElementId) {
        let Some(index) = self.active.iter().position(|a| a.element == id) else {
            debug!(target: "tower", "remove request for unknown element {id:?}; ignoring");
            return;
        };
        let removed_view = self.active.remove(index).view;
        if let Err(e) = self.model.remove_at(index) {
            // Model and active list disagree; keep the visuals consistent anyway.
            error!(target: "tower", "remove_at({index}) failed: {e}");
        }
        self.presenter.hide_view(removed_view);
        self.pool.borrow_mut().release_visual(removed_view);
        for i in index..self.active.len() {
            if let Some(pos) = self.model.get_element_position(i, ELEMENT_PIVOT_Y) {
                self.presenter
                    .animate_view_to(self.active[i].view, pos, self.collapse_duration);
            }
        }
        info!(
            target: "tower",
            "removed element at index {index}, {} remaining",
            self.active.len()
        );
    }
}
