use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use tracing::{debug, info, warn};

use crate::core::config::DragConfig;
use crate::core::element::{ElementId, ElementType};
use crate::services::notifications::{NotificationKey, Notifications};
use crate::services::presenter::{Presenter, ViewId};
use crate::zones::{ContainerId, DropZone, ElementOrigin};

/// Everything the drag layer captures about the picked-up element at the
/// moment the gesture begins.
#[derive(Clone)]
pub struct DragCandidate {
    pub id: ElementId,
    pub element_type: ElementType,
    /// Ghost visual following the pointer for the duration of the gesture.
    pub view: ViewId,
    /// Rendered bounds of the ghost visual following the pointer.
    pub size: Vec2,
    pub origin_position: Vec3,
    /// Container the element was picked out of.
    pub origin: Rc<RefCell<dyn ElementOrigin>>,
    pub origin_id: ContainerId,
    /// True when re-dragging an element that is already part of a tower.
    pub from_tower: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Accepted,
    Rejected,
    Miss,
}

enum DragState {
    Idle,
    Dragging { candidate: DragCandidate },
    Resolving,
}

/// Orchestrates one drag gesture from pick-up through zone resolution. All
/// model mutation happens synchronously inside `on_drag_end`; the animations
/// it requests are fire-and-forget.
pub struct DragSession {
    zones: Vec<Rc<RefCell<dyn DropZone>>>,
    presenter: Rc<dyn Presenter>,
    notifications: Rc<dyn Notifications>,
    cfg: DragConfig,
    state: DragState,
}

impl DragSession {
    pub fn new(
        presenter: Rc<dyn Presenter>,
        notifications: Rc<dyn Notifications>,
        cfg: DragConfig,
    ) -> Self {
        Self {
            zones: Vec::new(),
            presenter,
            notifications,
            cfg,
            state: DragState::Idle,
        }
    }

    /// Registration order is resolution order: on release, the first zone
    /// whose hit test matches wins outright.
    pub fn register_zone(&mut self, zone: Rc<RefCell<dyn DropZone>>) {
        self.zones.push(zone);
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn on_drag_start(&mut self, candidate: DragCandidate, pointer: Vec2) {
        if !matches!(self.state, DragState::Idle) {
            warn!(target: "drag", "drag start while a gesture is active; ignoring");
            return;
        }
        self.presenter.show_view(
            candidate.view,
            &candidate.element_type.sprite,
            candidate.origin_position,
        );
        self.presenter
            .set_view_position(candidate.view, pointer.extend(0.0));
        debug!(target: "drag", "drag started for '{}'", candidate.element_type.id);
        self.state = DragState::Dragging { candidate };
    }

    /// Pure pass-through: keep the ghost under the pointer.
    pub fn on_drag_move(&mut self, pointer: Vec2) {
        match &self.state {
            DragState::Dragging { candidate } => {
                self.presenter
                    .set_view_position(candidate.view, pointer.extend(0.0));
            }
            _ => debug!(target: "drag", "drag move without an active gesture; ignoring"),
        }
    }

    /// Resolves the gesture. Returns None when no drag was active.
    pub fn on_drag_end(&mut self, release: Vec2) -> Option<DragOutcome> {
        let previous = std::mem::replace(&mut self.state, DragState::Resolving);
        let DragState::Dragging { candidate } = previous else {
            warn!(target: "drag", "drag end without an active gesture; ignoring");
            self.state = DragState::Idle;
            return None;
        };

        let target_zone = self
            .zones
            .iter()
            .find(|z| z.borrow().is_inside_zone(release))
            .cloned();

        let outcome = match target_zone {
            None => self.resolve_miss(&candidate),
            Some(zone) => {
                let accepted = zone.borrow_mut().try_drop_element(&candidate, release);
                if accepted {
                    let landing = zone.borrow().landing_position(release);
                    self.resolve_accepted(&candidate, landing)
                } else {
                    self.resolve_rejected(&candidate, release)
                }
            }
        };
        self.state = DragState::Idle;
        info!(target: "drag", "drag resolved: {outcome:?}");
        Some(outcome)
    }

    fn resolve_miss(&self, candidate: &DragCandidate) -> DragOutcome {
        let presenter = self.presenter.clone();
        let view = candidate.view;
        self.presenter.play_fade_animation(
            view,
            false,
            self.cfg.fade_duration,
            Box::new(move || presenter.hide_view(view)),
        );
        self.notifications
            .request_notification(NotificationKey::MissCube);
        DragOutcome::Miss
    }

    fn resolve_rejected(&self, candidate: &DragCandidate, release: Vec2) -> DragOutcome {
        // Fade the ghost out, then fly a sprite copy back toward the pick-up
        // spot before hiding. The zone already requested the reason
        // notification; no model state changed.
        let presenter = self.presenter.clone();
        let view = candidate.view;
        let sprite = candidate.element_type.sprite.clone();
        let from = release.extend(0.0);
        let to = candidate.origin_position;
        let jump_back = self.cfg.jump_back_duration;
        self.presenter.play_fade_animation(
            view,
            false,
            self.cfg.fade_duration,
            Box::new(move || {
                let inner = presenter.clone();
                presenter.play_move_animation(
                    from,
                    to,
                    &sprite,
                    jump_back,
                    Box::new(move || inner.hide_view(view)),
                );
            }),
        );
        DragOutcome::Rejected
    }

    fn resolve_accepted(&self, candidate: &DragCandidate, landing: Vec3) -> DragOutcome {
        self.presenter.hide_view(candidate.view);
        let origin = candidate.origin.clone();
        let id = candidate.id;
        let from_tower = candidate.from_tower;
        self.presenter.play_move_animation(
            candidate.origin_position,
            landing,
            &candidate.element_type.sprite,
            self.cfg.jump_duration,
            Box::new(move || {
                // Re-dragged tower members were already removed by whoever
                // accepted them; removing again here would double-remove.
                if !from_tower {
                    origin.borrow_mut().remove_element(id);
                }
            }),
        );
        DragOutcome::Accepted
    }
}
