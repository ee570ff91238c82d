pub mod hole;
pub mod rules;
pub mod tower;
pub mod tray;

use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Vec2, Vec3};

use crate::core::element::ElementId;
use crate::interaction::drag::DragCandidate;

/// Identity of one element container; lets a zone recognize candidates that
/// were picked up out of itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(u64);

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

impl ContainerId {
    pub fn next() -> Self {
        Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A container elements can be dragged out of again.
pub trait ElementOrigin {
    fn container_id(&self) -> ContainerId;
    /// Remove by identity. Unknown ids are a no-op, so removal requests may
    /// arrive more than once per element without harm.
    fn remove_element(&mut self, id: ElementId);
}

/// A release target for a drag gesture. Zones are consulted in registration
/// order; the first whose hit test matches is the sole candidate.
pub trait DropZone {
    fn is_inside_zone(&self, point: Vec2) -> bool;
    /// Accept or reject the candidate, applying all side effects on accept.
    /// Rejections surface as notifications, never as errors.
    fn try_drop_element(&mut self, candidate: &DragCandidate, drop_position: Vec2) -> bool;
    /// Where an accepted candidate visually lands; drives the jump animation.
    fn landing_position(&self, drop_position: Vec2) -> Vec3;
}
