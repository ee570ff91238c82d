use glam::{Vec2, Vec3};
use tracing::info;

use std::rc::Rc;

use crate::interaction::drag::DragCandidate;
use crate::services::notifications::{NotificationKey, Notifications};
use crate::zones::{DropZone, ElementOrigin};

/// Elliptical hit area of the hole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleModel {
    pub center: Vec2,
    pub ellipse_size: Vec2,
}

impl HoleModel {
    pub fn new(center: Vec2, ellipse_size: Vec2) -> Self {
        Self {
            center,
            ellipse_size,
        }
    }

    pub fn is_point_inside_ellipse(&self, point: Vec2) -> bool {
        let half = self.ellipse_size * 0.5;
        if half.x <= 0.0 || half.y <= 0.0 {
            return false;
        }
        let d = point - self.center;
        let nx = d.x / half.x;
        let ny = d.y / half.y;
        nx * nx + ny * ny <= 1.0
    }
}

/// Sink zone: anything released over the ellipse is swallowed. No rules, no
/// height budget; the source element is removed from wherever it came from.
pub struct HoleZone {
    model: HoleModel,
    notifications: Rc<dyn Notifications>,
}

impl HoleZone {
    pub fn new(model: HoleModel, notifications: Rc<dyn Notifications>) -> Self {
        Self {
            model,
            notifications,
        }
    }

    pub fn model(&self) -> &HoleModel {
        &self.model
    }
}

impl DropZone for HoleZone {
    fn is_inside_zone(&self, point: Vec2) -> bool {
        self.model.is_point_inside_ellipse(point)
    }

    fn try_drop_element(&mut self, candidate: &DragCandidate, _drop_position: Vec2) -> bool {
        info!(
            target: "hole",
            "'{}' dropped into the hole",
            candidate.element_type.id
        );
        self.notifications
            .request_notification(NotificationKey::DropHole);
        candidate
            .origin
            .borrow_mut()
            .remove_element(candidate.id);
        true
    }

    fn landing_position(&self, _drop_position: Vec2) -> Vec3 {
        self.model.center.extend(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_hit_test_uses_both_radii() {
        let hole = HoleModel::new(Vec2::new(100.0, 0.0), Vec2::new(200.0, 100.0));
        assert!(hole.is_point_inside_ellipse(Vec2::new(100.0, 0.0)));
        assert!(hole.is_point_inside_ellipse(Vec2::new(199.0, 0.0)));
        assert!(!hole.is_point_inside_ellipse(Vec2::new(201.0, 0.0)));
        // On the short axis the same distance falls outside.
        assert!(!hole.is_point_inside_ellipse(Vec2::new(100.0, 99.0)));
        assert!(hole.is_point_inside_ellipse(Vec2::new(100.0, 49.0)));
    }

    #[test]
    fn degenerate_ellipse_never_hits() {
        let hole = HoleModel::new(Vec2::ZERO, Vec2::ZERO);
        assert!(!hole.is_point_inside_ellipse(Vec2::ZERO));
    }
}
