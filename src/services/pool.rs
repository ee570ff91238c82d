use glam::Vec2;
use tracing::warn;

use crate::core::element::ElementType;
use crate::services::presenter::ViewId;

/// A visual freshly acquired from the pool, with its rendered bounds captured
/// at acquisition time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewInstance {
    pub id: ViewId,
    pub size: Vec2,
}

/// Acquire/release capability for element visuals. Pre-warm and shrink policy
/// belong to the implementation, not to the core.
pub trait VisualPool {
    /// None means the presentation layer could not produce a visual; callers
    /// treat this as a reference error and abort the operation.
    fn acquire_visual(&mut self, element_type: &ElementType) -> Option<ViewInstance>;
    fn release_visual(&mut self, view: ViewId);
}

/// Grow-on-demand pool handing out numbered view slots of a fixed size.
/// Used by the headless driver and tests; a real presentation layer would
/// instantiate and measure actual sprites here.
#[derive(Debug)]
pub struct CountingPool {
    view_size: Vec2,
    free: Vec<ViewId>,
    next_id: u64,
    live: usize,
}

impl CountingPool {
    pub fn new(view_size: Vec2) -> Self {
        Self {
            view_size,
            free: Vec::new(),
            next_id: 1,
            live: 0,
        }
    }

    /// Views currently handed out.
    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }
}

impl VisualPool for CountingPool {
    fn acquire_visual(&mut self, _element_type: &ElementType) -> Option<ViewInstance> {
        let id = self.free.pop().unwrap_or_else(|| {
            let id = ViewId(self.next_id);
            self.next_id += 1;
            id
        });
        self.live += 1;
        Some(ViewInstance {
            id,
            size: self.view_size,
        })
    }

    fn release_visual(&mut self, view: ViewId) {
        if self.free.contains(&view) {
            warn!(target: "pool", "view {view:?} released twice; ignoring");
            return;
        }
        self.live = self.live.saturating_sub(1);
        self.free.push(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::element::ElementType;

    fn red() -> ElementType {
        ElementType::new("Red", "r.png")
    }

    #[test]
    fn acquire_then_release_reuses_slots() {
        let mut pool = CountingPool::new(Vec2::splat(100.0));
        let a = pool.acquire_visual(&red()).unwrap();
        assert_eq!(pool.live_count(), 1);
        pool.release_visual(a.id);
        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.available(), 1);
        let b = pool.acquire_visual(&red()).unwrap();
        assert_eq!(b.id, a.id);
    }

    #[test]
    fn double_release_is_ignored() {
        let mut pool = CountingPool::new(Vec2::splat(100.0));
        let a = pool.acquire_visual(&red()).unwrap();
        pool.release_visual(a.id);
        pool.release_visual(a.id);
        assert_eq!(pool.available(), 1);
    }
}
