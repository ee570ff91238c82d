use glam::Vec3;

use crate::core::element::VisualRef;

/// Handle to an element visual owned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

/// Completion callback for a requested animation. Invoked by the presenter
/// once the effect finishes; the core never owns tween lifetimes.
pub type OnComplete = Box<dyn FnOnce()>;

/// Presentation boundary. The core hands target positions and effect requests
/// across this trait; everything visual (tween curves, sprites, hierarchy)
/// stays on the other side.
pub trait Presenter {
    fn show_view(&self, view: ViewId, sprite: &VisualRef, position: Vec3);
    fn hide_view(&self, view: ViewId);
    fn set_view_position(&self, view: ViewId, position: Vec3);
    /// Tween an existing view to a new position (stack collapse).
    fn animate_view_to(&self, view: ViewId, to: Vec3, duration_secs: f32);
    /// Fly a detached sprite copy from one point to another (accept/reject jump).
    fn play_move_animation(
        &self,
        from: Vec3,
        to: Vec3,
        sprite: &VisualRef,
        duration_secs: f32,
        on_complete: OnComplete,
    );
    fn play_fade_animation(
        &self,
        target: ViewId,
        fade_in: bool,
        duration_secs: f32,
        on_complete: OnComplete,
    );
}
