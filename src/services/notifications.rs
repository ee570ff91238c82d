use tracing::info;

/// User-facing notification keys. The outer UI layer resolves them to
/// localized text; the core only picks which one fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKey {
    PlaceCube,
    MissCube,
    HeightLimit,
    DropHole,
}

impl NotificationKey {
    pub fn key(self) -> &'static str {
        match self {
            NotificationKey::PlaceCube => "PlaceCube",
            NotificationKey::MissCube => "MissCube",
            NotificationKey::HeightLimit => "HeightLimit",
            NotificationKey::DropHole => "DropHole",
        }
    }
}

pub trait Notifications {
    fn request_notification(&self, key: NotificationKey);
}

/// Stand-in sink when no UI layer is attached (headless driver).
#[derive(Debug, Default)]
pub struct LogNotifications;

impl Notifications for LogNotifications {
    fn request_notification(&self, key: NotificationKey) {
        info!(target: "notify", "notification requested: {}", key.key());
    }
}
