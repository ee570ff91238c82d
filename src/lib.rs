pub mod core;
pub mod interaction;
pub mod services;
pub mod zones;

// Curated re-exports
pub use crate::core::config::{DropRuleKind, GameConfig};
pub use crate::core::element::{ElementCatalog, ElementId, ElementType, VisualRef};
pub use crate::interaction::drag::{DragCandidate, DragOutcome, DragSession};
pub use crate::services::save_load::{JsonFileSaveLoad, TowerRecord};
pub use crate::zones::hole::{HoleModel, HoleZone};
pub use crate::zones::tower::model::{TowerElement, TowerModel};
pub use crate::zones::tower::TowerZone;
pub use crate::zones::tray::TrayModel;
