pub mod config;

pub use config::{
    DragConfig, DropRuleKind, ElementTypeConfig, ElementVisualConfig, GameConfig, HoleConfig,
    TowerZoneConfig,
};
