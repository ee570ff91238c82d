use glam::Vec2;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::core::geometry::Rect;

/// One available element kind, as declared by configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ElementTypeConfig {
    pub id: String,
    pub sprite: String,
}

/// Which drop rules gate the tower. Configuration choice, not hard-coded.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DropRuleKind {
    NonRestriction,
    OnlyOneColor,
}

impl Default for DropRuleKind {
    fn default() -> Self {
        DropRuleKind::NonRestriction
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    /// Jump animation from pick-up origin to the resolved landing spot.
    pub jump_duration: f32,
    /// Jump back toward origin after a rejected drop.
    pub jump_back_duration: f32,
    /// Fade-out of the dragged visual on miss/reject.
    pub fade_duration: f32,
    /// Collapse re-layout after an element is removed mid-stack.
    pub collapse_duration: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            jump_duration: 0.5,
            jump_back_duration: 0.3,
            fade_duration: 0.3,
            collapse_duration: 0.5,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TowerZoneConfig {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for TowerZoneConfig {
    fn default() -> Self {
        Self {
            min_x: -250.0,
            min_y: -200.0,
            max_x: 250.0,
            max_y: 450.0,
        }
    }
}

impl TowerZoneConfig {
    pub fn rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.min_x, self.min_y),
            Vec2::new(self.max_x, self.max_y),
        )
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HoleConfig {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for HoleConfig {
    fn default() -> Self {
        Self {
            center_x: 420.0,
            center_y: -300.0,
            width: 220.0,
            height: 120.0,
        }
    }
}

impl HoleConfig {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x, self.center_y)
    }

    pub fn ellipse_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Rendered size of one element visual, as reported by the (fixed-size) demo
/// pool. Real presentation layers measure the asset instead.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ElementVisualConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ElementVisualConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
        }
    }
}

impl ElementVisualConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub element_types: Vec<ElementTypeConfig>,
    /// Seed count for the pick tray, split across element types.
    pub bottom_cube_count: usize,
    pub drop_rule: DropRuleKind,
    pub drag: DragConfig,
    pub tower: TowerZoneConfig,
    pub hole: HoleConfig,
    pub element_visual: ElementVisualConfig,
    pub save_file: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            element_types: vec![
                ElementTypeConfig {
                    id: "Red".into(),
                    sprite: "sprites/cube_red.png".into(),
                },
                ElementTypeConfig {
                    id: "Green".into(),
                    sprite: "sprites/cube_green.png".into(),
                },
                ElementTypeConfig {
                    id: "Blue".into(),
                    sprite: "sprites/cube_blue.png".into(),
                },
            ],
            bottom_cube_count: 24,
            drop_rule: DropRuleKind::default(),
            drag: DragConfig::default(),
            tower: TowerZoneConfig::default(),
            hole: HoleConfig::default(),
            element_visual: ElementVisualConfig::default(),
            save_file: "tower_save.json".into(),
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.element_types.is_empty() {
            w.push("element_types is empty; nothing can be dragged or restored".into());
        }
        for (i, t) in self.element_types.iter().enumerate() {
            if t.id.trim().is_empty() {
                w.push(format!("element_types[{i}].id is blank"));
            }
        }
        let mut seen: Vec<&str> = Vec::new();
        for t in &self.element_types {
            if seen.contains(&t.id.as_str()) {
                w.push(format!("duplicate element type id '{}'", t.id));
            } else {
                seen.push(t.id.as_str());
            }
        }
        if self.bottom_cube_count == 0 {
            w.push("bottom_cube_count is 0; the pick tray will start empty".into());
        }
        if self.tower.rect().is_degenerate() {
            w.push(format!(
                "tower zone rect is degenerate ({}x{})",
                self.tower.rect().width(),
                self.tower.rect().height()
            ));
        }
        if self.hole.width <= 0.0 || self.hole.height <= 0.0 {
            w.push(format!(
                "hole ellipse {}x{} has no area; the hole can never be hit",
                self.hole.width, self.hole.height
            ));
        }
        if self.element_visual.width <= 0.0 || self.element_visual.height <= 0.0 {
            w.push("element_visual size must be > 0".into());
        }
        for (name, v) in [
            ("jump_duration", self.drag.jump_duration),
            ("jump_back_duration", self.drag.jump_back_duration),
            ("fade_duration", self.drag.fade_duration),
            ("collapse_duration", self.drag.collapse_duration),
        ] {
            if v < 0.0 {
                w.push(format!("drag.{name} {v} negative -> treated as instant"));
            }
        }
        if self.save_file.trim().is_empty() {
            w.push("save_file is blank; persistence disabled".into());
        }
        w
    }
}
