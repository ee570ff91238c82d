use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Plain {x, y, z} triple; keeps the on-disk shape stable and independent of
/// the math crate's own serialization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec2> for SavedVec3 {
    fn from(v: Vec2) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: 0.0,
        }
    }
}

impl SavedVec3 {
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedElement {
    pub element_type_id: String,
    pub horizontal_offset: f32,
    pub index: usize,
    pub element_height: f32,
}

/// Durable projection of a tower. Field names are fixed by the existing save
/// file format; do not rename.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TowerRecord {
    pub elements: Vec<SavedElement>,
    pub base_position: SavedVec3,
}

/// JSON-file persistence. Nothing here is fatal: save failures are logged and
/// dropped, a missing or malformed file loads as "no saved state".
#[derive(Debug, Clone)]
pub struct JsonFileSaveLoad {
    path: PathBuf,
}

impl JsonFileSaveLoad {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_data(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, record: &TowerRecord) {
        match self.try_save(record) {
            Ok(()) => info!(target: "save", "saved tower state to {}", self.path.display()),
            Err(e) => error!(target: "save", "failed to save tower state: {e:#}"),
        }
    }

    pub fn load(&self) -> Option<TowerRecord> {
        if !self.has_data() {
            return None;
        }
        match self.try_load() {
            Ok(record) => Some(record),
            Err(e) => {
                error!(target: "save", "failed to load tower state: {e:#}");
                None
            }
        }
    }

    fn try_save(&self, record: &TowerRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record).context("serialize tower record")?;
        fs::write(&self.path, json)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }

    fn try_load(&self) -> Result<TowerRecord> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        serde_json::from_str(&json).context("parse tower record")
    }
}
