use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::medicine::Medicine;
use super::settings::StoreConfig;
use super::tag::{Tag, TagKind};

/// The medicine cabinet: every in-memory collection the domain operates on.
/// Passed explicitly through the ops layer — no hidden globals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cabinet {
    #[serde(default)]
    pub medicines: Vec<Medicine>,
    #[serde(default)]
    pub time_tags: Vec<Tag>,
    #[serde(default)]
    pub purpose_tags: Vec<Tag>,
}

impl Cabinet {
    pub fn find_medicine(&self, id: u32) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    pub fn find_medicine_mut(&mut self, id: u32) -> Option<&mut Medicine> {
        self.medicines.iter_mut().find(|m| m.id == id)
    }

    pub fn tags(&self, kind: TagKind) -> &[Tag] {
        match kind {
            TagKind::Time => &self.time_tags,
            TagKind::Purpose => &self.purpose_tags,
        }
    }

    pub fn tags_mut(&mut self, kind: TagKind) -> &mut Vec<Tag> {
        match kind {
            TagKind::Time => &mut self.time_tags,
            TagKind::Purpose => &mut self.purpose_tags,
        }
    }

    pub fn find_tag(&self, kind: TagKind, id: u32) -> Option<&Tag> {
        self.tags(kind).iter().find(|t| t.id == id)
    }

    pub fn find_tag_by_name(&self, kind: TagKind, name: &str) -> Option<&Tag> {
        self.tags(kind).iter().find(|t| t.name == name)
    }

    /// Next free medicine id. Max+1 rather than len+1 so deletes can't
    /// cause reuse.
    pub fn next_medicine_id(&self) -> u32 {
        self.medicines.iter().map(|m| m.id).max().unwrap_or(0) + 1
    }

    pub fn next_tag_id(&self, kind: TagKind) -> u32 {
        self.tags(kind).iter().map(|t| t.id).max().unwrap_or(0) + 1
    }
}

/// A fully loaded dosette store: config plus cabinet plus paths.
#[derive(Debug)]
pub struct Store {
    /// Root directory (parent of `dosette/`)
    pub root: PathBuf,
    /// Path to the `dosette/` directory
    pub dosette_dir: PathBuf,
    /// Parsed dosette.toml
    pub config: StoreConfig,
    /// Loaded cabinet.json
    pub cabinet: Cabinet,
}
