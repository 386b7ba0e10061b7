use serde::{Deserialize, Serialize};

/// Which tag collection an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Dose-time tags ("Before breakfast", "With dinner", ...)
    Time,
    /// Purpose tags ("Pain relief", "Antibiotic", ...)
    Purpose,
}

impl TagKind {
    pub fn label(self) -> &'static str {
        match self {
            TagKind::Time => "time",
            TagKind::Purpose => "purpose",
        }
    }

    pub fn from_label(s: &str) -> Option<TagKind> {
        match s {
            "time" => Some(TagKind::Time),
            "purpose" => Some(TagKind::Purpose),
            _ => None,
        }
    }
}

/// A registered tag. Names are unique within a kind; medicines embed the
/// name string, not the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u32,
    pub name: String,
}

impl Tag {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Tag {
            id,
            name: name.into(),
        }
    }
}
