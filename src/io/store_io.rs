use std::fs;
use std::path::{Path, PathBuf};

use crate::model::cabinet::{Cabinet, Store};
use crate::model::medicine::{Medicine, StockLevel};
use crate::model::settings::StoreConfig;
use crate::model::tag::Tag;

/// Error type for store I/O operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not a dosette store: no dosette/ directory found")]
    NotAStore,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse dosette.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not parse cabinet.json: {0}")]
    CabinetParseError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the dosette store by walking up from the given directory,
/// looking for a `dosette/` subdirectory containing dosette.toml.
pub fn discover_store(start: &Path) -> Result<PathBuf, StoreError> {
    let mut current = start.to_path_buf();
    loop {
        let dosette_dir = current.join("dosette");
        if dosette_dir.is_dir() && dosette_dir.join("dosette.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(StoreError::NotAStore);
        }
    }
}

/// Load a complete dosette store from the given root directory.
pub fn load_store(root: &Path) -> Result<Store, StoreError> {
    let dosette_dir = root.join("dosette");
    if !dosette_dir.is_dir() {
        return Err(StoreError::NotAStore);
    }

    let config_path = dosette_dir.join("dosette.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| StoreError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: StoreConfig = toml::from_str(&config_text)?;

    // A missing cabinet is an empty cabinet, not an error
    let cabinet_path = dosette_dir.join("cabinet.json");
    let cabinet = if cabinet_path.exists() {
        let cabinet_text =
            fs::read_to_string(&cabinet_path).map_err(|e| StoreError::ReadError {
                path: cabinet_path.clone(),
                source: e,
            })?;
        serde_json::from_str(&cabinet_text)?
    } else {
        Cabinet::default()
    };

    Ok(Store {
        root: root.to_path_buf(),
        dosette_dir,
        config,
        cabinet,
    })
}

/// Save the cabinet back to disk. Writes to a temp file in the same
/// directory and renames over the target so readers never see a torn file.
pub fn save_cabinet(dosette_dir: &Path, cabinet: &Cabinet) -> Result<(), StoreError> {
    let path = dosette_dir.join("cabinet.json");
    let content = serde_json::to_string_pretty(cabinet)?;
    let tmp = tempfile::NamedTempFile::new_in(dosette_dir)?;
    fs::write(tmp.path(), content.as_bytes())?;
    tmp.persist(&path).map_err(|e| StoreError::IoError(e.error))?;
    Ok(())
}

/// The starter cabinet written by `dose init --sample`.
pub fn sample_cabinet() -> Cabinet {
    let mut cab = Cabinet::default();

    for (id, name) in [
        (1, "Before breakfast"),
        (2, "After lunch"),
        (3, "With dinner"),
        (4, "Before bed"),
        (5, "On empty stomach"),
    ] {
        cab.time_tags.push(Tag::new(id, name));
    }
    for (id, name) in [
        (1, "Pain relief"),
        (2, "Antibiotic"),
        (3, "Allergy"),
        (4, "Heart"),
    ] {
        cab.purpose_tags.push(Tag::new(id, name));
    }

    let mut aspirin = Medicine::new(1, "Aspirin".to_string());
    aspirin.time_tags = vec!["Before breakfast".to_string(), "With dinner".to_string()];
    aspirin.purpose_tag = "Pain relief".to_string();
    aspirin.amount_left = 20;
    aspirin.unit_price = 0.15;
    aspirin.daily_needed = 2;
    aspirin.level = StockLevel::Enough;

    let mut ibuprofen = Medicine::new(2, "Ibuprofen".to_string());
    ibuprofen.time_tags = vec!["After lunch".to_string()];
    ibuprofen.purpose_tag = "Pain relief".to_string();
    ibuprofen.amount_left = 4;
    ibuprofen.unit_price = 0.20;
    ibuprofen.daily_needed = 2;
    ibuprofen.level = StockLevel::Half;

    let mut amoxicillin = Medicine::new(3, "Amoxicillin".to_string());
    amoxicillin.time_tags = vec![
        "Before breakfast".to_string(),
        "After lunch".to_string(),
        "With dinner".to_string(),
    ];
    amoxicillin.purpose_tag = "Antibiotic".to_string();
    amoxicillin.amount_left = 0;
    amoxicillin.unit_price = 0.80;
    amoxicillin.daily_needed = 3;
    amoxicillin.level = StockLevel::Empty;

    let mut loratadine = Medicine::new(4, "Loratadine".to_string());
    loratadine.time_tags = vec!["Before bed".to_string()];
    loratadine.purpose_tag = "Allergy".to_string();
    loratadine.amount_left = 30;
    loratadine.unit_price = 0.25;
    loratadine.daily_needed = 1;
    loratadine.level = StockLevel::Enough;

    cab.medicines = vec![aspirin, ibuprofen, amoxicillin, loratadine];
    cab
}
