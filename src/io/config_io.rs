use std::fs;
use std::path::Path;

use crate::io::store_io::StoreError;
use crate::model::settings::StoreConfig;

/// Read the store config, returning both the parsed config and the raw
/// toml_edit Document for round-trip-safe editing.
pub fn read_config(dosette_dir: &Path) -> Result<(StoreConfig, toml_edit::DocumentMut), StoreError> {
    let config_path = dosette_dir.join("dosette.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| StoreError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: StoreConfig = toml::from_str(&config_text)?;
    let doc: toml_edit::DocumentMut = config_text
        .parse()
        .map_err(|_: toml_edit::TomlError| StoreError::ConfigParseError(
            toml::from_str::<StoreConfig>("x=").unwrap_err(),
        ))?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(dosette_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), StoreError> {
    let config_path = dosette_dir.join("dosette.toml");
    fs::write(&config_path, doc.to_string()).map_err(|e| StoreError::ReadError {
        path: config_path,
        source: e,
    })?;
    Ok(())
}

/// Update one dose-time window in the config document
pub fn set_window(doc: &mut toml_edit::DocumentMut, period: &str, start: u32, end: u32) {
    if !doc.contains_key("windows") {
        doc["windows"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    let mut inline = toml_edit::InlineTable::new();
    inline.insert("start", toml_edit::Value::from(start as i64));
    inline.insert("end", toml_edit::Value::from(end as i64));
    doc["windows"][period] = toml_edit::value(inline);
}

/// Update the display language in the config document
pub fn set_language(doc: &mut toml_edit::DocumentMut, language: &str) {
    if !doc.contains_key("display") {
        doc["display"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["display"]["language"] = toml_edit::value(language);
}

/// Update the low-stock threshold in the config document
pub fn set_low_stock_threshold(doc: &mut toml_edit::DocumentMut, threshold: u32) {
    if !doc.contains_key("display") {
        doc["display"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["display"]["low_stock_threshold"] = toml_edit::value(threshold as i64);
}
