use crate::error::{GraderError, Result};
use crate::types::config::GraderConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "grader.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".grader/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/billgrade/config.toml";

pub fn load_config(root: &Path) -> Result<Option<GraderConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub fn load_config_file(path: &Path) -> Result<GraderConfig> {
    if !path.exists() {
        return Err(GraderError::ConfigNotFound(path.display().to_string()));
    }
    let cfg = into_config(read_toml_value(path)?)?;
    cfg.validate()?;
    Ok(cfg)
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<GraderConfig>> {
    let mut layers: Vec<PathBuf> = Vec::new();
    if let Some(path) = global_path {
        layers.push(path.to_path_buf());
    }
    layers.push(root.join(DEFAULT_CONFIG_FILE));
    layers.push(root.join(DEFAULT_LOCAL_FILE));

    let mut merged = Value::Table(Map::new());
    let mut found = false;
    for path in &layers {
        found |= merge_file_if_exists(&mut merged, path)?;
    }
    if !found {
        return Ok(None);
    }

    let cfg = into_config(merged)?;
    cfg.validate()?;
    Ok(Some(cfg))
}

fn into_config(value: Value) -> Result<GraderConfig> {
    value
        .try_into()
        .map_err(|e: toml::de::Error| GraderError::ConfigParse(e.to_string()))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| GraderError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
