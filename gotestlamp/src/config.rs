use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::GotestlampError;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GotestlampConfig {
    pub coverprofile: Option<String>,
    pub verbose: Option<bool>,
    pub ci: Option<bool>,
    pub only_failures: Option<bool>,
    pub progress: Option<bool>,
}

const CONFIG_FILE_NAMES: [&str; 11] = [
    "gotestlamp.toml",
    "gotestlamp.config.json",
    "gotestlamp.config.json5",
    "gotestlamp.config.jsonc",
    "gotestlamp.config.yaml",
    "gotestlamp.config.yml",
    ".gotestlamprc",
    ".gotestlamprc.json",
    ".gotestlamprc.json5",
    ".gotestlamprc.yaml",
    ".gotestlamprc.yml",
];

/// Work tree of the enclosing git repository, or `start` itself.
pub fn find_repo_root(start: &Path) -> PathBuf {
    git2::Repository::discover(start)
        .ok()
        .and_then(|repo| repo.workdir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| start.to_path_buf())
}

pub fn discover_config_path(repo_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .into_iter()
        .map(|name| repo_root.join(name))
        .find(|p| p.is_file())
}

pub fn load_gotestlamp_config(repo_root: &Path) -> Result<GotestlampConfig, GotestlampError> {
    match discover_config_path(repo_root) {
        Some(path) => load_gotestlamp_config_from_path(&path),
        None => Ok(GotestlampConfig::default()),
    }
}

pub fn load_gotestlamp_config_from_path(
    path: &Path,
) -> Result<GotestlampConfig, GotestlampError> {
    let ext = path
        .extension()
        .and_then(|x| x.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let config = match ext.as_str() {
        "yaml" | "yml" => load_yaml_config(path),
        "toml" => load_toml_config(path),
        // `.gotestlamprc` without extension is JSON5.
        _ => load_json_config(path),
    }?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

fn read_config_text(path: &Path) -> Result<String, GotestlampError> {
    std::fs::read_to_string(path).map_err(|source| GotestlampError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> GotestlampError {
    GotestlampError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn load_json_config(path: &Path) -> Result<GotestlampConfig, GotestlampError> {
    let raw = read_config_text(path)?;
    json5::from_str::<GotestlampConfig>(&raw)
        .or_else(|_| serde_json::from_str::<GotestlampConfig>(&raw))
        .map_err(|err| parse_error(path, err))
}

fn load_yaml_config(path: &Path) -> Result<GotestlampConfig, GotestlampError> {
    let raw = read_config_text(path)?;
    if raw.trim().is_empty() {
        return Ok(GotestlampConfig::default());
    }
    serde_yaml::from_str::<GotestlampConfig>(&raw).map_err(|err| parse_error(path, err))
}

fn load_toml_config(path: &Path) -> Result<GotestlampConfig, GotestlampError> {
    let raw = read_config_text(path)?;
    let toml_value = toml::from_str::<toml::Value>(&raw).map_err(|err| parse_error(path, err))?;
    let json_value = serde_json::to_value(toml_value).map_err(|err| parse_error(path, err))?;
    let normalized = normalize_toml_keys_to_camel_case(&json_value);
    serde_json::from_value::<GotestlampConfig>(normalized).map_err(|err| parse_error(path, err))
}

fn normalize_toml_keys_to_camel_case(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(object) => JsonValue::Object(
            object
                .iter()
                .map(|(key, value)| {
                    (
                        normalize_toml_key(key),
                        normalize_toml_keys_to_camel_case(value),
                    )
                })
                .collect(),
        ),
        JsonValue::Array(array) => JsonValue::Array(
            array
                .iter()
                .map(normalize_toml_keys_to_camel_case)
                .collect(),
        ),
        other => other.clone(),
    }
}

fn normalize_toml_key(key: &str) -> String {
    if !key.contains('_') {
        return key.to_string();
    }

    let mut segments = key.split('_').filter(|segment| !segment.is_empty());
    let Some(first_segment) = segments.next() else {
        return key.to_string();
    };

    let mut normalized_key = String::from(first_segment);
    for segment in segments {
        let mut chars = segment.chars();
        let Some(first_char) = chars.next() else {
            continue;
        };
        normalized_key.push(first_char.to_ascii_uppercase());
        normalized_key.extend(chars);
    }
    normalized_key
}
