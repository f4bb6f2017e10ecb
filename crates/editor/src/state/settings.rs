//! Application settings
//!
//! Read from `settings.json` in the platform config directory, then
//! overridden by `BRICKYARD_*` environment variables. Every field has a
//! default, so a missing or partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::viewport::picking::CLICK_TOLERANCE_PX;

pub const ENV_API_KEY: &str = "BRICKYARD_AI_API_KEY";
pub const ENV_ENDPOINT: &str = "BRICKYARD_AI_ENDPOINT";
pub const ENV_MODEL: &str = "BRICKYARD_AI_MODEL";
pub const ENV_WORKS_DIR: &str = "BRICKYARD_WORKS_DIR";
pub const ENV_BIND: &str = "BRICKYARD_BIND";

pub const DEFAULT_ENDPOINT: &str = "https://api.siliconflow.cn/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "Qwen/Qwen2.5-72B-Instruct";

/// Inference service used for assisted generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// OpenAI-compatible chat completions URL
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Bearer credential. Only ever read, never written back to disk.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            api_key: None,
        }
    }
}

/// Editing behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Max snapshots kept for undo; unbounded when unset
    pub history_limit: Option<usize>,
    /// Pointer travel (pixels) still treated as a click
    pub click_tolerance_px: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_limit: None,
            click_tolerance_px: CLICK_TOLERANCE_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory for saved works; platform data dir when unset
    pub works_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3001".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generation: GenerationSettings,
    pub editor: EditorSettings,
    pub storage: StorageSettings,
    pub server: ServerSettings,
}

impl Settings {
    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "brickyard", "brickyard")
    }

    /// Default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load from the default path and the process environment
    pub fn load() -> Self {
        let mut settings = Self::settings_path()
            .filter(|p| p.exists())
            .and_then(|p| match Self::from_file(&p) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::warn!("Ignoring settings file: {e}");
                    None
                }
            })
            .unwrap_or_default();
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&json).map_err(|e| format!("failed to parse {}: {e}", path.display()))
    }

    /// Write to the default path (the API key is skipped)
    pub fn save(&self) -> std::io::Result<()> {
        match Self::settings_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Apply `BRICKYARD_*` overrides using `lookup` to read variables
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.generation.api_key = Some(key);
        }
        if let Some(endpoint) = non_empty(ENV_ENDPOINT) {
            self.generation.endpoint = endpoint;
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.generation.model = model;
        }
        if let Some(dir) = non_empty(ENV_WORKS_DIR) {
            self.storage.works_dir = Some(PathBuf::from(dir));
        }
        if let Some(bind) = non_empty(ENV_BIND) {
            self.server.bind = bind;
        }
    }

    /// Where saved works live
    pub fn works_dir(&self) -> Option<PathBuf> {
        self.storage
            .works_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("works")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.generation.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(s.generation.max_tokens, 2000);
        assert_eq!(s.editor.history_limit, None);
        assert_eq!(s.editor.click_tolerance_px, 5.0);
        assert_eq!(s.server.bind, "0.0.0.0:3001");
        assert!(s.generation.api_key.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"editor": {"history_limit": 10}}"#).unwrap();
        assert_eq!(s.editor.history_limit, Some(10));
        assert_eq!(s.editor.click_tolerance_px, 5.0);
        assert_eq!(s.generation.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_KEY, "sk-test"),
            (ENV_MODEL, "tiny"),
            (ENV_ENDPOINT, "  "),
            (ENV_WORKS_DIR, "/tmp/works"),
        ]
        .into_iter()
        .collect();

        let mut s = Settings::default();
        s.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(s.generation.api_key.as_deref(), Some("sk-test"));
        assert_eq!(s.generation.model, "tiny");
        assert_eq!(s.generation.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(s.works_dir(), Some(PathBuf::from("/tmp/works")));
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let mut s = Settings::default();
        s.generation.api_key = Some("secret".into());
        let json = serde_json::to_string(&s).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn test_save_to_round_trip_drops_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut s = Settings::default();
        s.generation.api_key = Some("secret".into());
        s.editor.history_limit = Some(40);
        s.server.bind = "127.0.0.1:4000".into();
        s.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("secret"));

        let back = Settings::from_file(&path).unwrap();
        assert_eq!(back.editor.history_limit, Some(40));
        assert_eq!(back.server.bind, "127.0.0.1:4000");
        assert!(back.generation.api_key.is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"server": {"bind": "127.0.0.1:9000"}}"#).unwrap();
        let s = Settings::from_file(&path).unwrap();
        assert_eq!(s.server.bind, "127.0.0.1:9000");

        std::fs::write(&path, "{not json").unwrap();
        assert!(Settings::from_file(&path).is_err());
    }
}
