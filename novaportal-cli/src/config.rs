use std::path::Path;

use serde::{Deserialize, Serialize};

/// Lobby window configuration, read from `novaportal.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyConfig {
    #[serde(default = "default_width")]
    pub window_width: u32,
    #[serde(default = "default_height")]
    pub window_height: u32,
    #[serde(default = "default_title")]
    pub window_title: String,
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_title() -> String {
    "Nova Portal".to_string()
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            window_width: default_width(),
            window_height: default_height(),
            window_title: default_title(),
        }
    }
}

/// Load the config from an explicit path, or from `./novaportal.toml`.
/// No file at the implicit location means defaults; an explicit path that
/// cannot be read is an error.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<LobbyConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let implicit = Path::new("novaportal.toml");
            if !implicit.exists() {
                return Ok(LobbyConfig::default());
            }
            implicit.to_path_buf()
        }
    };
    let content = std::fs::read_to_string(&path)?;
    Ok(toml::from_str(&content)?)
}
