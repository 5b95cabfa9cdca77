use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::gate::GateLayout;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "GATE_CANVAS_CONFIG";
/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "gate_canvas.json";

/// A gate placed on the canvas at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatePlacement {
    pub gate_type: String,
    pub x: f32,
    pub y: f32,
}

/// Window chrome and initial canvas content.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub resizable: bool,
    /// Canvas background as RGB
    pub background: [u8; 3],
    pub icon_path: Option<PathBuf>,
    pub gate: GateLayout,
    pub gates: Vec<GatePlacement>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Drag And Drop".to_string(),
            width: 600.0,
            height: 600.0,
            resizable: false,
            background: [190, 190, 190],
            icon_path: Some(PathBuf::from("dnd.ico")),
            gate: GateLayout::default(),
            gates: vec![GatePlacement {
                gate_type: "AND".to_string(),
                x: 100.0,
                y: 100.0,
            }],
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Loads the file named by `GATE_CANVAS_CONFIG`, else `gate_canvas.json`
    /// if present, else the defaults
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    pub fn background_color(&self) -> egui::Color32 {
        let [r, g, b] = self.background;
        egui::Color32::from_rgb(r, g, b)
    }
}
