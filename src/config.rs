// filepath: src/config.rs
//! Configuration handling for the pixel sandbox
//!
//! This file defines the configuration structure and provides
//! functionality to load and save configuration from/to files.
//! Optional fields fall back to the built-in defaults when resolved.

use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::color::Color;
use crate::coords::{CoordinateMapper, SurfaceOffset, DEFAULT_ZOOM};
use crate::path::PolyStyle;
use crate::surface::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Largest accepted surface width or height, in pixels.
pub const MAX_EXTENT: u32 = 8192;

/// Surface extents and startup fill
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SurfaceConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background_color: Option<[u8; 4]>,
}

/// Pointer mapping for the inspector
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InspectorConfig {
    pub zoom: Option<u32>,
    #[serde(default)]
    pub offset: SurfaceOffset,
}

/// Configuration for the sandbox surface, inspector and routines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Routine started by `run`
    #[serde(default = "default_routine")]
    pub routine: String,

    #[serde(default)]
    pub poly_style: PolyStyle,

    #[serde(default)]
    pub surface: SurfaceConfig,

    #[serde(default)]
    pub inspector: InspectorConfig,

    /// Per-routine settings, keyed by routine id
    #[serde(default)]
    pub routines: HashMap<String, toml::Table>,
}

fn default_routine() -> String {
    "polygon".to_string()
}

/// Resolved surface settings with no Option fields
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceResolved {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            routine: default_routine(),
            poly_style: PolyStyle::default(),
            surface: SurfaceConfig {
                width: Some(DEFAULT_WIDTH),
                height: Some(DEFAULT_HEIGHT),
                background_color: Some([0, 0, 0, 255]),
            },
            inspector: InspectorConfig {
                zoom: Some(DEFAULT_ZOOM),
                offset: SurfaceOffset::default(),
            },
            routines: HashMap::new(),
        }
    }
}

impl SandboxConfig {
    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("pixel-sandbox")
        } else {
            PathBuf::from(".config/pixel-sandbox")
        };

        config_dir.join("config.toml")
    }

    /// Load configuration from the default location, creating it if missing
    pub fn load_from_file() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::get_config_path())
    }

    /// Load configuration from `path`, writing the defaults there if not found
    pub fn load_from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config: Self = toml::from_str(&content)?;
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let default_config = Self::default();
                default_config.save_to_path(path)?;
                Ok(default_config)
            }
            Err(e) => Err(Box::new(e)),
        }
    }

    /// Save configuration to the default location
    pub fn save_to_file(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to_path(&Self::get_config_path())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        // Create the directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Surface settings with defaults filled in. A zero or oversized extent
    /// falls back to the default.
    pub fn surface(&self) -> SurfaceResolved {
        let [r, g, b, _] = self.surface.background_color.unwrap_or([0, 0, 0, 255]);
        SurfaceResolved {
            width: extent("surface.width", self.surface.width, DEFAULT_WIDTH),
            height: extent("surface.height", self.surface.height, DEFAULT_HEIGHT),
            background_color: Color::rgb(r as f64, g as f64, b as f64),
        }
    }

    /// Pointer mapper for the inspector. A zero zoom is treated as 1.
    pub fn mapper(&self) -> CoordinateMapper {
        let zoom = match self.inspector.zoom {
            Some(0) => {
                warn!("inspector.zoom = 0 is not usable, falling back to 1");
                1
            }
            Some(zoom) => zoom,
            None => DEFAULT_ZOOM,
        };
        CoordinateMapper::new(self.inspector.offset, zoom).unwrap_or_default()
    }
}

fn extent(key: &str, value: Option<u32>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 && v <= MAX_EXTENT => v,
        Some(v) => {
            warn!("{} = {} is outside 1..={}, using {}", key, v, MAX_EXTENT, default);
            default
        }
        None => default,
    }
}
