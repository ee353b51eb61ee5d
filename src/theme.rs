//! Named-color theme
//!
//! The renderer looks colors up by name ("Title", "DEBUG", ...) so games can
//! restyle the built-in widgets without touching draw code. The theme is an
//! explicit struct passed to the renderer at construction, optionally loaded
//! from a RON file.

use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Theme load/save error
#[derive(Debug)]
pub enum ThemeError {
    /// File I/O error
    Io(String),
    /// RON parse/serialize error
    Parse(String),
}

impl std::fmt::Display for ThemeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeError::Io(msg) => write!(f, "I/O error: {}", msg),
            ThemeError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ThemeError {}

impl From<std::io::Error> for ThemeError {
    fn from(e: std::io::Error) -> Self {
        ThemeError::Io(e.to_string())
    }
}

/// Color used when a name is missing from both the theme and the defaults.
pub const FALLBACK: [u8; 3] = [40, 64, 123];

/// Named colors, stored as RGB bytes so the RON file stays hand-editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    colors: HashMap<String, [u8; 3]>,
}

/// The built-in color table every renderer falls back to.
fn default_colors() -> HashMap<String, [u8; 3]> {
    let entries: [(&str, [u8; 3]); 8] = [
        ("Title", [100, 30, 0]),
        ("DEBUG", [40, 64, 123]),
        ("Button hovered", [61, 98, 116]),
        ("Button", [51, 58, 96]),
        ("UI Text", [76, 37, 29]),
        ("Dialog Background", [51, 58, 96]),
        ("Grid", [200, 255, 200]),
        ("background", [235, 235, 225]),
    ];
    entries
        .iter()
        .map(|(name, rgb)| (name.to_string(), *rgb))
        .collect()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: default_colors(),
        }
    }
}

impl Theme {
    /// Look a color up by name. Unknown names fall back to the built-in
    /// table, then to [`FALLBACK`] with a warning on stderr.
    pub fn color(&self, name: &str) -> Color {
        let rgb = self
            .colors
            .get(name)
            .copied()
            .or_else(|| default_colors().get(name).copied())
            .unwrap_or_else(|| {
                eprintln!("Theme color '{}' not found, using fallback", name);
                FALLBACK
            });
        Color::from_rgba(rgb[0], rgb[1], rgb[2], 255)
    }

    /// Override or add a named color.
    pub fn set(&mut self, name: &str, rgb: [u8; 3]) {
        self.colors.insert(name.to_string(), rgb);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    /// Load a theme from a RON file. Names missing from the file fall back
    /// to the defaults at lookup time.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let text = std::fs::read_to_string(path)?;
        ron::from_str(&text).map_err(|e| ThemeError::Parse(e.to_string()))
    }

    /// Save the theme as pretty-printed RON.
    pub fn save(&self, path: &Path) -> Result<(), ThemeError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ThemeError::Parse(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
