use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Narrowest rendering width accepted by [`RenderConfig::validate`]
pub const MIN_WIDTH: u32 = 1;
/// Widest rendering width accepted by [`RenderConfig::validate`]
pub const MAX_WIDTH: u32 = 1000;

/// Name of the font compiled into the renderer
pub const STANDARD_FONT: &str = "Standard";

/// How glyphs are joined horizontally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalLayout {
    /// Whatever the font's header asks for (controlled smushing for Standard)
    #[default]
    Default,
    /// Every glyph at its full designed width
    Full,
    /// Glyphs slide together until they touch
    Fitted,
    /// Glyphs overlap by one column where the smushing rules allow it
    Smushed,
}

impl HorizontalLayout {
    /// All layouts, in the order offered to the user
    pub fn all() -> &'static [HorizontalLayout] {
        &[
            HorizontalLayout::Default,
            HorizontalLayout::Full,
            HorizontalLayout::Fitted,
            HorizontalLayout::Smushed,
        ]
    }

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            HorizontalLayout::Default => "Default",
            HorizontalLayout::Full => "Full",
            HorizontalLayout::Fitted => "Fitted",
            HorizontalLayout::Smushed => "Smushed",
        }
    }
}

/// Parameters handed to the glyph renderer for every line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Font name as listed by the renderer
    pub font: String,
    pub horizontal_layout: HorizontalLayout,
    /// Maximum output width in columns before a line wraps
    pub width: u32,
    /// Wrap between words instead of between characters
    pub whitespace_break: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font: STANDARD_FONT.to_string(),
            horizontal_layout: HorizontalLayout::Default,
            width: 80,
            whitespace_break: true,
        }
    }
}

impl RenderConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.font.trim().is_empty() {
            return Err(ConfigError::Invalid("font must not be empty".to_string()));
        }
        if self.width < MIN_WIDTH || self.width > MAX_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "width must be between {} and {}, got {}",
                MIN_WIDTH, MAX_WIDTH, self.width
            )));
        }
        Ok(())
    }
}

/// Presentation switches applied to rendered art without touching the cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub high_contrast: bool,
    pub remove_line_spacing: bool,
}

/// Maximum accepted input length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputLimit {
    /// 50 characters, enough for a signature
    #[default]
    Signature,
    /// 200 characters for multi-line banners
    Banner,
}

impl InputLimit {
    pub fn max_chars(&self) -> usize {
        match self {
            InputLimit::Signature => 50,
            InputLimit::Banner => 200,
        }
    }
}

/// User settings, read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_limit: InputLimit,
    /// Re-render automatically when a render option changes
    pub auto_render: bool,
    /// Initial render parameters
    pub render: RenderConfig,
    /// Initial display options
    pub display: DisplayOptions,
}

impl Settings {
    /// Default location: `<config dir>/ascii-sig/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ascii-sig").join("config.toml"))
    }

    /// Load settings from the default location, falling back to defaults
    /// when the file does not exist
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate settings from a TOML file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()
    }
}
