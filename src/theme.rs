//! Report theme: branding strings, color palette and fonts
//!
//! A theme is loaded from TOML. Every key is optional; anything a theme file
//! leaves out comes from the built-in theme, which carries the product's own
//! branding and colors.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing a theme
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse theme TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid color '{value}' for '{token}': expected six hex digits")]
    InvalidColor { token: String, value: String },
}

/// Fixed strings printed on every report
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Branding {
    /// Page header text
    pub header: String,
    /// Document title, also the first heading
    pub title: String,
    /// Output file names are `<file-prefix>-<user>.docx`
    pub file_prefix: String,
    /// Confidentiality notice in the page footer
    pub confidential: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            header: "行芯科技 | 产品验证文档".to_string(),
            title: "行芯产品验证文档".to_string(),
            file_prefix: "行芯产品验证文档".to_string(),
            confidential: "机密文件".to_string(),
        }
    }
}

/// Heading and body font families
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Fonts {
    pub heading: String,
    pub body: String,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            heading: "SimHei".to_string(),
            body: "SimSun".to_string(),
        }
    }
}

/// A theme for generated reports
#[derive(Debug, Clone)]
pub struct Theme {
    /// Optional name for the theme
    pub name: Option<String>,
    pub branding: Branding,
    pub fonts: Fonts,
    /// Color mappings: token name -> hex color without `#`
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    branding: Branding,
    #[serde(default)]
    fonts: Fonts,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Default palette
const DEFAULT_PALETTE: &str = r##"
[colors]
# Title, header branding, checklist header fill
primary = "#2E5090"
# Text on primary fills
on-primary = "#FFFFFF"
# Shading of odd checklist rows
zebra = "#F5F5F5"
# Label cells of the metadata table
label-fill = "#E8EEF7"
# Table cell borders
border = "#666666"
# Hint text in the notes section
muted = "#999999"
# Rule above the page footer
rule = "#CCCCCC"
"##;

impl Theme {
    /// Load a theme from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a theme from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        let mut colors = HashMap::with_capacity(parsed.colors.len());
        for (token, value) in parsed.colors {
            let normalized = normalize_color(&value).ok_or_else(|| ThemeError::InvalidColor {
                token: token.clone(),
                value: value.clone(),
            })?;
            colors.insert(token, normalized);
        }

        Ok(Theme {
            name: parsed.metadata.and_then(|m| m.name),
            branding: parsed.branding,
            fonts: parsed.fonts,
            colors,
        })
    }

    /// Resolve a color token defined by this theme
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a color token, falling back to the default palette and then to
    /// black
    pub fn color(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }
        if let Some(color) = Self::default().resolve(token) {
            return color.to_string();
        }
        "000000".to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        let mut theme = Self::from_str(DEFAULT_PALETTE).unwrap_or_else(|_| Theme {
            name: None,
            branding: Branding::default(),
            fonts: Fonts::default(),
            colors: HashMap::new(),
        });
        theme.name = Some("default".to_string());
        theme
    }
}

/// `#2e5090` / `2E5090` -> `2E5090`
fn normalize_color(value: &str) -> Option<String> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(hex.to_ascii_uppercase())
    } else {
        None
    }
}
