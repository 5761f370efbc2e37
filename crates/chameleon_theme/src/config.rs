//! Theme configuration (theme.toml)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::style::{AttrId, ThemeIndex};

/// Settings the theme registry is created with
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Attribute that carries a view's style group
    #[serde(default = "default_style_attr")]
    pub style_attr: AttrId,
    /// Theme selected at startup
    #[serde(default)]
    pub default_theme: ThemeIndex,
}

fn default_style_attr() -> AttrId {
    AttrId::STYLE
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            style_attr: default_style_attr(),
            default_theme: 0,
        }
    }
}

impl ThemeConfig {
    /// Parse a config from TOML source
    pub fn from_toml_str(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    /// Read and parse a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let src = fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    pub fn with_style_attr(mut self, attr: AttrId) -> Self {
        self.style_attr = attr;
        self
    }

    pub fn with_default_theme(mut self, theme: ThemeIndex) -> Self {
        self.default_theme = theme;
        self
    }
}
