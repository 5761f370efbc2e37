//! Resource table loaded from TOML
//!
//! ```toml
//! # Style group 100 uses style 201 under theme 0 and 202 under theme 1
//! [[groups]]
//! id = 100
//! styles = [201, 202]
//!
//! [[styles]]
//! id = 201
//! background = "#ffffff"
//! text_color = "#202020"
//!
//! # Default style for buttons, found through attribute 40 of the theme
//! [[styles]]
//! id = 300
//! attrs = [{ attr = 1, value = 100 }]
//!
//! [[theme]]
//! attr = 40
//! style = 300
//! ```

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use chameleon_theme::{AttrId, AttributeSet, ResourceContext, StyleGroupId, StyleRes};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HostError, Result};

/// Visual properties carried by a style
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct StyleProps {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub text_size: Option<f32>,
    #[serde(default)]
    pub typeface: Option<String>,
}

impl StyleProps {
    /// Overlay the properties this style sets onto `target`
    pub fn merge_into(&self, target: &mut StyleProps) {
        if let Some(background) = &self.background {
            target.background = Some(background.clone());
        }
        if let Some(text_color) = &self.text_color {
            target.text_color = Some(text_color.clone());
        }
        if let Some(text_size) = self.text_size {
            target.text_size = Some(text_size);
        }
        if let Some(typeface) = &self.typeface {
            target.typeface = Some(typeface.clone());
        }
    }
}

/// One `attr = value` pair in a document
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub(crate) struct AttrDecl {
    pub attr: AttrId,
    pub value: u32,
}

pub(crate) fn attribute_set(decls: &[AttrDecl]) -> AttributeSet {
    decls.iter().map(|d| (d.attr, d.value)).collect()
}

#[derive(Debug, Deserialize)]
struct GroupDecl {
    id: StyleGroupId,
    styles: Vec<StyleRes>,
}

#[derive(Debug, Deserialize)]
struct StyleDecl {
    id: StyleRes,
    #[serde(default)]
    background: Option<String>,
    #[serde(default)]
    text_color: Option<String>,
    #[serde(default)]
    text_size: Option<f32>,
    #[serde(default)]
    typeface: Option<String>,
    #[serde(default)]
    attrs: Vec<AttrDecl>,
}

#[derive(Debug, Deserialize)]
struct ThemeAttrDecl {
    attr: AttrId,
    style: StyleRes,
}

#[derive(Debug, Default, Deserialize)]
struct ResourceDocument {
    #[serde(default)]
    groups: Vec<GroupDecl>,
    #[serde(default)]
    styles: Vec<StyleDecl>,
    #[serde(default)]
    theme: Vec<ThemeAttrDecl>,
}

#[derive(Clone, Debug, Default)]
struct StyleEntry {
    props: StyleProps,
    attrs: AttributeSet,
}

/// The host's resource system: style groups, styles, and theme defaults
#[derive(Debug, Default)]
pub struct ResourceTable {
    groups: FxHashMap<StyleGroupId, Vec<StyleRes>>,
    styles: FxHashMap<StyleRes, StyleEntry>,
    /// Default styles of the theme, keyed by attribute
    theme_attrs: AttributeSet,
    array_loads: AtomicUsize,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a resource document
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let doc: ResourceDocument = toml::from_str(src).map_err(HostError::Resources)?;

        let mut table = ResourceTable::new();
        for group in doc.groups {
            table.groups.insert(group.id, group.styles);
        }
        for style in doc.styles {
            let entry = StyleEntry {
                props: StyleProps {
                    background: style.background,
                    text_color: style.text_color,
                    text_size: style.text_size,
                    typeface: style.typeface,
                },
                attrs: attribute_set(&style.attrs),
            };
            table.styles.insert(style.id, entry);
        }
        for decl in doc.theme {
            table.theme_attrs.set(decl.attr, decl.style.0);
        }

        debug!(
            "ResourceTable: {} groups, {} styles",
            table.groups.len(),
            table.styles.len()
        );
        Ok(table)
    }

    /// Read and parse a resource document
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    /// Declare a style group
    pub fn with_group(mut self, group: StyleGroupId, styles: Vec<StyleRes>) -> Self {
        self.groups.insert(group, styles);
        self
    }

    /// Declare a style
    pub fn with_style(mut self, style: StyleRes, props: StyleProps) -> Self {
        self.styles.entry(style).or_default().props = props;
        self
    }

    /// Properties of a declared style
    pub fn style_props(&self, style: StyleRes) -> Option<&StyleProps> {
        self.styles.get(&style).map(|entry| &entry.props)
    }

    /// Number of style arrays handed out so far
    pub fn array_loads(&self) -> usize {
        self.array_loads.load(Ordering::SeqCst)
    }

    fn style_attr(&self, style: StyleRes, attr: AttrId) -> Option<u32> {
        self.styles.get(&style).and_then(|entry| entry.attrs.get(attr))
    }
}

impl ResourceContext for ResourceTable {
    fn style_array(&self, group: StyleGroupId) -> Option<Vec<StyleRes>> {
        self.array_loads.fetch_add(1, Ordering::SeqCst);
        self.groups.get(&group).cloned()
    }

    fn resolve_attribute(
        &self,
        attrs: &AttributeSet,
        attr: AttrId,
        def_style_attr: AttrId,
        def_style_res: StyleRes,
    ) -> Option<u32> {
        if let Some(value) = attrs.get(attr) {
            return Some(value);
        }

        let from_theme = if def_style_attr.is_none() {
            None
        } else {
            self.theme_attrs
                .get(def_style_attr)
                .and_then(|style| self.style_attr(StyleRes(style), attr))
        };

        from_theme.or_else(|| self.style_attr(def_style_res, attr))
    }
}
