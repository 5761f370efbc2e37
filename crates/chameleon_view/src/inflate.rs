//! Build views from layout markup
//!
//! ```toml
//! [[views]]
//! kind = "text"
//! tag = "title"
//! text = "Hello"
//! attrs = [{ attr = 1, value = 100 }]
//!
//! [[views]]
//! kind = "view"
//! tag = "panel"
//! def_style_attr = 40
//! ```
//!
//! When a [`StyledViewFactory`] is installed every view is passed through it
//! right after construction.

use std::sync::Arc;

use chameleon_theme::{AttrId, StyleRes, StyledViewFactory, View};
use serde::Deserialize;
use tracing::debug;

use crate::error::{HostError, Result};
use crate::resources::{attribute_set, AttrDecl, ResourceTable};
use crate::view::{BasicView, TextView, ViewNode, Widget};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    View,
    Text,
}

#[derive(Debug, Deserialize)]
struct ViewDecl {
    kind: ViewKind,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    attrs: Vec<AttrDecl>,
    #[serde(default)]
    def_style_attr: AttrId,
    #[serde(default)]
    def_style_res: StyleRes,
}

#[derive(Debug, Deserialize)]
struct LayoutDocument {
    #[serde(default)]
    views: Vec<ViewDecl>,
}

/// Creates views from markup against one resource table
pub struct LayoutInflater {
    resources: Arc<ResourceTable>,
    factory: Option<Arc<StyledViewFactory>>,
}

impl LayoutInflater {
    pub fn new(resources: Arc<ResourceTable>, factory: Option<Arc<StyledViewFactory>>) -> Self {
        Self { resources, factory }
    }

    /// Parse `markup` and create its views, in declaration order
    pub fn inflate_str(&self, markup: &str) -> Result<Vec<Arc<dyn Widget>>> {
        let doc: LayoutDocument = toml::from_str(markup).map_err(HostError::Layout)?;
        debug!("LayoutInflater: inflating {} views", doc.views.len());
        Ok(doc.views.into_iter().map(|decl| self.create_view(decl)).collect())
    }

    fn create_view(&self, decl: ViewDecl) -> Arc<dyn Widget> {
        let mut node = ViewNode::new(Some(Arc::clone(&self.resources)));
        if let Some(tag) = decl.tag {
            node = node.with_tag(tag);
        }

        let (widget, view): (Arc<dyn Widget>, Arc<dyn View>) = match decl.kind {
            ViewKind::View => {
                let view = Arc::new(BasicView::new(node));
                (view.clone() as Arc<dyn Widget>, view as Arc<dyn View>)
            }
            ViewKind::Text => {
                let view = Arc::new(TextView::new(node, decl.text));
                (view.clone() as Arc<dyn Widget>, view as Arc<dyn View>)
            }
        };

        if let Some(factory) = &self.factory {
            let attrs = attribute_set(&decl.attrs);
            factory.on_view_created(&view, &attrs, decl.def_style_attr, decl.def_style_res);
        }
        widget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chameleon_theme::ThemeManager;
    use pretty_assertions::assert_eq;

    const LAYOUT: &str = r#"
        [[views]]
        kind = "text"
        tag = "title"
        text = "Hello"
        attrs = [{ attr = 1, value = 100 }]

        [[views]]
        kind = "view"
        tag = "panel"
    "#;

    #[test]
    fn test_inflate_without_factory() {
        let inflater = LayoutInflater::new(Arc::new(ResourceTable::new()), None);
        let views = inflater.inflate_str(LAYOUT).unwrap();

        let tags: Vec<_> = views.iter().map(|v| v.node().tag().map(String::from)).collect();
        assert_eq!(tags, vec![Some("title".to_string()), Some("panel".to_string())]);

        let title = views[0].as_any().downcast_ref::<TextView>().unwrap();
        assert_eq!(title.text(), "Hello");
        assert!(views[1].as_any().downcast_ref::<BasicView>().is_some());
    }

    #[test]
    fn test_factory_sees_every_view() {
        let manager = Arc::new(ThemeManager::default());
        let factory = Arc::new(StyledViewFactory::new(Arc::clone(&manager)));
        let resources = Arc::new(ResourceTable::new());
        let inflater = LayoutInflater::new(resources, Some(factory));

        let views = inflater.inflate_str(LAYOUT).unwrap();
        for view in &views {
            view.node().dispatch_attached(view.as_view());
        }

        // only the title declares a style group
        assert_eq!(manager.listener_count(), 1);
    }

    #[test]
    fn test_invalid_markup() {
        let inflater = LayoutInflater::new(Arc::new(ResourceTable::new()), None);
        let err = inflater.inflate_str("[[views]]\nkind = \"slider\"").err().unwrap();
        assert!(matches!(err, HostError::Layout(_)));
    }
}
