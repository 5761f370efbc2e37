//! Capabilities the host UI toolkit provides
//!
//! The theming core never builds or renders views itself. It reaches the host
//! through these traits: resource lookup, the "merge a style into this view"
//! primitive, and attach/detach notifications.

use std::any::Any;
use std::sync::Arc;

use crate::attrs::AttributeSet;
use crate::style::{AttrId, StyleGroupId, StyleRes};

/// Read-only view of the host's resource system
pub trait ResourceContext: Send + Sync {
    /// The per-theme style array declared for `group`, in theme order.
    ///
    /// Returns `None` if the host declares no such group.
    fn style_array(&self, group: StyleGroupId) -> Option<Vec<StyleRes>>;

    /// Resolve `attr` to a resource reference.
    ///
    /// Precedence: the declared `attrs`, then the style the context's theme
    /// names under `def_style_attr`, then `def_style_res`.
    fn resolve_attribute(
        &self,
        attrs: &AttributeSet,
        attr: AttrId,
        def_style_attr: AttrId,
        def_style_res: StyleRes,
    ) -> Option<u32>;
}

/// A view in the host's hierarchy
pub trait View: Any + Send + Sync {
    /// Resources the view was created with, if still available
    fn context(&self) -> Option<Arc<dyn ResourceContext>>;

    /// Merge a style resource's properties into this view.
    ///
    /// Never called with [`StyleRes::UNDEFINED`].
    fn apply_style_resource(&self, style: StyleRes);

    /// Register for attach/detach notifications
    fn add_on_attach_state_change_listener(&self, listener: Arc<dyn OnAttachStateChangeListener>);

    fn as_any(&self) -> &dyn Any;
}

/// Attach/detach notifications fired by the host
pub trait OnAttachStateChangeListener: Send + Sync {
    fn on_view_attached_to_window(&self, view: &dyn View);

    fn on_view_detached_from_window(&self, view: &dyn View);
}

/// A host that may have a view factory installed in its inflation pipeline
pub trait FactoryHost {
    fn view_factory(&self) -> Option<Arc<dyn Any + Send + Sync>>;
}
