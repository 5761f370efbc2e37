//! Hook for the host's view construction pipeline
//!
//! The host installs a [`StyledViewFactory`] where it builds views from
//! markup and calls [`on_view_created`](StyledViewFactory::on_view_created)
//! for each new view. The factory reads the view's style group and hooks a
//! [`ViewStyleDelegate`] into the view's attach/detach events.

use std::sync::Arc;

use tracing::trace;

use crate::attrs::AttributeSet;
use crate::delegate::ViewStyleDelegate;
use crate::error::{Result, ThemeError};
use crate::host::{FactoryHost, View};
use crate::manager::ThemeManager;
use crate::style::{AttrId, StyleRes};

pub struct StyledViewFactory {
    manager: Arc<ThemeManager>,
}

impl StyledViewFactory {
    pub fn new(manager: Arc<ThemeManager>) -> Self {
        Self { manager }
    }

    /// Get the factory `host` installed.
    ///
    /// Fails with [`ThemeError::HostNotWrapped`] if the host never installed
    /// one. Styled views would silently stop following the theme otherwise.
    pub fn from_host(host: &dyn FactoryHost) -> Result<Arc<StyledViewFactory>> {
        host.view_factory()
            .and_then(|factory| factory.downcast::<StyledViewFactory>().ok())
            .ok_or(ThemeError::HostNotWrapped)
    }

    pub fn manager(&self) -> &Arc<ThemeManager> {
        &self.manager
    }

    /// Start tracking a freshly constructed view.
    ///
    /// The returned delegate is already registered with the view; callers
    /// only need to keep it if they want to inspect it.
    pub fn on_view_created(
        &self,
        view: &Arc<dyn View>,
        attrs: &AttributeSet,
        def_style_attr: AttrId,
        def_style_res: StyleRes,
    ) -> Arc<ViewStyleDelegate> {
        let context = view.context();
        let group = self
            .manager
            .style_id(context.as_deref(), attrs, def_style_attr, def_style_res);

        let delegate = ViewStyleDelegate::new(Arc::clone(&self.manager), view, group);
        view.add_on_attach_state_change_listener(delegate.clone());
        trace!("StyledViewFactory: tracking view with group {}", group.0);
        delegate
    }
}
