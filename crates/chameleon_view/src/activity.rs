//! A screen: resources, a window, and an optional styled view factory

use std::any::Any;
use std::sync::Arc;

use chameleon_theme::{FactoryHost, StyledViewFactory, ThemeManager};

use crate::error::Result;
use crate::inflate::LayoutInflater;
use crate::resources::ResourceTable;
use crate::view::{TextView, TextViewStyler};
use crate::window::Window;

pub struct Activity {
    resources: Arc<ResourceTable>,
    factory: Option<Arc<StyledViewFactory>>,
    window: Window,
}

impl Activity {
    /// An activity whose views are never themed
    pub fn new(resources: Arc<ResourceTable>) -> Self {
        Self {
            resources,
            factory: None,
            window: Window::new(),
        }
    }

    /// An activity whose inflater routes every view through a styled view
    /// factory bound to `manager`
    pub fn wrap(resources: Arc<ResourceTable>, manager: Arc<ThemeManager>) -> Self {
        manager.register_styler::<TextView, _>(TextViewStyler);
        Self {
            resources,
            factory: Some(Arc::new(StyledViewFactory::new(manager))),
            window: Window::new(),
        }
    }

    pub fn resources(&self) -> &Arc<ResourceTable> {
        &self.resources
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn layout_inflater(&self) -> LayoutInflater {
        LayoutInflater::new(Arc::clone(&self.resources), self.factory.clone())
    }

    /// Inflate `markup` and attach its views to the window
    pub fn set_content_view(&self, markup: &str) -> Result<()> {
        self.window.clear();
        for view in self.layout_inflater().inflate_str(markup)? {
            self.window.add_view(view);
        }
        Ok(())
    }

    /// The theme manager behind this activity's factory.
    ///
    /// Fails if the activity was not created with [`Activity::wrap`].
    pub fn theme_manager(&self) -> Result<Arc<ThemeManager>> {
        let factory = StyledViewFactory::from_host(self)?;
        Ok(Arc::clone(factory.manager()))
    }

    /// Switch between themes 0 and 1
    pub fn toggle_theme(&self) -> Result<bool> {
        let manager = self.theme_manager()?;
        let next = if manager.current_theme() == 0 { 1 } else { 0 };
        Ok(manager.set_current_theme(next))
    }
}

impl FactoryHost for Activity {
    fn view_factory(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        self.factory
            .clone()
            .map(|factory| factory as Arc<dyn Any + Send + Sync>)
    }
}
