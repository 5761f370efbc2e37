//! The display hierarchy
//!
//! Adding a view to a [`Window`] attaches it and removing it detaches it;
//! both fire the view's attach listeners.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::view::{ViewId, Widget};

#[derive(Default)]
pub struct Window {
    views: Mutex<Vec<Arc<dyn Widget>>>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `view` to the window
    pub fn add_view(&self, view: Arc<dyn Widget>) {
        self.views().push(Arc::clone(&view));
        debug!("Window: attached view {:?}", view.node().id());
        view.node().dispatch_attached(view.as_view());
    }

    /// Detach the view with `id`, returning it if it was attached
    pub fn remove_view(&self, id: ViewId) -> Option<Arc<dyn Widget>> {
        let view = {
            let mut views = self.views();
            let index = views.iter().position(|v| v.node().id() == id)?;
            views.remove(index)
        };
        debug!("Window: detached view {:?}", id);
        view.node().dispatch_detached(view.as_view());
        Some(view)
    }

    /// Detach every view, most recently added first
    pub fn clear(&self) {
        let views = std::mem::take(&mut *self.views());
        for view in views.iter().rev() {
            view.node().dispatch_detached(view.as_view());
        }
    }

    /// Find an attached view by tag
    pub fn find(&self, tag: &str) -> Option<Arc<dyn Widget>> {
        self.views()
            .iter()
            .find(|v| v.node().tag() == Some(tag))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.views().len()
    }

    pub fn is_empty(&self) -> bool {
        self.views().is_empty()
    }

    fn views(&self) -> MutexGuard<'_, Vec<Arc<dyn Widget>>> {
        self.views.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
