//! Per-view style tracking
//!
//! A [`ViewStyleDelegate`] follows its view's attach state. While the view is
//! attached it listens for theme switches and re-applies the view's style
//! group whenever the resolved style changes. It only holds a weak reference
//! to the view, so it never keeps a detached view alive.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::trace;

use crate::host::{OnAttachStateChangeListener, View};
use crate::manager::{OnThemeChangedListener, ThemeChangedEvent, ThemeManager};
use crate::style::{StyleGroupId, StyleRes};

/// Lifecycle state of a delegate
///
/// The state records whether the delegate is subscribed, not whether a style
/// has landed on the view. A styled delegate whose view has been collected,
/// or whose group resolves to [`StyleRes::UNDEFINED`], is still
/// `AttachedStyled`; it picks up the style on the next switch that resolves
/// one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelegateState {
    /// View not in the hierarchy (initial state)
    Detached,
    /// View attached with no style group. Nothing is registered or resolved
    /// until the next attach.
    AttachedUnstyled,
    /// View attached and registered for theme switches
    AttachedStyled,
}

struct DelegateInner {
    state: DelegateState,
    /// Last style handed to the styler
    current_style: StyleRes,
}

/// Keeps one view's style in sync with the current theme
pub struct ViewStyleDelegate {
    this: Weak<ViewStyleDelegate>,
    manager: Arc<ThemeManager>,
    view: Weak<dyn View>,
    style_group: StyleGroupId,
    inner: Mutex<DelegateInner>,
}

impl ViewStyleDelegate {
    /// Create a detached delegate for `view`.
    ///
    /// The host must forward the view's attach/detach events to it, usually
    /// through [`View::add_on_attach_state_change_listener`].
    pub fn new(
        manager: Arc<ThemeManager>,
        view: &Arc<dyn View>,
        style_group: StyleGroupId,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            manager,
            view: Arc::downgrade(view),
            style_group,
            inner: Mutex::new(DelegateInner {
                state: DelegateState::Detached,
                current_style: StyleRes::UNDEFINED,
            }),
        })
    }

    pub fn style_group(&self) -> StyleGroupId {
        self.style_group
    }

    pub fn state(&self) -> DelegateState {
        self.inner().state
    }

    /// The style last applied to the view
    pub fn current_style(&self) -> StyleRes {
        self.inner().current_style
    }

    /// Check whether the view is still alive
    pub fn has_view(&self) -> bool {
        self.view.strong_count() > 0
    }

    /// Resolve the style for the current theme and apply it if it changed
    fn refresh(&self) {
        let Some(view) = self.view.upgrade() else {
            return;
        };

        let context = view.context();
        let style = self
            .manager
            .current_style(context.as_deref(), self.style_group);

        {
            let mut inner = self.inner();
            if inner.current_style == style {
                return;
            }
            inner.current_style = style;
        }

        trace!(
            "ViewStyleDelegate: group {} -> style {}",
            self.style_group.0,
            style.0
        );
        self.manager.apply_style(view.as_ref(), style);
    }

    fn inner(&self) -> MutexGuard<'_, DelegateInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OnThemeChangedListener for ViewStyleDelegate {
    fn on_theme_changed(&self, _event: &ThemeChangedEvent) {
        self.refresh();
    }
}

impl OnAttachStateChangeListener for ViewStyleDelegate {
    fn on_view_attached_to_window(&self, _view: &dyn View) {
        if self.style_group.is_none() {
            self.inner().state = DelegateState::AttachedUnstyled;
            return;
        }

        if let Some(this) = self.this.upgrade() {
            self.manager.register_on_theme_changed_listener(this);
        }
        self.inner().state = DelegateState::AttachedStyled;
        self.refresh();
    }

    fn on_view_detached_from_window(&self, _view: &dyn View) {
        if !self.style_group.is_none() {
            self.manager.unregister_on_theme_changed_listener(self);
        }
        self.inner().state = DelegateState::Detached;
    }
}
