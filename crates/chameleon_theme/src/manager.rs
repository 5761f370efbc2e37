//! Process-wide theme registry
//!
//! [`ThemeManager`] owns the current theme index, the style group cache, the
//! registered theme listeners, and the styler registry.
//!
//! - The theme index can be read from any thread without locking.
//! - Switching themes and fanning out the change happen on the UI thread only.
//!   Calls from other threads are rejected rather than executed.
//! - Fan-out is synchronous. Every listener has seen the change before
//!   [`set_current_theme`](ThemeManager::set_current_theme) returns.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread::{self, ThreadId};

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::attrs::{get_style_id, AttributeSet};
use crate::config::ThemeConfig;
use crate::host::{ResourceContext, View};
use crate::style::{AttrId, StyleGroupId, StyleRes, StyleTable, ThemeIndex};
use crate::styler::{Styler, StylerRegistry};

/// Global theme manager instance
static THEME_MANAGER: OnceLock<Arc<ThemeManager>> = OnceLock::new();

/// Emitted once per applied theme switch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeChangedEvent {
    theme: ThemeIndex,
}

impl ThemeChangedEvent {
    pub const fn new(theme: ThemeIndex) -> Self {
        Self { theme }
    }

    /// The theme that is now current
    pub const fn theme(&self) -> ThemeIndex {
        self.theme
    }
}

/// Receives theme switches. Called on the UI thread.
pub trait OnThemeChangedListener: Send + Sync {
    fn on_theme_changed(&self, event: &ThemeChangedEvent);
}

/// Theme registry shared by every styled view
pub struct ThemeManager {
    config: ThemeConfig,
    /// Unset until bound by construction, `init`, or the first switch
    ui_thread: OnceLock<ThreadId>,
    current_theme: AtomicU32,
    styles: StyleTable,
    listeners: Mutex<Vec<Arc<dyn OnThemeChangedListener>>>,
    stylers: StylerRegistry,
}

impl ThemeManager {
    /// Create a manager whose UI thread is the calling thread
    pub fn new(config: ThemeConfig) -> Self {
        Self::with_ui_thread(config, thread::current().id())
    }

    /// Create a manager bound to an explicit UI thread
    pub fn with_ui_thread(config: ThemeConfig, ui_thread: ThreadId) -> Self {
        let manager = Self::unbound(config);
        let _ = manager.ui_thread.set(ui_thread);
        manager
    }

    /// A manager with no UI thread yet
    fn unbound(config: ThemeConfig) -> Self {
        Self {
            current_theme: AtomicU32::new(config.default_theme),
            config,
            ui_thread: OnceLock::new(),
            styles: StyleTable::new(),
            listeners: Mutex::new(Vec::new()),
            stylers: StylerRegistry::new(),
        }
    }

    /// Initialize the global manager from the UI thread.
    ///
    /// Safe to call multiple times; the first initialization wins. Binds the
    /// calling thread as the UI thread unless one is already bound.
    pub fn init(config: ThemeConfig) -> &'static Arc<ThemeManager> {
        let manager = THEME_MANAGER.get_or_init(|| Arc::new(Self::unbound(config)));
        manager.bind_ui_thread();
        manager
    }

    /// Get the global manager, creating it with the default config on first
    /// access.
    ///
    /// Does not bind a UI thread, so readers on any thread may touch it
    /// first. Without [`init`](Self::init), the first thread to call
    /// [`set_current_theme`](Self::set_current_theme) becomes the UI thread.
    pub fn get() -> &'static Arc<ThemeManager> {
        THEME_MANAGER.get_or_init(|| Arc::new(Self::unbound(ThemeConfig::default())))
    }

    /// Try to get the global manager (returns None if not initialized)
    pub fn try_get() -> Option<&'static Arc<ThemeManager>> {
        THEME_MANAGER.get()
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Check if the calling thread is the manager's UI thread.
    ///
    /// False while no UI thread is bound.
    pub fn is_ui_thread(&self) -> bool {
        self.ui_thread.get() == Some(&thread::current().id())
    }

    fn bind_ui_thread(&self) -> ThreadId {
        *self.ui_thread.get_or_init(|| {
            debug!("ThemeManager: bound UI thread {:?}", thread::current().id());
            thread::current().id()
        })
    }

    // ========== Theme ==========

    /// Get the current theme index
    pub fn current_theme(&self) -> ThemeIndex {
        self.current_theme.load(Ordering::Acquire)
    }

    /// Switch to `theme` and notify every listener.
    ///
    /// Returns false without doing anything when called off the UI thread or
    /// when `theme` is already current. Binds the calling thread as the UI
    /// thread if none is bound yet.
    pub fn set_current_theme(&self, theme: ThemeIndex) -> bool {
        if self.bind_ui_thread() != thread::current().id() {
            warn!(
                "ThemeManager::set_current_theme({}) called off the UI thread; ignored",
                theme
            );
            return false;
        }

        let previous = self.current_theme.swap(theme, Ordering::AcqRel);
        if previous == theme {
            return false;
        }

        debug!("ThemeManager::set_current_theme: {} -> {}", previous, theme);
        self.dispatch_theme_changed(theme);
        true
    }

    /// Notify listeners, most recently registered first.
    ///
    /// Iterates a snapshot so callbacks may register or unregister listeners.
    /// A listener removed by an earlier callback is skipped; one added during
    /// the pass is first notified on the next change.
    fn dispatch_theme_changed(&self, theme: ThemeIndex) {
        let event = ThemeChangedEvent::new(theme);
        let snapshot: SmallVec<[Arc<dyn OnThemeChangedListener>; 8]> =
            self.listeners().iter().cloned().collect();

        for listener in snapshot.iter().rev() {
            if !self.is_registered(listener.as_ref()) {
                continue;
            }
            trace!("ThemeManager: notifying listener of theme {}", theme);
            listener.on_theme_changed(&event);
        }
    }

    // ========== Styles ==========

    /// Resolve `group` for the current theme
    pub fn current_style(
        &self,
        context: Option<&dyn ResourceContext>,
        group: StyleGroupId,
    ) -> StyleRes {
        self.style(context, group, self.current_theme())
    }

    /// Resolve `group` for `theme`.
    ///
    /// Returns [`StyleRes::UNDEFINED`] if the group is unknown, no context is
    /// available, or the group declares no style for `theme`.
    pub fn style(
        &self,
        context: Option<&dyn ResourceContext>,
        group: StyleGroupId,
        theme: ThemeIndex,
    ) -> StyleRes {
        if group.is_none() {
            return StyleRes::UNDEFINED;
        }

        let Some(list) = self.styles.get_style_list(context, group) else {
            return StyleRes::UNDEFINED;
        };

        match list.get(theme as usize) {
            Some(style) => *style,
            None if list.is_empty() => StyleRes::UNDEFINED,
            None => {
                warn!(
                    "ThemeManager::style: group {} declares {} styles, theme {} out of range",
                    group.0,
                    list.len(),
                    theme
                );
                StyleRes::UNDEFINED
            }
        }
    }

    /// Read a view's style group using the configured style attribute
    pub fn style_id(
        &self,
        context: Option<&dyn ResourceContext>,
        attrs: &AttributeSet,
        def_style_attr: AttrId,
        def_style_res: StyleRes,
    ) -> StyleGroupId {
        get_style_id(
            context,
            attrs,
            self.config.style_attr,
            def_style_attr,
            def_style_res,
        )
    }

    /// The style group cache
    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    // ========== Listeners ==========

    /// Register a listener. Registering the same listener twice is a no-op.
    pub fn register_on_theme_changed_listener(&self, listener: Arc<dyn OnThemeChangedListener>) {
        let mut listeners = self.listeners();
        if listeners
            .iter()
            .any(|l| same_listener(l.as_ref(), listener.as_ref()))
        {
            return;
        }
        listeners.push(listener);
        debug!("ThemeManager: listener registered ({} total)", listeners.len());
    }

    /// Unregister a listener. Unknown listeners are ignored.
    pub fn unregister_on_theme_changed_listener(&self, listener: &dyn OnThemeChangedListener) {
        let mut listeners = self.listeners();
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l.as_ref(), listener));
        if listeners.len() != before {
            debug!(
                "ThemeManager: listener unregistered ({} total)",
                listeners.len()
            );
        }
    }

    /// Check whether `listener` is currently registered
    pub fn is_registered(&self, listener: &dyn OnThemeChangedListener) -> bool {
        self.listeners()
            .iter()
            .any(|l| same_listener(l.as_ref(), listener))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<Arc<dyn OnThemeChangedListener>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Stylers ==========

    /// Style views of type `V` with `styler` instead of their own primitive
    pub fn register_styler<V, S>(&self, styler: S)
    where
        V: View,
        S: Styler<V> + 'static,
    {
        self.stylers.register::<V, S>(styler);
    }

    /// Apply `style` to `view` through the matching styler
    pub fn apply_style(&self, view: &dyn View, style: StyleRes) {
        self.stylers.apply(view, style);
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(ThemeConfig::default())
    }
}

/// Listener identity is the address of the listener object
fn same_listener(a: &dyn OnThemeChangedListener, b: &dyn OnThemeChangedListener) -> bool {
    addr(a) == addr(b)
}

fn addr<T: ?Sized>(value: &T) -> *const () {
    value as *const T as *const ()
}
