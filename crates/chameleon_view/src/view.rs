//! View types of the reference host
//!
//! [`ViewNode`] holds the state every view shares: identity, resources,
//! attach listeners, the merged appearance, and a log of applied styles.
//! [`BasicView`] is a plain view; [`TextView`] adds text properties and has
//! its own styler, [`TextViewStyler`].

use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chameleon_theme::{OnAttachStateChangeListener, ResourceContext, StyleRes, Styler, View};
use tracing::trace;

use crate::resources::{ResourceTable, StyleProps};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Unique view identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        ViewId(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A view that can live in a [`Window`](crate::Window)
pub trait Widget: View {
    fn node(&self) -> &ViewNode;

    fn as_view(&self) -> &dyn View;
}

/// State shared by every view type
pub struct ViewNode {
    id: ViewId,
    tag: Option<String>,
    resources: Option<Arc<ResourceTable>>,
    attached: AtomicBool,
    listeners: Mutex<Vec<Arc<dyn OnAttachStateChangeListener>>>,
    appearance: Mutex<StyleProps>,
    applied: Mutex<Vec<StyleRes>>,
}

impl ViewNode {
    pub fn new(resources: Option<Arc<ResourceTable>>) -> Self {
        Self {
            id: ViewId::next(),
            tag: None,
            resources,
            attached: AtomicBool::new(false),
            listeners: Mutex::new(Vec::new()),
            appearance: Mutex::new(StyleProps::default()),
            applied: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// Current merged appearance
    pub fn appearance(&self) -> StyleProps {
        lock(&self.appearance).clone()
    }

    /// Every style applied to this view, oldest first
    pub fn applied_styles(&self) -> Vec<StyleRes> {
        lock(&self.applied).clone()
    }

    /// Merge a style into the appearance and log it.
    ///
    /// Returns the style's properties, or None if the style is not declared.
    pub fn merge_style(&self, style: StyleRes) -> Option<StyleProps> {
        lock(&self.applied).push(style);

        let props = self.resources.as_ref()?.style_props(style)?.clone();
        props.merge_into(&mut lock(&self.appearance));
        trace!("ViewNode {:?}: merged style {}", self.id, style.0);
        Some(props)
    }

    fn add_listener(&self, listener: Arc<dyn OnAttachStateChangeListener>) {
        lock(&self.listeners).push(listener);
    }

    fn context(&self) -> Option<Arc<dyn ResourceContext>> {
        self.resources
            .clone()
            .map(|resources| resources as Arc<dyn ResourceContext>)
    }

    /// Mark attached and notify listeners. No-op if already attached.
    pub(crate) fn dispatch_attached(&self, view: &dyn View) {
        if self.attached.swap(true, Ordering::SeqCst) {
            return;
        }
        let listeners = lock(&self.listeners).clone();
        for listener in listeners {
            listener.on_view_attached_to_window(view);
        }
    }

    /// Mark detached and notify listeners. No-op if not attached.
    pub(crate) fn dispatch_detached(&self, view: &dyn View) {
        if !self.attached.swap(false, Ordering::SeqCst) {
            return;
        }
        let listeners = lock(&self.listeners).clone();
        for listener in listeners {
            listener.on_view_detached_from_window(view);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A plain view
pub struct BasicView {
    node: ViewNode,
}

impl BasicView {
    pub fn new(node: ViewNode) -> Self {
        Self { node }
    }
}

impl View for BasicView {
    fn context(&self) -> Option<Arc<dyn ResourceContext>> {
        self.node.context()
    }

    fn apply_style_resource(&self, style: StyleRes) {
        self.node.merge_style(style);
    }

    fn add_on_attach_state_change_listener(&self, listener: Arc<dyn OnAttachStateChangeListener>) {
        self.node.add_listener(listener);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Widget for BasicView {
    fn node(&self) -> &ViewNode {
        &self.node
    }

    fn as_view(&self) -> &dyn View {
        self
    }
}

/// Text-specific appearance
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextAppearance {
    pub color: Option<String>,
    pub size: Option<f32>,
    pub typeface: Option<String>,
}

/// A view that displays text
pub struct TextView {
    node: ViewNode,
    text: Mutex<String>,
    text_appearance: Mutex<TextAppearance>,
}

impl TextView {
    pub fn new(node: ViewNode, text: impl Into<String>) -> Self {
        Self {
            node,
            text: Mutex::new(text.into()),
            text_appearance: Mutex::new(TextAppearance::default()),
        }
    }

    pub fn text(&self) -> String {
        lock(&self.text).clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *lock(&self.text) = text.into();
    }

    pub fn text_appearance(&self) -> TextAppearance {
        lock(&self.text_appearance).clone()
    }

    fn apply_text_props(&self, props: &StyleProps) {
        let mut appearance = lock(&self.text_appearance);
        if let Some(color) = &props.text_color {
            appearance.color = Some(color.clone());
        }
        if let Some(size) = props.text_size {
            appearance.size = Some(size);
        }
        if let Some(typeface) = &props.typeface {
            appearance.typeface = Some(typeface.clone());
        }
    }
}

impl View for TextView {
    fn context(&self) -> Option<Arc<dyn ResourceContext>> {
        self.node.context()
    }

    fn apply_style_resource(&self, style: StyleRes) {
        self.node.merge_style(style);
    }

    fn add_on_attach_state_change_listener(&self, listener: Arc<dyn OnAttachStateChangeListener>) {
        self.node.add_listener(listener);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Widget for TextView {
    fn node(&self) -> &ViewNode {
        &self.node
    }

    fn as_view(&self) -> &dyn View {
        self
    }
}

/// Applies both the shared and the text properties of a style
#[derive(Clone, Copy, Debug, Default)]
pub struct TextViewStyler;

impl Styler<TextView> for TextViewStyler {
    fn apply_style(&self, view: &TextView, style: StyleRes) {
        if let Some(props) = view.node.merge_style(style) {
            view.apply_text_props(&props);
        }
    }
}
