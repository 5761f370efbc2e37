//! In-memory host doubles for unit tests

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::attrs::AttributeSet;
use crate::host::{OnAttachStateChangeListener, ResourceContext, View};
use crate::style::{AttrId, StyleGroupId, StyleRes};

#[derive(Default)]
pub(crate) struct FakeResources {
    groups: FxHashMap<StyleGroupId, Vec<StyleRes>>,
    theme_attrs: AttributeSet,
    style_attrs: FxHashMap<StyleRes, AttributeSet>,
    array_loads: AtomicUsize,
}

impl FakeResources {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_group(mut self, group: StyleGroupId, styles: &[u32]) -> Self {
        self.groups
            .insert(group, styles.iter().copied().map(StyleRes).collect());
        self
    }

    pub(crate) fn with_theme_attr(mut self, attr: AttrId, style: StyleRes) -> Self {
        self.theme_attrs.set(attr, style.0);
        self
    }

    pub(crate) fn with_style_attr(mut self, style: StyleRes, attr: AttrId, value: u32) -> Self {
        self.style_attrs.entry(style).or_default().set(attr, value);
        self
    }

    pub(crate) fn array_loads(&self) -> usize {
        self.array_loads.load(Ordering::SeqCst)
    }

    fn style_attr(&self, style: StyleRes, attr: AttrId) -> Option<u32> {
        self.style_attrs.get(&style).and_then(|attrs| attrs.get(attr))
    }
}

impl ResourceContext for FakeResources {
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
        attrs
            .get(attr)
            .or_else(|| {
                self.theme_attrs
                    .get(def_style_attr)
                    .and_then(|style| self.style_attr(StyleRes(style), attr))
            })
            .or_else(|| self.style_attr(def_style_res, attr))
    }
}

/// Records every style applied through its own primitive
pub(crate) struct FakeView {
    context: Option<Arc<FakeResources>>,
    applied: Mutex<Vec<StyleRes>>,
    listeners: Mutex<Vec<Arc<dyn OnAttachStateChangeListener>>>,
}

impl FakeView {
    pub(crate) fn new(context: Option<Arc<FakeResources>>) -> Self {
        Self {
            context,
            applied: Mutex::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn applied(&self) -> Vec<StyleRes> {
        self.applied.lock().unwrap().clone()
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    pub(crate) fn attach(&self) {
        let listeners = self.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener.on_view_attached_to_window(self);
        }
    }

    pub(crate) fn detach(&self) {
        let listeners = self.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener.on_view_detached_from_window(self);
        }
    }
}

impl View for FakeView {
    fn context(&self) -> Option<Arc<dyn ResourceContext>> {
        self.context
            .clone()
            .map(|ctx| ctx as Arc<dyn ResourceContext>)
    }

    fn apply_style_resource(&self, style: StyleRes) {
        self.applied.lock().unwrap().push(style);
    }

    fn add_on_attach_state_change_listener(&self, listener: Arc<dyn OnAttachStateChangeListener>) {
        self.listeners.lock().unwrap().push(listener);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A second view type for type-specific styler dispatch
#[derive(Default)]
pub(crate) struct LabelView {
    label_style: Mutex<StyleRes>,
}

impl LabelView {
    pub(crate) fn label_style(&self) -> StyleRes {
        *self.label_style.lock().unwrap()
    }

    pub(crate) fn set_label_style(&self, style: StyleRes) {
        *self.label_style.lock().unwrap() = style;
    }
}

impl View for LabelView {
    fn context(&self) -> Option<Arc<dyn ResourceContext>> {
        None
    }

    fn apply_style_resource(&self, _style: StyleRes) {}

    fn add_on_attach_state_change_listener(&self, _listener: Arc<dyn OnAttachStateChangeListener>) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}
