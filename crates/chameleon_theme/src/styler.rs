//! Style application dispatch
//!
//! Views are styled through the handler registered for their concrete type,
//! falling back to [`ViewStyler`], which defers to the view's own
//! [`View::apply_style_resource`].

use std::any::{Any, TypeId};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::host::View;
use crate::style::StyleRes;

/// Applies a style resource to views of type `V`
pub trait Styler<V: View>: Send + Sync {
    fn apply_style(&self, view: &V, style: StyleRes);
}

/// Generic styler for any view
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewStyler;

impl ViewStyler {
    pub fn apply_style(&self, view: &dyn View, style: StyleRes) {
        view.apply_style_resource(style);
    }
}

/// Type-erased styler; returns false if the view is not the registered type
type StyleHandler = Arc<dyn Fn(&dyn View, StyleRes) -> bool + Send + Sync>;

/// Registry of stylers keyed by concrete view type
#[derive(Default)]
pub struct StylerRegistry {
    handlers: RwLock<FxHashMap<TypeId, StyleHandler>>,
    fallback: ViewStyler,
}

impl StylerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `styler` for views of type `V`, replacing any earlier one
    pub fn register<V, S>(&self, styler: S)
    where
        V: View,
        S: Styler<V> + 'static,
    {
        let handler: StyleHandler = Arc::new(move |view: &dyn View, style: StyleRes| {
            match view.as_any().downcast_ref::<V>() {
                Some(view) => {
                    styler.apply_style(view, style);
                    true
                }
                None => false,
            }
        });

        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<V>(), handler);
    }

    /// Check whether views of type `V` have a dedicated styler
    pub fn has_styler<V: View>(&self) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<V>())
    }

    /// Apply `style` to `view`. Undefined styles are skipped.
    pub fn apply(&self, view: &dyn View, style: StyleRes) {
        if style.is_undefined() {
            return;
        }

        let handler = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&Any::type_id(view.as_any()))
            .cloned();

        trace!("StylerRegistry::apply: style {}", style.0);
        match handler {
            Some(handler) if handler(view, style) => {}
            _ => self.fallback.apply_style(view, style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeView, LabelView};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStyler {
        applied: Mutex<Vec<StyleRes>>,
    }

    impl Styler<LabelView> for Arc<RecordingStyler> {
        fn apply_style(&self, view: &LabelView, style: StyleRes) {
            self.applied.lock().unwrap().push(style);
            view.set_label_style(style);
        }
    }

    #[test]
    fn test_fallback_uses_view_primitive() {
        let registry = StylerRegistry::new();
        let view = FakeView::new(None);

        registry.apply(&view, StyleRes(5));
        assert_eq!(view.applied(), vec![StyleRes(5)]);
    }

    #[test]
    fn test_type_specific_styler() {
        let registry = StylerRegistry::new();
        let styler = Arc::new(RecordingStyler::default());
        registry.register::<LabelView, _>(Arc::clone(&styler));
        assert!(registry.has_styler::<LabelView>());
        assert!(!registry.has_styler::<FakeView>());

        let label = LabelView::default();
        let plain = FakeView::new(None);
        registry.apply(&label, StyleRes(8));
        registry.apply(&plain, StyleRes(9));

        assert_eq!(*styler.applied.lock().unwrap(), vec![StyleRes(8)]);
        assert_eq!(label.label_style(), StyleRes(8));
        assert_eq!(plain.applied(), vec![StyleRes(9)]);
    }

    #[test]
    fn test_undefined_is_noop() {
        let registry = StylerRegistry::new();
        let view = FakeView::new(None);

        registry.apply(&view, StyleRes::UNDEFINED);
        assert!(view.applied().is_empty());
    }
}
