//! Declared view attributes and style group extraction

use smallvec::SmallVec;

use crate::host::ResourceContext;
use crate::style::{AttrId, StyleGroupId, StyleRes};

/// Attributes declared on a view in markup, as raw resource references
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet {
    values: SmallVec<[(AttrId, u32); 4]>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, attr: AttrId, value: u32) -> Self {
        self.set(attr, value);
        self
    }

    /// Set an attribute, replacing any earlier value
    pub fn set(&mut self, attr: AttrId, value: u32) {
        match self.values.iter_mut().find(|(id, _)| *id == attr) {
            Some(slot) => slot.1 = value,
            None => self.values.push((attr, value)),
        }
    }

    pub fn get(&self, attr: AttrId) -> Option<u32> {
        self.values
            .iter()
            .find(|(id, _)| *id == attr)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttrId, u32)> + '_ {
        self.values.iter().copied()
    }
}

impl FromIterator<(AttrId, u32)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (AttrId, u32)>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for (attr, value) in iter {
            set.set(attr, value);
        }
        set
    }
}

/// Read the style group a view declares through `style_attr`.
///
/// Resolution goes through the host so default styles apply: the declared
/// set first, then the style `def_style_attr` points at, then `def_style_res`.
/// Returns [`StyleGroupId::NONE`] when nothing is declared or no context is
/// available.
pub fn get_style_id(
    context: Option<&dyn ResourceContext>,
    attrs: &AttributeSet,
    style_attr: AttrId,
    def_style_attr: AttrId,
    def_style_res: StyleRes,
) -> StyleGroupId {
    context
        .and_then(|ctx| ctx.resolve_attribute(attrs, style_attr, def_style_attr, def_style_res))
        .map(StyleGroupId)
        .unwrap_or(StyleGroupId::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeResources;
    use pretty_assertions::assert_eq;

    const DEFAULT_STYLE_ATTR: AttrId = AttrId(40);
    const BUTTON_STYLE: StyleRes = StyleRes(500);
    const FALLBACK_STYLE: StyleRes = StyleRes(501);

    #[test]
    fn test_attribute_set() {
        let mut attrs = AttributeSet::new().with(AttrId::STYLE, 100).with(AttrId(2), 7);
        attrs.set(AttrId::STYLE, 101);

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get(AttrId::STYLE), Some(101));
        assert_eq!(attrs.get(AttrId(3)), None);
        assert_eq!(
            attrs.iter().collect::<Vec<_>>(),
            vec![(AttrId::STYLE, 101), (AttrId(2), 7)]
        );
    }

    #[test]
    fn test_declared_attribute_wins() {
        let resources = FakeResources::new()
            .with_theme_attr(DEFAULT_STYLE_ATTR, BUTTON_STYLE)
            .with_style_attr(BUTTON_STYLE, AttrId::STYLE, 200);
        let attrs = AttributeSet::new().with(AttrId::STYLE, 100);

        let group = get_style_id(
            Some(&resources),
            &attrs,
            AttrId::STYLE,
            DEFAULT_STYLE_ATTR,
            StyleRes::UNDEFINED,
        );
        assert_eq!(group, StyleGroupId(100));
    }

    #[test]
    fn test_default_styles_fill_in() {
        let resources = FakeResources::new()
            .with_theme_attr(DEFAULT_STYLE_ATTR, BUTTON_STYLE)
            .with_style_attr(BUTTON_STYLE, AttrId::STYLE, 200)
            .with_style_attr(FALLBACK_STYLE, AttrId::STYLE, 300);
        let attrs = AttributeSet::new();

        let from_attr = get_style_id(
            Some(&resources),
            &attrs,
            AttrId::STYLE,
            DEFAULT_STYLE_ATTR,
            FALLBACK_STYLE,
        );
        assert_eq!(from_attr, StyleGroupId(200));

        let from_res = get_style_id(
            Some(&resources),
            &attrs,
            AttrId::STYLE,
            AttrId::NONE,
            FALLBACK_STYLE,
        );
        assert_eq!(from_res, StyleGroupId(300));
    }

    #[test]
    fn test_absent_is_none() {
        let resources = FakeResources::new();
        let attrs = AttributeSet::new().with(AttrId(9), 100);

        let group = get_style_id(
            Some(&resources),
            &attrs,
            AttrId::STYLE,
            AttrId::NONE,
            StyleRes::UNDEFINED,
        );
        assert_eq!(group, StyleGroupId::NONE);

        let attrs = AttributeSet::new().with(AttrId::STYLE, 100);
        let group = get_style_id(None, &attrs, AttrId::STYLE, AttrId::NONE, StyleRes::UNDEFINED);
        assert_eq!(group, StyleGroupId::NONE);
    }
}
