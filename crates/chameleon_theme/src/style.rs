//! Resource identifiers and the style group cache
//!
//! A style group is a declared array of style resources, one per theme.
//! [`StyleTable`] loads each group's array from the host the first time it is
//! asked for and keeps it for the lifetime of the table.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::host::ResourceContext;

/// Index of a theme (`0` is the first declared theme)
pub type ThemeIndex = u32;

/// Identifier of a declared style group
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleGroupId(pub u32);

impl StyleGroupId {
    /// No style group. Views carrying it are never tracked.
    pub const NONE: StyleGroupId = StyleGroupId(0);

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Identifier of a concrete style resource in the host's resource system
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleRes(pub u32);

impl StyleRes {
    /// Sentinel for "no style". Applying it is a no-op.
    pub const UNDEFINED: StyleRes = StyleRes(0);

    pub const fn is_undefined(self) -> bool {
        self.0 == 0
    }
}

/// Identifier of an attribute in a view's declared attribute set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrId(pub u32);

impl AttrId {
    pub const NONE: AttrId = AttrId(0);
    /// The attribute slot that carries a view's style group by default
    pub const STYLE: AttrId = AttrId(1);

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Per-theme style resources of one group, indexed by [`ThemeIndex`]
pub type StyleList = Arc<[StyleRes]>;

/// Cache of style lists keyed by style group
#[derive(Default)]
pub struct StyleTable {
    lists: RwLock<FxHashMap<StyleGroupId, StyleList>>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the style array declared for `group` from the host.
    ///
    /// Returns `None` when no context is available. A group the host does not
    /// declare loads as an empty list.
    pub fn load_style_list(
        context: Option<&dyn ResourceContext>,
        group: StyleGroupId,
    ) -> Option<StyleList> {
        let context = context?;
        let styles = context.style_array(group).unwrap_or_default();
        debug!(
            "StyleTable::load_style_list: group {} -> {} styles",
            group.0,
            styles.len()
        );
        Some(styles.into())
    }

    /// Get the cached list for `group`, loading it on first access.
    ///
    /// A load that fails for lack of a context is not cached, so a later
    /// lookup with a context can still fill the entry.
    pub fn get_style_list(
        &self,
        context: Option<&dyn ResourceContext>,
        group: StyleGroupId,
    ) -> Option<StyleList> {
        if let Some(list) = self.read().get(&group) {
            return Some(Arc::clone(list));
        }

        let list = Self::load_style_list(context, group)?;
        Some(Arc::clone(self.write().entry(group).or_insert(list)))
    }

    /// Check whether `group` has already been loaded
    pub fn contains(&self, group: StyleGroupId) -> bool {
        self.read().contains_key(&group)
    }

    /// Number of loaded groups
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, FxHashMap<StyleGroupId, StyleList>> {
        self.lists.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FxHashMap<StyleGroupId, StyleList>> {
        self.lists.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeResources;

    const GROUP: StyleGroupId = StyleGroupId(100);

    #[test]
    fn test_sentinels() {
        assert!(StyleGroupId::NONE.is_none());
        assert!(!GROUP.is_none());
        assert!(StyleRes::UNDEFINED.is_undefined());
        assert!(!StyleRes(7).is_undefined());
        assert_eq!(StyleRes::default(), StyleRes::UNDEFINED);
    }

    #[test]
    fn test_list_loaded_once() {
        let resources = FakeResources::new().with_group(GROUP, &[11, 12]);
        let table = StyleTable::new();

        for _ in 0..5 {
            let list = table.get_style_list(Some(&resources), GROUP).unwrap();
            assert_eq!(&*list, &[StyleRes(11), StyleRes(12)]);
        }

        assert_eq!(resources.array_loads(), 1);
        assert!(table.contains(GROUP));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_context_not_cached() {
        let resources = FakeResources::new().with_group(GROUP, &[11]);
        let table = StyleTable::new();

        assert!(table.get_style_list(None, GROUP).is_none());
        assert!(table.is_empty());

        let list = table.get_style_list(Some(&resources), GROUP).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_undeclared_group_cached_empty() {
        let resources = FakeResources::new();
        let table = StyleTable::new();

        assert!(table.get_style_list(Some(&resources), GROUP).unwrap().is_empty());
        assert!(table.get_style_list(Some(&resources), GROUP).unwrap().is_empty());
        assert_eq!(resources.array_loads(), 1);
    }
}
