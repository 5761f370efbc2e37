//! Chameleon Theming Core
//!
//! Runtime-switchable theming for an existing view hierarchy. Views declare a
//! *style group* (one style resource per theme) in markup; when the app
//! switches theme, every attached view re-applies the matching style.
//!
//! # Overview
//!
//! - [`ThemeManager`]: the process-wide registry. Owns the current theme
//!   index, the style group cache, and the theme listeners.
//! - [`ViewStyleDelegate`]: one per styled view. Listens for theme switches
//!   only while its view is attached.
//! - [`StyledViewFactory`]: the hook a host calls for every view it builds
//!   from markup.
//! - [`StylerRegistry`]: dispatches style application by concrete view type.
//!
//! The host toolkit is reached through the traits in this crate
//! ([`View`], [`ResourceContext`], [`OnAttachStateChangeListener`],
//! [`FactoryHost`]); nothing here renders or builds views.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use chameleon_theme::{StyledViewFactory, ThemeConfig, ThemeManager};
//!
//! // On the UI thread, at startup
//! let manager = ThemeManager::init(ThemeConfig::default());
//! let factory = StyledViewFactory::new(manager.clone());
//!
//! // In the host's inflation pipeline
//! factory.on_view_created(&view, &attrs, def_style_attr, def_style_res);
//!
//! // Later, on the UI thread
//! manager.set_current_theme(1);
//! ```

mod attrs;
pub mod config;
mod delegate;
mod error;
mod factory;
mod host;
mod manager;
mod style;
mod styler;

#[cfg(test)]
mod testing;

pub use attrs::{get_style_id, AttributeSet};
pub use config::ThemeConfig;
pub use delegate::{DelegateState, ViewStyleDelegate};
pub use error::{Result, ThemeError};
pub use factory::StyledViewFactory;
pub use host::{FactoryHost, OnAttachStateChangeListener, ResourceContext, View};
pub use manager::{OnThemeChangedListener, ThemeChangedEvent, ThemeManager};
pub use style::{AttrId, StyleGroupId, StyleList, StyleRes, StyleTable, ThemeIndex};
pub use styler::{Styler, StylerRegistry, ViewStyler};
