//! Chameleon Reference Host
//!
//! A small in-memory view toolkit implementing the host traits of
//! [`chameleon_theme`]:
//!
//! - [`ResourceTable`]: style groups, styles, and theme defaults from TOML
//! - [`BasicView`] / [`TextView`]: views that merge style properties
//! - [`Window`]: attaching and detaching fires attach listeners
//! - [`LayoutInflater`]: builds views from TOML markup
//! - [`Activity`]: ties them together and installs the styled view factory
//!
//! # Example
//!
//! ```rust,ignore
//! use chameleon_theme::{ThemeConfig, ThemeManager};
//! use chameleon_view::{Activity, ResourceTable};
//!
//! let resources = Arc::new(ResourceTable::load("res/values.toml")?);
//! let activity = Activity::wrap(resources, ThemeManager::init(ThemeConfig::default()).clone());
//! activity.set_content_view(include_str!("layout/main.toml"))?;
//!
//! // Re-styles every attached view
//! activity.toggle_theme()?;
//! ```

mod activity;
mod error;
mod inflate;
mod resources;
mod view;
mod window;

pub use activity::Activity;
pub use error::{HostError, Result};
pub use inflate::{LayoutInflater, ViewKind};
pub use resources::{ResourceTable, StyleProps};
pub use view::{BasicView, TextAppearance, TextView, TextViewStyler, ViewId, ViewNode, Widget};
pub use window::Window;
