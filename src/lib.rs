//! subviews - named child views for a view tree
//!
//! Modules:
//! - dom: element arena the views render into
//! - view: the `View` trait, capabilities and view classes
//! - tree: view arena, subview tables, rendering, models, cleanup, events
//! - manifest: declarative subview lists for `render_views`
//! - loader: by-name loading of module subviews
//! - model, template, settings, logging, error

pub mod dom;
pub mod error;
pub mod loader;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod settings;
pub mod template;
pub mod tree;
pub mod view;

pub use error::{DomError, LoadError, PathError, SettingsError, TreeError};
pub use loader::{ModuleSource, StaticModules, ViewLoader};
pub use manifest::{Factory, Manifest, ManifestEntry};
pub use model::Model;
pub use settings::{CleanupPolicy, Settings};
pub use tree::{SlotValue, ViewId, ViewTree};
pub use view::{Capabilities, View, ViewClass, ViewCx, ViewOptions};
