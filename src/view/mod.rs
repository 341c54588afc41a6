//! The author-facing side of a view: the [`View`] trait, its optional
//! capabilities, and the constructor handle ([`ViewClass`]) used for lazy
//! slots and manifests.

mod cx;

pub use cx::ViewCx;

use crate::manifest::Manifest;
use crate::model::Model;
use crate::settings::CleanupPolicy;
use crate::tree::{Event, ViewId};
use compact_str::CompactString;
use serde_json::Value;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::rc::Rc;

/// Optional behaviour a view opts into. The tree checks these before
/// dispatching to the matching [`View`] method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Self = Self(0);
    pub const RENDER: Self = Self(1 << 0);
    pub const OPEN: Self = Self(1 << 1);
    /// Receives model propagation from its parent.
    pub const SET_MODEL: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Arguments handed to a [`ViewClass`] constructor.
#[derive(Clone, Debug, Default)]
pub struct ViewOptions {
    pub model: Option<Model>,
    pub extra: Value,
}

impl ViewOptions {
    pub fn with_model(model: Option<Model>) -> Self {
        Self {
            model,
            extra: Value::Null,
        }
    }
}

pub trait View: 'static {
    fn capabilities(&self) -> Capabilities {
        Capabilities::RENDER
    }

    fn tag_name(&self) -> &str {
        "div"
    }

    fn class_name(&self) -> Option<&str> {
        None
    }

    fn template(&self) -> Option<String> {
        None
    }

    /// Subviews rendered by `render_views`. Read once when the view is
    /// inserted into a tree.
    fn manifest(&self) -> Manifest {
        Manifest::new()
    }

    /// Overrides the tree-wide default from settings.
    fn cleanup_policy(&self) -> Option<CleanupPolicy> {
        None
    }

    /// Stamped as the element's `grid-area` when the view is adopted.
    fn grid_area(&self) -> Option<&str> {
        None
    }

    fn render(&mut self, cx: &mut ViewCx<'_>) {
        cx.render_default();
    }

    fn delegate_events(&mut self, _cx: &mut ViewCx<'_>) {}

    fn open(&mut self, _cx: &mut ViewCx<'_>) {}

    fn set_model(&mut self, cx: &mut ViewCx<'_>, model: Option<Model>) {
        cx.apply_model(model);
    }

    /// Runs every time the view is adopted by a parent.
    fn subview_setup(&mut self, _cx: &mut ViewCx<'_>) {}

    /// Runs on the parent after `render_views` created `child`.
    fn on_view_setup(&mut self, _cx: &mut ViewCx<'_>, _name: &str, _child: ViewId) {}

    fn on_cleanup(&mut self, _cx: &mut ViewCx<'_>) {}

    fn handle_event(&mut self, _cx: &mut ViewCx<'_>, _event: &Event) {}

    /// Dynamic method dispatch for `subview_with`. Returns whether the view
    /// knows `method`.
    fn call(&mut self, _cx: &mut ViewCx<'_>, _method: &str, _args: &[Value]) -> bool {
        false
    }
}

type Ctor = dyn Fn(&ViewOptions) -> Box<dyn View>;

/// Constructor handle for a view type.
#[derive(Clone)]
pub struct ViewClass {
    name: CompactString,
    ctor: Rc<Ctor>,
}

impl ViewClass {
    pub fn new<F>(name: &str, ctor: F) -> Self
    where
        F: Fn(&ViewOptions) -> Box<dyn View> + 'static,
    {
        Self {
            name: name.into(),
            ctor: Rc::new(ctor),
        }
    }

    pub fn of<V: View + Default>() -> Self {
        Self::new(std::any::type_name::<V>(), |_| Box::new(V::default()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build(&self, options: &ViewOptions) -> Box<dyn View> {
        (self.ctor)(options)
    }
}

impl fmt::Debug for ViewClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewClass").field(&self.name).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view.rs"]
mod tests;
