//! Declarative list of subviews a parent renders with `render_views`.

use crate::model::Model;
use crate::tree::ViewId;
use crate::view::{ViewClass, ViewCx};
use compact_str::CompactString;
use std::fmt;
use std::rc::Rc;

/// Builds a subview with the parent as context. The returned view is adopted
/// by the parent.
pub type Producer = Rc<dyn Fn(&mut ViewCx<'_>) -> ViewId>;

/// Called on the parent with `(child, model)` in place of the child's own
/// `set_model`.
pub type ModelBinder = Rc<dyn Fn(&mut ViewCx<'_>, ViewId, Option<&Model>)>;

#[derive(Clone)]
pub enum Factory {
    /// Constructed with the parent's model.
    Class(ViewClass),
    Producer(Producer),
}

impl Factory {
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn(&mut ViewCx<'_>) -> ViewId + 'static,
    {
        Factory::Producer(Rc::new(f))
    }
}

impl From<ViewClass> for Factory {
    fn from(class: ViewClass) -> Self {
        Factory::Class(class)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factory::Class(class) => f.debug_tuple("Class").field(class).finish(),
            Factory::Producer(_) => f.write_str("Producer"),
        }
    }
}

#[derive(Clone, Default)]
pub struct ManifestEntry {
    pub factory: Option<Factory>,
    /// Selector, resolved inside the parent's element.
    pub append_to: Option<CompactString>,
    pub model_binder: Option<ModelBinder>,
}

impl ManifestEntry {
    pub fn new(factory: impl Into<Factory>) -> Self {
        Self {
            factory: Some(factory.into()),
            ..Self::default()
        }
    }

    /// An entry without a factory; `render_views` warns and skips it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn append_to(mut self, selector: &str) -> Self {
        self.append_to = Some(selector.into());
        self
    }

    pub fn model_binder<F>(mut self, binder: F) -> Self
    where
        F: Fn(&mut ViewCx<'_>, ViewId, Option<&Model>) + 'static,
    {
        self.model_binder = Some(Rc::new(binder));
        self
    }
}

impl From<ViewClass> for ManifestEntry {
    fn from(class: ViewClass) -> Self {
        ManifestEntry::new(class)
    }
}

impl From<Factory> for ManifestEntry {
    fn from(factory: Factory) -> Self {
        ManifestEntry::new(factory)
    }
}

impl fmt::Debug for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestEntry")
            .field("factory", &self.factory)
            .field("append_to", &self.append_to)
            .field("model_binder", &self.model_binder.is_some())
            .finish()
    }
}

/// Ordered; `render_views` walks entries in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Manifest {
    entries: Vec<(CompactString, ManifestEntry)>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces `name`. A replaced entry keeps its position.
    pub fn view(mut self, name: &str, entry: impl Into<ManifestEntry>) -> Self {
        self.insert(name, entry);
        self
    }

    pub fn insert(&mut self, name: &str, entry: impl Into<ManifestEntry>) {
        let entry = entry.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((name.into(), entry)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/unit/manifest.rs"]
mod tests;
