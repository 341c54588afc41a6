use crate::dom::{Dom, ElementId};
use crate::error::TreeError;
use crate::model::Model;
use crate::tree::{EventSource, SlotValue, ViewId, ViewTree};

use super::{ViewClass, ViewOptions};

/// A view's handle on the tree while one of its hooks runs.
pub struct ViewCx<'a> {
    tree: &'a mut ViewTree,
    id: ViewId,
}

impl<'a> ViewCx<'a> {
    pub fn new(tree: &'a mut ViewTree, id: ViewId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn tree(&mut self) -> &mut ViewTree {
        self.tree
    }

    pub fn tree_ref(&self) -> &ViewTree {
        self.tree
    }

    pub fn dom(&mut self) -> &mut Dom {
        self.tree.dom_mut()
    }

    pub fn el(&self) -> Option<ElementId> {
        self.tree.el(self.id)
    }

    pub fn model(&self) -> Option<Model> {
        self.tree.model(self.id).cloned()
    }

    pub fn name(&self) -> Option<&str> {
        self.tree.name(self.id)
    }

    /// Template, `delegate_events`, then the manifest.
    pub fn render_default(&mut self) {
        self.tree.render_default(self.id);
    }

    pub fn render_template(&mut self) {
        self.tree.render_template(self.id, None, None);
    }

    pub fn render_views(&mut self) {
        self.tree.render_views(self.id);
    }

    /// The tree's own model handling, without calling back into the view.
    pub fn apply_model(&mut self, model: Option<Model>) {
        self.tree.apply_model(self.id, model);
    }

    pub fn subview(&mut self, name: &str) -> Option<ViewId> {
        self.tree.subview(self.id, name)
    }

    pub fn set_subview(
        &mut self,
        name: &str,
        value: impl Into<SlotValue>,
    ) -> Result<Option<ViewId>, TreeError> {
        self.tree.set_subview(self.id, name, value)
    }

    pub fn construct(&mut self, class: &ViewClass, options: ViewOptions) -> ViewId {
        self.tree.construct(class, options)
    }

    pub fn parent(&mut self, path: &str) -> Option<ViewId> {
        self.tree.find_parent(self.id, path)
    }

    pub fn listen_to(&mut self, source: impl Into<EventSource>, event: &str) {
        self.tree.listen_to(self.id, source, event);
    }

    pub fn stop_listening(&mut self, source: Option<EventSource>) {
        self.tree.stop_listening(self.id, source);
    }
}
