use super::{EventSource, Slot, ViewId, ViewTree};
use crate::manifest::ManifestEntry;
use crate::model::Model;
use crate::view::{Capabilities, ViewCx};

impl ViewTree {
    /// Dispatches to the view's `set_model`, whose default is
    /// [`ViewTree::apply_model`].
    pub fn set_model(&mut self, id: ViewId, model: Option<Model>) {
        let pending = model.clone();
        if self
            .with_behavior(id, move |b, cx| b.set_model(cx, pending))
            .is_none()
        {
            self.apply_model(id, model);
        }
    }

    /// Stops listening to the previous model, stores the new one and fans it
    /// out to live manifest children: through the entry's model binder if
    /// declared, else to children with the `SET_MODEL` capability.
    pub fn apply_model(&mut self, id: ViewId, model: Option<Model>) {
        let Some(node) = self.views.get_mut(id) else {
            return;
        };
        let previous = std::mem::replace(&mut node.model, model.clone());
        if let Some(prev) = previous {
            self.stop_listening(id, Some(EventSource::Model(prev.id())));
        }

        for (entry, child) in self.live_manifest_children(id) {
            match &entry.model_binder {
                Some(binder) => {
                    let mut cx = ViewCx::new(self, id);
                    binder(&mut cx, child, model.as_ref());
                }
                None => {
                    if self.capabilities(child).contains(Capabilities::SET_MODEL) {
                        self.set_model(child, model.clone());
                    }
                }
            }
        }
    }

    /// Calls `f` for every manifest entry that currently has a live
    /// instance, in manifest order.
    pub fn for_each_view(&mut self, parent: ViewId, mut f: impl FnMut(&mut ViewTree, ViewId)) {
        for (_, child) in self.live_manifest_children(parent) {
            f(self, child);
        }
    }

    fn live_manifest_children(&self, parent: ViewId) -> Vec<(ManifestEntry, ViewId)> {
        let Some(node) = self.views.get(parent) else {
            return Vec::new();
        };
        node.manifest
            .iter()
            .filter_map(|(name, entry)| match node.subviews.get(name) {
                Some(Slot::Live(child)) => Some((entry.clone(), *child)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/model.rs"]
mod tests;
