use super::{Deferred, ViewId, ViewTree};
use crate::dom::ElementId;
use crate::error::TreeError;
use crate::manifest::{Factory, ManifestEntry};
use crate::model::Model;
use crate::view::{Capabilities, ViewCx, ViewOptions};
use compact_str::CompactString;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderTarget {
    Element(ElementId),
    View(ViewId),
}

impl From<ElementId> for RenderTarget {
    fn from(el: ElementId) -> Self {
        RenderTarget::Element(el)
    }
}

impl From<ViewId> for RenderTarget {
    fn from(view: ViewId) -> Self {
        RenderTarget::View(view)
    }
}

impl ViewTree {
    /// Dispatches to the view's `render`. Views without the `RENDER`
    /// capability are skipped.
    pub fn render(&mut self, id: ViewId) {
        if !self.capabilities(id).contains(Capabilities::RENDER) {
            return;
        }
        if self.with_behavior(id, |b, cx| b.render(cx)).is_none() && self.contains(id) {
            // Re-entrant render from the view's own hook.
            self.render_default(id);
        }
    }

    /// Template (with `delegate_events`) when the view has one, then the
    /// manifest.
    pub fn render_default(&mut self, id: ViewId) {
        if self.template(id).is_some() {
            self.render_template(id, None, None);
            self.run_or_defer(id, Deferred::DelegateEvents);
        }
        self.render_views(id);
    }

    /// Replaces the element's content with the rendered template. `data`
    /// defaults to the model's JSON; without data the template source is
    /// used verbatim.
    pub fn render_template(&mut self, id: ViewId, data: Option<Value>, template: Option<&str>) {
        let Some(node) = self.views.get(id) else {
            return;
        };
        let Some(source) = template.map(str::to_string).or_else(|| node.template.clone()) else {
            return;
        };
        let data = data.or_else(|| node.model.as_ref().map(Model::to_json));
        let el = node.el;

        let html = match data {
            Some(data) => (self.template_fn)(&source, &data),
            None => source,
        };
        self.dom.set_html(el, &html);
    }

    /// Creates, mounts and renders every manifest entry. Mounting happens
    /// only when the child's element is not already under the parent's, so
    /// repeated calls re-render without re-inserting.
    pub fn render_views(&mut self, parent: ViewId) {
        let Some(node) = self.views.get(parent) else {
            return;
        };
        let entries: Vec<(CompactString, ManifestEntry)> = node
            .manifest
            .iter()
            .map(|(name, entry)| (CompactString::from(name), entry.clone()))
            .collect();

        for (name, entry) in entries {
            if !self.contains(parent) {
                break;
            }
            let Some(factory) = entry.factory.as_ref() else {
                tracing::warn!(view = ?parent, name = name.as_str(), "no view given for subview");
                continue;
            };

            let child = match self.subview(parent, &name) {
                Some(child) => child,
                None => match self.create_from_manifest(parent, &name, factory, &entry) {
                    Some(child) => child,
                    None => continue,
                },
            };

            self.mount(parent, &name, child, entry.append_to.as_deref());
            self.render(child);
        }
    }

    fn create_from_manifest(
        &mut self,
        parent: ViewId,
        name: &str,
        factory: &Factory,
        entry: &ManifestEntry,
    ) -> Option<ViewId> {
        let model = self.model(parent).cloned();
        let child = match factory {
            Factory::Class(class) => self.construct(class, ViewOptions::with_model(model.clone())),
            Factory::Producer(produce) => {
                let mut cx = ViewCx::new(self, parent);
                produce(&mut cx)
            }
        };

        if let Err(e) = self.set_subview(parent, name, child) {
            tracing::warn!(view = ?parent, name, error = %e, "cannot adopt manifest subview");
            return None;
        }

        match &entry.model_binder {
            Some(binder) => {
                let mut cx = ViewCx::new(self, parent);
                binder(&mut cx, child, model.as_ref());
            }
            None => {
                if self.capabilities(child).contains(Capabilities::SET_MODEL) {
                    self.set_model(child, model);
                }
            }
        }

        self.run_or_defer(
            parent,
            Deferred::ViewSetup {
                name: name.into(),
                child,
            },
        );
        Some(child)
    }

    fn mount(&mut self, parent: ViewId, name: &str, child: ViewId, append_to: Option<&str>) {
        let (Some(parent_el), Some(child_el)) = (self.el(parent), self.el(child)) else {
            return;
        };
        if self.dom.contains(parent_el, child_el) {
            return;
        }

        let target = match append_to {
            Some(selector) => match self.dom.query(parent_el, selector) {
                Some(target) => target,
                None => {
                    tracing::warn!(name, selector, "cannot append subview: selector matched nothing");
                    return;
                }
            },
            None => parent_el,
        };

        if let Err(e) = self.dom.append_child(target, child_el) {
            tracing::warn!(name, error = %e, "cannot append subview");
        }
    }

    /// Resolves `name`, optionally renders it, and appends its element to
    /// the parent's element. Logs an error when nothing is registered.
    pub fn append_subview(&mut self, parent: ViewId, name: &str, do_render: bool) -> Option<ViewId> {
        let Some(child) = self.subview(parent, name) else {
            tracing::error!(name, "No subview called: {}", name);
            return None;
        };
        if do_render {
            self.render(child);
        }

        let (parent_el, child_el) = (self.el(parent)?, self.el(child)?);
        if let Err(e) = self.dom.append_child(parent_el, child_el) {
            tracing::warn!(name, error = %e, "cannot append subview");
        }
        Some(child)
    }

    /// Renders `id` and appends its element to `target`.
    pub fn render_to(
        &mut self,
        id: ViewId,
        target: impl Into<RenderTarget>,
    ) -> Result<(), TreeError> {
        let el = self.el(id).ok_or(TreeError::UnknownView)?;
        let target_el = match target.into() {
            RenderTarget::Element(el) => el,
            RenderTarget::View(view) => self.el(view).ok_or(TreeError::UnknownView)?,
        };
        self.render(id);
        self.dom.append_child(target_el, el)?;
        Ok(())
    }

    pub fn empty(&mut self, id: ViewId) {
        if let Some(el) = self.el(id) {
            self.dom.empty(el);
        }
    }

    /// Whether the view's element is attached under the document body.
    pub fn in_dom(&self, id: ViewId) -> bool {
        self.el(id).is_some_and(|el| self.dom.is_attached(el))
    }

    /// Renders only when attached. Returns whether it rendered.
    pub fn re_render(&mut self, id: ViewId) -> bool {
        if self.in_dom(id) {
            self.render(id);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/render.rs"]
mod tests;
