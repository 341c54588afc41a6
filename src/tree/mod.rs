//! Arena of views and their subview tables.
//!
//! A parent keeps `name -> slot`; a live child keeps its parent's id. Neither
//! side owns the other, so there is no reference cycle: traversal is by id
//! lookup and a stale id simply resolves to nothing.

mod cleanup;
mod events;
mod load;
mod model;
mod path;
mod render;

pub use cleanup::{Animator, Removal};
pub use events::{Event, EventSource, Subscription};
pub use path::ROOT;
pub use render::RenderTarget;

use crate::dom::{Dom, ElementId};
use crate::error::TreeError;
use crate::manifest::Manifest;
use crate::model::Model;
use crate::settings::{CleanupPolicy, Settings};
use crate::template::{default_template_fn, TemplateFn};
use crate::view::{Capabilities, View, ViewClass, ViewCx, ViewOptions};
use compact_str::CompactString;
use serde_json::Value;
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;

new_key_type! { pub struct ViewId; }

#[derive(Clone, Debug)]
enum Slot {
    Class {
        class: ViewClass,
        options: Option<ViewOptions>,
    },
    Module(CompactString),
    Live(ViewId),
}

/// What can be stored under a subview name.
#[derive(Clone, Debug)]
pub enum SlotValue {
    Instance(ViewId),
    /// Constructed on first access.
    Class(ViewClass),
    /// Loaded by name on first `subview_async`.
    Module(CompactString),
}

impl SlotValue {
    pub fn module(name: &str) -> Self {
        SlotValue::Module(name.into())
    }
}

impl From<ViewId> for SlotValue {
    fn from(id: ViewId) -> Self {
        SlotValue::Instance(id)
    }
}

impl From<ViewClass> for SlotValue {
    fn from(class: ViewClass) -> Self {
        SlotValue::Class(class)
    }
}

/// Hooks addressed to a view whose behaviour was busy at the time. They run
/// as soon as the behaviour is back in the arena.
enum Deferred {
    DelegateEvents,
    ViewSetup { name: CompactString, child: ViewId },
    Event(Event),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Module,
    Live(ViewId),
}

struct ViewNode {
    name: Option<CompactString>,
    parent: Option<ViewId>,
    el: ElementId,
    model: Option<Model>,
    template: Option<String>,
    manifest: Manifest,
    subviews: BTreeMap<CompactString, Slot>,
    main_child: Option<ViewId>,
    editor: Option<ViewId>,
    subscriptions: Vec<Subscription>,
    cleanup: Option<CleanupPolicy>,
    capabilities: Capabilities,
    grid_area: Option<CompactString>,
    // Taken out while one of its hooks runs.
    behavior: Option<Box<dyn View>>,
}

pub struct ViewTree {
    views: SlotMap<ViewId, ViewNode>,
    dom: Dom,
    settings: Settings,
    template_fn: TemplateFn,
    animator: Option<Box<dyn Animator>>,
    deferred: Vec<(ViewId, Deferred)>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            views: SlotMap::with_key(),
            dom: Dom::new(),
            settings,
            template_fn: default_template_fn(),
            animator: None,
            deferred: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_template_fn(&mut self, template_fn: TemplateFn) {
        self.template_fn = template_fn;
    }

    pub fn set_animator(&mut self, animator: Box<dyn Animator>) {
        self.animator = Some(animator);
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn insert(&mut self, behavior: Box<dyn View>) -> ViewId {
        self.insert_with(behavior, ViewOptions::default())
    }

    pub fn construct(&mut self, class: &ViewClass, options: ViewOptions) -> ViewId {
        let behavior = class.build(&options);
        let id = self.insert_with(behavior, options);
        tracing::debug!(view = ?id, class = class.name(), "view constructed");
        id
    }

    fn insert_with(&mut self, behavior: Box<dyn View>, options: ViewOptions) -> ViewId {
        let el = self.dom.create_element(behavior.tag_name());
        if let Some(class) = behavior.class_name() {
            self.dom.add_class(el, class);
        }

        self.views.insert(ViewNode {
            name: None,
            parent: None,
            el,
            model: options.model,
            template: behavior.template(),
            manifest: behavior.manifest(),
            subviews: BTreeMap::new(),
            main_child: None,
            editor: None,
            subscriptions: Vec::new(),
            cleanup: behavior.cleanup_policy(),
            capabilities: behavior.capabilities(),
            grid_area: behavior.grid_area().map(CompactString::from),
            behavior: Some(behavior),
        })
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn name(&self, id: ViewId) -> Option<&str> {
        self.views.get(id).and_then(|n| n.name.as_deref())
    }

    pub fn parent_of(&self, id: ViewId) -> Option<ViewId> {
        self.views.get(id).and_then(|n| n.parent)
    }

    pub fn el(&self, id: ViewId) -> Option<ElementId> {
        self.views.get(id).map(|n| n.el)
    }

    pub fn model(&self, id: ViewId) -> Option<&Model> {
        self.views.get(id).and_then(|n| n.model.as_ref())
    }

    pub fn template(&self, id: ViewId) -> Option<&str> {
        self.views.get(id).and_then(|n| n.template.as_deref())
    }

    pub fn set_template(&mut self, id: ViewId, template: Option<String>) {
        if let Some(node) = self.views.get_mut(id) {
            node.template = template;
        }
    }

    pub fn manifest(&self, id: ViewId) -> Option<&Manifest> {
        self.views.get(id).map(|n| &n.manifest)
    }

    pub fn set_manifest(&mut self, id: ViewId, manifest: Manifest) {
        if let Some(node) = self.views.get_mut(id) {
            node.manifest = manifest;
        }
    }

    pub fn capabilities(&self, id: ViewId) -> Capabilities {
        self.views
            .get(id)
            .map(|n| n.capabilities)
            .unwrap_or(Capabilities::NONE)
    }

    pub fn main_child(&self, id: ViewId) -> Option<ViewId> {
        self.views.get(id).and_then(|n| n.main_child)
    }

    /// The "main child" is cleaned with its owner but is not a table entry.
    pub fn set_main_child(&mut self, id: ViewId, child: Option<ViewId>) {
        if let Some(node) = self.views.get_mut(id) {
            node.main_child = child;
        }
    }

    pub fn editor(&self, id: ViewId) -> Option<ViewId> {
        self.views.get(id).and_then(|n| n.editor)
    }

    pub fn set_editor(&mut self, id: ViewId, editor: Option<ViewId>) {
        if let Some(node) = self.views.get_mut(id) {
            node.editor = editor;
        }
    }

    pub fn set_cleanup_policy(&mut self, id: ViewId, policy: Option<CleanupPolicy>) {
        if let Some(node) = self.views.get_mut(id) {
            node.cleanup = policy;
        }
    }

    /// The view's own policy, else the settings default.
    pub fn cleanup_policy(&self, id: ViewId) -> CleanupPolicy {
        self.views
            .get(id)
            .and_then(|n| n.cleanup)
            .unwrap_or(self.settings.cleanup)
    }

    pub fn subview_names(&self, parent: ViewId) -> Vec<CompactString> {
        self.views
            .get(parent)
            .map(|n| n.subviews.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn slot_state(&self, parent: ViewId, name: &str) -> Option<SlotState> {
        let slot = self.views.get(parent)?.subviews.get(name)?;
        Some(match slot {
            Slot::Class { .. } => SlotState::Pending,
            Slot::Module(_) => SlotState::Module,
            Slot::Live(id) => SlotState::Live(*id),
        })
    }

    /// Runs `f` with the view's behaviour taken out of the arena so the
    /// hook can borrow the tree. `None` if the view is gone or its behaviour
    /// is already running further up the stack.
    pub(crate) fn with_behavior<R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut dyn View, &mut ViewCx<'_>) -> R,
    ) -> Option<R> {
        let mut behavior = self.views.get_mut(id)?.behavior.take()?;
        let out = {
            let mut cx = ViewCx::new(self, id);
            f(behavior.as_mut(), &mut cx)
        };
        // The view may have been destroyed by its own hook.
        if let Some(node) = self.views.get_mut(id) {
            node.behavior = Some(behavior);
            self.flush_deferred(id);
        }
        Some(out)
    }

    fn run_or_defer(&mut self, id: ViewId, hook: Deferred) {
        if !self.views.contains_key(id) {
            return;
        }
        let busy = self.views.get(id).is_some_and(|n| n.behavior.is_none());
        if busy {
            tracing::debug!(view = ?id, "view busy, hook queued");
            self.deferred.push((id, hook));
            return;
        }
        self.with_behavior(id, |b, cx| match hook {
            Deferred::DelegateEvents => b.delegate_events(cx),
            Deferred::ViewSetup { name, child } => b.on_view_setup(cx, &name, child),
            Deferred::Event(event) => b.handle_event(cx, &event),
        });
    }

    fn flush_deferred(&mut self, id: ViewId) {
        if !self.deferred.iter().any(|(target, _)| *target == id) {
            return;
        }
        let (ready, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|(target, _)| *target == id);
        self.deferred = rest;
        for (_, hook) in ready {
            self.run_or_defer(id, hook);
        }
    }

    /// Live instance for `name`, constructing a pending class in place on
    /// first access. `None` if nothing is registered under `name`.
    pub fn subview(&mut self, parent: ViewId, name: &str) -> Option<ViewId> {
        let slot = self.views.get(parent)?.subviews.get(name)?.clone();
        match slot {
            Slot::Live(id) => Some(id),
            Slot::Class { class, options } => {
                let child = self.construct(&class, options.unwrap_or_default());
                match self.adopt(parent, name, child) {
                    Ok(()) => Some(child),
                    Err(e) => {
                        tracing::warn!(name, error = %e, "failed to adopt lazy subview");
                        None
                    }
                }
            }
            Slot::Module(module) => {
                tracing::warn!(
                    name,
                    module = module.as_str(),
                    "module subviews resolve through subview_async"
                );
                None
            }
        }
    }

    /// Short alias for [`ViewTree::subview`].
    pub fn sv(&mut self, parent: ViewId, name: &str) -> Option<ViewId> {
        self.subview(parent, name)
    }

    /// Stores `value` under `name`. A live occupant is cleaned up and
    /// unlinked first. Returns the live id, or `None` for a lazy slot.
    pub fn set_subview(
        &mut self,
        parent: ViewId,
        name: &str,
        value: impl Into<SlotValue>,
    ) -> Result<Option<ViewId>, TreeError> {
        self.install(parent, name, value.into(), None)
    }

    /// Registers `class` lazily; it is built with `options` on first access.
    pub fn set_lazy_subview(
        &mut self,
        parent: ViewId,
        name: &str,
        class: ViewClass,
        options: ViewOptions,
    ) -> Result<(), TreeError> {
        self.install(parent, name, SlotValue::Class(class), Some(options))?;
        Ok(())
    }

    fn install(
        &mut self,
        parent: ViewId,
        name: &str,
        value: SlotValue,
        options: Option<ViewOptions>,
    ) -> Result<Option<ViewId>, TreeError> {
        if !self.views.contains_key(parent) {
            return Err(TreeError::UnknownView);
        }
        if let SlotValue::Instance(child) = value {
            self.check_adoptable(parent, child)?;
        }

        let current = self
            .views
            .get(parent)
            .and_then(|n| n.subviews.get(name))
            .cloned();
        if let Some(Slot::Live(old)) = current {
            let same = matches!(value, SlotValue::Instance(id) if id == old);
            if !same {
                self.cleanup(old, false);
                self.unlink(parent, name, old);
            }
        }

        match value {
            SlotValue::Instance(child) => {
                self.adopt(parent, name, child)?;
                Ok(Some(child))
            }
            SlotValue::Class(class) => {
                self.put_slot(parent, name, Slot::Class { class, options });
                Ok(None)
            }
            SlotValue::Module(module) => {
                self.put_slot(parent, name, Slot::Module(module));
                Ok(None)
            }
        }
    }

    /// Construct-if-absent: an empty slot gets `class` built with `options`
    /// right away; an occupied slot is resolved as is.
    pub fn ensure_subview(
        &mut self,
        parent: ViewId,
        name: &str,
        class: &ViewClass,
        options: ViewOptions,
    ) -> Result<Option<ViewId>, TreeError> {
        let occupied = self
            .views
            .get(parent)
            .ok_or(TreeError::UnknownView)?
            .subviews
            .contains_key(name);
        if occupied {
            return Ok(self.subview(parent, name));
        }
        let child = self.construct(class, options);
        self.set_subview(parent, name, child)
    }

    /// Resolves `name`, then invokes `method` on it if the view has it.
    pub fn subview_with(
        &mut self,
        parent: ViewId,
        name: &str,
        method: &str,
        args: &[Value],
    ) -> Option<ViewId> {
        let child = self.subview(parent, name)?;
        self.call_method(child, method, args);
        Some(child)
    }

    pub fn open_subview(&mut self, parent: ViewId, name: &str) -> Option<ViewId> {
        self.subview_with(parent, name, "open", &[])
    }

    /// Returns whether the view exposed `method`.
    pub fn call_method(&mut self, id: ViewId, method: &str, args: &[Value]) -> bool {
        let caps = self.capabilities(id);
        match method {
            "open" if caps.contains(Capabilities::OPEN) => {
                self.with_behavior(id, |b, cx| b.open(cx)).is_some()
            }
            "render" if caps.contains(Capabilities::RENDER) => {
                self.render(id);
                true
            }
            "open" | "render" => false,
            _ => self
                .with_behavior(id, |b, cx| b.call(cx, method, args))
                .unwrap_or(false),
        }
    }

    /// Takes `view` out of its parent's table and clears its parent link.
    /// No-op unless the view is the table's current entry for its name.
    pub fn remove_adoption(&mut self, view: ViewId) {
        let Some(node) = self.views.get(view) else {
            return;
        };
        let (Some(parent), Some(name)) = (node.parent, node.name.clone()) else {
            return;
        };
        self.unlink(parent, &name, view);
    }

    /// Clears every live child's parent link and empties the table. Does not
    /// clean anything up.
    pub fn clear_subviews(&mut self, parent: ViewId) {
        let Some(node) = self.views.get_mut(parent) else {
            return;
        };
        let slots = std::mem::take(&mut node.subviews);
        for slot in slots.into_values() {
            if let Slot::Live(child) = slot {
                if let Some(c) = self.views.get_mut(child) {
                    if c.parent == Some(parent) {
                        c.parent = None;
                    }
                }
            }
        }
    }

    fn put_slot(&mut self, parent: ViewId, name: &str, slot: Slot) {
        if let Some(node) = self.views.get_mut(parent) {
            node.subviews.insert(name.into(), slot);
        }
    }

    fn unlink(&mut self, parent: ViewId, name: &str, child: ViewId) {
        let Some(p) = self.views.get_mut(parent) else {
            return;
        };
        if !matches!(p.subviews.get(name), Some(Slot::Live(id)) if *id == child) {
            return;
        }
        p.subviews.remove(name);
        if let Some(c) = self.views.get_mut(child) {
            c.parent = None;
        }
        tracing::debug!(parent = ?parent, name, "subview unlinked");
    }

    fn check_adoptable(&self, parent: ViewId, child: ViewId) -> Result<(), TreeError> {
        if !self.views.contains_key(child) {
            return Err(TreeError::UnknownView);
        }
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                return Err(TreeError::Cycle);
            }
            current = self.views.get(id).and_then(|n| n.parent);
        }
        Ok(())
    }

    /// Stamps name and parent link, leaving any previous parent's table.
    fn adopt(&mut self, parent: ViewId, name: &str, child: ViewId) -> Result<(), TreeError> {
        self.check_adoptable(parent, child)?;

        let already = self
            .views
            .get(child)
            .is_some_and(|c| c.parent == Some(parent) && c.name.as_deref() == Some(name));
        if !already {
            self.remove_adoption(child);
        }

        let grid_area = match self.views.get_mut(child) {
            Some(c) => {
                c.name = Some(name.into());
                c.parent = Some(parent);
                c.grid_area.clone().map(|area| (c.el, area))
            }
            None => return Err(TreeError::UnknownView),
        };
        self.put_slot(parent, name, Slot::Live(child));

        if let Some((el, area)) = grid_area {
            self.dom.set_style(el, "grid-area", &area);
        }
        self.with_behavior(child, |b, cx| b.subview_setup(cx));
        tracing::debug!(parent = ?parent, name, child = ?child, "subview adopted");
        Ok(())
    }
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "../../tests/unit/tree.rs"]
mod tests;
