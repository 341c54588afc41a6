//! In-memory element tree standing in for the host document.
//!
//! Every view owns exactly one element. Elements live in an arena and are
//! addressed by [`ElementId`]; the document root is [`Dom::body`].

mod selector;

pub use selector::{Compound, Selector};

use crate::error::DomError;
use compact_str::CompactString;
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;

new_key_type! { pub struct ElementId; }

#[derive(Debug, Clone)]
struct Element {
    tag: CompactString,
    id: Option<CompactString>,
    classes: Vec<CompactString>,
    style: BTreeMap<CompactString, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase().into(),
            id: None,
            classes: Vec::new(),
            style: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

pub struct Dom {
    arena: SlotMap<ElementId, Element>,
    body: ElementId,
    revision: u64,
}

impl Dom {
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let body = arena.insert(Element::new("body"));
        Self {
            arena,
            body,
            revision: 0,
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Bumped on every structural or content change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.arena.insert(Element::new(tag))
    }

    pub fn exists(&self, el: ElementId) -> bool {
        self.arena.contains_key(el)
    }

    pub fn tag(&self, el: ElementId) -> Option<&str> {
        self.arena.get(el).map(|e| e.tag.as_str())
    }

    pub fn id_attr(&self, el: ElementId) -> Option<&str> {
        self.arena.get(el).and_then(|e| e.id.as_deref())
    }

    pub fn set_id_attr(&mut self, el: ElementId, id: &str) {
        if let Some(e) = self.arena.get_mut(el) {
            e.id = Some(id.into());
        }
    }

    pub fn add_class(&mut self, el: ElementId, class: &str) {
        if let Some(e) = self.arena.get_mut(el) {
            for c in class.split_whitespace() {
                if !e.classes.iter().any(|have| have == c) {
                    e.classes.push(c.into());
                }
            }
        }
    }

    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.arena
            .get(el)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    pub fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(e) = self.arena.get_mut(el) {
            e.style.insert(property.into(), value.to_string());
        }
    }

    pub fn style(&self, el: ElementId, property: &str) -> Option<&str> {
        self.arena
            .get(el)
            .and_then(|e| e.style.get(property))
            .map(String::as_str)
    }

    pub fn text(&self, el: ElementId) -> Option<&str> {
        self.arena.get(el).map(|e| e.text.as_str())
    }

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.arena.get(el).and_then(|e| e.parent)
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        self.arena
            .get(el)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Replaces the element's content. Child elements are detached (not
    /// destroyed), as with `innerHTML` assignment.
    pub fn set_html(&mut self, el: ElementId, html: &str) {
        let Some(e) = self.arena.get_mut(el) else {
            return;
        };
        let children = std::mem::take(&mut e.children);
        e.text = html.to_string();
        for child in children {
            if let Some(c) = self.arena.get_mut(child) {
                c.parent = None;
            }
        }
        self.revision += 1;
    }

    pub fn empty(&mut self, el: ElementId) {
        self.set_html(el, "");
    }

    /// Appends `child` as the last child of `parent`, moving it if it is
    /// already attached elsewhere.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        if !self.arena.contains_key(parent) || !self.arena.contains_key(child) {
            return Err(DomError::UnknownElement);
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        self.unlink(child);
        if let Some(p) = self.arena.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.arena.get_mut(child) {
            c.parent = Some(parent);
        }
        self.revision += 1;
        Ok(())
    }

    /// Detaches the element from its parent. The element and its subtree
    /// stay alive and can be re-attached.
    pub fn detach(&mut self, el: ElementId) {
        if self.unlink(el) {
            self.revision += 1;
        }
    }

    /// Detaches and frees the element and its whole subtree.
    pub fn destroy(&mut self, el: ElementId) {
        if el == self.body {
            return;
        }
        self.unlink(el);
        let mut stack = vec![el];
        while let Some(id) = stack.pop() {
            if let Some(e) = self.arena.remove(id) {
                stack.extend(e.children);
            }
        }
        self.revision += 1;
    }

    fn unlink(&mut self, el: ElementId) -> bool {
        let Some(parent) = self.arena.get_mut(el).and_then(|e| e.parent.take()) else {
            return false;
        };
        if let Some(p) = self.arena.get_mut(parent) {
            p.children.retain(|&c| c != el);
        }
        true
    }

    /// Inclusive containment, like `Node.contains`.
    pub fn contains(&self, ancestor: ElementId, el: ElementId) -> bool {
        let mut current = Some(el);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.arena.get(id).and_then(|e| e.parent);
        }
        false
    }

    pub fn is_attached(&self, el: ElementId) -> bool {
        self.contains(self.body, el)
    }

    pub fn matches(&self, el: ElementId, selector: &Selector) -> bool {
        let Some(e) = self.arena.get(el) else {
            return false;
        };
        if !selector
            .subject()
            .matches(&e.tag, e.id.as_deref(), &e.classes)
        {
            return false;
        }

        let mut current = e.parent;
        for compound in selector.ancestors() {
            loop {
                let Some(id) = current else {
                    return false;
                };
                let Some(a) = self.arena.get(id) else {
                    return false;
                };
                current = a.parent;
                if compound.matches(&a.tag, a.id.as_deref(), &a.classes) {
                    break;
                }
            }
        }
        true
    }

    /// First descendant of `scope` (document order, `scope` excluded)
    /// matching `selector`.
    pub fn query(&self, scope: ElementId, selector: &str) -> Option<ElementId> {
        let selector = Selector::parse(selector)?;
        self.descendants(scope)
            .into_iter()
            .find(|&el| self.matches(el, &selector))
    }

    pub fn query_all(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(scope)
            .into_iter()
            .filter(|&el| self.matches(el, &selector))
            .collect()
    }

    fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom.rs"]
mod tests;
