use super::{ViewId, ViewTree};
use crate::error::PathError;

/// First path segment naming the topmost ancestor.
pub const ROOT: &str = "root";

impl ViewTree {
    /// Resolves a dotted path such as `"root.sidebar.list"`. The first
    /// segment names an ancestor (searched upward from the parent); the rest
    /// are subview names resolved downward from it.
    pub fn find_parent(&mut self, view: ViewId, path: &str) -> Option<ViewId> {
        self.parent_path(view, path).ok()
    }

    /// Like [`ViewTree::find_parent`]. On failure the error names the last
    /// segment of the path, whichever segment broke the resolution.
    pub fn parent_path(&mut self, view: ViewId, path: &str) -> Result<ViewId, PathError> {
        self.resolve_path(view, path).ok_or_else(|| PathError::NoSubview {
            segment: path.rsplit('.').next().unwrap_or_default().into(),
        })
    }

    fn resolve_path(&mut self, view: ViewId, path: &str) -> Option<ViewId> {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();

        let mut found = self.find_ancestor(view, first)?;
        for segment in segments {
            found = self.subview(found, segment)?;
        }
        Some(found)
    }

    fn find_ancestor(&self, view: ViewId, name: &str) -> Option<ViewId> {
        let mut current = self.views.get(view)?.parent;
        while let Some(id) = current {
            let node = self.views.get(id)?;
            if node.name.as_deref() == Some(name) {
                return Some(id);
            }
            if name == ROOT && node.parent.is_none() {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/path.rs"]
mod tests;
