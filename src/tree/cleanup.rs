use super::{EventSource, Slot, ViewId, ViewTree};
use crate::dom::{Dom, ElementId};
use crate::settings::CleanupPolicy;
use rustc_hash::FxHashSet;

/// Animated element removal, e.g. a slide-up before detaching.
pub trait Animator {
    /// Must detach `el` from `dom` (now or once the animation ends) and then
    /// call `done`.
    fn slide_up_remove(
        &self,
        dom: &mut Dom,
        el: ElementId,
        speed_ms: Option<u64>,
        done: Option<Box<dyn FnOnce()>>,
    );
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Removal {
    #[default]
    Immediate,
    /// Animated at the settings' speed.
    Animated,
    /// Animated at the given speed; values of 1 or less mean immediate.
    AnimatedMs(u64),
}

impl ViewTree {
    /// Cleans the view's subviews, runs its `on_cleanup` hook, then applies
    /// its cleanup policy. Every reachable view is cleaned at most once per
    /// call.
    pub fn cleanup(&mut self, view: ViewId, and_clear: bool) {
        let mut visited = FxHashSet::default();
        self.cleanup_view(view, and_clear, &mut visited);
    }

    /// Cleans the main child (unless it is this view's parent), the editor
    /// and every live table entry (except this view's parent). With
    /// `and_clear` the table is emptied afterwards.
    pub fn cleanup_subviews(&mut self, view: ViewId, and_clear: bool) {
        let mut visited = FxHashSet::default();
        visited.insert(view);
        self.cleanup_children(view, and_clear, &mut visited);
    }

    fn cleanup_view(&mut self, view: ViewId, and_clear: bool, visited: &mut FxHashSet<ViewId>) {
        if !self.views.contains_key(view) || !visited.insert(view) {
            return;
        }

        self.cleanup_children(view, and_clear, visited);
        self.with_behavior(view, |b, cx| b.on_cleanup(cx));

        match self.cleanup_policy(view) {
            CleanupPolicy::Detach => {
                self.stop_listening(view, None);
                self.remove_adoption(view);
            }
            CleanupPolicy::StopListening => self.stop_listening(view, None),
            CleanupPolicy::Keep => {}
        }
        tracing::debug!(view = ?view, "view cleaned up");
    }

    fn cleanup_children(&mut self, view: ViewId, and_clear: bool, visited: &mut FxHashSet<ViewId>) {
        let Some(node) = self.views.get(view) else {
            return;
        };
        let parent = node.parent;

        let mut targets = Vec::new();
        if let Some(main) = node.main_child {
            if Some(main) != parent {
                targets.push(main);
            }
        }
        if let Some(editor) = node.editor {
            targets.push(editor);
        }
        targets.extend(node.subviews.values().filter_map(|slot| match slot {
            Slot::Live(id) if Some(*id) != parent => Some(*id),
            _ => None,
        }));

        for target in targets {
            self.cleanup_view(target, false, visited);
        }

        if and_clear {
            self.clear_subviews(view);
        }
    }

    /// Cleans up, detaches the element (through the animator when one is
    /// installed and animation was requested), then stops all listening.
    /// The view stays in the arena.
    pub fn remove(&mut self, view: ViewId, removal: Removal, done: Option<Box<dyn FnOnce()>>) {
        let Some(el) = self.el(view) else {
            return;
        };
        self.cleanup(view, false);

        let speed = match removal {
            Removal::Immediate => None,
            Removal::Animated => Some(self.settings.animation_speed_ms),
            Removal::AnimatedMs(ms) if ms > 1 => Some(Some(ms)),
            Removal::AnimatedMs(_) => None,
        };

        match (speed, self.animator.as_ref()) {
            (Some(speed_ms), Some(animator)) => {
                animator.slide_up_remove(&mut self.dom, el, speed_ms, done);
            }
            _ => {
                self.dom.detach(el);
                if let Some(done) = done {
                    done();
                }
            }
        }

        self.stop_listening(view, None);
    }

    /// Removes the view and its live subtree from the arena and frees their
    /// elements. Ids held elsewhere become stale.
    pub fn destroy(&mut self, view: ViewId) {
        if !self.views.contains_key(view) {
            return;
        }
        self.cleanup(view, false);
        self.remove_adoption(view);

        let mut doomed = FxHashSet::default();
        let mut stack = vec![view];
        while let Some(id) = stack.pop() {
            let Some(node) = self.views.get(id) else {
                continue;
            };
            if !doomed.insert(id) {
                continue;
            }
            stack.extend(node.subviews.values().filter_map(|slot| match slot {
                Slot::Live(child) if self.parent_of(*child) == Some(id) => Some(*child),
                _ => None,
            }));
        }

        for id in &doomed {
            if let Some(node) = self.views.remove(*id) {
                self.dom.destroy(node.el);
            }
        }
        self.deferred.retain(|(id, _)| !doomed.contains(id));
        for node in self.views.values_mut() {
            node.subscriptions
                .retain(|s| !matches!(s.source, EventSource::View(v) if doomed.contains(&v)));
        }
        tracing::debug!(view = ?view, count = doomed.len(), "views destroyed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/cleanup.rs"]
mod tests;
