use super::*;
use crate::model::Model;
use crate::settings::Settings;
use crate::tree::test_support::{insert_probe, Calls, Probe};
use crate::tree::ROOT;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn cleanup_with_main_child_cleans_each_child_once() {
    let a_calls = Calls::new();
    let b_calls = Calls::new();
    let c_calls = Calls::new();
    let mut tree = ViewTree::new();
    let a = insert_probe(&mut tree, &a_calls);
    let b = insert_probe(&mut tree, &b_calls);
    let c = insert_probe(&mut tree, &c_calls);
    tree.set_subview(a, "b", b).unwrap();
    tree.set_subview(a, "c", c).unwrap();
    tree.set_main_child(a, Some(b));

    tree.cleanup(a, true);

    assert_eq!(a_calls.cleanup.get(), 1);
    assert_eq!(b_calls.cleanup.get(), 1);
    assert_eq!(c_calls.cleanup.get(), 1);
    assert!(tree.subview_names(a).is_empty());
    assert_eq!(tree.parent_of(b), None);
}

#[test]
fn cleanup_without_clear_keeps_table() {
    let calls = Calls::new();
    let mut tree = ViewTree::new();
    let a = insert_probe(&mut tree, &calls);
    let b = insert_probe(&mut tree, &calls);
    tree.set_subview(a, "b", b).unwrap();

    tree.cleanup(a, false);

    assert_eq!(tree.subview(a, "b"), Some(b));
    assert_eq!(calls.cleanup.get(), 2);
}

#[test]
fn main_child_pointing_at_parent_is_skipped() {
    let parent_calls = Calls::new();
    let child_calls = Calls::new();
    let mut tree = ViewTree::new();
    let parent = insert_probe(&mut tree, &parent_calls);
    let child = insert_probe(&mut tree, &child_calls);
    tree.set_subview(parent, "child", child).unwrap();
    tree.set_main_child(child, Some(parent));

    tree.cleanup_subviews(parent, false);

    assert_eq!(child_calls.cleanup.get(), 1);
    assert_eq!(parent_calls.cleanup.get(), 0);
}

#[test]
fn editor_is_cleaned_with_its_owner() {
    let editor_calls = Calls::new();
    let mut tree = ViewTree::new();
    let owner = insert_probe(&mut tree, &Calls::new());
    let editor = insert_probe(&mut tree, &editor_calls);
    tree.set_editor(owner, Some(editor));

    tree.cleanup(owner, false);

    assert_eq!(editor_calls.cleanup.get(), 1);
}

#[test]
fn pending_slots_are_not_constructed_by_cleanup() {
    let lazy_calls = Calls::new();
    let mut tree = ViewTree::new();
    let a = insert_probe(&mut tree, &Calls::new());
    tree.set_subview(a, "lazy", Probe::new(&lazy_calls).class())
        .unwrap();

    tree.cleanup(a, false);

    assert_eq!(tree.len(), 1);
    assert_eq!(lazy_calls.cleanup.get(), 0);
}

#[test]
fn detach_policy_leaves_parent_and_stops_listening() {
    let mut tree = ViewTree::new();
    let parent = insert_probe(&mut tree, &Calls::new());
    let child = Probe::new(&Calls::new())
        .policy(CleanupPolicy::Detach)
        .insert(&mut tree);
    tree.set_subview(parent, "child", child).unwrap();
    tree.listen_to(child, &Model::new(), "change");

    tree.cleanup(child, false);

    assert_eq!(tree.subview(parent, "child"), None);
    assert_eq!(tree.parent_of(child), None);
    assert_eq!(tree.listener_count(child), 0);
}

#[test]
fn stop_listening_policy_keeps_adoption() {
    let mut tree = ViewTree::new();
    let parent = insert_probe(&mut tree, &Calls::new());
    let child = Probe::new(&Calls::new())
        .policy(CleanupPolicy::StopListening)
        .insert(&mut tree);
    tree.set_subview(parent, "child", child).unwrap();
    tree.listen_to(child, parent, "render");

    tree.cleanup(child, false);

    assert_eq!(tree.subview(parent, "child"), Some(child));
    assert_eq!(tree.listener_count(child), 0);
}

#[test]
fn shared_child_is_cleaned_once() {
    let shared_calls = Calls::new();
    let mut tree = ViewTree::new();
    let a = insert_probe(&mut tree, &Calls::new());
    let b = insert_probe(&mut tree, &Calls::new());
    let shared = insert_probe(&mut tree, &shared_calls);
    tree.set_subview(a, "b", b).unwrap();
    tree.set_subview(b, "shared", shared).unwrap();
    tree.set_editor(a, Some(shared));

    tree.cleanup(a, false);

    assert_eq!(shared_calls.cleanup.get(), 1);
}

#[test]
fn remove_detaches_and_runs_callback() {
    let mut tree = ViewTree::new();
    let view = insert_probe(&mut tree, &Calls::new());
    let body = tree.dom().body();
    tree.render_to(view, body).unwrap();
    tree.listen_to(view, &Model::new(), "change");
    let done = Rc::new(Cell::new(false));
    let flag = Rc::clone(&done);

    tree.remove(view, Removal::Immediate, Some(Box::new(move || flag.set(true))));

    assert!(!tree.in_dom(view));
    assert!(done.get());
    assert_eq!(tree.listener_count(view), 0);
    assert!(tree.contains(view));
}

struct RecordingAnimator {
    speeds: Rc<RefCell<Vec<Option<u64>>>>,
}

impl Animator for RecordingAnimator {
    fn slide_up_remove(
        &self,
        dom: &mut Dom,
        el: ElementId,
        speed_ms: Option<u64>,
        done: Option<Box<dyn FnOnce()>>,
    ) {
        self.speeds.borrow_mut().push(speed_ms);
        dom.detach(el);
        if let Some(done) = done {
            done();
        }
    }
}

#[test]
fn animated_removal_goes_through_the_animator() {
    let speeds = Rc::new(RefCell::new(Vec::new()));
    let settings = Settings {
        animation_speed_ms: Some(250),
        ..Settings::default()
    };
    let mut tree = ViewTree::with_settings(settings);
    tree.set_animator(Box::new(RecordingAnimator {
        speeds: Rc::clone(&speeds),
    }));
    let body = tree.dom().body();
    let first = insert_probe(&mut tree, &Calls::new());
    let second = insert_probe(&mut tree, &Calls::new());
    let third = insert_probe(&mut tree, &Calls::new());
    for view in [first, second, third] {
        tree.render_to(view, body).unwrap();
    }

    tree.remove(first, Removal::Animated, None);
    tree.remove(second, Removal::AnimatedMs(400), None);
    tree.remove(third, Removal::AnimatedMs(1), None);

    assert_eq!(*speeds.borrow(), vec![Some(250), Some(400)]);
    assert!(!tree.in_dom(third));
}

#[test]
fn destroy_frees_the_live_subtree() {
    let mut tree = ViewTree::new();
    let root = insert_probe(&mut tree, &Calls::new());
    let a = insert_probe(&mut tree, &Calls::new());
    let leaf = insert_probe(&mut tree, &Calls::new());
    let watcher = insert_probe(&mut tree, &Calls::new());
    tree.set_subview(root, "a", a).unwrap();
    tree.set_subview(a, "leaf", leaf).unwrap();
    tree.listen_to(watcher, leaf, "changed");
    let leaf_el = tree.el(leaf).unwrap();

    tree.destroy(a);

    assert!(!tree.contains(a));
    assert!(!tree.contains(leaf));
    assert!(!tree.dom().exists(leaf_el));
    assert_eq!(tree.subview(root, "a"), None);
    assert_eq!(tree.listener_count(watcher), 0);
    assert_eq!(tree.find_parent(watcher, ROOT), None);
}
