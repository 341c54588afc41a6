use super::*;
use crate::tree::test_support::{insert_probe, probe_class, Calls};

/// app(root) -> sidebar -> list, app -> main -> editor
fn layout(tree: &mut ViewTree) -> (ViewId, ViewId, ViewId) {
    let calls = Calls::new();
    let app = insert_probe(tree, &calls);
    let sidebar = insert_probe(tree, &calls);
    let main = insert_probe(tree, &calls);
    let editor = insert_probe(tree, &calls);
    tree.set_subview(app, "sidebar", sidebar).unwrap();
    tree.set_subview(app, "main", main).unwrap();
    tree.set_subview(main, "editor", editor).unwrap();
    tree.set_subview(sidebar, "list", probe_class(&calls))
        .unwrap();
    (app, sidebar, editor)
}

#[test]
fn root_path_resolves_down_from_topmost_ancestor() {
    let mut tree = ViewTree::new();
    let (_, sidebar, editor) = layout(&mut tree);

    let list = tree.find_parent(editor, "root.sidebar.list").unwrap();

    assert_eq!(tree.parent_of(list), Some(sidebar));
    assert_eq!(tree.name(list), Some("list"));
}

#[test]
fn first_segment_matches_ancestor_by_name() {
    let mut tree = ViewTree::new();
    let (app, _, editor) = layout(&mut tree);

    let main = tree.subview(app, "main").unwrap();
    assert_eq!(tree.find_parent(editor, "main"), Some(main));
    assert_eq!(tree.find_parent(editor, ROOT), Some(app));
}

#[test]
fn missing_segment_is_reported() {
    let mut tree = ViewTree::new();
    let (_, _, editor) = layout(&mut tree);

    assert_eq!(tree.find_parent(editor, "root.sidebar.nope"), None);
    assert_eq!(
        tree.parent_path(editor, "root.sidebar.nope"),
        Err(PathError::NoSubview {
            segment: "nope".into()
        })
    );
    assert_eq!(
        tree.parent_path(editor, "ghost.list"),
        Err(PathError::NoSubview {
            segment: "list".into()
        })
    );
    assert_eq!(
        tree.parent_path(editor, "root.ghost.list"),
        Err(PathError::NoSubview {
            segment: "list".into()
        })
    );
    assert_eq!(
        tree.parent_path(editor, "ghost"),
        Err(PathError::NoSubview {
            segment: "ghost".into()
        })
    );
}

#[test]
fn orphan_has_no_ancestors() {
    let mut tree = ViewTree::new();
    let orphan = insert_probe(&mut tree, &Calls::new());

    assert_eq!(tree.find_parent(orphan, ROOT), None);
}

#[test]
fn root_path_from_a_grandchild_of_the_target() {
    let mut tree = ViewTree::new();
    let (app, _, _) = layout(&mut tree);
    let list = tree.find_parent(app, "root.sidebar.list");
    assert_eq!(list, None);

    let sidebar = tree.subview(app, "sidebar").unwrap();
    let list = tree.subview(sidebar, "list").unwrap();
    let calls = Calls::new();
    let row = insert_probe(&mut tree, &calls);
    let cell = insert_probe(&mut tree, &calls);
    tree.set_subview(list, "row", row).unwrap();
    tree.set_subview(row, "cell", cell).unwrap();

    assert_eq!(tree.find_parent(cell, "root.sidebar.list"), Some(list));
}
