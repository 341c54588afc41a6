use super::*;

#[test]
fn append_attaches_under_body() {
    let mut dom = Dom::new();
    let el = dom.create_element("div");
    assert!(!dom.is_attached(el));

    dom.append_child(dom.body(), el).unwrap();
    assert!(dom.is_attached(el));
    assert_eq!(dom.parent(el), Some(dom.body()));
}

#[test]
fn append_moves_an_attached_element() {
    let mut dom = Dom::new();
    let a = dom.create_element("div");
    let b = dom.create_element("div");
    let child = dom.create_element("span");

    dom.append_child(a, child).unwrap();
    dom.append_child(b, child).unwrap();

    assert!(dom.children(a).is_empty());
    assert_eq!(dom.children(b), &[child]);
}

#[test]
fn append_rejects_cycles() {
    let mut dom = Dom::new();
    let outer = dom.create_element("div");
    let inner = dom.create_element("div");
    dom.append_child(outer, inner).unwrap();

    assert_eq!(
        dom.append_child(inner, outer),
        Err(DomError::HierarchyRequest)
    );
    assert_eq!(dom.append_child(outer, outer), Err(DomError::HierarchyRequest));
}

#[test]
fn contains_is_inclusive_and_transitive() {
    let mut dom = Dom::new();
    let a = dom.create_element("div");
    let b = dom.create_element("div");
    let c = dom.create_element("div");
    dom.append_child(a, b).unwrap();
    dom.append_child(b, c).unwrap();

    assert!(dom.contains(a, a));
    assert!(dom.contains(a, c));
    assert!(!dom.contains(c, a));
}

#[test]
fn set_html_detaches_child_elements() {
    let mut dom = Dom::new();
    let host = dom.create_element("div");
    let child = dom.create_element("p");
    dom.append_child(host, child).unwrap();

    dom.set_html(host, "<h1>hi</h1>");

    assert_eq!(dom.text(host), Some("<h1>hi</h1>"));
    assert!(dom.children(host).is_empty());
    assert_eq!(dom.parent(child), None);
    assert!(dom.exists(child));
}

#[test]
fn detach_bumps_revision_only_when_attached() {
    let mut dom = Dom::new();
    let el = dom.create_element("div");
    let before = dom.revision();
    dom.detach(el);
    assert_eq!(dom.revision(), before);

    dom.append_child(dom.body(), el).unwrap();
    let attached = dom.revision();
    dom.detach(el);
    assert_eq!(dom.revision(), attached + 1);
    assert!(!dom.is_attached(el));
}

#[test]
fn destroy_frees_subtree() {
    let mut dom = Dom::new();
    let a = dom.create_element("div");
    let b = dom.create_element("div");
    dom.append_child(dom.body(), a).unwrap();
    dom.append_child(a, b).unwrap();

    dom.destroy(a);

    assert!(!dom.exists(a));
    assert!(!dom.exists(b));
    assert!(dom.children(dom.body()).is_empty());
}

#[test]
fn query_finds_first_match_in_document_order() {
    let mut dom = Dom::new();
    let root = dom.create_element("div");
    let header = dom.create_element("header");
    let title = dom.create_element("h1");
    let badge = dom.create_element("span");
    let other = dom.create_element("span");
    dom.add_class(title, "title");
    dom.add_class(badge, "badge");
    dom.add_class(other, "badge");
    dom.append_child(root, header).unwrap();
    dom.append_child(header, title).unwrap();
    dom.append_child(title, badge).unwrap();
    dom.append_child(root, other).unwrap();

    assert_eq!(dom.query(root, ".badge"), Some(badge));
    assert_eq!(dom.query(root, ".title .badge"), Some(badge));
    assert_eq!(dom.query(root, "header span.badge"), Some(badge));
    assert_eq!(dom.query_all(root, "span.badge"), vec![badge, other]);
    assert_eq!(dom.query(root, ".missing"), None);
}

#[test]
fn query_excludes_scope_itself() {
    let mut dom = Dom::new();
    let root = dom.create_element("div");
    dom.set_id_attr(root, "app");
    assert_eq!(dom.query(root, "#app"), None);
    assert_eq!(dom.query(dom.body(), "#app"), None);

    dom.append_child(dom.body(), root).unwrap();
    assert_eq!(dom.query(dom.body(), "#app"), Some(root));
}

#[test]
fn classes_and_style() {
    let mut dom = Dom::new();
    let el = dom.create_element("div");
    dom.add_class(el, "a b a");
    assert!(dom.has_class(el, "a"));
    assert!(dom.has_class(el, "b"));

    dom.set_style(el, "grid-area", "sidebar");
    assert_eq!(dom.style(el, "grid-area"), Some("sidebar"));
}
