use std::path::PathBuf;

use serde_json::json;
use subviews::dom::{Dom, ElementId};
use subviews::settings::{ensure_settings_file, load_settings};
use subviews::{Capabilities, Manifest, ManifestEntry, Model, Settings, View, ViewClass, ViewCx, ViewTree};

#[derive(Default)]
struct Sidebar;

impl View for Sidebar {
    fn class_name(&self) -> Option<&str> {
        Some("sidebar")
    }

    fn grid_area(&self) -> Option<&str> {
        Some("side")
    }

    fn manifest(&self) -> Manifest {
        Manifest::new().view("list", ViewClass::of::<ItemList>())
    }
}

#[derive(Default)]
struct ItemList;

impl View for ItemList {
    fn capabilities(&self) -> Capabilities {
        Capabilities::RENDER | Capabilities::SET_MODEL
    }

    fn tag_name(&self) -> &str {
        "ul"
    }

    fn template(&self) -> Option<String> {
        Some("{{ count }} items".to_string())
    }
}

#[derive(Default)]
struct Header;

impl View for Header {
    fn tag_name(&self) -> &str {
        "header"
    }

    fn template(&self) -> Option<String> {
        Some("<h1>{{ title }}</h1>".to_string())
    }
}

#[derive(Default)]
struct Shell;

impl View for Shell {
    fn class_name(&self) -> Option<&str> {
        Some("shell")
    }

    fn manifest(&self) -> Manifest {
        Manifest::new()
            .view("header", ViewClass::of::<Header>())
            .view(
                "sidebar",
                ManifestEntry::new(ViewClass::of::<Sidebar>())
                    .model_binder(|cx: &mut ViewCx<'_>, child, model| {
                        cx.tree().set_model(child, model.cloned());
                    }),
            )
    }
}

fn main() -> std::io::Result<()> {
    let mut settings_path: Option<PathBuf> = None;
    let mut log_dir: Option<PathBuf> = None;

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--settings=") {
            settings_path = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--log-dir=") {
            log_dir = Some(PathBuf::from(value));
        }
    }

    let settings = match settings_path {
        Some(path) => {
            ensure_settings_file(&path).map_err(std::io::Error::other)?;
            load_settings(&path).map_err(std::io::Error::other)?
        }
        None => Settings::default(),
    };
    let _logging = subviews::logging::init(&settings, log_dir.as_deref());

    let mut tree = ViewTree::with_settings(settings);
    let shell = tree.insert(Box::new(Shell));
    tree.set_model(shell, Some(Model::from_json(json!({ "title": "Inbox", "count": 3 }))));

    let body = tree.dom().body();
    tree.render_to(shell, body).map_err(std::io::Error::other)?;

    let mut out = String::new();
    dump(tree.dom(), body, 0, &mut out);
    print!("{}", out);

    tree.destroy(shell);
    tracing::info!(views = tree.len(), "demo finished");
    Ok(())
}

fn dump(dom: &Dom, el: ElementId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let tag = dom.tag(el).unwrap_or("?");
    let text = dom.text(el).unwrap_or_default();
    match dom.style(el, "grid-area") {
        Some(area) => out.push_str(&format!("{}<{} grid-area={}> {}\n", indent, tag, area, text)),
        None => out.push_str(&format!("{}<{}> {}\n", indent, tag, text)),
    }
    for &child in dom.children(el) {
        dump(dom, child, depth + 1, out);
    }
}
