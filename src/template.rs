use serde_json::Value;
use std::rc::Rc;

/// Renders a template source against data. Injected per tree.
pub type TemplateFn = Rc<dyn Fn(&str, &Value) -> String>;

pub fn default_template_fn() -> TemplateFn {
    Rc::new(interpolate)
}

/// Replaces `{{ key }}` and `{{ a.b }}` placeholders with values from
/// `data`. Strings are inserted verbatim, other values as JSON, missing keys
/// as nothing. An unterminated `{{` is left as-is.
pub fn interpolate(source: &str, data: &Value) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = after[..end].trim();
        match lookup(data, key) {
            Some(Value::String(s)) => out.push_str(s),
            Some(Value::Null) | None => {}
            Some(v) => out.push_str(&v.to_string()),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(data, |value, segment| value.get(segment))
}

#[cfg(test)]
#[path = "../tests/unit/template.rs"]
mod tests;
