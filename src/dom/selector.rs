//! Minimal CSS selectors: `tag`, `#id`, `.class`, compounds of those, and
//! the descendant combinator (whitespace).

use compact_str::CompactString;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<CompactString>,
    pub id: Option<CompactString>,
    pub classes: Vec<CompactString>,
}

impl Compound {
    pub fn matches(&self, tag: &str, id: Option<&str>, classes: &[CompactString]) -> bool {
        if let Some(want) = &self.tag {
            if !want.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(want) = &self.id {
            if id != Some(want.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| classes.contains(c))
    }
}

/// A chain of compounds; the last one is the subject, the others must match
/// ancestors in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Option<Self> {
        let parts = input
            .split_whitespace()
            .map(parse_compound)
            .collect::<Option<Vec<_>>>()?;
        if parts.is_empty() {
            return None;
        }
        Some(Self { parts })
    }

    pub fn subject(&self) -> &Compound {
        // parse() rejects empty chains
        &self.parts[self.parts.len() - 1]
    }

    /// Compounds that must match ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Compound> {
        self.parts[..self.parts.len() - 1].iter().rev()
    }
}

fn parse_compound(s: &str) -> Option<Compound> {
    let mut out = Compound::default();

    let end = s.find(['.', '#']).unwrap_or(s.len());
    let tag = &s[..end];
    if !tag.is_empty() && tag != "*" {
        if !is_ident(tag) {
            return None;
        }
        out.tag = Some(tag.to_ascii_lowercase().into());
    }

    let mut rest = &s[end..];
    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let ident = &body[..end];
        if !is_ident(ident) {
            return None;
        }
        match marker {
            '.' => out.classes.push(ident.into()),
            '#' if out.id.is_none() => out.id = Some(ident.into()),
            _ => return None,
        }
        rest = &body[end..];
    }

    Some(out)
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
#[path = "../../tests/unit/dom/selector.rs"]
mod tests;
