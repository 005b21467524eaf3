//! Depth-relative template variables.

use std::path::{Component, Path};

/// Token replaced with the relative path back to the site root.
pub const BASE_TOKEN: &str = "{{BASE}}";

/// Token replaced with the link to the tools index.
pub const TOOLS_HREF_TOKEN: &str = "{{TOOLS_HREF}}";

/// Token replaced with the active-state style of the tools link.
pub const TOOLS_ACTIVE_TOKEN: &str = "{{TOOLS_ACTIVE}}";

const TOOLS_ACTIVE_STYLE: &str = r#" style="color: var(--text-primary);""#;

/// Template variables for a single page.
///
/// Values are derived from the page's directory depth below the site root.
/// Tokens are applied in a fixed order; none contains another, so the order
/// never changes the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    depth: usize,
    pairs: [(&'static str, String); 3],
}

impl TemplateVars {
    /// Compute the variables for a page `depth` directories below the root.
    pub fn for_depth(depth: usize) -> Self {
        let (base, tools_href, tools_active) = if depth == 0 {
            (String::new(), "tools/", "")
        } else {
            ("../".repeat(depth), "./", TOOLS_ACTIVE_STYLE)
        };

        Self {
            depth,
            pairs: [
                (BASE_TOKEN, base),
                (TOOLS_HREF_TOKEN, tools_href.to_string()),
                (TOOLS_ACTIVE_TOKEN, tools_active.to_string()),
            ],
        }
    }

    /// Depth these variables were computed for.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Look up the value of a token.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == token)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(token, value)` pairs in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Replace every occurrence of every token in `text`.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (token, value) in self.iter() {
            if out.contains(token) {
                out = out.replace(token, value);
            }
        }
        out
    }
}

/// Directory depth of a page, given its path relative to the site root.
///
/// `index.html` is depth 0, `docs/page.html` is depth 1.
pub fn page_depth(relative: &Path) -> usize {
    relative
        .parent()
        .map(|dir| {
            dir.components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .count()
        })
        .unwrap_or(0)
}
