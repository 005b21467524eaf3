//! Splicing partials into page content.

use crate::marker::find_markers;
use crate::registry::{PartialError, PartialSource};
use crate::vars::TemplateVars;

/// Result of expanding a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Page content with every marker line replaced
    pub content: String,

    /// Names of the partials spliced in, in page order
    pub partials: Vec<String>,
}

impl Expansion {
    /// Whether any marker was found in the page.
    pub fn has_markers(&self) -> bool {
        !self.partials.is_empty()
    }
}

/// Replace every marker line in `content` with its resolved partial.
///
/// Each partial is loaded from `source` and has `vars` applied. The result
/// is not scanned again, so markers inside a partial are left as-is.
/// Expansion stops at the first partial that cannot be loaded.
pub fn expand(
    content: &str,
    vars: &TemplateVars,
    source: &mut impl PartialSource,
) -> Result<Expansion, PartialError> {
    let markers = find_markers(content);
    if markers.is_empty() {
        return Ok(Expansion {
            content: content.to_string(),
            partials: Vec::new(),
        });
    }

    let mut out = String::with_capacity(content.len());
    let mut partials = Vec::with_capacity(markers.len());
    let mut last = 0;

    for marker in markers {
        let raw = source.load(&marker.name)?;
        tracing::debug!(
            "Expanding partial {} at line {} (depth {})",
            marker.name,
            marker.line,
            vars.depth()
        );

        out.push_str(&content[last..marker.span.start]);
        out.push_str(&vars.apply(&raw));
        last = marker.span.end;

        partials.push(marker.name);
    }

    out.push_str(&content[last..]);

    Ok(Expansion {
        content: out,
        partials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn partials(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn replaces_marker_with_resolved_partial() {
        let mut source = partials(&[("nav", r#"<a href="{{BASE}}about.html">About</a>"#)]);
        let page = "<body>\n<!-- PARTIAL:nav -->\n</body>\n";

        let result = expand(page, &TemplateVars::for_depth(1), &mut source).unwrap();

        assert_eq!(
            result.content,
            "<body>\n<a href=\"../about.html\">About</a>\n</body>\n"
        );
        assert_eq!(result.partials, vec!["nav"]);
    }

    #[test]
    fn replaces_surrounding_whitespace() {
        let mut source = partials(&[("nav", "<nav></nav>")]);
        let page = "<body>\n    <!-- PARTIAL:nav -->\t\n</body>";

        let result = expand(page, &TemplateVars::for_depth(0), &mut source).unwrap();

        assert_eq!(result.content, "<body>\n<nav></nav>\n</body>");
    }

    #[test]
    fn expands_multiple_markers_in_order() {
        let mut source = partials(&[
            ("header", "<header>{{TOOLS_HREF}}</header>"),
            ("footer", "<footer{{TOOLS_ACTIVE}}></footer>"),
        ]);
        let page = "<!-- PARTIAL:header -->\n<main></main>\n<!-- PARTIAL:footer -->\n";

        let result = expand(page, &TemplateVars::for_depth(0), &mut source).unwrap();

        assert_eq!(
            result.content,
            "<header>tools/</header>\n<main></main>\n<footer></footer>\n"
        );
        assert_eq!(result.partials, vec!["header", "footer"]);
    }

    #[test]
    fn repeated_marker_expands_each_time() {
        let mut source = partials(&[("hr", "<hr>")]);
        let page = "<!-- PARTIAL:hr -->\n<p></p>\n<!-- PARTIAL:hr -->\n";

        let result = expand(page, &TemplateVars::for_depth(0), &mut source).unwrap();

        assert_eq!(result.content, "<hr>\n<p></p>\n<hr>\n");
    }

    #[test]
    fn does_not_expand_nested_markers() {
        let mut source = partials(&[
            ("outer", "<div>\n<!-- PARTIAL:inner -->\n</div>"),
            ("inner", "<span></span>"),
        ]);
        let page = "<!-- PARTIAL:outer -->\n";

        let result = expand(page, &TemplateVars::for_depth(0), &mut source).unwrap();

        assert_eq!(result.content, "<div>\n<!-- PARTIAL:inner -->\n</div>\n");
        assert_eq!(result.partials, vec!["outer"]);
    }

    #[test]
    fn preserves_crlf_terminators() {
        let mut source = partials(&[("nav", "<nav></nav>")]);
        let page = "<body>\r\n<!-- PARTIAL:nav -->\r\n</body>\r\n";

        let result = expand(page, &TemplateVars::for_depth(0), &mut source).unwrap();

        assert_eq!(result.content, "<body>\r\n<nav></nav>\r\n</body>\r\n");
    }

    #[test]
    fn page_without_markers_is_unchanged() {
        let mut source = partials(&[]);
        let page = "<p>{{BASE}} stays literal in pages</p>\n";

        let result = expand(page, &TemplateVars::for_depth(3), &mut source).unwrap();

        assert_eq!(result.content, page);
        assert!(!result.has_markers());
    }

    #[test]
    fn fails_on_missing_partial() {
        let mut source = partials(&[("nav", "<nav></nav>")]);
        let page = "<!-- PARTIAL:nav -->\n<!-- PARTIAL:sidebar -->\n";

        let err = expand(page, &TemplateVars::for_depth(0), &mut source).unwrap_err();

        assert!(matches!(err, PartialError::NotFound { ref name, .. } if name == "sidebar"));
    }
}
