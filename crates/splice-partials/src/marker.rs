//! Partial marker detection.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Partial name: a letter, digit or underscore, then those or hyphens.
///
/// Word characters are letters, numbers and `_` only; marks and connector
/// punctuation such as `‿` are excluded.
const NAME_PATTERN: &str = r"[\p{L}\p{N}_][\p{L}\p{N}_-]*";

// `R` makes `^`/`$` treat `\r\n` as a single terminator, so CRLF pages match
// and the terminator stays outside the match.
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?mR)^[ \t]*<!-- PARTIAL:(?P<name>{NAME_PATTERN}) -->[ \t]*$"
    ))
    .expect("Invalid partial marker regex")
});

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{NAME_PATTERN}$")).expect("Invalid partial name regex")
});

/// A `<!-- PARTIAL:name -->` line found in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialMarker {
    /// Partial name (letters, numbers, `_` and hyphens)
    pub name: String,

    /// Line number of the marker (1-indexed)
    pub line: usize,

    /// Byte range of the marker line, including surrounding spaces and tabs
    /// but not the line terminator
    pub span: Range<usize>,
}

/// Find every marker line in `content`, in order of appearance.
pub fn find_markers(content: &str) -> Vec<PartialMarker> {
    let mut markers = Vec::new();
    let mut line = 1;
    let mut scanned = 0;

    for caps in MARKER_RE.captures_iter(content) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        line += content[scanned..whole.start()].matches('\n').count();
        scanned = whole.start();

        markers.push(PartialMarker {
            name: caps["name"].to_string(),
            line,
            span: whole.range(),
        });
    }

    markers
}

/// Check whether a string is a valid partial name.
///
/// Accepts exactly the names [`find_markers`] can return.
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_single_marker() {
        let content = "<html>\n<!-- PARTIAL:nav -->\n</html>\n";

        let markers = find_markers(content);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "nav");
        assert_eq!(markers[0].line, 2);
        assert_eq!(&content[markers[0].span.clone()], "<!-- PARTIAL:nav -->");
    }

    #[test]
    fn span_includes_surrounding_whitespace() {
        let content = "<body>\n  \t<!-- PARTIAL:site-header -->  \n</body>";

        let markers = find_markers(content);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "site-header");
        assert_eq!(
            &content[markers[0].span.clone()],
            "  \t<!-- PARTIAL:site-header -->  "
        );
    }

    #[test]
    fn finds_markers_in_order() {
        let content = "<!-- PARTIAL:head -->\n<p>body</p>\n<!-- PARTIAL:footer -->\n";

        let markers = find_markers(content);
        let names: Vec<_> = markers.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, vec!["head", "footer"]);
        assert_eq!(markers[0].line, 1);
        assert_eq!(markers[1].line, 3);
    }

    #[test]
    fn ignores_inline_markers() {
        let content = "<div><!-- PARTIAL:nav --></div>\ntext <!-- PARTIAL:nav -->\n";

        assert!(find_markers(content).is_empty());
    }

    #[test]
    fn rejects_malformed_markers() {
        assert!(find_markers("<!-- PARTIAL:-nav -->").is_empty());
        assert!(find_markers("<!--  PARTIAL:nav -->").is_empty());
        assert!(find_markers("<!-- PARTIAL: nav -->").is_empty());
        assert!(find_markers("<!-- PARTIAL:nav.html -->").is_empty());
        assert!(find_markers("<!-- partial:nav -->").is_empty());
    }

    #[test]
    fn matches_last_line_without_newline() {
        let content = "<p>x</p>\n<!-- PARTIAL:footer -->";

        let markers = find_markers(content);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].span.end, content.len());
    }

    #[test]
    fn matches_crlf_lines_without_terminator() {
        let content = "<p>x</p>\r\n  <!-- PARTIAL:nav -->\r\n<p>y</p>\r\n";

        let markers = find_markers(content);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].line, 2);
        assert_eq!(&content[markers[0].span.clone()], "  <!-- PARTIAL:nav -->");
    }

    #[test]
    fn accepts_unicode_letters() {
        let markers = find_markers("<!-- PARTIAL:café-menu -->\n");

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "café-menu");
    }

    #[test]
    fn ignores_connector_punctuation_in_names() {
        assert!(find_markers("<!-- PARTIAL:a‿b -->\n").is_empty());
        assert!(find_markers("<!-- PARTIAL:e\u{301} -->\n").is_empty());
        assert!(!is_valid_name("a‿b"));
    }

    #[test]
    fn found_names_are_valid() {
        let content = "<!-- PARTIAL:nav -->\n\
                       <!-- PARTIAL:_x-1 -->\n\
                       <!-- PARTIAL:café -->\n\
                       <!-- PARTIAL:名前 -->\n\
                       <!-- PARTIAL:a‿b -->\n\
                       <!-- PARTIAL:٣x -->\n";

        let markers = find_markers(content);

        assert_eq!(markers.len(), 5);
        for marker in &markers {
            assert!(is_valid_name(&marker.name), "{} should be valid", marker.name);
        }
    }

    #[test]
    fn validates_names() {
        assert!(is_valid_name("nav"));
        assert!(is_valid_name("site_footer-2"));
        assert!(!is_valid_name("-nav"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("../nav"));
    }
}
