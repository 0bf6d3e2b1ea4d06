//! Directory-listing page scanning.
//!
//! Mirror listings are plain HTML tables: one `<tr>` per file, the
//! first cell holding an anchor to the file itself.  The scanner walks
//! rows in document order and keeps the hrefs whose extension matches
//! the configured one.  Rows without that shape are expected noise
//! (header rows, separators) and are skipped silently.

use scraper::{Html, Selector};

/// Extract matching filenames from a listing page, in document order.
///
/// For each table row, only the first anchor of the first `<td>` is
/// considered.  `extension` may be given with or without a leading dot.
/// Re-scanning the same bytes yields the same list.
pub fn scan(html: &str, extension: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let rows = Selector::parse("tr").unwrap();
    let cells = Selector::parse("td").unwrap();
    let anchors = Selector::parse("a").unwrap();

    let wanted = extension.trim_matches('.');
    let mut found = Vec::new();
    for row in document.select(&rows) {
        let Some(cell) = row.select(&cells).next() else {
            continue;
        };
        let Some(anchor) = cell.select(&anchors).next() else {
            continue;
        };
        let href = anchor.value().attr("href").unwrap_or("");
        if extension_of(href).trim_matches('.') == wanted {
            found.push(href.to_string());
        }
    }
    found
}

/// The extension of the final path component, including its dot, or
/// `""` if there is none.  Leading dots of the component are part of
/// the name, not an extension (`".bashrc"` has no extension), matching
/// how dotfiles are conventionally split.
fn extension_of(path: &str) -> &str {
    let base = path.rsplit('/').next().unwrap_or(path);
    let name = base.trim_start_matches('.');
    match name.rfind('.') {
        Some(i) => &name[i..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<html><body><table>
        <tr><th>Name</th><th>Size</th></tr>
        <tr><td><a href="debian-amd64.iso">debian-amd64.iso</a></td><td>3G</td></tr>
        <tr><td><a href="readme.txt">readme.txt</a></td><td>1K</td></tr>
        <tr><td><a href="debian-amd64-2.iso">debian-amd64-2.iso</a></td><td>3G</td></tr>
        <tr><td>no anchor here</td></tr>
        <tr><td><a>anchor without href</a></td></tr>
    </table></body></html>"#;

    #[test]
    fn keeps_only_matching_extension_in_document_order() {
        let files = scan(LISTING, "iso");
        assert_eq!(files, vec!["debian-amd64.iso", "debian-amd64-2.iso"]);
    }

    #[test]
    fn leading_dot_on_configured_extension_is_ignored() {
        assert_eq!(scan(LISTING, ".iso"), scan(LISTING, "iso"));
    }

    #[test]
    fn rescanning_yields_the_same_list() {
        assert_eq!(scan(LISTING, "iso"), scan(LISTING, "iso"));
    }

    #[test]
    fn extension_match_is_exact_not_prefix() {
        let html = r#"<table>
            <tr><td><a href="foo.isox">x</a></td></tr>
            <tr><td><a href="foo">y</a></td></tr>
            <tr><td><a href="foo.iso">z</a></td></tr>
        </table>"#;
        assert_eq!(scan(html, "iso"), vec!["foo.iso"]);
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let html = r#"<table><tr><td><a href="foo.ISO">x</a></td></tr></table>"#;
        assert!(scan(html, "iso").is_empty());
        assert_eq!(scan(html, "ISO"), vec!["foo.ISO"]);
    }

    #[test]
    fn only_the_first_anchor_of_the_first_cell_counts() {
        let html = r#"<table><tr>
            <td><a href="skip.txt">first cell</a></td>
            <td><a href="other.iso">second cell</a></td>
        </tr></table>"#;
        assert!(scan(html, "iso").is_empty());
    }

    #[test]
    fn rows_without_cells_or_anchors_are_skipped_silently() {
        let html = r#"<table>
            <tr></tr>
            <tr><th><a href="header.iso">in a th, not a td</a></th></tr>
            <tr><td></td></tr>
        </table>"#;
        assert!(scan(html, "iso").is_empty());
    }

    #[test]
    fn empty_page_yields_nothing() {
        assert!(scan("", "iso").is_empty());
    }

    // -- extension_of --------------------------------------------------------

    #[test]
    fn extension_of_plain_names() {
        assert_eq!(extension_of("foo.iso"), ".iso");
        assert_eq!(extension_of("foo.tar.gz"), ".gz");
        assert_eq!(extension_of("foo"), "");
    }

    #[test]
    fn extension_of_uses_last_path_component() {
        assert_eq!(extension_of("dir.d/foo.iso"), ".iso");
        assert_eq!(extension_of("dir.d/foo"), "");
    }

    #[test]
    fn extension_of_dotfiles_is_empty() {
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of(".hidden.iso"), ".iso");
    }
}
