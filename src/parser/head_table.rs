use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static HEAD_TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table.head").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

pub const COMPONENT_KEY: &str = "Component";

/// Key/value pairs from a JEP page header table, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMetadata {
    pairs: Vec<(String, String)>,
}

impl ComponentMetadata {
    /// Later duplicates overwrite the value but keep the original position.
    pub fn insert(&mut self, key: String, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn component(&self) -> Option<&str> {
        self.get(COMPONENT_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Parse the `table.head` metadata block of a JEP page.
///
/// Returns `None` when the page has no such table (redirects, error pages).
/// Rows that do not have exactly two `td` cells are skipped, so a table with
/// only header rows yields an empty map rather than `None`.
pub fn extract(html: &str) -> Option<ComponentMetadata> {
    let document = Html::parse_document(html);
    let table = document.select(&HEAD_TABLE).next()?;

    let mut metadata = ComponentMetadata::default();
    for row in table.select(&ROW) {
        let cells: Vec<ElementRef> = row.select(&CELL).collect();
        if let [key, value] = cells.as_slice() {
            metadata.insert(cell_text(key), cell_text(value));
        }
    }
    Some(metadata)
}

/// Concatenation of the cell's text nodes, each trimmed.
fn cell_text(cell: &ElementRef) -> String {
    cell.text().map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn no_head_table() {
        assert!(extract("<html><body><table class=\"other\"><tr><td>Component</td><td>x</td></tr></table></body></html>").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn single_component_row() {
        let html = r#"<table class="head"><tr><td>Component</td><td>core-libs / java.io</td></tr></table>"#;
        let meta = extract(html).unwrap();
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.component(), Some("core-libs / java.io"));
    }

    #[test]
    fn table_without_pairs_is_empty_not_none() {
        let html = r#"<table class="head"><tr><th>Owner</th></tr><tr><td>a</td><td>b</td><td>c</td></tr></table>"#;
        let meta = extract(html).unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn later_duplicate_overwrites() {
        let html = r#"<table class="head">
            <tr><td>Component</td><td>tools / javac</td></tr>
            <tr><td>Scope</td><td>SE</td></tr>
            <tr><td>Component</td><td>tools / jshell</td></tr>
        </table>"#;
        let meta = extract(html).unwrap();
        assert_eq!(meta.component(), Some("tools / jshell"));
        let keys: Vec<&str> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Component", "Scope"]);
    }

    #[test]
    fn head_among_multiple_classes() {
        let html = r#"<table class="wide head"><tr><td> Status </td><td>
            Closed / Delivered </td></tr></table>"#;
        let meta = extract(html).unwrap();
        assert_eq!(meta.get("Status"), Some("Closed / Delivered"));
    }

    #[test]
    fn jep158_fixture() {
        let meta = extract(&fixture("jep158")).unwrap();
        assert_eq!(meta.get("Owner"), Some("Fredrik Arvidsson"));
        assert_eq!(meta.get("Release"), Some("9"));
        // Entity-encoded thin spaces survive extraction.
        assert_eq!(meta.component(), Some("hotspot\u{2009}/\u{2009}runtime"));
    }

    #[test]
    fn redirect_fixture_has_no_table() {
        assert!(extract(&fixture("no_table")).is_none());
    }
}
