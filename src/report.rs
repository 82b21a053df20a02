use crate::config::Layout;
use crate::entry::Enriched;

pub const DELIMITER: &str = "~";

const PLAIN_COLUMNS: &[&str] = &["Type", "Component", "JEP", "Feature", "Link", "Title"];
const VERSIONED_COLUMNS: &[&str] = &["Release", "Category", "Component", "Feature", "Link"];

pub fn columns(layout: &Layout) -> &'static [&'static str] {
    match layout {
        Layout::Plain => PLAIN_COLUMNS,
        Layout::Versioned { .. } => VERSIONED_COLUMNS,
    }
}

/// Sort by (category, component, title) and render the `~`-delimited table,
/// header first. Always ends with a newline.
pub fn format(entries: &mut [Enriched], layout: &Layout) -> String {
    entries.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    let mut out = columns(layout).join(DELIMITER);
    out.push('\n');
    for e in entries.iter() {
        out.push_str(&row(e, layout).join(DELIMITER));
        out.push('\n');
    }
    out
}

fn sort_key(e: &Enriched) -> (&str, &str, &str) {
    (e.category.as_str(), e.component.as_str(), e.derived.title.as_str())
}

fn row<'a>(e: &'a Enriched, layout: &Layout) -> Vec<&'a str> {
    match layout {
        Layout::Plain => vec![
            e.category.as_str(),
            e.component.as_str(),
            e.entry.id.as_str(),
            e.entry.description.as_str(),
            e.derived.link.as_str(),
            e.derived.title.as_str(),
        ],
        Layout::Versioned { .. } => vec![
            e.derived.release.as_deref().unwrap_or(""),
            e.category.as_str(),
            e.component.as_str(),
            e.entry.description.as_str(),
            e.derived.link.as_str(),
        ],
    }
}
