use crate::config::Layout;
use crate::parser::classify::{classify, Category};

/// One line of the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub description: String,
    pub source_url: String,
}

impl Entry {
    pub fn new(id: &str, description: &str, base_url: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            source_url: format!("{}{}", base_url, id),
        }
    }

    pub fn title(&self) -> String {
        format!("JEP {}: {}", self.id, self.description)
    }
}

/// How the enrichment attempt for an entry ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Classified,
    /// Page fetched, but no `head` table or no `Component` row.
    Missing,
    FetchFailed(String),
}

/// Presentation-only fields, computed after component and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    pub link: String,
    pub title: String,
    pub release: Option<String>,
}

impl Derived {
    fn compute(entry: &Entry, layout: &Layout) -> Self {
        let title = entry.title();
        let link_text = match layout {
            Layout::Plain => title.clone(),
            Layout::Versioned { .. } => format!("JEP {}", entry.id),
        };
        Self {
            link: hyperlink(&entry.source_url, &link_text),
            title,
            release: layout.release().map(str::to_string),
        }
    }
}

/// Spreadsheet hyperlink formula.
pub fn hyperlink(url: &str, text: &str) -> String {
    format!("=HYPERLINK(\"{}\",\"{}\")", url, text)
}

/// An entry after its single enrichment attempt. Terminal: the only way to
/// build one is [`Enriched::resolve`], which fills fields in dependency order.
#[derive(Debug, Clone)]
pub struct Enriched {
    pub entry: Entry,
    pub component: String,
    pub category: Category,
    pub outcome: Outcome,
    pub derived: Derived,
}

impl Enriched {
    /// `component` must already be normalized; pass `""` when unresolved.
    pub fn resolve(entry: Entry, component: String, outcome: Outcome, layout: &Layout) -> Self {
        let category = classify(&component);
        let derived = Derived::compute(&entry, layout);
        Self {
            entry,
            component,
            category,
            outcome,
            derived,
        }
    }

    pub fn unresolved(entry: Entry, outcome: Outcome, layout: &Layout) -> Self {
        Self::resolve(entry, String::new(), outcome, layout)
    }
}
