use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Language,
    Api,
    Gc,
    Jvm,
    Tool,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Language => "Language",
            Category::Api => "API",
            Category::Gc => "GC",
            Category::Jvm => "JVM",
            Category::Tool => "Tool",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Exact(&'static str),
    /// Plain string prefix, not segment-aware: "hotspot" matches "hotspot-compiler".
    Prefix(&'static str),
}

impl Rule {
    fn matches(&self, component: &str) -> bool {
        match *self {
            Rule::Exact(s) => component == s,
            Rule::Prefix(p) => component.starts_with(p),
        }
    }
}

// First match wins. Exact rules must stay ahead of the prefixes they overlap.
const RULES: &[(Rule, Category)] = &[
    (Rule::Exact("core-libs / java.lang"), Category::Language),
    (Rule::Exact("specification / language"), Category::Language),
    (Rule::Prefix("core-libs"), Category::Api),
    (Rule::Prefix("security-libs"), Category::Api),
    (Rule::Exact("hotspot / gc"), Category::Gc),
    (Rule::Prefix("hotspot"), Category::Jvm),
    (Rule::Prefix("tools"), Category::Tool),
];

pub fn classify(component: &str) -> Category {
    RULES
        .iter()
        .find(|(rule, _)| rule.matches(component))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

/// JEP pages separate component segments with thin spaces (U+2009).
pub fn normalize_component(raw: &str) -> String {
    raw.replace('\u{2009}', " ")
}
