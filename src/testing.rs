use std::collections::HashMap;
use std::sync::Mutex;

use tokio::time::Instant;

use crate::config::DEFAULT_BASE_URL;
use crate::error::FetchError;
use crate::fetcher::PageFetcher;

/// Serves canned pages keyed by JEP id; unknown URLs answer 404.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl FakeFetcher {
    /// A page whose head table holds a single `Component` row.
    pub fn page(self, id: &str, component: &str) -> Self {
        let html = format!(
            r#"<html><body><table class="head"><tr><td>Component</td><td>{}</td></tr></table></body></html>"#,
            component
        );
        self.raw(id, &html)
    }

    pub fn raw(mut self, id: &str, html: &str) -> Self {
        self.pages
            .insert(format!("{}{}", DEFAULT_BASE_URL, id), html.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    /// When each fetch started, on tokio's clock (virtual under a paused runtime).
    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push((url.to_string(), Instant::now()));
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
