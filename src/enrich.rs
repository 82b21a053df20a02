use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{DelayRange, Layout};
use crate::entry::{Enriched, Entry, Outcome};
use crate::fetcher::PageFetcher;
use crate::parser::classify::normalize_component;
use crate::parser::head_table;

/// Enrichment stats returned after completion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrichStats {
    pub total: usize,
    pub ok: usize,
    pub missing: usize,
    pub errors: usize,
}

impl EnrichStats {
    fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Classified => self.ok += 1,
            Outcome::Missing => self.missing += 1,
            Outcome::FetchFailed(_) => self.errors += 1,
        }
    }
}

/// Randomized pause between requests so the server does not see a burst.
pub struct Throttle {
    range: DelayRange,
}

impl Throttle {
    pub fn new(range: DelayRange) -> Self {
        Self { range }
    }

    pub fn next_delay(&self) -> Duration {
        let (min, max) = (self.range.min(), self.range.max());
        let secs = if min == max {
            min
        } else {
            rand::thread_rng().gen_range(min..=max)
        };
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Fetch, extract and classify every entry, one at a time, in input order.
///
/// Every input entry yields exactly one output, whatever happened to its
/// fetch. The first request goes out immediately; each later one waits for
/// a delay drawn from `throttle`.
pub async fn enrich<F: PageFetcher>(
    fetcher: &F,
    entries: Vec<Entry>,
    throttle: &Throttle,
    layout: &Layout,
) -> (Vec<Enriched>, EnrichStats) {
    let pb = progress_bar(entries.len());
    let mut stats = EnrichStats::default();
    let mut out = Vec::with_capacity(entries.len());

    for (i, entry) in entries.into_iter().enumerate() {
        info!("Processing URL: {}", entry.source_url);
        if i > 0 {
            let delay = throttle.next_delay();
            info!(
                "Waiting for {:.2} seconds before making the request...",
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
        }

        let enriched = enrich_one(fetcher, entry, layout).await;
        stats.record(&enriched.outcome);
        out.push(enriched);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "Enriched {} entries ({} ok, {} missing, {} errors)",
        stats.total, stats.ok, stats.missing, stats.errors
    );
    for (id, reason) in failures(&out) {
        warn!("JEP {} left unclassified: {}", id, reason);
    }
    (out, stats)
}

/// `(id, reason)` for every entry whose page could not be fetched.
pub fn failures(enriched: &[Enriched]) -> Vec<(&str, &str)> {
    enriched
        .iter()
        .filter_map(|e| match &e.outcome {
            Outcome::FetchFailed(reason) => Some((e.entry.id.as_str(), reason.as_str())),
            _ => None,
        })
        .collect()
}

async fn enrich_one<F: PageFetcher>(fetcher: &F, entry: Entry, layout: &Layout) -> Enriched {
    let html = match fetcher.fetch(&entry.source_url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(id = %entry.id, "Error fetching the URL: {}", e);
            return Enriched::unresolved(entry, Outcome::FetchFailed(e.to_string()), layout);
        }
    };

    let Some(metadata) = head_table::extract(&html) else {
        warn!(id = %entry.id, "No head table found for URL: {}", entry.source_url);
        return Enriched::unresolved(entry, Outcome::Missing, layout);
    };
    debug!(id = %entry.id, "Parsed {} head table rows", metadata.len());

    match metadata.component() {
        Some(raw) => {
            let component = normalize_component(raw);
            info!(id = %entry.id, "Extracted Component: {}", component);
            Enriched::resolve(entry, component, Outcome::Classified, layout)
        }
        None => {
            warn!(id = %entry.id, "'Component' key not found for URL: {}", entry.source_url);
            Enriched::unresolved(entry, Outcome::Missing, layout)
        }
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40} {pos}/{len} (eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
