mod config;
mod enrich;
mod entry;
mod error;
mod fetcher;
mod input;
mod parser;
mod report;
#[cfg(test)]
mod testing;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use config::{
    DelayRange, Layout, RunConfig, DEFAULT_BASE_URL, DEFAULT_DELAY_MAX, DEFAULT_DELAY_MIN,
    DEFAULT_TIMEOUT_SECS, timeout_from_secs,
};
use enrich::Throttle;
use fetcher::{HttpFetcher, PageFetcher};
use parser::classify::normalize_component;
use parser::head_table;

#[derive(Parser)]
#[command(name = "jep_report", about = "Classify OpenJDK JEPs by component")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every JEP in a list and print a `~`-delimited report on stdout
    Report {
        /// Input file, one `<id>: <feature>` per line
        file_path: PathBuf,
        /// Release tag attached to every row (e.g. "JDK 17"); enables the versioned layout
        jdk_version: Option<String>,
        /// Minimum delay in seconds between requests
        #[arg(long = "delay_min", visible_alias = "delay-min", env = "JEP_DELAY_MIN", default_value_t = DEFAULT_DELAY_MIN)]
        delay_min: f64,
        /// Maximum delay in seconds between requests
        #[arg(long = "delay_max", visible_alias = "delay-max", env = "JEP_DELAY_MAX", default_value_t = DEFAULT_DELAY_MAX)]
        delay_max: f64,
        /// Separator between id and feature (default ": ", or ":" with a jdk_version)
        #[arg(long)]
        separator: Option<String>,
        #[command(flatten)]
        http: HttpArgs,
    },
    /// Print the Component of a single JEP
    Component {
        /// JEP number or full page URL
        target: String,
        /// Print every metadata row, not just Component
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        http: HttpArgs,
    },
}

#[derive(clap::Args)]
struct HttpArgs {
    /// Per-request timeout in seconds
    #[arg(long, env = "JEP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
    /// Prefix a JEP number is appended to
    #[arg(long, env = "JEP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            file_path,
            jdk_version,
            delay_min,
            delay_max,
            separator,
            http,
        } => {
            let mut config = RunConfig::new(file_path, Layout::from_release(jdk_version));
            config.delay = DelayRange::new(delay_min, delay_max)?;
            config.timeout = timeout_from_secs(http.timeout)?;
            config.base_url = http.base_url;
            if let Some(separator) = separator {
                config.separator = separator;
            }

            info!("Processing file: {}", config.input.display());
            let fetcher = HttpFetcher::new(config.timeout)?;
            print!("{}", run_report(&fetcher, &config).await);
        }
        Commands::Component { target, all, http } => {
            let url = fetcher::lookup_url(&target, &http.base_url);
            let fetcher = HttpFetcher::new(timeout_from_secs(http.timeout)?)?;
            print!("{}", run_component(&fetcher, &url, all).await?);
        }
    }

    info!("Done in {}", format_duration(t0.elapsed()));
    Ok(())
}

/// Load → enrich → format. Never fails: a missing input file gives a
/// header-only report and fetch problems stay on their own rows.
async fn run_report<F: PageFetcher>(fetcher: &F, config: &RunConfig) -> String {
    let entries = match input::load(&config.input, &config.separator, &config.base_url) {
        Ok(entries) => entries,
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    };

    let throttle = Throttle::new(config.delay);
    let (mut enriched, _) = enrich::enrich(fetcher, entries, &throttle, &config.layout).await;
    report::format(&mut enriched, &config.layout)
}

async fn run_component<F: PageFetcher>(fetcher: &F, url: &str, all: bool) -> anyhow::Result<String> {
    let html = fetcher
        .fetch(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    let metadata = head_table::extract(&html).unwrap_or_default();
    let mut out = String::new();
    if all && !metadata.is_empty() {
        for (key, value) in metadata.iter() {
            out.push_str(&format!("{}: {}\n", key, normalize_component(value)));
        }
    } else if let Some(component) = metadata.component() {
        out.push_str(&format!("Component: {}\n", normalize_component(component)));
    }

    if out.is_empty() {
        out.push_str("No relevant information found.\n");
    }
    Ok(out)
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
