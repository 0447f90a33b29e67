//! Link-following discovery of source identifiers, used when no explicit
//! source list is available.

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use engine_logging::{engine_error, engine_info};
use scraper::{Html, Selector};
use url::Url;

use crate::decode::decode_html;
use crate::Fetcher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    pub entry_points: Vec<String>,
    /// Number of breadth-first levels to fetch, entry points included.
    pub max_depth: usize,
    /// Only links on this origin are followed; defaults to each page's own origin.
    pub allowed_origin: Option<String>,
    /// A link is followed when its lowercased path contains one of these.
    pub path_patterns: Vec<String>,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            max_depth: 3,
            allowed_origin: None,
            path_patterns: vec![
                "/developing-connectors/sdk".to_string(),
                "/sdk-reference".to_string(),
                "/connector-sdk".to_string(),
            ],
        }
    }
}

pub struct Crawler<'a> {
    fetcher: &'a dyn Fetcher,
    settings: &'a CrawlSettings,
    rate_limit: Duration,
}

impl<'a> Crawler<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, settings: &'a CrawlSettings, rate_limit: Duration) -> Self {
        Self {
            fetcher,
            settings,
            rate_limit,
        }
    }

    /// Breadth-first crawl from the entry points. Returns every page that was
    /// fetched successfully, in discovery order.
    pub async fn discover(&self) -> Vec<String> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut discovered = Vec::new();
        let mut frontier: Vec<String> = self
            .settings
            .entry_points
            .iter()
            .filter_map(|url| normalize_link(url))
            .collect();
        let mut depth = 0;
        let mut first_request = true;

        while !frontier.is_empty() && depth < self.settings.max_depth {
            let mut next_level = BTreeSet::new();

            for url in frontier {
                if !visited.insert(url.clone()) {
                    continue;
                }
                if !first_request && !self.rate_limit.is_zero() {
                    tokio::time::sleep(self.rate_limit).await;
                }
                first_request = false;

                engine_info!("Crawling: {}", url);
                let output = match self.fetcher.fetch(&url).await {
                    Ok(output) => output,
                    Err(err) => {
                        engine_error!("Failed to crawl {}: {}", url, err);
                        continue;
                    }
                };
                let html = match decode_html(&output.bytes, output.metadata.content_type.as_deref())
                {
                    Ok(decoded) => decoded.html,
                    Err(_) => String::from_utf8_lossy(&output.bytes).into_owned(),
                };
                next_level.extend(extract_links(&html, &url, self.settings));
                discovered.push(url);
            }

            frontier = next_level
                .into_iter()
                .filter(|url| !visited.contains(url))
                .collect();
            depth += 1;
            engine_info!(
                "Completed depth {}, found {} new pages to crawl",
                depth,
                frontier.len()
            );
        }

        discovered
    }
}

/// Absolute, normalized documentation links found in `html`, sorted and deduplicated.
pub fn extract_links(html: &str, base_url: &str, settings: &CrawlSettings) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        return Vec::new();
    };
    let allowed_origin = match settings.allowed_origin.as_deref() {
        Some(origin) => match Url::parse(origin) {
            Ok(url) => url.origin(),
            Err(_) => return Vec::new(),
        },
        None => base.origin(),
    };
    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let doc = Html::parse_document(html);
    let links: BTreeSet<String> = doc
        .select(&anchor)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .filter(|url| url.origin() == allowed_origin)
        .filter(|url| {
            let path = url.path().to_ascii_lowercase();
            settings
                .path_patterns
                .iter()
                .any(|pattern| path.contains(pattern.as_str()))
        })
        .filter_map(|url| normalize_link(url.as_str()))
        .collect();
    links.into_iter().collect()
}

/// `scheme://host[:port]/path`, with query and fragment dropped.
fn normalize_link(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed.set_query(None);
    parsed.set_fragment(None);
    Some(parsed.to_string())
}
