use async_trait::async_trait;
use tracing::info;

use crate::crawler::models::RawEstate;

mod fetcher;
pub mod models;
mod normalizer;
mod parser;
pub mod service;

pub use fetcher::HttpFetcher;

/// Supplies the raw text of one listings page. Injected so pagination can be
/// driven without a network.
#[async_trait]
pub trait PageFetcher {
    async fn fetch_page(&self, page: u32) -> anyhow::Result<String>;
}

/// Extracts and normalizes every estate embedded in one page of text.
pub fn scrape_page(text: &str) -> Vec<RawEstate> {
    parser::extract_realestates(text)
        .into_iter()
        .map(normalizer::format_estate)
        .collect()
}

/// Walks pages 1..=max_pages sequentially, stopping at the first page that
/// yields no estates. Records accumulate in page order. Fetch errors
/// propagate; an unparseable page just ends the walk.
pub async fn collect_all<F>(fetcher: &F, max_pages: u32) -> anyhow::Result<Vec<RawEstate>>
where
    F: PageFetcher + ?Sized,
{
    let mut all_estates = Vec::new();

    for page in 1..=max_pages {
        let text = fetcher.fetch_page(page).await?;
        let estates = scrape_page(&text);

        if estates.is_empty() {
            info!(page, "no estates on page, stopping");
            break;
        }

        info!(page, count = estates.len(), "page scraped");
        all_estates.extend(estates);
    }

    info!(total = all_estates.len(), "collection finished");
    Ok(all_estates)
}
