//! The end-to-end run: load the previous feed, scrape every enumerated
//! page, append entries for files not yet known, write the feed back.
//!
//! Page failures are isolated — a mirror that is down or erroring
//! costs only its own page, never the run.  Only loading and saving
//! the feed can fail the run.

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::feed::{self, FeedStore};
use crate::fetch::{FetchOutcome, PageFetcher};
use crate::{scan, urls};

/// Join a page URL and a filename from its listing into the file's
/// absolute URL.  Listing URLs conventionally end with `/`; one is
/// inserted when missing.
fn join_url(page_url: &str, filename: &str) -> String {
    if page_url.ends_with('/') {
        format!("{page_url}{filename}")
    } else {
        format!("{page_url}/{filename}")
    }
}

/// Run one full reconciliation pass.
pub fn run(config: &Config, fetcher: &impl PageFetcher) -> Result<()> {
    let store = FeedStore::new(&config.rss_file);
    let (mut channel, mut known) = store.load()?;

    for url in urls::enumerate(config) {
        let page = match fetcher.fetch(&url) {
            FetchOutcome::Success(page) => page,
            // Both failure modes were already logged by the fetcher;
            // the rest of the run proceeds without this page.
            FetchOutcome::ServerError(_) | FetchOutcome::Unreachable => continue,
        };
        debug!(url = %page.url, "scanning listing");
        for filename in scan::scan(&page.body, &config.file_extension) {
            let link = join_url(&url, &filename);
            if known.insert(link.clone()) {
                debug!(%filename, %link, "found new file");
                feed::push_entry(&mut channel, &filename, &link);
            }
        }
    }

    store.save(&channel)
}
