//! Expansion of the configured architectures × source templates into
//! the full list of pages to scrape.

use tracing::debug;

use crate::config::Config;

/// Yield every page URL to scan: for each architecture, each source
/// template with `{arch}` substituted.  Architecture-major order,
/// `|archs| * |sources|` URLs, no deduplication.
pub fn enumerate(config: &Config) -> impl Iterator<Item = String> + '_ {
    config.archs.iter().flat_map(move |arch| {
        config.sources.iter().map(move |source| {
            let url = source.replace("{arch}", arch);
            debug!(%url, "enumerated page");
            url
        })
    })
}
