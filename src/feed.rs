//! Feed persistence: loading the previous run's RSS document and
//! writing the merged one back.
//!
//! The channel metadata is fixed; only the item list changes between
//! runs.  Each item records one discovered file: title and description
//! carry the filename, link and `content:encoded` carry the absolute
//! file URL.  The link is the identity key — the store reports every
//! known link so the reconciler can append only genuinely new files.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use rss::{Channel, Item};
use tracing::debug;

use crate::error::{Error, Result};

const FEED_TITLE: &str = "Debian Release Feed";
const FEED_DESCRIPTION: &str = "A feed of Debian installer torrent files.";
const FEED_LINK: &str = "http://localhost";
const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// A fresh channel with the fixed feed metadata and no items.
fn init_channel() -> Channel {
    let mut channel = Channel::default();
    channel.set_title(FEED_TITLE);
    channel.set_description(FEED_DESCRIPTION);
    channel.set_link(FEED_LINK);
    // `content:encoded` needs its namespace declared on the rss element.
    channel
        .namespaces
        .insert("content".to_string(), CONTENT_NAMESPACE.to_string());
    channel
}

/// Append an entry for a newly discovered file.
pub fn push_entry(channel: &mut Channel, filename: &str, link: &str) {
    let mut item = Item::default();
    item.set_title(filename.to_string());
    item.set_link(link.to_string());
    item.set_description(filename.to_string());
    item.set_content(link.to_string());
    channel.items.push(item);
}

/// Reads and rewrites the feed document at a fixed path.
pub struct FeedStore {
    path: PathBuf,
}

impl FeedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the previous feed, or start fresh if none exists yet.
    ///
    /// Returns the channel (metadata re-initialized, items preserved
    /// in their stored order) and the set of every item link already
    /// present.  An existing file that cannot be read or parsed is
    /// fatal; starting from an empty channel would erase all recorded
    /// entries at save time.
    pub fn load(&self) -> Result<(Channel, HashSet<String>)> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no previous feed, starting fresh");
            return Ok((init_channel(), HashSet::new()));
        }
        let file = File::open(&self.path).map_err(|source| Error::FeedRead {
            path: self.path.clone(),
            source,
        })?;
        let previous = Channel::read_from(BufReader::new(file)).map_err(|source| {
            Error::FeedParse {
                path: self.path.clone(),
                source,
            }
        })?;

        let known: HashSet<String> = previous
            .items()
            .iter()
            .filter_map(|item| item.link().map(str::to_string))
            .collect();
        debug!(
            path = %self.path.display(),
            entries = previous.items().len(),
            "loaded previous feed"
        );

        let mut channel = init_channel();
        channel.items = previous.items;
        Ok((channel, known))
    }

    /// Serialize the channel to the feed path, fully replacing any
    /// previous content.
    pub fn save(&self, channel: &Channel) -> Result<()> {
        let mut buf = Vec::new();
        channel
            .pretty_write_to(&mut buf, b' ', 2)
            .map_err(|source| Error::FeedEncode { source })?;
        fs::write(&self.path, &buf).map_err(|source| Error::FeedWrite {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), entries = channel.items().len(), "wrote feed");
        Ok(())
    }
}
