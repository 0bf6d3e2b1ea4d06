//! Fatal errors for the feed generator.
//!
//! Only configuration and storage problems abort a run; per-page
//! network failures are handled inside [`crate::fetch`] and never
//! reach this type.  `main` prints the `Display` message and exits
//! with status 1.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a run.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration path given on the command line does not exist.
    #[error("the configuration file \"{path}\" does not exist")]
    ConfigMissing { path: PathBuf },

    /// The configuration file exists but could not be read.
    #[error("couldn't read the configuration file \"{path}\": {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or is missing fields.
    #[error("invalid configuration in \"{path}\": {source}")]
    ConfigInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The output directory could not be created (checked before any
    /// network work so a permission problem fails fast).
    #[error("couldn't create the output directory \"{path}\": {source}")]
    StorageUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An existing feed file could not be read back.
    #[error("couldn't read the feed file \"{path}\": {source}")]
    FeedRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An existing feed file is not parseable RSS.  Fatal rather than
    /// ignored: overwriting the file from an empty channel would lose
    /// every previously recorded entry.
    #[error("couldn't parse the feed file \"{path}\": {source}")]
    FeedParse { path: PathBuf, source: rss::Error },

    /// The merged channel could not be serialized to XML.
    #[error("couldn't serialize the feed: {source}")]
    FeedEncode { source: rss::Error },

    /// Writing the merged feed back to disk failed.
    #[error("couldn't write the RSS output to \"{path}\": {source}")]
    FeedWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
