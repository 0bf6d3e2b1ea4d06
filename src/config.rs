//! Run configuration, loaded once from a JSON file and read-only
//! thereafter.
//!
//! The file shape is:
//!
//! ```json
//! {
//!     "archs": ["amd64", "arm64"],
//!     "sources": ["https://cdimage.debian.org/debian-cd/current/{arch}/bt-cd/"],
//!     "file_extension": "torrent",
//!     "rss_file": "output/debian.rss"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// The full run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Architecture values substituted into each source template.
    pub archs: Vec<String>,
    /// Page URL templates containing an `{arch}` placeholder.
    pub sources: Vec<String>,
    /// Extension of the files to collect; a leading dot is accepted
    /// (`"iso"` and `".iso"` are equivalent).
    pub file_extension: String,
    /// Path of the RSS document to seed from and rewrite.
    pub rss_file: PathBuf,
}

impl Config {
    /// Load and deserialize the configuration at `path`.
    ///
    /// A missing file is reported distinctly from an unreadable or
    /// malformed one so `main` can print the right message.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigMissing {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::ConfigInvalid {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_full_config() {
        let file = write_config(
            r#"{
                "archs": ["amd64", "arm64"],
                "sources": ["http://example.org/{arch}/"],
                "file_extension": "torrent",
                "rss_file": "out/feed.rss"
            }"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.archs, vec!["amd64", "arm64"]);
        assert_eq!(config.sources, vec!["http://example.org/{arch}/"]);
        assert_eq!(config.file_extension, "torrent");
        assert_eq!(config.rss_file, PathBuf::from("out/feed.rss"));
    }

    #[test]
    fn missing_file_is_config_missing() {
        let err = Config::load(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigMissing { .. }));
    }

    #[test]
    fn malformed_json_is_config_invalid() {
        let file = write_config("{ not json");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn missing_field_is_config_invalid() {
        let file = write_config(r#"{"archs": []}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }
}
