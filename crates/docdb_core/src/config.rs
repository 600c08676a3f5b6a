//! Database configuration.

use std::path::PathBuf;

/// Directory used when none is configured, relative to the working directory.
pub const DEFAULT_DIR: &str = "data";

/// Configuration for opening a database.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one `<collection>.json` file per collection.
    pub dir: PathBuf,

    /// Whether to create the directory if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether collection files are written indented (human-readable).
    pub pretty: bool,

    /// Whether `Record::save` fails for records no longer in their collection
    /// instead of appending them again.
    pub strict_saves: bool,

    /// Whether `Collection::create` rejects caller-supplied ids that are
    /// already present.
    pub unique_ids: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            create_if_missing: true,
            pretty: true,
            strict_saves: false,
            unique_ids: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage directory.
    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Sets whether to create the directory if missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether to write indented JSON.
    #[must_use]
    pub const fn pretty(mut self, value: bool) -> Self {
        self.pretty = value;
        self
    }

    /// Sets whether saving a vanished record is an error.
    #[must_use]
    pub const fn strict_saves(mut self, value: bool) -> Self {
        self.strict_saves = value;
        self
    }

    /// Sets whether duplicate caller-supplied ids are rejected.
    #[must_use]
    pub const fn unique_ids(mut self, value: bool) -> Self {
        self.unique_ids = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.dir, PathBuf::from("data"));
        assert!(config.create_if_missing);
        assert!(config.pretty);
        assert!(!config.strict_saves);
        assert!(!config.unique_ids);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .dir("/tmp/docs")
            .create_if_missing(false)
            .pretty(false)
            .strict_saves(true)
            .unique_ids(true);

        assert_eq!(config.dir, PathBuf::from("/tmp/docs"));
        assert!(!config.create_if_missing);
        assert!(!config.pretty);
        assert!(config.strict_saves);
        assert!(config.unique_ids);
    }
}
