//! Run configuration for the command-line driver.
//!
//! Values come from an optional TOML file; command-line flags override them.
//!
//! ```toml
//! data = "dataset/tennis.csv"
//! target = "PlayTennis"
//! max_depth = 5
//! min_samples_split = 2
//! seed = 42
//! ```

use crate::error::{Result, TreeError};
use crate::tree::{DEFAULT_MAX_DEPTH, DEFAULT_MIN_SAMPLES_SPLIT};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings for one training run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// CSV file to train on
    pub data: Option<PathBuf>,
    /// Name of the label column
    pub target: String,
    /// Hard ceiling on tree depth
    pub max_depth: usize,
    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,
    /// Seed for the randomized feature visiting order
    pub seed: Option<u64>,
    /// Where the tree report (and image) are written
    pub output_dir: PathBuf,
    /// Where `runtime.log` is written
    pub log_dir: PathBuf,
    /// Number of leading rows shown with predictions vs. actual labels
    pub preview_rows: usize,
    /// Also render a PNG with Graphviz
    pub render_image: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data: None,
            target: String::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            seed: None,
            output_dir: PathBuf::from("output"),
            log_dir: PathBuf::from("logs"),
            preview_rows: 5,
            render_image: false,
        }
    }
}

impl RunConfig {
    /// Parses a configuration from TOML text.
    ///
    /// `origin` only labels parse errors.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Config`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| TreeError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`TreeError::Config`] if it is not a valid configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text, path)
    }

    /// Checks that the settings are complete enough to run.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidInput`] if no data file or no target
    /// column is set.
    pub fn validate(&self) -> Result<()> {
        if self.data.is_none() {
            return Err(TreeError::invalid_input("no data file given"));
        }
        if self.target.trim().is_empty() {
            return Err(TreeError::invalid_input("no target column given"));
        }
        Ok(())
    }
}
