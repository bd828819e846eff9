//! Node exclusion list.
//!
//! The blacklist file holds one node name per line. Names are matched
//! exactly against the full inventory name; no patterns, no comments.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::inventory::InventoryNode;

/// Errors that can occur while loading the blacklist.
///
/// A missing file is not an error; see [`Blacklist::load`].
#[derive(Debug, Error)]
pub enum BlacklistError {
    /// The blacklist file exists but could not be read.
    #[error("Failed to read blacklist '{}': {source}", path.display())]
    Read {
        /// Path to the blacklist file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// A set of node names excluded from monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    names: HashSet<String>,
}

impl Blacklist {
    /// Creates a blacklist from the given names.
    #[must_use]
    pub fn new<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses newline-delimited names.
    ///
    /// Only line terminators are stripped; empty lines are ignored.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self::new(content.lines().filter(|line| !line.is_empty()))
    }

    /// Loads the blacklist from a file.
    ///
    /// A file that does not exist yields an empty blacklist and a warning,
    /// so a fresh installation filters nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BlacklistError::Read`] for any other I/O failure.
    pub fn load(path: &Path) -> Result<Self, BlacklistError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "Blacklist file {} not found, no nodes will be excluded",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(source) => Err(BlacklistError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Returns true if the name is blacklisted.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns the number of blacklisted names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing is blacklisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the blacklisted names in sorted order.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Removes blacklisted nodes, preserving the order of the rest.
    #[must_use]
    pub fn filter(&self, nodes: Vec<InventoryNode>) -> Vec<InventoryNode> {
        if self.is_empty() {
            return nodes;
        }

        nodes
            .into_iter()
            .filter(|node| {
                let excluded = self.contains(&node.name);
                if excluded {
                    tracing::debug!("Skipping blacklisted node {}", node.name);
                }
                !excluded
            })
            .collect()
    }
}
