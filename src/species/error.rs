use thiserror::Error;

use crate::adjlist::AdjListError;

/// Reasons a species-dictionary entry is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesError {
    /// The entry's adjacency list could not be parsed or assembled.
    #[error("species {name:?} (line {line}): {source}")]
    InvalidBlock {
        name: String,
        line: usize,
        #[source]
        source: AdjListError,
    },
    /// The entry has a name but no atom lines.
    #[error("species {name:?} (line {line}) has no atoms")]
    Empty { name: String, line: usize },
    /// A species with the same name is already registered.
    #[error("species {name:?} is defined more than once")]
    Duplicate { name: String },
}
