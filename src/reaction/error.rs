use thiserror::Error;

use crate::adjlist::AdjListError;
use crate::diagnostic::Side;
use crate::mapping::{CombinationLimit, LabelOverflow};

/// Errors that stop a single reaction from being mapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactionError {
    /// The reactant or product block is not valid adjacency-list notation.
    #[error("reaction {reaction}: invalid {side} block: {source}")]
    InvalidBlock {
        reaction: u64,
        side: Side,
        #[source]
        source: AdjListError,
    },
    /// Enumeration would exceed the configured combination cap.
    #[error("reaction {reaction}: {source}")]
    TooManyCombinations {
        reaction: u64,
        #[source]
        source: CombinationLimit,
    },
    /// Unlabeled atoms could not all be given a fresh label.
    #[error("reaction {reaction}: {source}")]
    LabelOverflow {
        reaction: u64,
        #[source]
        source: LabelOverflow,
    },
}

impl ReactionError {
    pub fn reaction(&self) -> u64 {
        match self {
            Self::InvalidBlock { reaction, .. }
            | Self::TooManyCombinations { reaction, .. }
            | Self::LabelOverflow { reaction, .. } => *reaction,
        }
    }
}
