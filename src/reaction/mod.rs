pub mod error;
mod mapper;

use serde::{Deserialize, Serialize};

use crate::mapping::AtomMap;
pub use error::ReactionError;
pub use mapper::{AtomMapper, BatchReport, MapReport};

/// One entry of a reaction list, as read from the reaction database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub index: u64,
    /// Display string, e.g. `CH4 + H <=> CH3 + H2`.
    pub reaction: String,
    #[serde(default)]
    pub reaction_family: String,
    /// Adjacency-list block of all reactants, possibly several molecules.
    #[serde(default)]
    pub reactant: Option<String>,
    /// Adjacency-list block of all products, possibly several molecules.
    #[serde(default)]
    pub product: Option<String>,
}

/// A mapped reaction: the record's identity plus every distinct atom-atom map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedReaction {
    pub index: u64,
    pub reaction: String,
    pub reaction_family: String,
    pub mappings: Vec<AtomMap>,
}
