pub mod adjlist;
pub mod atom;
pub mod config;
pub mod diagnostic;
pub mod graph;
pub mod graph_ops;
pub mod isomorphism;
pub mod mapping;
pub mod reaction;
pub mod species;

pub use adjlist::{parse_adjlist, parse_atom_line, parse_molecule, AdjListError};
pub use atom::{Atom, AtomLabel, BondClause};
pub use config::MapperConfig;
pub use diagnostic::{Diagnostic, Side};
pub use graph::{GraphAtom, MoleculeGraph};
pub use graph_ops::{component_subgraphs, connected_components, Component};
pub use isomorphism::{find_isomorphisms, is_isomorphic, Isomorphism};
pub use mapping::{AtomMap, AtomRef, CombinationLimit, LabelOverflow, MapEntry};
pub use reaction::{AtomMapper, BatchReport, MapReport, MappedReaction, ReactionError, ReactionRecord};
pub use species::{Species, SpeciesError, SpeciesIndex};
