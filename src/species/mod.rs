mod dictionary;
pub mod error;

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::graph::MoleculeGraph;
pub use dictionary::{parse_species_dictionary, species_blocks, SpeciesBlock};
pub use error::SpeciesError;

/// A named reference molecule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    name: String,
    graph: MoleculeGraph,
}

impl Species {
    pub fn new(name: impl Into<String>, graph: MoleculeGraph) -> Self {
        Self {
            name: name.into(),
            graph,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &MoleculeGraph {
        &self.graph
    }

    pub fn atom_count(&self) -> usize {
        self.graph.atom_count()
    }
}

/// Append-only collection of known species, bucketed by atom count.
///
/// Built once before any reaction is mapped and only read afterwards.
/// Registration order is kept: [`candidates`](Self::candidates) and
/// [`iter`](Self::iter) yield species in the order they were registered,
/// which is what "first species encountered" means when a component matches
/// several of them.
#[derive(Debug, Default)]
pub struct SpeciesIndex {
    species: Vec<Species>,
    by_atom_count: HashMap<usize, Vec<usize>>,
    by_name: HashMap<String, usize>,
}

impl SpeciesIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from species-dictionary text.
    ///
    /// Entries that fail to parse, have no atoms, or repeat an earlier name
    /// are left out and returned alongside the index.
    pub fn load(text: &str) -> (Self, Vec<SpeciesError>) {
        let mut index = Self::new();
        let mut rejected = Vec::new();
        for result in parse_species_dictionary(text) {
            if let Err(e) = result.and_then(|species| index.register(species)) {
                log::warn!("skipping species: {e}");
                rejected.push(e);
            }
        }
        log::debug!(
            "loaded {} species ({} rejected)",
            index.len(),
            rejected.len()
        );
        (index, rejected)
    }

    pub fn register(&mut self, species: Species) -> Result<(), SpeciesError> {
        if self.by_name.contains_key(species.name()) {
            return Err(SpeciesError::Duplicate {
                name: species.name,
            });
        }
        let slot = self.species.len();
        self.by_name.insert(species.name.clone(), slot);
        self.by_atom_count
            .entry(species.atom_count())
            .or_default()
            .push(slot);
        self.species.push(species);
        Ok(())
    }

    /// Species with exactly `atom_count` atoms, in registration order.
    pub fn candidates(&self, atom_count: usize) -> impl Iterator<Item = &Species> + '_ {
        self.by_atom_count
            .get(&atom_count)
            .into_iter()
            .flatten()
            .map(move |&slot| &self.species[slot])
    }

    pub fn get(&self, name: &str) -> Option<&Species> {
        self.by_name.get(name).map(|&slot| &self.species[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> + '_ {
        self.species.iter()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl Serialize for SpeciesIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.species.iter().map(|s| (s.name(), s.graph())))
    }
}
