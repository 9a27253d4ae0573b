use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::graph::{GraphAtom, MoleculeGraph};

use super::error::AdjListError;

/// Assemble the atoms of one block into a [`MoleculeGraph`].
///
/// Node `i` of the result is `atoms[i]`. A bond may be declared from one or
/// both endpoints; either way it becomes a single undirected edge, and both
/// declarations must agree on the bond order. Atoms whose label is still
/// [`Unnumbered`](crate::AtomLabel::Unnumbered) end up unlabeled.
pub fn build_graph(atoms: &[Atom]) -> Result<MoleculeGraph, AdjListError> {
    let mut positions = HashMap::with_capacity(atoms.len());
    for (i, atom) in atoms.iter().enumerate() {
        if positions.insert(atom.number, NodeIndex::new(i)).is_some() {
            return Err(AdjListError::DuplicateAtomNumber {
                number: atom.number,
            });
        }
    }

    let mut graph = MoleculeGraph::new();
    for atom in atoms {
        graph.add_atom(GraphAtom::new(atom.element.clone(), atom.label_number()));
    }

    for (i, atom) in atoms.iter().enumerate() {
        let source = NodeIndex::new(i);
        for bond in &atom.bonds {
            let target = *positions
                .get(&bond.neighbor)
                .ok_or(AdjListError::UnresolvedBondTarget {
                    atom: atom.number,
                    target: bond.neighbor,
                })?;
            if target == source {
                return Err(AdjListError::SelfBond { atom: atom.number });
            }
            match graph.bond_between(source, target) {
                Some(existing) if existing != bond.order => {
                    return Err(AdjListError::ConflictingBondOrder {
                        a: atoms[target.index()].number,
                        b: atom.number,
                        first: existing.to_string(),
                        second: bond.order.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    graph.add_bond(source, target, bond.order.clone());
                }
            }
        }
    }

    Ok(graph)
}
