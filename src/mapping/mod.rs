mod combinations;
mod matcher;
mod reconcile;

use std::collections::HashSet;

use thiserror::Error;

use crate::graph::MoleculeGraph;
pub use combinations::Combinations;
pub use matcher::{match_side, ComponentMatch, SideMatch};
pub use reconcile::{reconcile, side_combinations, AtomMap, AtomRef, MapEntry};

/// The number of reactant × product combinations exceeded the configured cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{count} candidate combinations exceed the limit of {limit}")]
pub struct CombinationLimit {
    /// Saturates at `usize::MAX`.
    pub count: usize,
    pub limit: usize,
}

/// Synthesized labels would run past `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no labels left above {highest} for unlabeled atoms")]
pub struct LabelOverflow {
    pub highest: u32,
}

/// Labels carried by more than one atom of `graph`, each reported once.
pub fn duplicate_labels(graph: &MoleculeGraph) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for label in graph.atoms().filter_map(|a| graph.label(a)) {
        if !seen.insert(label) && !duplicates.contains(&label) {
            duplicates.push(label);
        }
    }
    duplicates
}

/// Label every unlabeled atom, counting up from one past the largest label
/// found on either side: reactant atoms first, then product atoms, each in
/// node order.
pub fn synthesize_labels(
    reactants: &mut MoleculeGraph,
    products: &mut MoleculeGraph,
) -> Result<(), LabelOverflow> {
    let highest = reactants.max_label().max(products.max_label());
    let mut next = highest.map_or(Some(1), |max| max.checked_add(1));
    for graph in [reactants, products] {
        let unlabeled: Vec<_> = graph.atoms().filter(|&a| graph.label(a).is_none()).collect();
        for atom in unlabeled {
            let label = next.ok_or(LabelOverflow {
                highest: highest.unwrap_or(u32::MAX),
            })?;
            graph.set_label(atom, Some(label));
            next = label.checked_add(1);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjlist::parse_molecule;

    #[test]
    fn finds_duplicates_once() {
        let g = parse_molecule("1 *1 H u1\n2 *1 H u1\n3 *1 H u1\n4 *2 H u1").unwrap();
        assert_eq!(duplicate_labels(&g), vec![1]);
    }

    #[test]
    fn synthesized_labels_follow_node_order() {
        let mut r = parse_molecule("1 *4 O u0 {2,S}\n2 H u0 {1,S}").unwrap();
        let mut p = parse_molecule("1 H u1\n2 *2 O u1").unwrap();
        synthesize_labels(&mut r, &mut p).unwrap();
        assert_eq!(r.node_ids(), vec![Some(4), Some(5)]);
        assert_eq!(p.node_ids(), vec![Some(6), Some(2)]);
    }

    #[test]
    fn synthesized_labels_stop_at_largest_label() {
        let mut r = parse_molecule("1 *4294967295 H u1\n2 H u1").unwrap();
        let mut p = parse_molecule("1 *4294967295 H u1").unwrap();
        let err = synthesize_labels(&mut r, &mut p).unwrap_err();
        assert_eq!(err, LabelOverflow { highest: u32::MAX });
    }

    #[test]
    fn fully_labeled_sides_need_no_fresh_labels() {
        let mut r = parse_molecule("1 *4294967295 H u1").unwrap();
        let mut p = parse_molecule("1 *4294967295 H u1").unwrap();
        assert!(synthesize_labels(&mut r, &mut p).is_ok());
        assert_eq!(r.node_ids(), vec![Some(u32::MAX)]);
    }

    #[test]
    fn synthesized_labels_start_at_one() {
        let mut r = parse_molecule("1 H u1").unwrap();
        let mut p = parse_molecule("1 H u1").unwrap();
        synthesize_labels(&mut r, &mut p).unwrap();
        assert_eq!(r.node_ids(), vec![Some(1)]);
        assert_eq!(p.node_ids(), vec![Some(2)]);
    }
}
