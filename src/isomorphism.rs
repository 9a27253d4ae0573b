use std::cmp::Reverse;

use petgraph::graph::NodeIndex;

use crate::graph::MoleculeGraph;

/// Node correspondence from a candidate graph to a reference graph:
/// `iso[i]` is the reference node matched to candidate node `i`.
pub type Isomorphism = Vec<NodeIndex>;

/// Every label-preserving isomorphism from `candidate` onto `reference`.
///
/// Elements must agree node for node and bonds must agree edge for edge,
/// including the bond-order symbol. Symmetric molecules yield one result per
/// automorphism. Graphs with different atom or bond counts give an empty list.
pub fn find_isomorphisms(candidate: &MoleculeGraph, reference: &MoleculeGraph) -> Vec<Isomorphism> {
    if !may_be_isomorphic(candidate, reference) {
        return Vec::new();
    }
    Vf2::new(candidate, reference).find_all()
}

/// Whether at least one isomorphism exists. Stops at the first one found.
pub fn is_isomorphic(candidate: &MoleculeGraph, reference: &MoleculeGraph) -> bool {
    may_be_isomorphic(candidate, reference) && Vf2::new(candidate, reference).find_first().is_some()
}

/// Check a proposed correspondence in both directions: it must be a
/// bijection, preserve elements, and map bonds onto bonds of the same order
/// with nothing left over in the reference.
pub fn is_valid_isomorphism(
    candidate: &MoleculeGraph,
    reference: &MoleculeGraph,
    iso: &[NodeIndex],
) -> bool {
    let n = candidate.atom_count();
    if iso.len() != n || reference.atom_count() != n || reference.bond_count() != candidate.bond_count() {
        return false;
    }

    let mut seen = vec![false; n];
    for (c, &r) in iso.iter().enumerate() {
        if r.index() >= n || seen[r.index()] {
            return false;
        }
        seen[r.index()] = true;
        if candidate.element(NodeIndex::new(c)) != reference.element(r) {
            return false;
        }
    }

    let mut inverse = vec![NodeIndex::new(0); n];
    for (c, &r) in iso.iter().enumerate() {
        inverse[r.index()] = NodeIndex::new(c);
    }

    let forward = candidate
        .bonds()
        .all(|(a, b, order)| reference.bond_between(iso[a.index()], iso[b.index()]) == Some(order));
    let backward = reference.bonds().all(|(a, b, order)| {
        candidate.bond_between(inverse[a.index()], inverse[b.index()]) == Some(order)
    });
    forward && backward
}

fn may_be_isomorphic(candidate: &MoleculeGraph, reference: &MoleculeGraph) -> bool {
    if candidate.atom_count() != reference.atom_count()
        || candidate.bond_count() != reference.bond_count()
    {
        return false;
    }
    let mut a = candidate.node_labels();
    let mut b = reference.node_labels();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

struct Vf2<'a> {
    candidate: &'a MoleculeGraph,
    reference: &'a MoleculeGraph,
    order: Vec<NodeIndex>,
    core_candidate: Vec<Option<NodeIndex>>,
    core_reference: Vec<Option<NodeIndex>>,
}

impl<'a> Vf2<'a> {
    fn new(candidate: &'a MoleculeGraph, reference: &'a MoleculeGraph) -> Self {
        let mut order: Vec<NodeIndex> = candidate.atoms().collect();
        order.sort_by_key(|&a| Reverse(candidate.degree(a)));
        Self {
            candidate,
            reference,
            order,
            core_candidate: vec![None; candidate.atom_count()],
            core_reference: vec![None; reference.atom_count()],
        }
    }

    fn find_first(&mut self) -> Option<Isomorphism> {
        let mut results = Vec::new();
        self.recurse(0, &mut results, true);
        results.into_iter().next()
    }

    fn find_all(&mut self) -> Vec<Isomorphism> {
        let mut results = Vec::new();
        self.recurse(0, &mut results, false);
        results
    }

    fn recurse(&mut self, depth: usize, results: &mut Vec<Isomorphism>, first_only: bool) {
        if depth == self.order.len() {
            let iso: Isomorphism = self.core_candidate.iter().flatten().copied().collect();
            if is_valid_isomorphism(self.candidate, self.reference, &iso) {
                results.push(iso);
            }
            return;
        }

        let node = self.order[depth];

        for r_idx in 0..self.core_reference.len() {
            if self.core_reference[r_idx].is_some() {
                continue;
            }

            let target = NodeIndex::new(r_idx);
            if !self.is_feasible(node, target) {
                continue;
            }

            self.core_candidate[node.index()] = Some(target);
            self.core_reference[r_idx] = Some(node);

            self.recurse(depth + 1, results, first_only);

            self.core_candidate[node.index()] = None;
            self.core_reference[r_idx] = None;

            if first_only && !results.is_empty() {
                return;
            }
        }
    }

    fn is_feasible(&self, node: NodeIndex, target: NodeIndex) -> bool {
        if self.candidate.element(node) != self.reference.element(target) {
            return false;
        }
        if self.candidate.degree(node) != self.reference.degree(target) {
            return false;
        }

        for neighbor in self.candidate.neighbors(node) {
            if let Some(mapped) = self.core_candidate[neighbor.index()] {
                let order = self.candidate.bond_between(node, neighbor);
                if self.reference.bond_between(target, mapped) != order {
                    return false;
                }
            }
        }

        // Reference bonds into the mapped region must exist in the candidate too.
        for neighbor in self.reference.neighbors(target) {
            if let Some(mapped) = self.core_reference[neighbor.index()] {
                if self.candidate.bond_between(node, mapped).is_none() {
                    return false;
                }
            }
        }

        true
    }
}
