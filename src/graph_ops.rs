use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;

use crate::graph::MoleculeGraph;

/// One connected component of a larger graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Indices of the component's atoms in the source graph, ascending.
    /// Node `i` of `graph` is `nodes[i]` of the source.
    pub nodes: Vec<NodeIndex>,
    pub graph: MoleculeGraph,
}

/// Connected components as sorted node lists, ordered by their lowest index.
pub fn connected_components(mol: &MoleculeGraph) -> Vec<Vec<NodeIndex>> {
    let graph = mol.graph();
    let mut assigned = vec![false; mol.atom_count()];
    let mut components = Vec::new();
    for start in mol.atoms() {
        if assigned[start.index()] {
            continue;
        }
        let mut dfs = Dfs::new(graph, start);
        let mut members = Vec::new();
        while let Some(node) = dfs.next(graph) {
            assigned[node.index()] = true;
            members.push(node);
        }
        members.sort_unstable();
        components.push(members);
    }
    components
}

/// Split a graph into the induced subgraphs of its connected components.
///
/// A block that concatenates several molecules comes apart here; an isolated
/// atom is a one-node component.
pub fn component_subgraphs(mol: &MoleculeGraph) -> Vec<Component> {
    connected_components(mol)
        .into_iter()
        .map(|nodes| Component {
            graph: mol.subgraph(&nodes),
            nodes,
        })
        .collect()
}
