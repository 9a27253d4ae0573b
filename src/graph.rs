use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use serde::{Serialize, Serializer};

/// Node weight of a [`MoleculeGraph`]: the element symbol and the conserved
/// atom-map label, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphAtom {
    pub element: String,
    pub label: Option<u32>,
}

impl GraphAtom {
    pub fn new(element: impl Into<String>, label: Option<u32>) -> Self {
        Self {
            element: element.into(),
            label,
        }
    }
}

/// Undirected labeled molecule graph.
///
/// Nodes carry a [`GraphAtom`], edges carry an opaque bond-order symbol.
/// Node indices are dense (`0..atom_count()`) and follow insertion order, so
/// they double as positions in the matrix view returned by
/// [`adjacency_matrix`](Self::adjacency_matrix) and friends. The matrix view
/// is also the serialized form.
#[derive(Clone, Default)]
pub struct MoleculeGraph {
    graph: UnGraph<GraphAtom, String>,
}

impl MoleculeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &UnGraph<GraphAtom, String> {
        &self.graph
    }

    pub fn add_atom(&mut self, atom: GraphAtom) -> NodeIndex {
        self.graph.add_node(atom)
    }

    /// Add an undirected bond. Callers keep the graph simple: no self bonds
    /// and at most one bond per atom pair.
    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, order: impl Into<String>) -> EdgeIndex {
        debug_assert_ne!(a, b, "self bonds are not allowed");
        self.graph.add_edge(a, b, order.into())
    }

    pub fn atom(&self, idx: NodeIndex) -> &GraphAtom {
        &self.graph[idx]
    }

    pub fn element(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].element
    }

    pub fn label(&self, idx: NodeIndex) -> Option<u32> {
        self.graph[idx].label
    }

    pub fn set_label(&mut self, idx: NodeIndex, label: Option<u32>) {
        self.graph[idx].label = label;
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    /// Bond-order symbol of the bond between `a` and `b`, if they are bonded.
    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<&str> {
        self.graph
            .find_edge(a, b)
            .map(|e| self.graph[e].as_str())
    }

    /// Iterate bonds as `(a, b, order)`.
    pub fn bonds(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &str)> + '_ {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some((a, b, self.graph[e].as_str()))
        })
    }

    pub fn max_label(&self) -> Option<u32> {
        self.graph.node_weights().filter_map(|a| a.label).max()
    }

    /// Induced subgraph on `nodes`, reindexed `0..nodes.len()` in the given
    /// order. Labels and elements are kept.
    pub fn subgraph(&self, nodes: &[NodeIndex]) -> MoleculeGraph {
        let mut sub = MoleculeGraph::new();
        let mut index_map = vec![None; self.atom_count()];
        for &old in nodes {
            index_map[old.index()] = Some(sub.add_atom(self.atom(old).clone()));
        }
        for (a, b, order) in self.bonds() {
            if let (Some(na), Some(nb)) = (index_map[a.index()], index_map[b.index()]) {
                sub.add_bond(na, nb, order);
            }
        }
        sub
    }

    pub fn adjacency_matrix(&self) -> Vec<Vec<bool>> {
        let n = self.atom_count();
        let mut matrix = vec![vec![false; n]; n];
        for (a, b, _) in self.bonds() {
            matrix[a.index()][b.index()] = true;
            matrix[b.index()][a.index()] = true;
        }
        matrix
    }

    pub fn edge_labels(&self) -> Vec<Vec<Option<&str>>> {
        let n = self.atom_count();
        let mut matrix = vec![vec![None; n]; n];
        for (a, b, order) in self.bonds() {
            matrix[a.index()][b.index()] = Some(order);
            matrix[b.index()][a.index()] = Some(order);
        }
        matrix
    }

    pub fn node_labels(&self) -> Vec<&str> {
        self.graph.node_weights().map(|a| a.element.as_str()).collect()
    }

    pub fn node_ids(&self) -> Vec<Option<u32>> {
        self.graph.node_weights().map(|a| a.label).collect()
    }
}

impl PartialEq for MoleculeGraph {
    fn eq(&self, other: &Self) -> bool {
        self.atom_count() == other.atom_count()
            && self.bond_count() == other.bond_count()
            && self.graph.node_weights().eq(other.graph.node_weights())
            && self.edge_labels() == other.edge_labels()
    }
}

impl Eq for MoleculeGraph {}

impl std::fmt::Debug for MoleculeGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoleculeGraph")
            .field("node_labels", &self.node_labels())
            .field("node_ids", &self.node_ids())
            .field("bonds", &self.bonds().map(|(a, b, o)| (a.index(), b.index(), o)).collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatrixForm<'a> {
    adjacency_matrix: Vec<Vec<u8>>,
    edge_labels: Vec<Vec<Option<&'a str>>>,
    node_labels: Vec<&'a str>,
    node_ids: Vec<Option<u32>>,
}

impl Serialize for MoleculeGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatrixForm {
            adjacency_matrix: self
                .adjacency_matrix()
                .into_iter()
                .map(|row| row.into_iter().map(u8::from).collect())
                .collect(),
            edge_labels: self.edge_labels(),
            node_labels: self.node_labels(),
            node_ids: self.node_ids(),
        }
        .serialize(serializer)
    }
}
