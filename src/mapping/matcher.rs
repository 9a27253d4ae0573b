use crate::diagnostic::{Diagnostic, Side};
use crate::graph::MoleculeGraph;
use crate::graph_ops::{component_subgraphs, Component};
use crate::isomorphism::{find_isomorphisms, is_isomorphic, Isomorphism};
use crate::species::{Species, SpeciesIndex};

/// A reaction-side component together with the species it was matched to.
#[derive(Debug, Clone)]
pub struct ComponentMatch<'s> {
    pub component: Component,
    /// `None` when no species of the same size is isomorphic to the component.
    pub species: Option<&'s Species>,
    /// All isomorphisms from the component onto `species`.
    pub isomorphisms: Vec<Isomorphism>,
}

impl ComponentMatch<'_> {
    /// How many choices this component contributes to a side combination.
    /// An unmatched component still contributes one, empty, choice.
    pub fn alternatives(&self) -> usize {
        self.isomorphisms.len().max(1)
    }

    pub fn isomorphism(&self, choice: usize) -> Option<(&Species, &Isomorphism)> {
        Some((self.species?, self.isomorphisms.get(choice)?))
    }
}

/// Every component of one reaction side, matched against the species index.
#[derive(Debug, Clone)]
pub struct SideMatch<'s> {
    pub side: Side,
    pub components: Vec<ComponentMatch<'s>>,
}

/// Split one side into molecules and match each one against the species of
/// the same atom count.
///
/// The first species (in registration order) with an isomorphism wins. Any
/// later species that is also isomorphic is reported as an
/// [`Diagnostic::AmbiguousSpeciesMatch`] and otherwise ignored.
pub fn match_side<'s>(
    graph: &MoleculeGraph,
    index: &'s SpeciesIndex,
    reaction: u64,
    side: Side,
    diagnostics: &mut Vec<Diagnostic>,
) -> SideMatch<'s> {
    let components = component_subgraphs(graph)
        .into_iter()
        .enumerate()
        .map(|(i, component)| {
            let mut chosen: Option<(&'s Species, Vec<Isomorphism>)> = None;
            for species in index.candidates(component.graph.atom_count()) {
                match &chosen {
                    None => {
                        let isomorphisms = find_isomorphisms(&component.graph, species.graph());
                        if !isomorphisms.is_empty() {
                            chosen = Some((species, isomorphisms));
                        }
                    }
                    Some((first, _)) => {
                        if is_isomorphic(&component.graph, species.graph()) {
                            let diagnostic = Diagnostic::AmbiguousSpeciesMatch {
                                reaction,
                                side,
                                component: i,
                                chosen: first.name().to_string(),
                                rejected: species.name().to_string(),
                            };
                            log::warn!("{diagnostic}");
                            diagnostics.push(diagnostic);
                        }
                    }
                }
            }

            match chosen {
                Some((species, isomorphisms)) => {
                    log::debug!(
                        "reaction {reaction}: {side} component {i} is {} ({} isomorphisms)",
                        species.name(),
                        isomorphisms.len()
                    );
                    ComponentMatch {
                        component,
                        species: Some(species),
                        isomorphisms,
                    }
                }
                None => {
                    let diagnostic = Diagnostic::NoSpeciesMatch {
                        reaction,
                        side,
                        component: i,
                        atom_count: component.graph.atom_count(),
                    };
                    log::warn!("{diagnostic}");
                    diagnostics.push(diagnostic);
                    ComponentMatch {
                        component,
                        species: None,
                        isomorphisms: Vec::new(),
                    }
                }
            }
        })
        .collect();

    SideMatch { side, components }
}
