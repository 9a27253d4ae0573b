use std::collections::{BTreeMap, HashSet};

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use super::combinations::Combinations;
use super::matcher::SideMatch;
use super::CombinationLimit;

/// An atom of a named species.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomRef {
    pub species: String,
    /// Node index within the species graph.
    pub index: usize,
}

impl AtomRef {
    pub fn new(species: impl Into<String>, index: usize) -> Self {
        Self {
            species: species.into(),
            index,
        }
    }
}

/// Where one conserved label sits on each side of the reaction.
///
/// Serialized as the 5-tuple
/// `[label, reactant_species, reactant_index, product_species, product_index]`,
/// with `null` for a side the label does not appear on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapEntry {
    pub label: u32,
    pub reactant: Option<AtomRef>,
    pub product: Option<AtomRef>,
}

impl MapEntry {
    pub fn is_complete(&self) -> bool {
        self.reactant.is_some() && self.product.is_some()
    }
}

impl Serialize for MapEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(5)?;
        tuple.serialize_element(&self.label)?;
        tuple.serialize_element(&self.reactant.as_ref().map(|a| a.species.as_str()))?;
        tuple.serialize_element(&self.reactant.as_ref().map(|a| a.index))?;
        tuple.serialize_element(&self.product.as_ref().map(|a| a.species.as_str()))?;
        tuple.serialize_element(&self.product.as_ref().map(|a| a.index))?;
        tuple.end()
    }
}

/// One complete atom-atom map: an entry per label, ordered by label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AtomMap(Vec<MapEntry>);

impl AtomMap {
    pub fn entries(&self) -> &[MapEntry] {
        &self.0
    }

    pub fn get(&self, label: u32) -> Option<&MapEntry> {
        self.0
            .binary_search_by_key(&label, |e| e.label)
            .ok()
            .map(|i| &self.0[i])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<MapEntry> for AtomMap {
    fn from_iter<I: IntoIterator<Item = MapEntry>>(iter: I) -> Self {
        let mut entries: Vec<MapEntry> = iter.into_iter().collect();
        entries.sort();
        entries.dedup_by_key(|e| e.label);
        AtomMap(entries)
    }
}

type Placement = BTreeMap<u32, AtomRef>;

/// Number of ways to pick one isomorphism per component on a side.
pub fn side_combinations(side: &SideMatch<'_>) -> Combinations {
    Combinations::new(side.components.iter().map(|c| c.alternatives()).collect())
}

/// Combine every reactant-side choice with every product-side choice and
/// return the distinct atom-atom maps, in order of first appearance.
///
/// Either side having no components yields no maps, without enumerating the
/// other side. `limit` caps each side's combination count as well as the
/// number of reactant × product pairs.
pub fn reconcile(
    reactants: &SideMatch<'_>,
    products: &SideMatch<'_>,
    limit: Option<usize>,
) -> Result<Vec<AtomMap>, CombinationLimit> {
    if reactants.components.is_empty() || products.components.is_empty() {
        return Ok(Vec::new());
    }

    let reactant_combinations = side_combinations(reactants);
    let product_combinations = side_combinations(products);

    if let Some(limit) = limit {
        let r = reactant_combinations.total().unwrap_or(usize::MAX);
        let p = product_combinations.total().unwrap_or(usize::MAX);
        let count = r.max(p).max(r.saturating_mul(p));
        if count > limit {
            return Err(CombinationLimit { count, limit });
        }
    }

    let reactant_placements = distinct_placements(reactants, reactant_combinations);
    let product_placements = distinct_placements(products, product_combinations);

    let mut seen = HashSet::new();
    let mut maps = Vec::new();
    for r in &reactant_placements {
        for p in &product_placements {
            let map = merge(r, p);
            if seen.insert(map.clone()) {
                maps.push(map);
            }
        }
    }
    Ok(maps)
}

// Label placements for each side combination. Combinations that only differ
// in where unlabeled atoms go collapse to the same placement.
fn distinct_placements(side: &SideMatch<'_>, combinations: Combinations) -> Vec<Placement> {
    let mut seen = HashSet::new();
    let mut placements = Vec::new();
    for choice in combinations {
        let placement = place_labels(side, &choice);
        if seen.insert(placement.clone()) {
            placements.push(placement);
        }
    }
    placements
}

fn place_labels(side: &SideMatch<'_>, choice: &[usize]) -> Placement {
    let mut placement = Placement::new();
    for (component, &pick) in side.components.iter().zip(choice) {
        let Some((species, iso)) = component.isomorphism(pick) else {
            continue;
        };
        let graph = &component.component.graph;
        for node in graph.atoms() {
            if let Some(label) = graph.label(node) {
                placement
                    .entry(label)
                    .or_insert_with(|| AtomRef::new(species.name(), iso[node.index()].index()));
            }
        }
    }
    placement
}

fn merge(reactants: &Placement, products: &Placement) -> AtomMap {
    let mut entries: BTreeMap<u32, MapEntry> = reactants
        .iter()
        .map(|(&label, atom)| {
            let entry = MapEntry {
                label,
                reactant: Some(atom.clone()),
                product: None,
            };
            (label, entry)
        })
        .collect();
    for (&label, atom) in products {
        entries
            .entry(label)
            .or_insert_with(|| MapEntry {
                label,
                reactant: None,
                product: None,
            })
            .product = Some(atom.clone());
    }
    AtomMap(entries.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjlist::parse_molecule;
    use crate::diagnostic::Side;
    use crate::mapping::match_side;
    use crate::species::{Species, SpeciesIndex};

    const METHANE: &str = "1 C u0 p0 c0 {2,S} {3,S} {4,S} {5,S}
        2 H u0 p0 c0 {1,S}
        3 H u0 p0 c0 {1,S}
        4 H u0 p0 c0 {1,S}
        5 H u0 p0 c0 {1,S}";

    fn index() -> SpeciesIndex {
        let mut index = SpeciesIndex::new();
        for (name, text) in [
            ("CH4", METHANE),
            ("H2", "1 H u0 {2,S}\n2 H u0 {1,S}"),
            ("H", "1 H u1"),
            ("CH3", "1 C u1 {2,S} {3,S} {4,S}\n2 H u0 {1,S}\n3 H u0 {1,S}\n4 H u0 {1,S}"),
        ] {
            index
                .register(Species::new(name, parse_molecule(text).unwrap()))
                .unwrap();
        }
        index
    }

    fn side<'s>(index: &'s SpeciesIndex, text: &str, side: Side) -> SideMatch<'s> {
        let graph = parse_molecule(text).unwrap();
        match_side(&graph, index, 0, side, &mut Vec::new())
    }

    #[test]
    fn side_combination_count_is_product() {
        let index = index();
        // CH4 (24 automorphisms) + H2 (2) + H (1)
        let reactants = side(
            &index,
            "1 C u0 {2,S} {3,S} {4,S} {5,S}
             2 H u0 {1,S}
             3 H u0 {1,S}
             4 H u0 {1,S}
             5 H u0 {1,S}
             6 H u0 {7,S}
             7 H u0 {6,S}
             8 H u1",
            Side::Reactant,
        );
        assert_eq!(side_combinations(&reactants).count(), 24 * 2);
    }

    #[test]
    fn symmetric_choices_collapse() {
        let index = index();
        let reactants = side(
            &index,
            "1 C u0 {2,S} {3,S} {4,S} {5,S}
             2 *1 H u0 {1,S}
             3 H u0 {1,S}
             4 H u0 {1,S}
             5 H u0 {1,S}",
            Side::Reactant,
        );
        let products = side(
            &index,
            "1 C u0 {2,S} {3,S} {4,S} {5,S}
             2 H u0 {1,S}
             3 H u0 {1,S}
             4 *1 H u0 {1,S}
             5 H u0 {1,S}",
            Side::Product,
        );
        let maps = reconcile(&reactants, &products, None).unwrap();
        // The labeled hydrogen may land on any of the four species hydrogens
        // on either side.
        assert_eq!(maps.len(), 16);
        for map in &maps {
            assert_eq!(map.len(), 1);
            let entry = map.get(1).unwrap();
            assert!(entry.is_complete());
            assert_eq!(entry.reactant.as_ref().unwrap().species, "CH4");
            assert_ne!(entry.reactant.as_ref().unwrap().index, 0);
        }
    }

    #[test]
    fn labeled_carbon_has_single_map() {
        let index = index();
        let reactants = side(
            &index,
            "1 *1 C u0 {2,S} {3,S} {4,S} {5,S}\n2 H u0 {1,S}\n3 H u0 {1,S}\n4 H u0 {1,S}\n5 H u0 {1,S}",
            Side::Reactant,
        );
        let products = side(
            &index,
            "1 *1 C u1 {2,S} {3,S} {4,S}\n2 H u0 {1,S}\n3 H u0 {1,S}\n4 H u0 {1,S}\n5 H u1",
            Side::Product,
        );
        let maps = reconcile(&reactants, &products, None).unwrap();
        assert_eq!(maps.len(), 1);
        assert_eq!(
            maps[0].entries(),
            &[MapEntry {
                label: 1,
                reactant: Some(AtomRef::new("CH4", 0)),
                product: Some(AtomRef::new("CH3", 0)),
            }]
        );
    }

    #[test]
    fn one_sided_labels_are_partial() {
        let index = index();
        let reactants = side(&index, "1 *1 H u0 {2,S}\n2 H u0 {1,S}", Side::Reactant);
        let products = side(&index, "1 *2 H u1\n2 H u1", Side::Product);
        let maps = reconcile(&reactants, &products, None).unwrap();
        assert_eq!(maps.len(), 2);
        for map in &maps {
            assert_eq!(map.get(1).unwrap().product, None);
            assert_eq!(map.get(2).unwrap().reactant, None);
            assert_eq!(map.get(2).unwrap().product, Some(AtomRef::new("H", 0)));
        }
    }

    #[test]
    fn empty_side_gives_no_maps() {
        let index = index();
        let reactants = side(&index, "1 *1 H u1", Side::Reactant);
        let products = side(&index, "", Side::Product);
        assert!(reconcile(&reactants, &products, None).unwrap().is_empty());
    }

    #[test]
    fn unmatched_component_contributes_nothing() {
        let index = index();
        let reactants = side(&index, "1 *1 H u1\n2 *2 O u2", Side::Reactant);
        let products = side(&index, "1 *1 H u1\n2 *2 O u2", Side::Product);
        let maps = reconcile(&reactants, &products, None).unwrap();
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].len(), 1);
        assert!(maps[0].get(2).is_none());
    }

    #[test]
    fn limit_is_enforced() {
        let index = index();
        let reactants = side(&index, METHANE, Side::Reactant);
        let products = side(&index, METHANE, Side::Product);
        let err = reconcile(&reactants, &products, Some(100)).unwrap_err();
        assert_eq!(err, CombinationLimit { count: 576, limit: 100 });
        assert!(reconcile(&reactants, &products, Some(576)).is_ok());
    }

    #[test]
    fn empty_side_ignores_limit() {
        let index = index();
        let reactants = side(&index, METHANE, Side::Reactant);
        let products = side(&index, "", Side::Product);
        assert_eq!(side_combinations(&reactants).total(), Some(24));
        assert_eq!(reconcile(&reactants, &products, Some(10)), Ok(Vec::new()));
        assert_eq!(reconcile(&products, &reactants, Some(10)), Ok(Vec::new()));
    }

    #[test]
    fn limit_applies_to_one_large_side() {
        let index = index();
        let reactants = side(&index, METHANE, Side::Reactant);
        let products = side(&index, "1 H u1", Side::Product);
        let err = reconcile(&reactants, &products, Some(10)).unwrap_err();
        assert_eq!(err, CombinationLimit { count: 24, limit: 10 });
        let err = reconcile(&products, &reactants, Some(23)).unwrap_err();
        assert_eq!(err.count, 24);
        assert!(reconcile(&reactants, &products, Some(24)).is_ok());
    }

    #[test]
    fn entry_serializes_as_tuple() {
        let entry = MapEntry {
            label: 3,
            reactant: Some(AtomRef::new("CH4", 2)),
            product: None,
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!([3, "CH4", 2, null, null])
        );
    }

    #[test]
    fn atom_map_from_entries_is_sorted() {
        let map: AtomMap = [2, 1, 2]
            .into_iter()
            .map(|label| MapEntry {
                label,
                reactant: None,
                product: None,
            })
            .collect();
        let labels: Vec<_> = map.entries().iter().map(|e| e.label).collect();
        assert_eq!(labels, vec![1, 2]);
    }
}
