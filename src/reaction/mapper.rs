use rayon::prelude::*;

use crate::adjlist::parse_molecule;
use crate::config::MapperConfig;
use crate::diagnostic::{Diagnostic, Side};
use crate::graph::MoleculeGraph;
use crate::mapping::{duplicate_labels, match_side, reconcile, synthesize_labels};
use crate::species::SpeciesIndex;

use super::error::ReactionError;
use super::{MappedReaction, ReactionRecord};

/// Result of mapping one reaction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapReport {
    /// `None` when the record was skipped for lack of a reactant or product block.
    pub reaction: Option<MappedReaction>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of mapping a whole reaction list. Everything is kept in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub reactions: Vec<MappedReaction>,
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<ReactionError>,
}

/// Computes atom-atom maps for reaction records against a fixed species index.
///
/// # Examples
///
/// ```
/// use atommap::{AtomMapper, ReactionRecord, SpeciesIndex};
///
/// let (species, rejected) = SpeciesIndex::load("H2\n1 H u0 {2,S}\n2 H u0 {1,S}\n\nH\n1 H u1\n");
/// assert!(rejected.is_empty());
///
/// let record = ReactionRecord {
///     index: 1,
///     reaction: "H2 <=> H + H".to_string(),
///     reaction_family: "dissociation".to_string(),
///     reactant: Some("1 *1 H u0 {2,S}\n2 *2 H u0 {1,S}".to_string()),
///     product: Some("1 *1 H u1\n2 *2 H u1".to_string()),
/// };
///
/// let report = AtomMapper::new(&species).map_reaction(&record).unwrap();
/// let mapped = report.reaction.unwrap();
/// assert_eq!(mapped.mappings.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AtomMapper<'s> {
    species: &'s SpeciesIndex,
    config: MapperConfig,
}

impl<'s> AtomMapper<'s> {
    pub fn new(species: &'s SpeciesIndex) -> Self {
        Self::with_config(species, MapperConfig::default())
    }

    pub fn with_config(species: &'s SpeciesIndex, config: MapperConfig) -> Self {
        Self { species, config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Map one reaction.
    ///
    /// A record missing either block is skipped with a
    /// [`Diagnostic::MissingReactionSide`]. Matching problems become
    /// diagnostics; only a bad block or an exceeded combination cap is an
    /// error.
    pub fn map_reaction(&self, record: &ReactionRecord) -> Result<MapReport, ReactionError> {
        let mut diagnostics = Vec::new();

        let (Some(reactant), Some(product)) = (&record.reactant, &record.product) else {
            for (side, block) in [
                (Side::Reactant, &record.reactant),
                (Side::Product, &record.product),
            ] {
                if block.is_none() {
                    let diagnostic = Diagnostic::MissingReactionSide {
                        reaction: record.index,
                        side,
                    };
                    log::debug!("{diagnostic}");
                    diagnostics.push(diagnostic);
                }
            }
            return Ok(MapReport {
                reaction: None,
                diagnostics,
            });
        };

        let mut reactant_graph = parse_side(record.index, Side::Reactant, reactant)?;
        let mut product_graph = parse_side(record.index, Side::Product, product)?;

        for (side, graph) in [
            (Side::Reactant, &reactant_graph),
            (Side::Product, &product_graph),
        ] {
            for label in duplicate_labels(graph) {
                let diagnostic = Diagnostic::DuplicateLabel {
                    reaction: record.index,
                    side,
                    label,
                };
                log::warn!("{diagnostic}");
                diagnostics.push(diagnostic);
            }
        }

        if self.config.synthesize_labels {
            synthesize_labels(&mut reactant_graph, &mut product_graph).map_err(|source| {
                ReactionError::LabelOverflow {
                    reaction: record.index,
                    source,
                }
            })?;
        }

        let reactants = match_side(
            &reactant_graph,
            self.species,
            record.index,
            Side::Reactant,
            &mut diagnostics,
        );
        let products = match_side(
            &product_graph,
            self.species,
            record.index,
            Side::Product,
            &mut diagnostics,
        );

        let mappings = reconcile(&reactants, &products, self.config.max_combinations).map_err(
            |source| ReactionError::TooManyCombinations {
                reaction: record.index,
                source,
            },
        )?;

        log::debug!(
            "reaction {}: {} reactant and {} product molecules, {} distinct maps",
            record.index,
            reactants.components.len(),
            products.components.len(),
            mappings.len()
        );

        Ok(MapReport {
            reaction: Some(MappedReaction {
                index: record.index,
                reaction: record.reaction.clone(),
                reaction_family: record.reaction_family.clone(),
                mappings,
            }),
            diagnostics,
        })
    }

    /// Map every record, in parallel. A failing record is reported and the
    /// rest carry on.
    pub fn map_all(&self, records: &[ReactionRecord]) -> BatchReport {
        let results: Vec<_> = records
            .par_iter()
            .map(|record| self.map_reaction(record))
            .collect();

        let mut report = BatchReport::default();
        for result in results {
            match result {
                Ok(mapped) => {
                    report.reactions.extend(mapped.reaction);
                    report.diagnostics.extend(mapped.diagnostics);
                }
                Err(e) => {
                    log::warn!("{e}");
                    report.failures.push(e);
                }
            }
        }
        log::info!(
            "mapped {} of {} reactions ({} failed, {} diagnostics)",
            report.reactions.len(),
            records.len(),
            report.failures.len(),
            report.diagnostics.len()
        );
        report
    }
}

fn parse_side(reaction: u64, side: Side, block: &str) -> Result<MoleculeGraph, ReactionError> {
    parse_molecule(block).map_err(|source| ReactionError::InvalidBlock {
        reaction,
        side,
        source,
    })
}
