use std::fmt;

use serde::Serialize;

/// Which side of a reaction something refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Reactant,
    Product,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reactant => f.write_str("reactant"),
            Self::Product => f.write_str("product"),
        }
    }
}

/// A recoverable problem found while mapping one reaction.
///
/// Mapping carries on past all of these; it is up to the caller whether any
/// of them should be treated as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A component is isomorphic to more than one species. The first species
    /// in registration order is kept.
    AmbiguousSpeciesMatch {
        reaction: u64,
        side: Side,
        component: usize,
        chosen: String,
        rejected: String,
    },
    /// No species matches a component, so none of its atoms are mapped.
    NoSpeciesMatch {
        reaction: u64,
        side: Side,
        component: usize,
        atom_count: usize,
    },
    /// The record lacks a reactant or product block and was skipped.
    MissingReactionSide { reaction: u64, side: Side },
    /// Two atoms on one side carry the same label; the first one is used.
    DuplicateLabel {
        reaction: u64,
        side: Side,
        label: u32,
    },
}

impl Diagnostic {
    pub fn reaction(&self) -> u64 {
        match self {
            Self::AmbiguousSpeciesMatch { reaction, .. }
            | Self::NoSpeciesMatch { reaction, .. }
            | Self::MissingReactionSide { reaction, .. }
            | Self::DuplicateLabel { reaction, .. } => *reaction,
        }
    }

    pub fn is_ambiguity(&self) -> bool {
        matches!(self, Self::AmbiguousSpeciesMatch { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousSpeciesMatch {
                reaction,
                side,
                component,
                chosen,
                rejected,
            } => write!(
                f,
                "reaction {reaction}: {side} component {component} matches both {chosen:?} and {rejected:?}; keeping {chosen:?}"
            ),
            Self::NoSpeciesMatch {
                reaction,
                side,
                component,
                atom_count,
            } => write!(
                f,
                "reaction {reaction}: {side} component {component} ({atom_count} atoms) matches no species"
            ),
            Self::MissingReactionSide { reaction, side } => {
                write!(f, "reaction {reaction}: no {side} block, skipped")
            }
            Self::DuplicateLabel {
                reaction,
                side,
                label,
            } => write!(f, "reaction {reaction}: label *{label} appears twice on the {side} side"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kind_tag() {
        let d = Diagnostic::AmbiguousSpeciesMatch {
            reaction: 4,
            side: Side::Product,
            component: 1,
            chosen: "A".to_string(),
            rejected: "B".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            serde_json::json!({
                "kind": "ambiguous_species_match",
                "reaction": 4,
                "side": "product",
                "component": 1,
                "chosen": "A",
                "rejected": "B"
            })
        );
        assert!(d.is_ambiguity());
        assert_eq!(d.reaction(), 4);
    }

    #[test]
    fn display_is_readable() {
        let d = Diagnostic::MissingReactionSide {
            reaction: 2,
            side: Side::Reactant,
        };
        assert_eq!(d.to_string(), "reaction 2: no reactant block, skipped");
        assert!(!d.is_ambiguity());
    }
}
