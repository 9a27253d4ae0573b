use thiserror::Error;

/// Errors produced when reading adjacency-list notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdjListError {
    /// A line does not follow the atom-line grammar.
    #[error("malformed atom line {line:?}: {reason}")]
    MalformedAtomLine { line: String, reason: &'static str },
    /// A bond clause names an atom number that is not defined in the block.
    #[error("atom {atom} is bonded to atom {target}, which is not defined in this block")]
    UnresolvedBondTarget { atom: u32, target: u32 },
    /// Two lines of the block share an atom number.
    #[error("atom number {number} is defined more than once")]
    DuplicateAtomNumber { number: u32 },
    /// A bond clause points back at the atom that declares it.
    #[error("atom {atom} is bonded to itself")]
    SelfBond { atom: u32 },
    /// The two endpoints of a bond disagree about its order.
    #[error("bond {a}-{b} is declared both as {first:?} and as {second:?}")]
    ConflictingBondOrder {
        a: u32,
        b: u32,
        first: String,
        second: String,
    },
    /// Numbering bare `*` labels would run past the largest representable label.
    #[error("bare `*` labels run past the largest label number")]
    LabelOverflow,
}

impl AdjListError {
    pub(crate) fn malformed(line: &str, reason: &'static str) -> Self {
        Self::MalformedAtomLine {
            line: line.to_string(),
            reason,
        }
    }
}
