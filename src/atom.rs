/// Atom-map label attached to an atom with a `*` marker.
///
/// A numbered label (`*3`) is a conserved identifier shared by the reactant
/// and product sides of a reaction. A bare `*` is parsed as
/// [`AtomLabel::Unnumbered`] and resolved to a synthetic number when the
/// surrounding block is parsed (see
/// [`parse_adjlist`](crate::adjlist::parse_adjlist)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomLabel {
    /// Explicit numeric label, e.g. `*1`.
    Numbered(u32),
    /// Bare `*` awaiting a synthetic number.
    Unnumbered,
}

impl AtomLabel {
    pub fn number(&self) -> Option<u32> {
        match self {
            Self::Numbered(n) => Some(*n),
            Self::Unnumbered => None,
        }
    }
}

/// One `{neighbor,order}` clause of an atom line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BondClause {
    /// Atom number of the bonded neighbor, local to the block.
    pub neighbor: u32,
    /// Bond-order symbol (`S`, `D`, `T`, `B`, …). Compared for equality only.
    pub order: String,
}

/// One parsed atom line of adjacency-list notation.
///
/// The record mirrors the line field for field; nothing here is checked
/// against chemistry. Bonds keep their textual order so that formatting the
/// atom reproduces the original line.
///
/// # Examples
///
/// ```
/// use atommap::{Atom, AtomLabel};
///
/// let atom: Atom = "2 *1 H u0 p0 c0 {1,S}".parse().unwrap();
/// assert_eq!(atom.number, 2);
/// assert_eq!(atom.label, Some(AtomLabel::Numbered(1)));
/// assert_eq!(atom.element, "H");
/// assert_eq!(atom.bonds[0].neighbor, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Atom {
    /// Block-local atom number. Not globally unique.
    pub number: u32,
    /// Optional atom-map label.
    pub label: Option<AtomLabel>,
    /// Element symbol, one uppercase letter optionally followed by a lowercase one.
    pub element: String,
    /// Unpaired electron count (`u`).
    pub unpaired: u32,
    /// Lone-pair count (`p`), if given.
    pub pairs: Option<u32>,
    /// Formal charge (`c`), if given.
    pub charge: Option<i32>,
    /// Site tag (`s…`), passed through untouched.
    pub site: Option<String>,
    /// Morphology tag (`m…`), passed through untouched.
    pub morphology: Option<String>,
    /// Bond clauses in declaration order.
    pub bonds: Vec<BondClause>,
}

impl Atom {
    /// The numeric label, if the atom carries a resolved one.
    pub fn label_number(&self) -> Option<u32> {
        self.label.and_then(|l| l.number())
    }
}
