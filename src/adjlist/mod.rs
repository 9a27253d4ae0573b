mod builder;
pub mod error;
mod parser;
mod writer;

use crate::atom::{Atom, AtomLabel};
use crate::graph::MoleculeGraph;
pub use builder::build_graph;
pub use error::AdjListError;
pub use parser::parse_atom_line;
pub use writer::to_adjlist;

/// First synthetic label handed to a bare `*` atom.
pub const SYNTHETIC_LABEL_BASE: u32 = 900;

/// Parse a newline-separated block of atom lines.
///
/// Blank lines and `multiplicity` lines are skipped. Bare `*` labels are then
/// numbered in order of appearance, starting at [`SYNTHETIC_LABEL_BASE`] or
/// one past the largest explicit label of the block, whichever is higher.
pub fn parse_adjlist(text: &str) -> Result<Vec<Atom>, AdjListError> {
    let mut atoms = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("multiplicity"))
        .map(parse_atom_line)
        .collect::<Result<Vec<_>, _>>()?;
    number_bare_labels(&mut atoms)?;
    Ok(atoms)
}

/// Parse a block straight into its graph.
pub fn parse_molecule(text: &str) -> Result<MoleculeGraph, AdjListError> {
    build_graph(&parse_adjlist(text)?)
}

fn number_bare_labels(atoms: &mut [Atom]) -> Result<(), AdjListError> {
    let mut next = match atoms.iter().filter_map(Atom::label_number).max() {
        Some(max) if max >= SYNTHETIC_LABEL_BASE => max.checked_add(1),
        _ => Some(SYNTHETIC_LABEL_BASE),
    };
    for atom in atoms
        .iter_mut()
        .filter(|a| a.label == Some(AtomLabel::Unnumbered))
    {
        let label = next.ok_or(AdjListError::LabelOverflow)?;
        atom.label = Some(AtomLabel::Numbered(label));
        next = label.checked_add(1);
    }
    Ok(())
}
