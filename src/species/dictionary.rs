use crate::adjlist::parse_molecule;

use super::error::SpeciesError;
use super::Species;

/// One raw entry of a species dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesBlock<'a> {
    pub name: &'a str,
    /// 1-based line number of the name line.
    pub line: usize,
    pub body: Vec<&'a str>,
}

/// Split a species dictionary into entries.
///
/// An entry is a name line followed by its atom lines and ends at a blank
/// line or at the end of the text. `multiplicity` lines are dropped.
pub fn species_blocks(text: &str) -> Vec<SpeciesBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<SpeciesBlock<'_>> = None;

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            blocks.extend(current.take());
            continue;
        }
        match current.as_mut() {
            None => {
                current = Some(SpeciesBlock {
                    name: line,
                    line: i + 1,
                    body: Vec::new(),
                });
            }
            Some(block) => {
                if !line.starts_with("multiplicity") {
                    block.body.push(line);
                }
            }
        }
    }
    blocks.extend(current);
    blocks
}

/// Parse every entry of a species dictionary. Each entry succeeds or fails
/// on its own.
pub fn parse_species_dictionary(text: &str) -> Vec<Result<Species, SpeciesError>> {
    species_blocks(text).into_iter().map(parse_block).collect()
}

fn parse_block(block: SpeciesBlock<'_>) -> Result<Species, SpeciesError> {
    if block.body.is_empty() {
        return Err(SpeciesError::Empty {
            name: block.name.to_string(),
            line: block.line,
        });
    }
    let graph = parse_molecule(&block.body.join("\n")).map_err(|source| {
        SpeciesError::InvalidBlock {
            name: block.name.to_string(),
            line: block.line,
            source,
        }
    })?;
    Ok(Species::new(block.name, graph))
}
