use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use atommap::{Diagnostic, MappedReaction, MapperConfig, ReactionRecord, SpeciesIndex};

#[derive(Deserialize)]
struct ReactionList {
    reactions: Vec<ReactionRecord>,
}

/// The complete output file.
#[derive(Serialize)]
pub struct Document<'a> {
    pub species: &'a SpeciesIndex,
    pub reactions: &'a [MappedReaction],
    pub diagnostics: &'a [Diagnostic],
}

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn read_reactions(path: &Path) -> Result<Vec<ReactionRecord>> {
    let text = read_text(path)?;
    let list: ReactionList = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse reaction list {}", path.display()))?;
    Ok(list.reactions)
}

pub fn read_config(path: &Path) -> Result<MapperConfig> {
    let text = read_text(path)?;
    MapperConfig::from_json(&text)
        .with_context(|| format!("failed to parse mapper config {}", path.display()))
}

pub fn write_document(path: &Path, document: &Document<'_>, pretty: bool) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, document)?;
    } else {
        serde_json::to_writer(&mut writer, document)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))
}
