use std::process::ExitCode;

use anyhow::{bail, Result};

use atommap::{AtomMapper, MapperConfig, SpeciesIndex};

mod cli;
mod io;

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &cli::Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => io::read_config(path)?,
        None => MapperConfig::default(),
    };
    config.synthesize_labels |= cli.synthesize_labels;
    if cli.max_combinations.is_some() {
        config.max_combinations = cli.max_combinations;
    }

    let (species, rejected) = SpeciesIndex::load(&io::read_text(&cli.species)?);
    log::info!(
        "{} species loaded from {} ({} rejected)",
        species.len(),
        cli.species.display(),
        rejected.len()
    );

    let records = io::read_reactions(&cli.reactions)?;
    let report = AtomMapper::with_config(&species, config).map_all(&records);

    io::write_document(
        &cli.output,
        &io::Document {
            species: &species,
            reactions: &report.reactions,
            diagnostics: &report.diagnostics,
        },
        cli.pretty,
    )?;
    log::info!("wrote {}", cli.output.display());

    let ambiguous = report
        .diagnostics
        .iter()
        .filter(|d| d.is_ambiguity())
        .count();
    if cli.strict && ambiguous > 0 {
        bail!("{ambiguous} ambiguous species matches with --strict");
    }
    Ok(())
}
