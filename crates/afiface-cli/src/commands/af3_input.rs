use crate::cli::Af3InputArgs;
use crate::error::Result;
use afiface::core::io::fasta;
use afiface::workflows::af3_input::{Af3Job, Af3JobBuilder, MoleculeKind};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

fn build_job(args: &Af3InputArgs) -> Result<Af3Job> {
    let groups: [(MoleculeKind, &Option<PathBuf>, &str); 3] = [
        (MoleculeKind::Protein, &args.proteins, args.protein_stoich.as_str()),
        (MoleculeKind::Dna, &args.dna, args.dna_stoich.as_str()),
        (MoleculeKind::Rna, &args.rna, args.rna_stoich.as_str()),
    ];

    let mut builder = Af3JobBuilder::new(&args.name);
    for (kind, path, stoichiometry) in groups {
        let Some(path) = path else {
            continue;
        };
        info!("Reading {} FASTA: {:?}", kind, path);
        let records = fasta::read_fasta(path)?;
        builder = builder.molecules(kind, &records, stoichiometry)?;
    }
    Ok(builder.build()?)
}

fn write_job(mut writer: impl Write, job: &Af3Job) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, job)?;
    writeln!(writer)?;
    Ok(())
}

pub async fn run(args: Af3InputArgs) -> Result<()> {
    let job = build_job(&args)?;
    info!(
        "Writing job '{}' with {} entities to stdout.",
        job.name,
        job.sequences.len()
    );
    write_job(std::io::stdout().lock(), &job)
}
