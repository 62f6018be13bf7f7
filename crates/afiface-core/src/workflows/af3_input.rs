use crate::core::io::fasta::SequenceRecord;
use crate::core::utils::labels::{MAX_CHAINS, chain_label};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, instrument};

const DIALECT: &str = "alphafold3";
const FORMAT_VERSION: u32 = 3;
const DEFAULT_SEEDS: [u64; 1] = [0];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Af3InputError {
    #[error("Stoichiometry length ({given}) does not match number of sequences ({expected})")]
    StoichiometryLength { given: usize, expected: usize },
    #[error("Stoichiometry must contain integers only, got '{0}'")]
    InvalidCount(String),
    #[error("Stoichiometry values must be >= 1")]
    ZeroCount,
    #[error("Exceeded maximum number of chains ({max})")]
    TooManyChains { max: usize },
    #[error("No sequences provided")]
    NoSequences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoleculeKind {
    Protein,
    Dna,
    Rna,
}

impl fmt::Display for MoleculeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoleculeKind::Protein => "protein",
            MoleculeKind::Dna => "DNA",
            MoleculeKind::Rna => "RNA",
        };
        f.write_str(name)
    }
}

/// Chain copies sharing one sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityChains {
    pub id: Vec<char>,
    pub sequence: String,
}

/// One entry of the job's `sequences` list, keyed by molecule type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Protein(EntityChains),
    Dna(EntityChains),
    Rna(EntityChains),
}

impl Entity {
    fn new(kind: MoleculeKind, chains: EntityChains) -> Self {
        match kind {
            MoleculeKind::Protein => Entity::Protein(chains),
            MoleculeKind::Dna => Entity::Dna(chains),
            MoleculeKind::Rna => Entity::Rna(chains),
        }
    }

    pub fn chains(&self) -> &EntityChains {
        match self {
            Entity::Protein(chains) | Entity::Dna(chains) | Entity::Rna(chains) => chains,
        }
    }
}

/// Input document for a structure prediction job of the third input format version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Af3Job {
    pub name: String,
    pub sequences: Vec<Entity>,
    pub dialect: &'static str,
    pub version: u32,
    #[serde(rename = "modelSeeds")]
    pub model_seeds: Vec<u64>,
}

/// Parses a colon separated list of copy numbers, one per sequence, e.g. `2:1`.
///
/// An empty string means one copy of every sequence.
pub fn parse_stoichiometry(text: &str, sequences: usize) -> Result<Vec<usize>, Af3InputError> {
    if text.is_empty() {
        return Ok(vec![1; sequences]);
    }

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != sequences {
        return Err(Af3InputError::StoichiometryLength {
            given: parts.len(),
            expected: sequences,
        });
    }

    let counts = parts
        .iter()
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| Af3InputError::InvalidCount(part.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if counts.contains(&0) {
        return Err(Af3InputError::ZeroCount);
    }
    Ok(counts)
}

/// Assembles a job from molecule groups, handing out chain labels in the order the
/// groups are added.
#[derive(Debug)]
pub struct Af3JobBuilder {
    name: String,
    sequences: Vec<Entity>,
    next_chain: usize,
}

impl Af3JobBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequences: Vec::new(),
            next_chain: 0,
        }
    }

    #[instrument(skip_all, fields(kind = %kind))]
    pub fn molecules(
        mut self,
        kind: MoleculeKind,
        records: &[SequenceRecord],
        stoichiometry: &str,
    ) -> Result<Self, Af3InputError> {
        let counts = parse_stoichiometry(stoichiometry, records.len())?;
        info!("Adding {} {} sequences.", records.len(), kind);

        for (record, count) in records.iter().zip(counts) {
            let id = (0..count)
                .map(|_| self.next_label())
                .collect::<Result<Vec<_>, _>>()?;
            debug!(
                "Sequence '{}' gets chains {:?}",
                record.description.split_whitespace().next().unwrap_or_default(),
                id
            );
            self.sequences.push(Entity::new(
                kind,
                EntityChains {
                    id,
                    sequence: record.sequence.clone(),
                },
            ));
        }
        Ok(self)
    }

    fn next_label(&mut self) -> Result<char, Af3InputError> {
        let label = chain_label(self.next_chain)
            .ok_or(Af3InputError::TooManyChains { max: MAX_CHAINS })?;
        self.next_chain += 1;
        Ok(label)
    }

    pub fn build(self) -> Result<Af3Job, Af3InputError> {
        if self.sequences.is_empty() {
            return Err(Af3InputError::NoSequences);
        }
        Ok(Af3Job {
            name: self.name,
            sequences: self.sequences,
            dialect: DIALECT,
            version: FORMAT_VERSION,
            model_seeds: DEFAULT_SEEDS.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str, sequence: &str) -> SequenceRecord {
        SequenceRecord {
            description: name.to_string(),
            sequence: sequence.to_string(),
        }
    }

    #[test]
    fn empty_stoichiometry_means_one_copy_each() {
        assert_eq!(parse_stoichiometry("", 3).unwrap(), vec![1, 1, 1]);
        assert_eq!(parse_stoichiometry("", 0).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn stoichiometry_counts_follow_sequence_order() {
        assert_eq!(parse_stoichiometry("2:1", 2).unwrap(), vec![2, 1]);
        assert_eq!(parse_stoichiometry(" 3 :1", 2).unwrap(), vec![3, 1]);
    }

    #[test]
    fn stoichiometry_must_have_one_count_per_sequence() {
        assert_eq!(
            parse_stoichiometry("2:1:1", 2),
            Err(Af3InputError::StoichiometryLength {
                given: 3,
                expected: 2
            })
        );
        assert_eq!(
            parse_stoichiometry("1", 0),
            Err(Af3InputError::StoichiometryLength {
                given: 1,
                expected: 0
            })
        );
    }

    #[test]
    fn stoichiometry_rejects_non_integer_and_zero_counts() {
        assert_eq!(
            parse_stoichiometry("2:x", 2),
            Err(Af3InputError::InvalidCount("x".to_string()))
        );
        assert_eq!(
            parse_stoichiometry("1.5", 1),
            Err(Af3InputError::InvalidCount("1.5".to_string()))
        );
        assert_eq!(parse_stoichiometry("1:0", 2), Err(Af3InputError::ZeroCount));
        assert!(matches!(
            parse_stoichiometry("-1", 1),
            Err(Af3InputError::InvalidCount(_))
        ));
    }

    #[test]
    fn chain_labels_continue_across_molecule_types() {
        let job = Af3JobBuilder::new("complex")
            .molecules(
                MoleculeKind::Protein,
                &[record("heavy chain", "MKV"), record("light", "GGS")],
                "2:1",
            )
            .unwrap()
            .molecules(MoleculeKind::Dna, &[record("dna1", "ACGT")], "")
            .unwrap()
            .molecules(MoleculeKind::Rna, &[record("rna1", "ACGU")], "2")
            .unwrap()
            .build()
            .unwrap();

        let ids: Vec<&[char]> = job
            .sequences
            .iter()
            .map(|entity| entity.chains().id.as_slice())
            .collect();
        assert_eq!(
            ids,
            vec![&['A', 'B'][..], &['C'][..], &['D'][..], &['E', 'F'][..]]
        );
        assert!(matches!(job.sequences[2], Entity::Dna(_)));
    }

    #[test]
    fn job_serializes_to_the_expected_document() {
        let job = Af3JobBuilder::new("af3_job")
            .molecules(MoleculeKind::Protein, &[record("p1", "MKV")], "2")
            .unwrap()
            .molecules(MoleculeKind::Rna, &[record("r1", "ACGU")], "")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&job).unwrap(),
            json!({
                "name": "af3_job",
                "sequences": [
                    {"protein": {"id": ["A", "B"], "sequence": "MKV"}},
                    {"rna": {"id": ["C"], "sequence": "ACGU"}}
                ],
                "dialect": "alphafold3",
                "version": 3,
                "modelSeeds": [0]
            })
        );
    }

    #[test]
    fn build_without_sequences_fails() {
        let result = Af3JobBuilder::new("empty")
            .molecules(MoleculeKind::Dna, &[], "")
            .unwrap()
            .build();
        assert_eq!(result, Err(Af3InputError::NoSequences));
    }

    #[test]
    fn running_out_of_chain_labels_fails() {
        let result = Af3JobBuilder::new("big").molecules(
            MoleculeKind::Protein,
            &[record("p", "M")],
            &(MAX_CHAINS + 1).to_string(),
        );
        assert_eq!(
            result.unwrap_err(),
            Af3InputError::TooManyChains { max: MAX_CHAINS }
        );
    }
}
