use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Sequence data on line {line} appears before any '>' header")]
    MissingHeader { line: usize },
}

/// One FASTA entry. The description is the full header text after `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub description: String,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>, FastaError> {
    let file = File::open(path)?;
    parse_fasta(&mut BufReader::new(file))
}

pub fn parse_fasta(reader: &mut impl BufRead) -> Result<Vec<SequenceRecord>, FastaError> {
    let mut records = Vec::new();
    let mut current: Option<SequenceRecord> = None;

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(SequenceRecord {
                description: header.trim().to_string(),
                sequence: String::new(),
            });
        } else {
            let record = current.as_mut().ok_or(FastaError::MissingHeader {
                line: line_num + 1,
            })?;
            record
                .sequence
                .extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    records.extend(current);
    Ok(records)
}
