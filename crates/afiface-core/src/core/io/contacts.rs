use crate::core::models::interface::ContactObservation;
use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

const CHAIN_1_COLUMN: &str = "ID1_chainID";
const RESIDUE_1_COLUMN: &str = "ID1_resSeq";
const CHAIN_2_COLUMN: &str = "ID2_chainID";
const RESIDUE_2_COLUMN: &str = "ID2_resSeq";
const AREA_COLUMN: &str = "area";

#[derive(Debug, Error)]
pub enum ContactParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Contact table header lacks required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: ContactParseErrorKind,
    },
}

#[derive(Debug, Error)]
pub enum ContactParseErrorKind {
    #[error("Row has no value for column '{0}'")]
    MissingField(&'static str),
    #[error("Invalid chain identifier '{0}' (expected a single character)")]
    InvalidChain(String),
    #[error("Invalid residue number '{0}'")]
    InvalidResidue(String),
    #[error("Invalid contact area '{0}' (expected a finite non-negative number)")]
    InvalidArea(String),
}

struct ColumnIndices {
    chain_1: usize,
    residue_1: usize,
    chain_2: usize,
    residue_2: usize,
    area: usize,
}

impl ColumnIndices {
    fn from_header(header: &str) -> Result<Self, ContactParseError> {
        let names: Vec<&str> = header.split_whitespace().collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|&name| name == column)
                .ok_or(ContactParseError::MissingColumn(column))
        };
        Ok(Self {
            chain_1: find(CHAIN_1_COLUMN)?,
            residue_1: find(RESIDUE_1_COLUMN)?,
            chain_2: find(CHAIN_2_COLUMN)?,
            residue_2: find(RESIDUE_2_COLUMN)?,
            area: find(AREA_COLUMN)?,
        })
    }
}

pub fn read_contacts<P: AsRef<Path>>(path: P) -> Result<Vec<ContactObservation>, ContactParseError> {
    let text = fs::read_to_string(path)?;
    parse_contacts(&text)
}

/// Parses the inter-chain contact table produced by the contact program.
///
/// The first line names the columns (whitespace separated); each following line is
/// one tab-separated contact. Columns other than the two residue identifiers and the
/// area are ignored.
pub fn parse_contacts(text: &str) -> Result<Vec<ContactObservation>, ContactParseError> {
    let text = text.trim_start_matches(['\n', '\r', ' ', '\t']);
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let (header, body) = text.split_once('\n').unwrap_or((text, ""));
    let columns = ColumnIndices::from_header(header)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut observations = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let line = row + 2;
        if record.iter().all(str::is_empty) {
            continue;
        }
        observations.push(parse_row(&record, &columns, line)?);
    }
    Ok(observations)
}

fn parse_row(
    record: &StringRecord,
    columns: &ColumnIndices,
    line: usize,
) -> Result<ContactObservation, ContactParseError> {
    let field = |index: usize, column: &'static str| {
        record
            .get(index)
            .filter(|value| !value.is_empty())
            .ok_or(ContactParseError::Parse {
                line,
                kind: ContactParseErrorKind::MissingField(column),
            })
    };
    let chain = |index: usize, column: &'static str| -> Result<char, ContactParseError> {
        let value = field(index, column)?;
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ContactParseError::Parse {
                line,
                kind: ContactParseErrorKind::InvalidChain(value.to_string()),
            }),
        }
    };
    let residue = |index: usize, column: &'static str| -> Result<usize, ContactParseError> {
        let value = field(index, column)?;
        value.parse().map_err(|_| ContactParseError::Parse {
            line,
            kind: ContactParseErrorKind::InvalidResidue(value.to_string()),
        })
    };

    let area_str = field(columns.area, AREA_COLUMN)?;
    let area = area_str
        .parse::<f64>()
        .ok()
        .filter(|area| area.is_finite() && *area >= 0.0)
        .ok_or_else(|| ContactParseError::Parse {
            line,
            kind: ContactParseErrorKind::InvalidArea(area_str.to_string()),
        })?;

    Ok(ContactObservation {
        chain_a: chain(columns.chain_1, CHAIN_1_COLUMN)?,
        residue_a: residue(columns.residue_1, RESIDUE_1_COLUMN)?,
        chain_b: chain(columns.chain_2, CHAIN_2_COLUMN)?,
        residue_b: residue(columns.residue_2, RESIDUE_2_COLUMN)?,
        area,
    })
}
