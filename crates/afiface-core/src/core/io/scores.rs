use super::model_data::{ModelSummary, NOT_APPLICABLE};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

const VOROMQA_SCORE_FIELD: usize = 1;
const VOROMQA_ENERGY_FIELD: usize = 9;

#[derive(Debug, Error)]
pub enum ScoreFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("Invalid value '{value}' for '{key}' on line {line}")]
    InvalidValue {
        line: usize,
        key: &'static str,
        value: String,
    },
    #[error("Score file lacks a '{0}' line")]
    MissingScore(&'static str),
    #[error("VoroMQA output has no score on its last line")]
    MissingVoromqaScore,
}

fn read_text(path: &Path) -> Result<String, ScoreFileError> {
    fs::read_to_string(path).map_err(|e| ScoreFileError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

fn parse_optional(
    value: &str,
    key: &'static str,
    line: usize,
) -> Result<Option<f64>, ScoreFileError> {
    if value == NOT_APPLICABLE || value == "None" {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ScoreFileError::InvalidValue {
            line,
            key,
            value: value.to_string(),
        })
}

/// Parses the text written by [`ModelSummary`]'s `Display` impl.
pub fn parse_model_summary(text: &str, name: &str) -> Result<ModelSummary, ScoreFileError> {
    let mut plddt = None;
    let mut ptm = None;
    let mut iptm = None;

    for (line_num, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        match key {
            "pLDDT" => plddt = parse_optional(value, "pLDDT", line_num + 1)?,
            "pTM" => ptm = parse_optional(value, "pTM", line_num + 1)?,
            "ipTM" => iptm = parse_optional(value, "ipTM", line_num + 1)?,
            _ => {}
        }
    }

    Ok(ModelSummary {
        name: name.to_string(),
        plddt: plddt.ok_or(ScoreFileError::MissingScore("pLDDT"))?,
        ptm,
        iptm,
    })
}

pub fn read_model_summary(path: &Path) -> Result<ModelSummary, ScoreFileError> {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    parse_model_summary(&read_text(path)?, &name)
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoromqaScores {
    pub score: String,
    pub energy: Option<String>,
}

/// Reads the global VoroMQA score (and the energy, when present) from the last
/// line of a VoroMQA result file. Values are kept verbatim.
pub fn parse_voromqa(text: &str) -> Result<VoromqaScores, ScoreFileError> {
    let last = text.lines().last().unwrap_or_default();
    let fields: Vec<&str> = last.split_whitespace().collect();
    let score = fields
        .get(VOROMQA_SCORE_FIELD)
        .ok_or(ScoreFileError::MissingVoromqaScore)?;
    Ok(VoromqaScores {
        score: score.to_string(),
        energy: fields
            .get(VOROMQA_ENERGY_FIELD)
            .map(|energy| energy.to_string()),
    })
}

pub fn read_voromqa(path: &Path) -> Result<VoromqaScores, ScoreFileError> {
    parse_voromqa(&read_text(path)?)
}
