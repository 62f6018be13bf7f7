use crate::core::models::record::{ConfidenceRecord, RecordError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelDataError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Inconsistent confidence data in '{path}': {source}")]
    Record { path: String, source: RecordError },
}

/// The subset of a model output document that is actually read.
///
/// Any other keys (distograms, MSA logits, ...) are skipped by the deserializer.
#[derive(Debug, Serialize, Deserialize)]
struct RawModelData {
    plddt: Vec<f64>,
    #[serde(alias = "pae")]
    predicted_aligned_error: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ptm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iptm: Option<f64>,
    #[serde(
        default,
        alias = "max_pae",
        skip_serializing_if = "Option::is_none"
    )]
    max_predicted_aligned_error: Option<f64>,
}

/// Confidence output of a single structure prediction model.
///
/// Scores only produced by some model variants are `None` when absent, e.g. `iptm`
/// for single-chain models.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub name: String,
    pub record: ConfidenceRecord,
    pub ptm: Option<f64>,
    pub iptm: Option<f64>,
    pub max_pae: Option<f64>,
}

impl ModelData {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelDataError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ModelDataError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::read_from(BufReader::new(file), name).map_err(|e| match e {
            ModelDataError::Json { source, .. } => ModelDataError::Json {
                path: path.to_string_lossy().to_string(),
                source,
            },
            ModelDataError::Record { source, .. } => ModelDataError::Record {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn read_from(reader: impl Read, name: impl Into<String>) -> Result<Self, ModelDataError> {
        let name = name.into();
        let raw: RawModelData =
            serde_json::from_reader(reader).map_err(|e| ModelDataError::Json {
                path: name.clone(),
                source: e,
            })?;
        let record = ConfidenceRecord::from_rows(raw.plddt, raw.predicted_aligned_error)
            .map_err(|e| ModelDataError::Record {
                path: name.clone(),
                source: e,
            })?;
        Ok(Self {
            name,
            record,
            ptm: raw.ptm,
            iptm: raw.iptm,
            max_pae: raw.max_predicted_aligned_error,
        })
    }

    /// Writes the confidence data this model was read from as pretty-printed JSON,
    /// without the keys that were skipped on load.
    pub fn write_json(&self, writer: impl Write) -> Result<(), serde_json::Error> {
        let pairwise = self.record.pairwise();
        let raw = RawModelData {
            plddt: self.record.scores().to_vec(),
            predicted_aligned_error: pairwise
                .row_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
            ptm: self.ptm,
            iptm: self.iptm,
            max_predicted_aligned_error: self.max_pae,
        };
        serde_json::to_writer_pretty(writer, &raw)
    }

    pub fn global_plddt(&self) -> Result<f64, RecordError> {
        self.record.mean_score()
    }

    pub fn summary(&self) -> Result<ModelSummary, RecordError> {
        Ok(ModelSummary {
            name: self.name.clone(),
            plddt: self.global_plddt()?,
            ptm: self.ptm,
            iptm: self.iptm,
        })
    }
}

/// Model-level scores in the form written to and read from score files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub name: String,
    pub plddt: f64,
    pub ptm: Option<f64>,
    pub iptm: Option<f64>,
}

pub(crate) const NOT_APPLICABLE: &str = "NA";

fn fmt_optional(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_APPLICABLE.to_string(), |v| v.to_string())
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pLDDT {}", self.plddt)?;
        writeln!(f, "pTM {}", fmt_optional(self.ptm))?;
        write!(f, "ipTM {}", fmt_optional(self.iptm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    const MULTIMER_JSON: &str = r#"{
        "plddt": [80.0, 90.0, 70.0],
        "predicted_aligned_error": [[0.0, 1.0, 2.0], [3.0, 0.0, 4.0], [5.0, 6.0, 0.0]],
        "ptm": 0.8,
        "iptm": 0.75,
        "max_predicted_aligned_error": 31.75,
        "ranking_confidence": 0.76,
        "distogram": {"bin_edges": [1.0, 2.0]}
    }"#;

    #[test]
    fn read_from_selects_known_fields_and_ignores_the_rest() {
        let model = ModelData::read_from(Cursor::new(MULTIMER_JSON), "model_1").unwrap();
        assert_eq!(model.name, "model_1");
        assert_eq!(model.record.len(), 3);
        assert_eq!(model.record.global_pair(1, 2).unwrap(), 4.0);
        assert_eq!(model.ptm, Some(0.8));
        assert_eq!(model.iptm, Some(0.75));
        assert_eq!(model.max_pae, Some(31.75));
        assert_eq!(model.global_plddt().unwrap(), 80.0);
    }

    #[test]
    fn read_from_leaves_missing_optional_scores_as_none() {
        let json = r#"{"plddt": [50.0], "pae": [[0.5]]}"#;
        let model = ModelData::read_from(Cursor::new(json), "monomer").unwrap();
        assert_eq!(model.ptm, None);
        assert_eq!(model.iptm, None);
        assert_eq!(model.max_pae, None);
    }

    #[test]
    fn read_from_rejects_missing_required_arrays() {
        let result = ModelData::read_from(Cursor::new(r#"{"plddt": [1.0]}"#), "bad");
        assert!(matches!(result, Err(ModelDataError::Json { .. })));
    }

    #[test]
    fn read_from_rejects_pae_of_wrong_size() {
        let json = r#"{"plddt": [1.0, 2.0], "pae": [[0.0]]}"#;
        let result = ModelData::read_from(Cursor::new(json), "bad");
        assert!(matches!(
            result,
            Err(ModelDataError::Record {
                source: RecordError::ShapeMismatch { .. },
                ..
            })
        ));
    }

    #[test]
    fn load_uses_file_stem_as_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result_model_1_multimer_v3_pred_0.json");
        fs::write(&path, MULTIMER_JSON).unwrap();
        let model = ModelData::load(&path).unwrap();
        assert_eq!(model.name, "result_model_1_multimer_v3_pred_0");
    }

    #[test]
    fn load_reports_path_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ModelData::load(dir.path().join("nope.json"));
        match result {
            Err(ModelDataError::Io { path, .. }) => assert!(path.ends_with("nope.json")),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn write_json_keeps_only_the_confidence_keys() {
        let model = ModelData::read_from(Cursor::new(MULTIMER_JSON), "model_1").unwrap();
        let mut buffer = Vec::new();
        model.write_json(&mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "plddt": [80.0, 90.0, 70.0],
                "predicted_aligned_error": [[0.0, 1.0, 2.0], [3.0, 0.0, 4.0], [5.0, 6.0, 0.0]],
                "ptm": 0.8,
                "iptm": 0.75,
                "max_predicted_aligned_error": 31.75
            })
        );
        assert_eq!(ModelData::read_from(Cursor::new(buffer), "model_1").unwrap(), model);
    }

    #[test]
    fn write_json_omits_absent_scores() {
        let json = r#"{"plddt": [50.0], "pae": [[0.5]]}"#;
        let model = ModelData::read_from(Cursor::new(json), "monomer").unwrap();
        let mut buffer = Vec::new();
        model.write_json(&mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"plddt": [50.0], "predicted_aligned_error": [[0.5]]})
        );
    }

    #[test]
    fn summary_display_marks_absent_scores() {
        let summary = ModelSummary {
            name: "m".to_string(),
            plddt: 85.5,
            ptm: Some(0.5),
            iptm: None,
        };
        assert_eq!(summary.to_string(), "pLDDT 85.5\npTM 0.5\nipTM NA");
    }
}
