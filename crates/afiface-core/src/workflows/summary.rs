use crate::core::io::model_data::{ModelData, ModelDataError, ModelSummary};
use crate::core::io::scores::{self, ScoreFileError};
use crate::engine::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument, warn};

const MODEL_NUMBERS: std::ops::RangeInclusive<u8> = 1..=5;
const ALL_PROTEINS: &str = "all";

/// Loads and summarizes every model file in parallel.
///
/// Results keep the order of `paths`; one unreadable file does not stop the rest.
#[instrument(skip_all, name = "summary_workflow")]
pub fn summarize_models(
    paths: &[PathBuf],
    reporter: &ProgressReporter,
) -> Vec<Result<ModelSummary, ModelDataError>> {
    info!("Summarizing {} model files.", paths.len());
    reporter.report(Progress::BatchStart {
        total_models: paths.len() as u64,
    });

    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let result = summarize_one(path);
            let name = path.to_string_lossy().to_string();
            match &result {
                Ok(_) => reporter.report(Progress::ModelFinished { name }),
                Err(e) => reporter.report(Progress::ModelFailed {
                    name,
                    reason: e.to_string(),
                }),
            }
            result
        })
        .collect();

    reporter.report(Progress::BatchFinish);
    let failures = results.iter().filter(|result| result.is_err()).count();
    if failures > 0 {
        warn!("{} of {} model files could not be summarized.", failures, paths.len());
        reporter.report(Progress::Message(format!(
            "{} of {} model files could not be summarized",
            failures,
            paths.len()
        )));
    }
    results
}

fn summarize_one(path: &Path) -> Result<ModelSummary, ModelDataError> {
    let model = ModelData::load(path)?;
    model.summary().map_err(|e| ModelDataError::Record {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Cannot list protein directories in '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("Failed to read scores of protein '{protein}', model {model}: {source}")]
    Scores {
        protein: String,
        model: u8,
        source: ScoreFileError,
    },
}

/// One row of collected model-quality scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectedScores {
    pub protein: String,
    pub model: u8,
    pub plddt: f64,
    pub ptm: Option<f64>,
    pub iptm: Option<f64>,
    pub voromqa: String,
    pub voromqa_energy: Option<String>,
}

fn model_tag(multimer: bool) -> &'static str {
    if multimer { "multimer_v3" } else { "ptm" }
}

fn list_proteins(dir: &Path) -> Result<Vec<String>, CollectError> {
    let io_error = |e| CollectError::Io {
        path: dir.to_string_lossy().to_string(),
        source: e,
    };
    let mut proteins = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if entry.file_type().map_err(io_error)?.is_dir() {
            proteins.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    proteins.sort();
    Ok(proteins)
}

fn collect_protein(
    dir: &Path,
    protein: &str,
    tag: &str,
) -> Result<Vec<CollectedScores>, CollectError> {
    let results_dir = dir.join(protein);
    info!("Collecting scores for protein {}.", protein);

    MODEL_NUMBERS
        .map(|model| -> Result<CollectedScores, CollectError> {
            let scores_error = |source| CollectError::Scores {
                protein: protein.to_string(),
                model,
                source,
            };
            let summary = scores::read_model_summary(
                &results_dir.join(format!("result_model_{model}_{tag}_pred_0.af_scores")),
            )
            .map_err(scores_error)?;
            let voromqa = scores::read_voromqa(
                &results_dir.join(format!("relaxed_model_{model}_{tag}_pred_0.voromqa")),
            )
            .map_err(scores_error)?;
            Ok(CollectedScores {
                protein: protein.to_string(),
                model,
                plddt: summary.plddt,
                ptm: summary.ptm,
                iptm: summary.iptm,
                voromqa: voromqa.score,
                voromqa_energy: voromqa.energy,
            })
        })
        .collect()
}

/// Gathers the score files of models 1 to 5 for `protein` under `dir`.
///
/// `protein == "all"` collects every subdirectory of `dir` in name order.
#[instrument(skip_all, name = "collect_scores_workflow")]
pub fn collect_scores(
    dir: &Path,
    protein: &str,
    multimer: bool,
) -> Result<Vec<CollectedScores>, CollectError> {
    let proteins = if protein == ALL_PROTEINS {
        let proteins = list_proteins(dir)?;
        if proteins.is_empty() {
            warn!("No protein directories found in '{}'.", dir.display());
        }
        proteins
    } else {
        vec![protein.to_string()]
    };

    let tag = model_tag(multimer);
    let mut rows = Vec::new();
    for protein in &proteins {
        rows.extend(collect_protein(dir, protein, tag)?);
    }
    Ok(rows)
}
