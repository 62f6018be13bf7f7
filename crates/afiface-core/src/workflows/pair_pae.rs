use crate::core::io::model_data::ModelData;
use crate::core::models::layout::SequenceLayout;
use crate::engine::config::PaeConfig;
use crate::engine::error::EngineError;
use crate::engine::pairs;
use crate::engine::stats;
use serde::Serialize;
use tracing::{info, instrument};

/// Chain-pair predicted aligned error summary for one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaeReport {
    pub model: String,
    pub ch_pae_median: f64,
    pub ch_pae_mean: f64,
    pub ich_pae_median: f64,
    pub ich_pae_mean: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ptm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iptm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plddt_median: Option<f64>,
    pub query_chains: Vec<char>,
    pub target_chains: Vec<char>,
}

#[instrument(skip_all, name = "pair_pae_workflow", fields(model = %model.name))]
pub fn run(
    model: &ModelData,
    layout: &SequenceLayout,
    config: &PaeConfig,
) -> Result<PaeReport, EngineError> {
    info!(
        "Selecting pairwise error blocks for {} chain-pair queries.",
        config.queries.len()
    );
    let selection = pairs::select(layout, &model.record, &config.queries)?;
    let summary = selection.summarize()?;

    let (ptm, iptm, plddt_median) = if config.gather_all {
        (
            model.ptm,
            model.iptm,
            Some(stats::median(model.record.scores())?),
        )
    } else {
        (None, None, None)
    };

    let mut query_chains = Vec::new();
    let mut target_chains = Vec::new();
    for query in &config.queries {
        query_chains.extend(&query.query);
        target_chains.extend(&query.target);
    }

    info!(
        "Inter-chain PAE median {:.3}, mean {:.3}.",
        summary.interchain.median, summary.interchain.mean
    );
    Ok(PaeReport {
        model: model.name.clone(),
        ch_pae_median: summary.chain.median,
        ch_pae_mean: summary.chain.mean,
        ich_pae_median: summary.interchain.median,
        ich_pae_mean: summary.interchain.mean,
        ptm,
        iptm,
        plddt_median,
        query_chains,
        target_chains,
    })
}
