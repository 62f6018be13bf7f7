use crate::core::io::model_data::ModelData;
use crate::core::models::interface::{ContactObservation, InterfaceSet};
use crate::core::models::layout::SequenceLayout;
use crate::engine::aggregate::{self, InterfaceScores};
use crate::engine::config::{InterfaceConfig, InterfaceScope, InterfaceSource};
use crate::engine::error::EngineError;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceReport {
    pub model: String,
    pub interface_plddt: f64,
    pub weighted_interface_plddt: f64,
    pub global_plddt: f64,
    pub interface_residues: usize,
    pub total_area: f64,
}

fn collect_scores(
    model: &ModelData,
    layout: &SequenceLayout,
    observations: &[ContactObservation],
    config: &InterfaceConfig,
) -> Result<InterfaceScores, EngineError> {
    let record = &model.record;
    match (&config.source, &config.scope) {
        (InterfaceSource::Contacts, InterfaceScope::Between { group_a, group_b }) => {
            aggregate::aggregate_between(layout, record, observations, group_a, group_b)
        }
        (source, scope) => {
            let interface = match source {
                InterfaceSource::Contacts => InterfaceSet::from_contacts(observations),
                InterfaceSource::AllResidues => InterfaceSet::from_all_residues(layout),
            };
            let filter: Option<HashSet<char>> = match scope {
                InterfaceScope::All => None,
                InterfaceScope::Chains(chains) => Some(chains.clone()),
                InterfaceScope::Between { group_a, group_b } => {
                    Some(group_a.union(group_b).copied().collect())
                }
            };
            aggregate::aggregate(layout, record, &interface, filter.as_ref())
        }
    }
}

#[instrument(skip_all, name = "interface_plddt_workflow", fields(model = %model.name))]
pub fn run(
    model: &ModelData,
    layout: &SequenceLayout,
    observations: &[ContactObservation],
    config: &InterfaceConfig,
) -> Result<InterfaceReport, EngineError> {
    info!(
        "Aggregating interface scores from {} contact observations.",
        observations.len()
    );
    let scores = collect_scores(model, layout, observations, config)?;
    let report = InterfaceReport {
        model: model.name.clone(),
        interface_plddt: scores.mean()?,
        weighted_interface_plddt: scores.weighted_mean()?,
        global_plddt: model.global_plddt()?,
        interface_residues: scores.num_residues(),
        total_area: scores.total_area,
    };
    info!(
        "Interface pLDDT {:.2} over {} residues (weighted {:.2}).",
        report.interface_plddt, report.interface_residues, report.weighted_interface_plddt
    );
    Ok(report)
}
