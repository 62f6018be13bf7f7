use super::error::{EngineError, ensure_aligned, join_labels};
use crate::core::models::interface::{ContactObservation, InterfaceSet};
use crate::core::models::layout::SequenceLayout;
use crate::core::models::record::ConfidenceRecord;
use std::collections::HashSet;
use tracing::debug;

/// Per-residue scores collected over interface residues.
///
/// `weighted_values[i]` is `unweighted_values[i]` scaled by that residue's
/// accumulated contact area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceScores {
    pub unweighted_values: Vec<f64>,
    pub weighted_values: Vec<f64>,
    pub total_area: f64,
    visited: Vec<char>,
}

impl InterfaceScores {
    pub fn num_residues(&self) -> usize {
        self.unweighted_values.len()
    }

    pub fn visited_chains(&self) -> &[char] {
        &self.visited
    }

    fn ensure_non_empty(&self) -> Result<(), EngineError> {
        if self.unweighted_values.is_empty() {
            return Err(EngineError::NoInterfaceResidues {
                chains: join_labels(&self.visited),
            });
        }
        Ok(())
    }

    /// Plain average score over interface residues.
    pub fn mean(&self) -> Result<f64, EngineError> {
        self.ensure_non_empty()?;
        Ok(self.unweighted_values.iter().sum::<f64>() / self.num_residues() as f64)
    }

    /// Contact-area weighted average score over interface residues.
    pub fn weighted_mean(&self) -> Result<f64, EngineError> {
        self.ensure_non_empty()?;
        if self.total_area <= 0.0 {
            return Err(EngineError::ZeroInterfaceArea {
                chains: join_labels(&self.visited),
            });
        }
        Ok(self.weighted_values.iter().sum::<f64>() / self.total_area)
    }
}

/// Collects the scores of interface residues, walking chains in layout order.
///
/// A chain without interface residues contributes nothing. When `chain_filter` is
/// given, only the listed chains are visited, and every listed chain must exist in
/// `layout`.
pub fn aggregate(
    layout: &SequenceLayout,
    record: &ConfidenceRecord,
    interface: &InterfaceSet,
    chain_filter: Option<&HashSet<char>>,
) -> Result<InterfaceScores, EngineError> {
    ensure_aligned(layout, record)?;
    if let Some(filter) = chain_filter {
        for &label in filter {
            layout.span(label)?;
        }
    }

    let mut scores = InterfaceScores::default();
    for span in layout.spans() {
        if chain_filter.is_some_and(|filter| !filter.contains(&span.label)) {
            continue;
        }
        scores.visited.push(span.label);

        let Some(residues) = interface.residues_of(span.label) else {
            debug!("Chain '{}' is not in the interface.", span.label);
            continue;
        };

        for &residue in residues {
            let index = layout.resolve_offset(span.label, residue)?;
            let score = record.global_score(index)?;
            let area = interface.area_of(span.label, residue).ok_or(
                EngineError::MissingContactArea {
                    chain: span.label,
                    residue,
                },
            )?;
            debug!(
                "Residue {} in chain {}: score {}, interface area {}",
                residue, span.label, score, area
            );
            scores.unweighted_values.push(score);
            scores.weighted_values.push(score * area);
            scores.total_area += area;
        }
    }

    Ok(scores)
}

/// Aggregates only the contacts between `group_a` and `group_b`, over the chains of
/// both groups.
pub fn aggregate_between(
    layout: &SequenceLayout,
    record: &ConfidenceRecord,
    observations: &[ContactObservation],
    group_a: &HashSet<char>,
    group_b: &HashSet<char>,
) -> Result<InterfaceScores, EngineError> {
    let interface = InterfaceSet::from_contacts_between(observations, group_a, group_b);
    let filter: HashSet<char> = group_a.union(group_b).copied().collect();
    aggregate(layout, record, &interface, Some(&filter))
}
