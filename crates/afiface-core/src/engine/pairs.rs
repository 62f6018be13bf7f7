use super::error::{EngineError, ensure_aligned, join_labels};
use super::stats::BlockSummary;
use crate::core::models::layout::SequenceLayout;
use crate::core::models::record::ConfidenceRecord;
use nalgebra::DMatrix;
use serde::Serialize;
use std::ops::Range;
use tracing::debug;

/// A chain-group versus chain-group request for pairwise error blocks.
///
/// Every query chain is paired with every target chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairQuery {
    pub query: Vec<char>,
    pub target: Vec<char>,
}

impl PairQuery {
    pub fn new(
        query: impl IntoIterator<Item = char>,
        target: impl IntoIterator<Item = char>,
    ) -> Self {
        Self {
            query: query.into_iter().collect(),
            target: target.into_iter().collect(),
        }
    }

    pub fn chain_pairs(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.query
            .iter()
            .flat_map(move |&q| self.target.iter().map(move |&t| (q, t)))
    }
}

/// Flattened pairwise values gathered for a set of [`PairQuery`]s.
///
/// `forward` holds query-row/target-column blocks and `backward` the mirrored
/// target-row/query-column blocks, each flattened row-major and concatenated in
/// query order. `chain` holds the square block of the query chain for every pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairSelection {
    pub chain: Vec<f64>,
    pub forward: Vec<f64>,
    pub backward: Vec<f64>,
    query_labels: Vec<char>,
    target_labels: Vec<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairSummary {
    pub chain: BlockSummary,
    pub interchain: BlockSummary,
}

impl PairSelection {
    /// Both directions of the inter-chain blocks, forward first.
    pub fn interchain_values(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.forward.len() + self.backward.len());
        values.extend_from_slice(&self.forward);
        values.extend_from_slice(&self.backward);
        values
    }

    pub fn summarize(&self) -> Result<PairSummary, EngineError> {
        for (block, values) in [
            ("chain", &self.chain),
            ("forward", &self.forward),
            ("backward", &self.backward),
        ] {
            if values.is_empty() {
                return Err(EngineError::EmptySelection {
                    block,
                    query: join_labels(&self.query_labels),
                    target: join_labels(&self.target_labels),
                });
            }
        }
        Ok(PairSummary {
            chain: BlockSummary::of(&self.chain)?,
            interchain: BlockSummary::of(&self.interchain_values())?,
        })
    }
}

fn gather_block(matrix: &DMatrix<f64>, rows: Range<usize>, cols: Range<usize>, out: &mut Vec<f64>) {
    let block = matrix.view((rows.start, cols.start), (rows.len(), cols.len()));
    for row in block.row_iter() {
        out.extend(row.iter().copied());
    }
}

/// Extracts the pairwise-matrix blocks between query and target chains, in both
/// directions.
///
/// # Errors
///
/// Any chain label missing from `layout` is a lookup error; queries are explicit,
/// so an unknown label is never skipped.
pub fn select(
    layout: &SequenceLayout,
    record: &ConfidenceRecord,
    queries: &[PairQuery],
) -> Result<PairSelection, EngineError> {
    ensure_aligned(layout, record)?;
    let matrix = record.pairwise();
    let mut selection = PairSelection::default();

    for query in queries {
        for &label in query.query.iter().chain(&query.target) {
            layout.span(label)?;
        }
        selection.query_labels.extend(&query.query);
        selection.target_labels.extend(&query.target);
        for (q, t) in query.chain_pairs() {
            let q_range = layout.span(q)?.range();
            let t_range = layout.span(t)?.range();
            debug!(
                "Selecting chain {} ({:?}) vs chain {} ({:?})",
                q, q_range, t, t_range
            );

            gather_block(matrix, q_range.clone(), q_range.clone(), &mut selection.chain);
            gather_block(matrix, q_range.clone(), t_range.clone(), &mut selection.forward);
            gather_block(matrix, t_range, q_range, &mut selection.backward);
        }
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::layout::LayoutError;
    use crate::engine::error::ErrorKind;
    use crate::engine::stats;

    fn index_sum_record(lengths: &[usize]) -> (SequenceLayout, ConfidenceRecord) {
        let layout = SequenceLayout::from_lengths(lengths).unwrap();
        let n = layout.total_len();
        let record = ConfidenceRecord::new(
            vec![50.0; n],
            DMatrix::from_fn(n, n, |i, j| (i + j) as f64),
        )
        .unwrap();
        (layout, record)
    }

    #[test]
    fn select_two_chains_gathers_both_directions() {
        let (layout, record) = index_sum_record(&[3, 2]);
        let selection = select(&layout, &record, &[PairQuery::new(['A'], ['B'])]).unwrap();

        assert_eq!(selection.forward, vec![3.0, 4.0, 4.0, 5.0, 5.0, 6.0]);
        assert_eq!(selection.backward, vec![3.0, 4.0, 5.0, 4.0, 5.0, 6.0]);

        let all = selection.interchain_values();
        assert_eq!(all.len(), 12);
        let summary = selection.summarize().unwrap();
        assert_eq!(summary.interchain.median, stats::median(&all).unwrap());
        assert_eq!(summary.interchain.median, 4.5);
        assert_eq!(summary.interchain.mean, 4.5);
    }

    #[test]
    fn select_reads_an_asymmetric_matrix_in_both_directions() {
        let layout = SequenceLayout::from_lengths(&[1, 1]).unwrap();
        let record = ConfidenceRecord::from_rows(
            vec![90.0, 90.0],
            vec![vec![0.0, 2.0], vec![8.0, 0.0]],
        )
        .unwrap();
        let selection = select(&layout, &record, &[PairQuery::new(['A'], ['B'])]).unwrap();
        assert_eq!(selection.forward, vec![2.0]);
        assert_eq!(selection.backward, vec![8.0]);
        assert_eq!(selection.summarize().unwrap().interchain.mean, 5.0);
    }

    #[test]
    fn select_gathers_square_block_of_query_chain() {
        let (layout, record) = index_sum_record(&[2, 1]);
        let selection = select(&layout, &record, &[PairQuery::new(['A'], ['B'])]).unwrap();
        assert_eq!(selection.chain, vec![0.0, 1.0, 1.0, 2.0]);
        assert_eq!(selection.summarize().unwrap().chain.mean, 1.0);
    }

    #[test]
    fn select_chain_against_itself_gives_equal_sized_blocks() {
        let (layout, record) = index_sum_record(&[4, 3]);
        let selection = select(&layout, &record, &[PairQuery::new(['B'], ['B'])]).unwrap();
        assert_eq!(selection.forward.len(), 9);
        assert_eq!(selection.forward.len(), selection.backward.len());
        let mut forward = selection.forward.clone();
        let mut backward = selection.backward.clone();
        forward.sort_by(f64::total_cmp);
        backward.sort_by(f64::total_cmp);
        assert_eq!(forward, backward);
    }

    #[test]
    fn select_concatenates_multiple_queries_and_groups() {
        let (layout, record) = index_sum_record(&[2, 1, 1]);
        let queries = [
            PairQuery::new(['A'], ['B', 'C']),
            PairQuery::new(['B'], ['C']),
        ];
        let selection = select(&layout, &record, &queries).unwrap();
        // A-B: 2x1, A-C: 2x1, B-C: 1x1
        assert_eq!(selection.forward, vec![2.0, 3.0, 3.0, 4.0, 5.0]);
        assert_eq!(selection.backward, vec![2.0, 3.0, 3.0, 4.0, 5.0]);
        assert_eq!(selection.chain.len(), 4 + 4 + 1);
    }

    #[test]
    fn select_fails_for_unknown_chain() {
        let (layout, record) = index_sum_record(&[3, 2]);
        let error = select(&layout, &record, &[PairQuery::new(['A'], ['Z'])]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn select_fails_for_unknown_chain_even_without_partner_chains() {
        let (layout, record) = index_sum_record(&[3, 2]);
        let error = select(&layout, &record, &[PairQuery::new(['Z'], Vec::new())]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Lookup);
        let error = select(&layout, &record, &[PairQuery::new(Vec::new(), ['Z'])]).unwrap_err();
        assert!(matches!(
            error,
            EngineError::Layout(LayoutError::UnknownChain('Z'))
        ));
    }

    #[test]
    fn select_fails_when_record_does_not_match_layout() {
        let (_, record) = index_sum_record(&[3, 2]);
        let layout = SequenceLayout::from_lengths(&[3, 3]).unwrap();
        let error = select(&layout, &record, &[PairQuery::new(['A'], ['B'])]).unwrap_err();
        assert!(matches!(
            error,
            EngineError::LayoutMismatch {
                layout: 6,
                record: 5
            }
        ));
    }

    #[test]
    fn summarize_of_empty_selection_is_an_empty_result() {
        let (layout, record) = index_sum_record(&[3, 2]);
        let selection = select(&layout, &record, &[PairQuery::new(['A'], Vec::new())]).unwrap();
        let error = selection.summarize().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::EmptyResult);
    }
}
