use crate::core::models::layout::{LayoutError, SequenceLayout};
use crate::core::models::record::{ConfidenceRecord, RecordError};
use thiserror::Error;

/// Broad category of an [`EngineError`].
///
/// `Configuration` and `Lookup` are caller mistakes; `EmptyResult` means a well-formed
/// request legitimately matched nothing and must not be mistaken for a zero score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Lookup,
    Range,
    EmptyInput,
    EmptyResult,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Layout covers {layout} residues but the confidence record holds {record}")]
    LayoutMismatch { layout: usize, record: usize },

    #[error("Cannot compute {0} of an empty sequence")]
    EmptyInput(&'static str),

    #[error("No pairwise values were selected for {block} block of chains {query} vs {target}")]
    EmptySelection {
        block: &'static str,
        query: String,
        target: String,
    },

    #[error("No interface residues found in chains {chains}")]
    NoInterfaceResidues { chains: String },

    #[error("Interface residues in chains {chains} have zero total contact area")]
    ZeroInterfaceArea { chains: String },

    #[error("Interface residue {residue} of chain '{chain}' has no recorded contact area")]
    MissingContactArea { chain: char, residue: usize },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Layout(e) => match e {
                LayoutError::NoChains
                | LayoutError::InvalidLength { .. }
                | LayoutError::AlphabetExhausted { .. } => ErrorKind::Configuration,
                LayoutError::UnknownChain(_) => ErrorKind::Lookup,
                LayoutError::ResidueOutOfRange { .. } | LayoutError::IndexOutOfRange { .. } => {
                    ErrorKind::Range
                }
            },
            EngineError::Record(e) => match e {
                RecordError::ShapeMismatch { .. } => ErrorKind::Configuration,
                RecordError::IndexOutOfRange { .. } => ErrorKind::Range,
                RecordError::Empty => ErrorKind::EmptyInput,
            },
            EngineError::LayoutMismatch { .. } | EngineError::MissingContactArea { .. } => {
                ErrorKind::Configuration
            }
            EngineError::EmptyInput(_) => ErrorKind::EmptyInput,
            EngineError::EmptySelection { .. }
            | EngineError::NoInterfaceResidues { .. }
            | EngineError::ZeroInterfaceArea { .. } => ErrorKind::EmptyResult,
        }
    }
}

pub(crate) fn ensure_aligned(
    layout: &SequenceLayout,
    record: &ConfidenceRecord,
) -> Result<(), EngineError> {
    if layout.total_len() != record.len() {
        return Err(EngineError::LayoutMismatch {
            layout: layout.total_len(),
            record: record.len(),
        });
    }
    Ok(())
}

pub(crate) fn join_labels<'a, I>(labels: I) -> String
where
    I: IntoIterator<Item = &'a char>,
{
    labels
        .into_iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_errors_map_to_their_kinds() {
        let cases = [
            (LayoutError::NoChains, ErrorKind::Configuration),
            (
                LayoutError::AlphabetExhausted { count: 53 },
                ErrorKind::Configuration,
            ),
            (LayoutError::UnknownChain('Q'), ErrorKind::Lookup),
            (
                LayoutError::ResidueOutOfRange {
                    label: 'A',
                    residue: 9,
                    length: 3,
                },
                ErrorKind::Range,
            ),
        ];
        for (error, kind) in cases {
            assert_eq!(EngineError::from(error).kind(), kind);
        }
    }

    #[test]
    fn record_errors_map_to_their_kinds() {
        assert_eq!(
            EngineError::from(RecordError::Empty).kind(),
            ErrorKind::EmptyInput
        );
        assert_eq!(
            EngineError::from(RecordError::IndexOutOfRange { index: 4, len: 2 }).kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn empty_results_are_distinct_from_empty_input() {
        let error = EngineError::NoInterfaceResidues {
            chains: "A".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::EmptyResult);
        assert_eq!(EngineError::EmptyInput("mean").kind(), ErrorKind::EmptyInput);
    }

    #[test]
    fn missing_contact_area_is_a_configuration_error() {
        let error = EngineError::MissingContactArea {
            chain: 'B',
            residue: 4,
        };
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(error.to_string().contains("chain 'B'"));
    }

    #[test]
    fn join_labels_separates_with_commas() {
        assert_eq!(join_labels(&['A', 'B', 'c']), "A,B,c");
        assert_eq!(join_labels(&[] as &[char]), "");
    }
}
