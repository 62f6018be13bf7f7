use crate::core::io::fasta::SequenceRecord;
use crate::core::utils::labels::{MAX_CHAINS, chain_label};
use std::collections::HashMap;
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Layout requires at least one chain")]
    NoChains,

    #[error("Chain #{index} has invalid sequence length {length} (must be at least 1)")]
    InvalidLength { index: usize, length: usize },

    #[error("Cannot label {count} chains: at most {max} chains are supported", max = MAX_CHAINS)]
    AlphabetExhausted { count: usize },

    #[error("Unknown chain label '{0}'")]
    UnknownChain(char),

    #[error("Residue {residue} is outside chain '{label}' (valid range 1..={length})")]
    ResidueOutOfRange {
        label: char,
        residue: usize,
        length: usize,
    },

    #[error("Global residue index {index} is outside the layout (total {total} residues)")]
    IndexOutOfRange { index: usize, total: usize },
}

/// The half-open global offset range owned by one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpan {
    pub label: char,
    pub description: String,
    pub start: usize,
    pub stop: usize,
}

impl ChainSpan {
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }
}

/// Maps chain-local residue numbers onto the concatenated residue ordering shared by
/// the per-residue scores and the pairwise error matrix.
///
/// Chains are labelled in declaration order from a fixed alphabet, and their ranges
/// are contiguous and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceLayout {
    spans: Vec<ChainSpan>,
    label_map: HashMap<char, usize>,
    total: usize,
}

impl SequenceLayout {
    /// Builds a layout from `(description, sequence length)` pairs in declaration order.
    ///
    /// # Errors
    ///
    /// Fails if no chains are given, if any length is zero, or if there are more
    /// chains than available labels.
    pub fn build<I, S>(chains: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let chains: Vec<(String, usize)> = chains
            .into_iter()
            .map(|(description, length)| (description.into(), length))
            .collect();

        if chains.is_empty() {
            return Err(LayoutError::NoChains);
        }
        if chains.len() > MAX_CHAINS {
            return Err(LayoutError::AlphabetExhausted {
                count: chains.len(),
            });
        }

        let mut spans = Vec::with_capacity(chains.len());
        let mut label_map = HashMap::with_capacity(chains.len());
        let mut offset = 0;
        for (index, (description, length)) in chains.into_iter().enumerate() {
            if length == 0 {
                return Err(LayoutError::InvalidLength { index, length });
            }
            let label = chain_label(index).ok_or(LayoutError::AlphabetExhausted {
                count: index + 1,
            })?;
            spans.push(ChainSpan {
                label,
                description,
                start: offset,
                stop: offset + length,
            });
            label_map.insert(label, index);
            offset += length;
        }

        Ok(Self {
            spans,
            label_map,
            total: offset,
        })
    }

    pub fn from_lengths(lengths: &[usize]) -> Result<Self, LayoutError> {
        Self::build(lengths.iter().map(|&length| (String::new(), length)))
    }

    pub fn from_sequences(records: &[SequenceRecord]) -> Result<Self, LayoutError> {
        Self::build(
            records
                .iter()
                .map(|record| (record.description.clone(), record.len())),
        )
    }

    /// Total residue count `N` across all chains.
    pub fn total_len(&self) -> usize {
        self.total
    }

    pub fn num_chains(&self) -> usize {
        self.spans.len()
    }

    pub fn spans(&self) -> &[ChainSpan] {
        &self.spans
    }

    pub fn labels(&self) -> impl Iterator<Item = char> + '_ {
        self.spans.iter().map(|span| span.label)
    }

    pub fn contains(&self, label: char) -> bool {
        self.label_map.contains_key(&label)
    }

    pub fn span(&self, label: char) -> Result<&ChainSpan, LayoutError> {
        self.label_map
            .get(&label)
            .map(|&index| &self.spans[index])
            .ok_or(LayoutError::UnknownChain(label))
    }

    pub fn range_of(&self, label: char) -> Result<(usize, usize), LayoutError> {
        self.span(label).map(|span| (span.start, span.stop))
    }

    /// Converts a 1-based chain-local residue number into a global index.
    pub fn resolve_offset(&self, label: char, residue: usize) -> Result<usize, LayoutError> {
        let span = self.span(label)?;
        if residue == 0 || residue > span.len() {
            return Err(LayoutError::ResidueOutOfRange {
                label,
                residue,
                length: span.len(),
            });
        }
        Ok(span.start + residue - 1)
    }

    /// Converts a global index back into `(label, local residue number)`.
    pub fn locate(&self, index: usize) -> Result<(char, usize), LayoutError> {
        if index >= self.total {
            return Err(LayoutError::IndexOutOfRange {
                index,
                total: self.total,
            });
        }
        // Spans are sorted by start, so the owner is the last span starting at or before index.
        let position = self.spans.partition_point(|span| span.start <= index) - 1;
        let span = &self.spans[position];
        Ok((span.label, index - span.start + 1))
    }
}
