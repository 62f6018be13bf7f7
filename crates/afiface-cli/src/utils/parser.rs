use afiface::core::utils::labels::is_chain_label;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Chain list '{0}' is empty. Expected comma separated labels (e.g., 'A,B').")]
    EmptyChainList(String),

    #[error("Invalid chain label '{label}' in '{list}'. Labels are single letters A-Z or a-z.")]
    InvalidChainLabel { label: String, list: String },

    #[error("Invalid chain group pair '{0}'. Expected 'GROUP:GROUP' (e.g., 'A,B:C').")]
    InvalidGroupPair(String),
}

/// Parses a comma separated list of chain labels such as `"A,B"`.
pub fn parse_chain_list(list: &str) -> Result<Vec<char>, ParseError> {
    if list.trim().is_empty() {
        return Err(ParseError::EmptyChainList(list.to_string()));
    }
    list.split(',')
        .map(str::trim)
        .map(|item| {
            let mut chars = item.chars();
            match (chars.next(), chars.next()) {
                (Some(label), None) if is_chain_label(label) => Ok(label),
                _ => Err(ParseError::InvalidChainLabel {
                    label: item.to_string(),
                    list: list.to_string(),
                }),
            }
        })
        .collect()
}

pub fn parse_chain_set(list: &str) -> Result<HashSet<char>, ParseError> {
    parse_chain_list(list).map(|labels| labels.into_iter().collect())
}

/// Parses two chain groups separated by a colon, e.g. `"A,B:C"`.
pub fn parse_group_pair(pair: &str) -> Result<(HashSet<char>, HashSet<char>), ParseError> {
    let Some((left, right)) = pair.split_once(':') else {
        return Err(ParseError::InvalidGroupPair(pair.to_string()));
    };
    if right.contains(':') {
        return Err(ParseError::InvalidGroupPair(pair.to_string()));
    }
    Ok((parse_chain_set(left)?, parse_chain_set(right)?))
}
