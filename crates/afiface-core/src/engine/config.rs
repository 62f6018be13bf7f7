use super::pairs::PairQuery;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Chain pair query #{index} has an empty {side} chain list")]
    EmptyChainList { index: usize, side: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaeConfig {
    pub queries: Vec<PairQuery>,
    /// Also report pTM, ipTM and the median per-residue score.
    pub gather_all: bool,
}

#[derive(Default)]
pub struct PaeConfigBuilder {
    queries: Vec<PairQuery>,
    gather_all: Option<bool>,
}

impl PaeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: PairQuery) -> Self {
        self.queries.push(query);
        self
    }
    pub fn queries(mut self, queries: impl IntoIterator<Item = PairQuery>) -> Self {
        self.queries.extend(queries);
        self
    }
    pub fn gather_all(mut self, gather_all: bool) -> Self {
        self.gather_all = Some(gather_all);
        self
    }

    pub fn build(self) -> Result<PaeConfig, ConfigError> {
        if self.queries.is_empty() {
            return Err(ConfigError::MissingParameter("queries"));
        }
        for (index, query) in self.queries.iter().enumerate() {
            if query.query.is_empty() {
                return Err(ConfigError::EmptyChainList {
                    index,
                    side: "query",
                });
            }
            if query.target.is_empty() {
                return Err(ConfigError::EmptyChainList {
                    index,
                    side: "target",
                });
            }
        }
        Ok(PaeConfig {
            queries: self.queries,
            gather_all: self
                .gather_all
                .ok_or(ConfigError::MissingParameter("gather_all"))?,
        })
    }
}

/// Where interface residues come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceSource {
    Contacts,
    /// Every residue counts as interface with unit area.
    AllResidues,
}

/// Which side(s) of the interface are aggregated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceScope {
    All,
    Chains(HashSet<char>),
    Between {
        group_a: HashSet<char>,
        group_b: HashSet<char>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceConfig {
    pub source: InterfaceSource,
    pub scope: InterfaceScope,
}
