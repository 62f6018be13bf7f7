pub mod defaults;

use crate::cli::{OutputArgs, PaeArgs};
use crate::error::{CliError, Result};
use crate::utils::contacts::ContactRunner;
use crate::utils::parser;
use afiface::engine::config::{PaeConfig, PaeConfigBuilder};
use afiface::engine::pairs::PairQuery;
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(CliError::Config(format!(
                "Invalid output format '{}'. Expected 'json' or 'csv'.",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub header: bool,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialOutputConfig {
    format: Option<OutputFormat>,
    header: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialContactsConfig {
    program: Option<String>,
    args: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct PartialPairQuery {
    query: Vec<char>,
    target: Vec<char>,
}

impl From<PartialPairQuery> for PairQuery {
    fn from(p: PartialPairQuery) -> Self {
        PairQuery::new(p.query, p.target)
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialPaeConfig {
    gather_all: Option<bool>,
    pairs: Option<Vec<PartialPairQuery>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    output: Option<PartialOutputConfig>,
    contacts: Option<PartialContactsConfig>,
    pae: Option<PartialPaeConfig>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the config file when one is given and applies `-S` overrides on top.
    pub fn load(path: Option<&Path>, set_values: &[String]) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_set_values(set_values)?;
        Ok(config)
    }

    pub fn output_settings(&self, args: &OutputArgs) -> OutputSettings {
        let defaults = DefaultsConfig::default();
        let file = self.output.as_ref();
        let format = if args.output_csv {
            OutputFormat::Csv
        } else {
            file.and_then(|o| o.format).unwrap_or(defaults.output_format)
        };
        let header = if args.no_header {
            false
        } else {
            file.and_then(|o| o.header).unwrap_or(defaults.header)
        };
        OutputSettings { format, header }
    }

    pub fn contact_runner(&self) -> ContactRunner {
        let defaults = DefaultsConfig::default();
        let file = self.contacts.as_ref();
        ContactRunner::new(
            file.and_then(|c| c.program.clone())
                .unwrap_or(defaults.contacts_program),
            file.and_then(|c| c.args.clone())
                .unwrap_or(defaults.contacts_args),
        )
    }

    pub fn merge_pae(&self, args: &PaeArgs) -> Result<PaeConfig> {
        let defaults = DefaultsConfig::default();
        let file = self.pae.as_ref();

        let queries: Vec<PairQuery> = match (&args.chains1, &args.chains2) {
            (Some(chains1), Some(chains2)) => {
                let query = parser::parse_chain_list(chains1)
                    .map_err(|e| CliError::Argument(e.to_string()))?;
                let target = parser::parse_chain_list(chains2)
                    .map_err(|e| CliError::Argument(e.to_string()))?;
                vec![PairQuery::new(query, target)]
            }
            _ => file
                .and_then(|p| p.pairs.clone())
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        };

        let gather_all = if args.pae_only {
            false
        } else {
            file.and_then(|p| p.gather_all).unwrap_or(defaults.gather_all)
        };

        PaeConfigBuilder::new()
            .queries(queries)
            .gather_all(gather_all)
            .build()
            .map_err(|e| {
                CliError::Config(format!(
                    "{}. Chain groups are given with --chains1/--chains2 or [[pae.pairs]].",
                    e
                ))
            })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let parse_bool = || -> Result<bool> {
                value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })
            };

            match key {
                "output.format" => {
                    self.output.get_or_insert_with(Default::default).format =
                        Some(value_str.parse()?);
                }
                "output.header" => {
                    self.output.get_or_insert_with(Default::default).header = Some(parse_bool()?);
                }
                "contacts.program" => {
                    self.contacts.get_or_insert_with(Default::default).program =
                        Some(value_str.to_string());
                }
                "pae.gather-all" => {
                    self.pae.get_or_insert_with(Default::default).gather_all = Some(parse_bool()?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
