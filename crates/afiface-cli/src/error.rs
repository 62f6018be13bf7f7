use afiface::core::io::contacts::ContactParseError;
use afiface::core::io::fasta::FastaError;
use afiface::core::io::model_data::ModelDataError;
use afiface::engine::error::EngineError;
use afiface::workflows::af3_input::Af3InputError;
use afiface::workflows::summary::CollectError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    ModelData(#[from] ModelDataError),

    #[error("Failed to read sequences: {0}")]
    Fasta(#[from] FastaError),

    #[error("Failed to read contacts: {0}")]
    Contacts(#[from] ContactParseError),

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error("Failed to build job input: {0}")]
    Af3Input(#[from] Af3InputError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
