pub mod af3_input;
pub mod collect;
pub mod dump;
pub mod interface;
pub mod pae;
pub mod summary;

use crate::error::Result;
use afiface::core::io::fasta;
use afiface::core::io::model_data::ModelData;
use afiface::core::models::layout::SequenceLayout;
use afiface::engine::error::EngineError;
use std::path::Path;
use tracing::info;

/// Loads a model output file and the chain layout of the sequences it was predicted from.
pub(crate) fn load_model_and_layout(
    model_path: &Path,
    fasta_path: &Path,
) -> Result<(ModelData, SequenceLayout)> {
    info!("Loading model data from {:?}", model_path);
    let model = ModelData::load(model_path)?;

    info!("Reading sequences from {:?}", fasta_path);
    let sequences = fasta::read_fasta(fasta_path)?;
    let layout = SequenceLayout::from_sequences(&sequences).map_err(EngineError::from)?;
    info!(
        "Layout has {} chains covering {} residues.",
        layout.num_chains(),
        layout.total_len()
    );
    Ok((model, layout))
}
