use crate::cli::DumpArgs;
use crate::error::Result;
use afiface::core::io::model_data::ModelData;
use std::io::Write;
use tracing::info;

pub async fn run(args: DumpArgs) -> Result<()> {
    info!("Loading model data from {:?}", args.model);
    let model = ModelData::load(&args.model)?;
    let mut stdout = std::io::stdout().lock();
    model.write_json(&mut stdout)?;
    writeln!(stdout)?;
    Ok(())
}
