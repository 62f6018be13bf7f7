use super::load_model_and_layout;
use crate::cli::PaeArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use crate::output;
use afiface::workflows;
use tracing::info;

pub async fn run(args: PaeArgs, config: &PartialAppConfig) -> Result<()> {
    info!("Merging PAE configuration from file and CLI arguments...");
    let pae_config = config.merge_pae(&args)?;
    let settings = config.output_settings(&args.output);

    let (model, layout) = load_model_and_layout(&args.model, &args.fasta)?;
    let report = workflows::pair_pae::run(&model, &layout, &pae_config)?;

    output::write_pae_report(std::io::stdout().lock(), &report, settings)
}
