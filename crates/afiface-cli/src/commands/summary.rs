use crate::cli::SummaryArgs;
use crate::error::{CliError, Result};
use crate::output;
use crate::utils::progress::CliProgressHandler;
use afiface::engine::progress::ProgressReporter;
use afiface::workflows;
use tracing::{error, info};

pub async fn run(args: SummaryArgs) -> Result<()> {
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Summarizing {} model files...", args.models.len());
    let results = tokio::task::block_in_place(|| {
        workflows::summary::summarize_models(&args.models, &reporter)
    });

    let mut summaries = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (path, result) in args.models.iter().zip(results) {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                error!("Skipping {:?}: {}", path, e);
                failures += 1;
            }
        }
    }

    output::write_summaries(std::io::stdout().lock(), &summaries, args.json)?;

    if failures > 0 {
        return Err(CliError::Data(format!(
            "{} of {} model files could not be summarized",
            failures,
            args.models.len()
        )));
    }
    Ok(())
}
