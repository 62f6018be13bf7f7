use crate::cli::CollectArgs;
use crate::error::Result;
use crate::output;
use afiface::workflows;
use tracing::{info, warn};

pub async fn run(args: CollectArgs) -> Result<()> {
    info!(
        "Collecting {} scores for '{}' in {:?}",
        if args.multimer { "multimer" } else { "monomer" },
        args.protein,
        args.directory
    );
    let rows = workflows::summary::collect_scores(&args.directory, &args.protein, args.multimer)?;
    if rows.is_empty() {
        warn!("No scores were collected.");
        return Ok(());
    }
    output::write_collected_scores(std::io::stdout().lock(), &rows)
}
