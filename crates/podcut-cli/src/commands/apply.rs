use podcut_models::CutList;
use tracing::info;

use super::edit::print_summary;
use super::{editable, Context};
use crate::cli::ApplyArgs;
use crate::error::CliResult;

pub async fn run(ctx: &Context, args: ApplyArgs) -> CliResult<()> {
    let cuts = CutList::from_path(&args.cuts)?;
    info!(cuts = cuts.cuts.len(), path = %args.cuts.display(), "Cut list loaded");

    let decisions = editable(cuts.into_decisions());
    let summary = ctx
        .editor(args.crossfade_ms)
        .edit_file(&args.audio, &args.output, &decisions)
        .await?;

    print_summary(&summary);
    println!("Output saved to: {}", args.output.display());
    Ok(())
}
