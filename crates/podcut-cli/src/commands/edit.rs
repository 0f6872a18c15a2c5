use podcut_media::{Analyzer, EditSummary};
use tracing::info;

use super::{editable, load_transcript, print_decisions, Context};
use crate::cli::EditArgs;
use crate::error::CliResult;
use crate::report::Report;

pub async fn run(ctx: &Context, args: EditArgs) -> CliResult<()> {
    let transcript = load_transcript(&args.transcript)?;
    let analyzer = Analyzer::new(ctx.gazetteer(&args.detect));
    let decisions = analyzer.analyze(&transcript.words());

    if let Some(report) = &args.report {
        Report::build(&transcript, &decisions).save(report).await?;
    }

    if args.dry_run {
        println!("Dry run - would remove {} segments", decisions.len());
        print_decisions(&decisions);
        return Ok(());
    }

    let decisions = editable(decisions);
    let summary = ctx
        .editor(args.crossfade_ms)
        .edit_file(&args.audio, &args.output, &decisions)
        .await?;

    info!(
        input = %args.audio.display(),
        output = %args.output.display(),
        decisions = decisions.len(),
        "Edit complete"
    );
    print_summary(&summary);
    println!("Output saved to: {}", args.output.display());
    Ok(())
}

/// Print durations before and after editing.
pub fn print_summary(summary: &EditSummary) {
    println!("Original duration: {:.2}s", summary.original_duration);
    println!("New duration: {:.2}s", summary.edited_duration);
    println!(
        "Saved: {:.2}s ({:.1}%)",
        summary.removed,
        summary.removed_percent()
    );
    println!(
        "Splices: {} crossfaded, {} hard",
        summary.crossfaded_splices, summary.hard_splices
    );
    if summary.decisions_skipped > 0 {
        println!(
            "Skipped {} decisions shorter than one sample",
            summary.decisions_skipped
        );
    }
}
