use podcut_media::Analyzer;
use podcut_models::{total_removed, CutList};
use tracing::info;

use super::{load_transcript, print_decisions, Context};
use crate::cli::AnalyzeArgs;
use crate::error::{CliError, CliResult};
use crate::report::Report;

pub async fn run(ctx: &Context, args: AnalyzeArgs) -> CliResult<()> {
    let transcript = load_transcript(&args.transcript)?;
    let analyzer = Analyzer::new(ctx.gazetteer(&args.detect));
    let decisions = analyzer.analyze(&transcript.words());

    info!(
        transcript = %args.transcript.display(),
        words = transcript.word_count(),
        decisions = decisions.len(),
        "Transcript analyzed"
    );

    if let Some(output) = &args.output {
        Report::build(&transcript, &decisions).save(output).await?;
        println!("Results saved to: {}", output.display());
    }

    if let Some(path) = &args.cuts {
        let json = serde_json::to_string_pretty(&CutList::from(decisions.as_slice()))?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| CliError::report(path, e))?;
        println!("Cut list saved to: {}", path.display());
    }

    print_decisions(&decisions);
    println!(
        "\nFound {} items to remove ({:.2}s)",
        decisions.len(),
        total_removed(&decisions)
    );
    Ok(())
}
