//! Concurrent editing of a directory of recordings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use podcut_media::{telemetry, Analyzer, EditSummary, Editor, Gazetteer};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use super::{editable, load_transcript, Context};
use crate::cli::BatchArgs;
use crate::error::{CliError, CliResult};
use crate::report::Report;

/// One recording with its transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub name: String,
    pub audio: PathBuf,
    pub transcript: PathBuf,
}

/// Find `<name>.wav` files in `dir` that have a `<name>.json` sibling.
///
/// Results are sorted by name. Recordings without a transcript are skipped
/// with a warning.
pub async fn find_pairs(dir: &Path) -> CliResult<Vec<BatchItem>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut items = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let audio = entry.path();
        if !podcut_media::transcode::is_wav(&audio) || !entry.file_type().await?.is_file() {
            continue;
        }
        let Some(name) = audio.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        let transcript = audio.with_extension("json");
        if tokio::fs::try_exists(&transcript).await.unwrap_or(false) {
            items.push(BatchItem {
                name,
                audio,
                transcript,
            });
        } else {
            warn!(audio = %audio.display(), "No transcript next to recording, skipping");
        }
    }

    items.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(items)
}

pub async fn run(ctx: &Context, args: BatchArgs) -> CliResult<()> {
    let items = find_pairs(&args.input_dir).await?;
    if items.is_empty() {
        return Err(CliError::EmptyBatch(args.input_dir));
    }
    tokio::fs::create_dir_all(&args.output_dir).await?;

    let jobs = args.jobs.unwrap_or(ctx.config.max_jobs).max(1);
    let gazetteer = Arc::new(ctx.gazetteer(&args.detect));
    let editor = ctx.editor(args.crossfade_ms);
    let semaphore = Arc::new(Semaphore::new(jobs));

    info!(
        items = items.len(),
        jobs,
        language = %gazetteer.language(),
        "Starting batch"
    );

    let total = items.len();
    let mut tasks = JoinSet::new();
    for item in items {
        let gazetteer = Arc::clone(&gazetteer);
        let editor = editor.clone();
        let semaphore = Arc::clone(&semaphore);
        let output = args.output_dir.join(format!("{}.wav", item.name));
        let report = args
            .reports
            .then(|| args.output_dir.join(format!("{}.report.json", item.name)));

        tasks.spawn(async move {
            // The semaphore is never closed
            let _permit = semaphore.acquire_owned().await.ok();
            let result = process_item(&item, gazetteer, &editor, &output, report.as_deref()).await;
            (item, result)
        });
    }

    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((item, Ok(summary))) => {
                telemetry::record_file_processed(true);
                println!(
                    "{}: {:.2}s -> {:.2}s (saved {:.1}%)",
                    item.name,
                    summary.original_duration,
                    summary.edited_duration,
                    summary.removed_percent()
                );
            }
            Ok((item, Err(e))) => {
                failed += 1;
                telemetry::record_file_processed(false);
                error!(name = %item.name, error = %e, "Batch item failed");
            }
            Err(e) => {
                failed += 1;
                telemetry::record_file_processed(false);
                error!(error = %e, "Batch task panicked");
            }
        }
    }

    info!(total, failed, "Batch complete");
    if failed > 0 {
        return Err(CliError::BatchFailed { failed, total });
    }
    Ok(())
}

async fn process_item(
    item: &BatchItem,
    gazetteer: Arc<Gazetteer>,
    editor: &Editor,
    output: &Path,
    report: Option<&Path>,
) -> CliResult<EditSummary> {
    let transcript = load_transcript(&item.transcript)?;
    let decisions = Analyzer::with_shared(gazetteer).analyze(&transcript.words());

    if let Some(report) = report {
        Report::build(&transcript, &decisions).save(report).await?;
    }

    let decisions = editable(decisions);
    Ok(editor.edit_file(&item.audio, output, &decisions).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_find_pairs() {
        let dir = TempDir::new().unwrap();
        for name in ["b.wav", "b.json", "a.wav", "a.json", "orphan.wav", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let items = find_pairs(dir.path()).await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(items[0].transcript, dir.path().join("a.json"));
    }

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let args = BatchArgs {
            input_dir: dir.path().to_path_buf(),
            output_dir: out.clone(),
            detect: Default::default(),
            crossfade_ms: None,
            jobs: None,
            reports: false,
        };
        let err = run(&Context::new(Default::default()), args).await.unwrap_err();
        assert!(matches!(err, CliError::EmptyBatch(_)));
        assert!(!out.exists());
    }
}
