//! Command implementations.

mod analyze;
mod apply;
mod batch;
mod edit;
mod schema;

use podcut_media::{Editor, EditorConfig, Gazetteer, PhrasePriority};
use std::path::Path;

use podcut_models::{format_seconds, EditDecision, Transcript};
use tracing::warn;

use crate::cli::{Cli, Command, DetectArgs};
use crate::config::CliConfig;
use crate::error::CliResult;

pub use batch::{find_pairs, BatchItem};

/// Run the parsed command.
pub async fn run(cli: Cli, config: CliConfig) -> CliResult<()> {
    let ctx = Context::new(config);
    match cli.command {
        Command::Analyze(args) => analyze::run(&ctx, args).await,
        Command::Edit(args) => edit::run(&ctx, args).await,
        Command::Apply(args) => apply::run(&ctx, args).await,
        Command::Batch(args) => batch::run(&ctx, args).await,
        Command::Schema(args) => schema::run(args),
    }
}

/// Environment configuration with flag overrides applied on demand.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: CliConfig,
}

impl Context {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Build the gazetteer for a command's detector flags.
    pub fn gazetteer(&self, args: &DetectArgs) -> Gazetteer {
        let language = args.language.as_deref().unwrap_or(&self.config.language);
        let priority: PhrasePriority = args.phrase_priority.unwrap_or(self.config.phrase_priority);
        Gazetteer::builder(language)
            .with_fillers(self.config.extra_fillers.iter())
            .with_fillers(args.fillers.iter())
            .with_priority(priority)
            .build()
    }

    /// Build an editor, preferring `crossfade_ms` over the configured value.
    pub fn editor(&self, crossfade_ms: Option<u64>) -> Editor {
        let mut config =
            EditorConfig::from_ms(crossfade_ms.unwrap_or(self.config.crossfade_ms));
        if let Some(dir) = &self.config.work_dir {
            config = config.with_work_dir(dir);
        }
        Editor::new(config)
    }
}

/// Load a transcript, warning when its word times run backwards.
///
/// Detection still runs on an unordered timeline, but its decisions may
/// overlap and be rejected by the editor.
pub fn load_transcript(path: &Path) -> CliResult<Transcript> {
    let transcript = Transcript::from_path(path)?;
    if !transcript.is_monotonic() {
        warn!(
            transcript = %path.display(),
            "Word timestamps are not in order; decisions may overlap"
        );
    }
    Ok(transcript)
}

/// Drop decisions that cover no time.
///
/// Zero-length words make zero-length decisions; removing them is a no-op,
/// but the editor rejects them. Inverted ranges are kept so the editor
/// reports them.
pub fn editable(decisions: Vec<EditDecision>) -> Vec<EditDecision> {
    let before = decisions.len();
    let kept: Vec<EditDecision> = decisions.into_iter().filter(|d| d.start != d.end).collect();
    if kept.len() < before {
        warn!(
            dropped = before - kept.len(),
            "Skipping zero-length decisions"
        );
    }
    kept
}

/// Print decisions as an aligned table.
pub fn print_decisions(decisions: &[EditDecision]) {
    println!("{:<27} {:<11} TEXT", "TIME", "REASON");
    for d in decisions {
        println!(
            "{:<27} {:<11} {}",
            format!("{} - {}", format_seconds(d.start), format_seconds(d.end)),
            d.reason.as_str(),
            d.original_text
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcut_models::EditReason;
    use tempfile::TempDir;

    #[test]
    fn test_load_transcript_accepts_unordered_words() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(
            &path,
            r#"[{"start": 0.0, "end": 1.0, "words": [
                {"text": "b", "start": 0.5, "end": 0.9},
                {"text": "a", "start": 0.0, "end": 0.4}]}]"#,
        )
        .unwrap();

        let transcript = load_transcript(&path).unwrap();
        assert!(!transcript.is_monotonic());
        assert_eq!(transcript.word_count(), 2);
    }

    #[test]
    fn test_editable_drops_zero_length() {
        let decisions = vec![
            EditDecision::new(0.0, 0.2, EditReason::Filler, "э"),
            EditDecision::new(0.5, 0.5, EditReason::Filler, "м"),
            EditDecision::new(1.0, 1.4, EditReason::Repetition, "меня"),
        ];
        let kept = editable(decisions);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|d| d.start < d.end));

        let inverted = vec![EditDecision::new(2.0, 1.0, EditReason::Filler, "")];
        assert_eq!(editable(inverted).len(), 1);
    }

    #[test]
    fn test_flags_override_config() {
        let config = CliConfig {
            language: "ru".to_string(),
            extra_fillers: vec!["короче говоря".to_string(), "слышь".to_string()],
            ..Default::default()
        };
        let ctx = Context::new(config);

        let args = DetectArgs {
            language: Some("en".to_string()),
            fillers: vec!["Literally".to_string()],
            phrase_priority: Some(PhrasePriority::DeclarationOrder),
        };
        let g = ctx.gazetteer(&args);
        assert_eq!(g.language(), "en");
        assert!(g.is_filler("um"));
        assert!(g.is_filler("literally"));
        assert!(g.is_filler("слышь"));
        assert_eq!(g.priority(), PhrasePriority::DeclarationOrder);

        let g = ctx.gazetteer(&DetectArgs::default());
        assert_eq!(g.language(), "ru");
        assert_eq!(g.priority(), PhrasePriority::LongestFirst);
    }

    #[test]
    fn test_editor_crossfade_override() {
        let ctx = Context::new(CliConfig {
            crossfade_ms: 35,
            ..Default::default()
        });
        assert!((ctx.editor(None).config().crossfade_secs - 0.035).abs() < 1e-12);
        assert!((ctx.editor(Some(5)).config().crossfade_secs - 0.005).abs() < 1e-12);
    }
}
