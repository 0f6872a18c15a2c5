//! Timeline editing: remove decided ranges from audio with crossfaded splices.
//!
//! # Pipeline
//!
//! ```text
//! ┌───────────┐   ┌──────────────┐   ┌──────────────────┐   ┌────────────┐
//! │ load_audio│──►│  validate    │──►│ remove regions   │──►│ stage WAV  │──► rename
//! │ (WAV/ff)  │   │  all ranges  │   │ back to front    │   │ next to out│
//! └───────────┘   └──────────────┘   └──────────────────┘   └────────────┘
//! ```
//!
//! Validation covers the whole list before any sample is touched, so a
//! rejected list never produces output.

mod buffer;
mod editor;
mod splice;
mod wav;

pub use buffer::{get_duration, secs_to_frames, AudioBuffer};
pub use editor::{apply, EditSummary, Editor, EditorConfig, DEFAULT_CROSSFADE_MS};
pub use splice::remove_region;
pub use wav::{read_wav, write_wav, PcmFormat};
