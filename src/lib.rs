//! BLE Transcriber - real-time speech transcription from a wireless microphone
//!
//! The heavy lifting happens in an external whisper.cpp build. This crate is the
//! launcher around it: it finds the engine executable and a model file next to
//! its own binary, assembles the engine command line, and supervises the child
//! process while recognized text streams to the terminal. It features:
//!
//! - Deterministic asset discovery over a fixed list of candidate locations
//! - Pure options-to-arguments translation, unit testable without any I/O
//! - Child process supervision that treats Ctrl+C as a clean stop
//! - Audio input device listing via cpal
//!
//! # Example
//!
//! ```rust,no_run
//! use ble_transcriber::{assets, invocation, supervisor, TranscriptionOptions, WhisperModel};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let base = assets::launcher_dir();
//!     let executable = assets::locate_executable(&base).expect("engine not built");
//!     let model_file = assets::locate_model(&base, WhisperModel::Base).expect("model missing");
//!
//!     let options = TranscriptionOptions {
//!         model: WhisperModel::Base,
//!         threads: 8,
//!         gpu: true,
//!         step_ms: 500,
//!         length_ms: 5000,
//!     };
//!
//!     let invocation = invocation::build(&executable, &model_file, &options);
//!     let outcome = supervisor::run(&invocation).await;
//!     std::process::exit(outcome.exit_code());
//! }
//! ```

pub mod assets;
pub mod devices;
pub mod invocation;
pub mod supervisor;

// Re-export commonly used types for convenience
pub use assets::WhisperModel;
pub use devices::AudioDeviceInfo;
pub use invocation::{Invocation, TranscriptionOptions};
pub use supervisor::ProcessOutcome;

// Error types
use thiserror::Error;

/// Failures the launcher resolves into a diagnostic and a failure exit status.
///
/// Asset absence is recoverable only by running the external setup step, so the
/// messages carry the remediation rather than just the condition.
#[derive(Error, Debug)]
pub enum LauncherError {
    /// No engine binary exists in any candidate location.
    #[error("whisper.cpp executable not found; run setup.ps1 first to build whisper.cpp")]
    ExecutableNotFound,

    /// The selected model has not been downloaded yet.
    #[error("model not found: ggml-{model}.bin; run setup.ps1 -Model {model} to download it")]
    ModelNotFound { model: WhisperModel },
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "ble-transcriber");
    }

    #[test]
    fn test_model_not_found_names_the_model() {
        let message = LauncherError::ModelNotFound {
            model: WhisperModel::Large,
        }
        .to_string();
        assert!(message.contains("ggml-large.bin"));
        assert!(message.contains("-Model large"));
    }

    #[test]
    fn test_executable_not_found_points_at_setup() {
        let message = LauncherError::ExecutableNotFound.to_string();
        assert!(message.contains("setup.ps1"));
    }
}
