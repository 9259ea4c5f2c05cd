use std::path::{Path, PathBuf};

use crate::assets::WhisperModel;

/// Validated per-run configuration. Built once by the front end and consumed
/// once when the engine invocation is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOptions {
    pub model: WhisperModel,
    pub threads: u32,
    /// GPU acceleration; enabled unless the user opts out.
    pub gpu: bool,
    /// Audio chunk size in ms. Accepted for forward compatibility; the current
    /// engine flag set does not take it.
    pub step_ms: u32,
    /// Context length in ms. Reserved, like `step_ms`.
    pub length_ms: u32,
}

/// A fully resolved engine command: program, arguments in canonical order,
/// and the directory the child must run from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// Directory levels between the built binary and the checkout root
/// (`build/bin/Release/main` sits four below `whisper.cpp`).
const ENGINE_ROOT_ASCENT: usize = 4;

/// Translate options into the engine argument vector.
///
/// Pure: identical inputs always yield an identical `Invocation`. The GPU
/// disable flag is appended only when GPU acceleration is off; its absence
/// means enabled.
pub fn build(executable: &Path, model_file: &Path, options: &TranscriptionOptions) -> Invocation {
    let mut args = vec![
        "-m".to_string(),
        model_file.display().to_string(),
        "-t".to_string(),
        options.threads.to_string(),
        "-c".to_string(),
        "0".to_string(), // capture from the default audio device
        "-l".to_string(),
        "en".to_string(),
        "--print-colors".to_string(),
    ];

    if !options.gpu {
        args.push("--no-gpu".to_string());
    }

    Invocation {
        program: executable.to_path_buf(),
        args,
        working_dir: engine_root(executable),
    }
}

/// The engine resolves its own resources relative to the checkout root, so
/// the child runs from there rather than from the binary's directory.
fn engine_root(executable: &Path) -> PathBuf {
    executable
        .ancestors()
        .nth(ENGINE_ROOT_ASCENT)
        .filter(|root| !root.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> TranscriptionOptions {
        TranscriptionOptions {
            model: WhisperModel::Base,
            threads: 8,
            gpu: true,
            step_ms: 500,
            length_ms: 5000,
        }
    }

    fn paths() -> (PathBuf, PathBuf) {
        (
            PathBuf::from("whisper.cpp/build/bin/Release/main"),
            PathBuf::from("whisper.cpp/models/ggml-base.bin"),
        )
    }

    #[test]
    fn test_argument_order_is_canonical() {
        let (exe, model) = paths();
        let invocation = build(&exe, &model, &options());

        assert_eq!(invocation.program, exe);
        assert_eq!(
            invocation.args,
            vec![
                "-m",
                "whisper.cpp/models/ggml-base.bin",
                "-t",
                "8",
                "-c",
                "0",
                "-l",
                "en",
                "--print-colors",
            ]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let (exe, model) = paths();
        assert_eq!(build(&exe, &model, &options()), build(&exe, &model, &options()));
    }

    #[test]
    fn test_no_gpu_flag_appears_only_when_gpu_is_disabled() {
        let (exe, model) = paths();

        let enabled = build(&exe, &model, &options());
        assert!(!enabled.args.iter().any(|a| a == "--no-gpu"));

        let mut opts = options();
        opts.gpu = false;
        opts.threads = 4;
        let disabled = build(&exe, &model, &opts);
        assert_eq!(
            disabled.args.iter().filter(|a| *a == "--no-gpu").count(),
            1
        );
        assert_eq!(disabled.args.last().map(String::as_str), Some("--no-gpu"));
        assert!(disabled.args.iter().any(|a| a == "4"));
    }

    #[test]
    fn test_working_directory_is_the_checkout_root() {
        let (exe, model) = paths();
        let invocation = build(&exe, &model, &options());

        // Not the binary's own directory.
        assert_eq!(invocation.working_dir, PathBuf::from("whisper.cpp"));
    }

    #[test]
    fn test_shallow_executable_paths_fall_back_to_the_current_directory() {
        let invocation = build(Path::new("main"), Path::new("ggml-base.bin"), &options());
        assert_eq!(invocation.working_dir, PathBuf::from("."));
    }

    #[test]
    fn test_chunk_durations_are_reserved_and_not_forwarded() {
        let (exe, model) = paths();
        let mut opts = options();
        opts.step_ms = 250;
        opts.length_ms = 10_000;
        let invocation = build(&exe, &model, &opts);

        // --step/--length stay launcher-side until the engine grows flags for
        // them; this pins the discrepancy so it can't be dropped silently.
        for reserved in ["--step", "--length", "250", "10000"] {
            assert!(!invocation.args.iter().any(|a| a == reserved));
        }
    }
}
