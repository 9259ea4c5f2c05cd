use clap::ValueEnum;
use std::env::consts::EXE_SUFFIX;
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory of the whisper.cpp checkout, relative to the launcher binary.
pub const ENGINE_DIR: &str = "whisper.cpp";

/// Candidate executable directories inside the checkout, highest priority
/// first. CMake places the binary differently depending on the generator and
/// configuration, so every layout the build is known to produce is listed.
const EXECUTABLE_DIRS: &[&[&str]] = &[
    &["build", "bin", "Release"],
    &["build", "bin"],
    &["build", "Release", "bin"],
    &[],
];

/// Acceptable executable names in preference order. `main` is the binary
/// whisper.cpp historically shipped; `whisper-cli` is its current name.
const EXECUTABLE_NAMES: &[&str] = &["main", "whisper-cli"];

/// Whisper model size tags, ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WhisperModel {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl WhisperModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }

    /// File name of the model artifact under the checkout's `models` directory.
    pub fn file_name(&self) -> String {
        format!("ggml-{}.bin", self.as_str())
    }
}

impl fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory containing the launcher binary itself. Asset search roots hang
/// off this directory, so the launcher works from wherever it was installed.
pub fn launcher_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Find the engine executable under `base`.
///
/// Candidate directories are tried in their fixed order, and within each
/// directory the acceptable names are tried in theirs; the first path that is
/// a regular file wins. `None` means the engine has not been built, which the
/// caller reports rather than treats as a fault. The filesystem is re-checked
/// on every call.
pub fn locate_executable(base: &Path) -> Option<PathBuf> {
    for dir in EXECUTABLE_DIRS {
        let mut candidate = base.join(ENGINE_DIR);
        for segment in *dir {
            candidate.push(segment);
        }
        for name in EXECUTABLE_NAMES {
            let path = candidate.join(format!("{}{}", name, EXE_SUFFIX));
            if path.is_file() {
                return Some(path);
            }
        }
    }
    None
}

/// Find the model artifact for `model` under `base`.
///
/// There is exactly one expected location per model; existence is binary and
/// no fallback search happens.
pub fn locate_model(base: &Path, model: WhisperModel) -> Option<PathBuf> {
    let path = base.join(ENGINE_DIR).join("models").join(model.file_name());
    path.is_file().then_some(path)
}
