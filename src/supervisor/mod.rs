use tokio::process::Command;
use tokio::signal;
use tracing::debug;

use crate::invocation::Invocation;

/// Terminal result of supervising one engine run. Exactly one variant holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The engine exited on its own; its status code is passed through as-is.
    Exited(i32),
    /// The user interrupted the session. Stopping an open-ended capture is the
    /// expected way to end it, not an error.
    Interrupted,
    /// The engine process could not be started at all.
    LaunchFailed(String),
}

impl ProcessOutcome {
    /// Exit status the launcher should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProcessOutcome::Exited(code) => *code,
            ProcessOutcome::Interrupted => 0,
            ProcessOutcome::LaunchFailed(_) => 1,
        }
    }
}

/// Spawn the engine and block until it exits or the user interrupts.
///
/// The child inherits stdin/stdout/stderr so recognized text streams straight
/// to the terminal. On Ctrl+C the terminal delivers the interrupt to the child
/// as well; the supervisor waits for it to wind down on its own rather than
/// killing it, then reports a clean stop.
pub async fn run(invocation: &Invocation) -> ProcessOutcome {
    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .current_dir(&invocation.working_dir);

    debug!(
        "spawning {} from {}",
        invocation.program.display(),
        invocation.working_dir.display()
    );

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            return ProcessOutcome::LaunchFailed(format!(
                "failed to launch {}: {}",
                invocation.program.display(),
                e
            ))
        }
    };

    tokio::select! {
        status = child.wait() => match status {
            // A signal-terminated child carries no status code.
            Ok(status) => ProcessOutcome::Exited(status.code().unwrap_or(1)),
            Err(e) => ProcessOutcome::LaunchFailed(format!(
                "failed to wait on {}: {}",
                invocation.program.display(),
                e
            )),
        },
        _ = signal::ctrl_c() => {
            let _ = child.wait().await;
            ProcessOutcome::Interrupted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn invocation_for(program: &str, args: &[&str]) -> Invocation {
        Invocation {
            program: PathBuf::from(program),
            args: args.iter().map(|s| s.to_string()).collect(),
            working_dir: std::env::temp_dir(),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_a_launch_failure() {
        let invocation = invocation_for("/nonexistent/whisper-binary", &[]);
        match run(&invocation).await {
            ProcessOutcome::LaunchFailed(message) => {
                assert!(message.contains("whisper-binary"));
            }
            other => panic!("expected launch failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_child_exit_code_is_passed_through() {
        let invocation = invocation_for("sh", &["-c", "exit 7"]);
        assert_eq!(run(&invocation).await, ProcessOutcome::Exited(7));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_clean_child_exit_reports_zero() {
        let invocation = invocation_for("sh", &["-c", "exit 0"]);
        assert_eq!(run(&invocation).await, ProcessOutcome::Exited(0));
    }

    #[test]
    fn test_exit_codes_map_by_outcome() {
        assert_eq!(ProcessOutcome::Exited(3).exit_code(), 3);
        assert_eq!(ProcessOutcome::Interrupted.exit_code(), 0);
        assert_eq!(ProcessOutcome::LaunchFailed("gone".into()).exit_code(), 1);
    }
}
