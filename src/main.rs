use anyhow::Result;
use ble_transcriber::{assets, devices, invocation, supervisor};
use ble_transcriber::{LauncherError, ProcessOutcome, TranscriptionOptions, WhisperModel};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

#[derive(Parser)]
#[command(name = "ble-transcriber")]
#[command(about = "Real-time transcription from a BLE Audio wireless microphone")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Whisper model to use
    #[arg(long, value_enum, default_value = "base")]
    pub model: WhisperModel,

    /// Audio chunk size in ms (reserved; not forwarded to the engine yet)
    #[arg(long, default_value = "500", value_parser = clap::value_parser!(u32).range(1..))]
    pub step: u32,

    /// Context length in ms (reserved; not forwarded to the engine yet)
    #[arg(long, default_value = "5000", value_parser = clap::value_parser!(u32).range(1..))]
    pub length: u32,

    /// Number of CPU threads
    #[arg(long, default_value = "8", value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: u32,

    /// Disable GPU acceleration
    #[arg(long)]
    pub no_gpu: bool,

    /// List available audio input devices and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level: tracing::Level = args.log_level.into();
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    // Device listing is terminal, whatever else was asked for.
    if args.list_devices {
        devices::report();
        return Ok(ExitCode::SUCCESS);
    }

    let base = assets::launcher_dir();
    let (executable, model_file) = resolve_assets(&base, args.model)?;

    let options = TranscriptionOptions {
        model: args.model,
        threads: args.threads,
        gpu: !args.no_gpu,
        step_ms: args.step,
        length_ms: args.length,
    };

    if options.gpu {
        info!("GPU acceleration enabled (default)");
    } else {
        info!("GPU acceleration disabled");
    }
    debug!(
        "step={}ms length={}ms (reserved; not forwarded to the engine)",
        options.step_ms, options.length_ms
    );

    let invocation = invocation::build(&executable, &model_file, &options);
    debug!("engine working directory: {}", invocation.working_dir.display());

    print_banner(args.model);

    let outcome = supervisor::run(&invocation).await;
    match &outcome {
        ProcessOutcome::Exited(code) if *code != 0 => {
            warn!("whisper.cpp exited with status {}", code);
        }
        ProcessOutcome::Exited(_) => {}
        ProcessOutcome::Interrupted => {
            println!();
            println!("Stopped transcription.");
        }
        ProcessOutcome::LaunchFailed(message) => {
            error!("{}", message);
        }
    }

    Ok(to_exit_code(outcome.exit_code()))
}

/// Resolve the engine executable first, then the model. Executable absence
/// short-circuits before any model lookup happens.
fn resolve_assets(
    base: &Path,
    model: WhisperModel,
) -> Result<(PathBuf, PathBuf), LauncherError> {
    let executable = assets::locate_executable(base).ok_or(LauncherError::ExecutableNotFound)?;
    info!("Found whisper.cpp: {}", executable.display());

    let model_file =
        assets::locate_model(base, model).ok_or(LauncherError::ModelNotFound { model })?;
    info!("Found model: {}", model_file.display());

    Ok((executable, model_file))
}

fn print_banner(model: WhisperModel) {
    println!();
    println!("{}", "=".repeat(60));
    println!("Starting transcription with {} model", model);
    println!("{}", "=".repeat(60));
    println!();
    println!("Instructions:");
    println!("  1. Ensure nRF52840 dongle is connected (USB Audio mode)");
    println!("  2. Ensure XIAO nRF54L15 is running and transmitting");
    println!("  3. Speak into the XIAO microphone");
    println!("  4. Press Ctrl+C to stop");
    println!();
    println!("{}", "-".repeat(60));
    println!();
}

fn to_exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map(ExitCode::from).unwrap_or(ExitCode::FAILURE)
}
