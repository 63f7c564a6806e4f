//! Main app runner for the analyze, record, and serve commands

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use tokio::time::{interval, Duration as TokioDuration};

use crate::application::ports::{BeatAnalyzer, ConfigStore};
use crate::application::{AnalyzeBeatUseCase, FinalizedRecording, RecordingSession};
use crate::domain::audio::{first_audio_candidate, AudioMimeType, AudioSubmission};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    build_analyzer, CpalCapture, FlacWavCodec, RemoteAnalyzer, XdgConfigStore,
};
use crate::server::run_server;

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Load and merge configuration from file and environment.
/// Precedence: defaults < file < env.
pub async fn load_merged_config() -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    let env_config = AppConfig {
        gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
        openrouter_api_key: env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|s| !s.is_empty()),
        ..Default::default()
    };

    AppConfig::defaults().merge(file_config).merge(env_config)
}

/// Select the analyzer strategy: the remote dispatcher when a server URL was
/// given, otherwise the configured model backend.
async fn select_analyzer(remote: Option<String>) -> Arc<dyn BeatAnalyzer> {
    match remote {
        Some(url) => Arc::new(RemoteAnalyzer::new(url)),
        None => {
            let config = load_merged_config().await;
            build_analyzer(&config)
        }
    }
}

/// Build a submission from the given paths, picking the first audio-typed
/// candidate and ignoring the rest.
async fn submission_from_files(files: &[PathBuf]) -> Result<AudioSubmission, String> {
    let candidates: Vec<(PathBuf, String)> = files
        .iter()
        .map(|path| {
            let mime = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(AudioMimeType::from_extension)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            (path.clone(), mime)
        })
        .collect();

    let Some((path, mime)) = first_audio_candidate(&candidates).cloned() else {
        return Err("Unsupported file type".to_string());
    };

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());

    Ok(AudioSubmission::new(bytes, mime, file_name))
}

/// Validate, analyze, and render one submission
async fn analyze_and_render(
    analyzer: Arc<dyn BeatAnalyzer>,
    submission: AudioSubmission,
    presenter: &mut Presenter,
    json: bool,
) -> ExitCode {
    presenter.info(&format!(
        "Submitting {} ({})",
        submission.file_name(),
        submission.human_readable_size()
    ));
    presenter.start_spinner("Analyzing beat...");

    let use_case = AnalyzeBeatUseCase::new(analyzer);

    match use_case.execute(&submission).await {
        Ok(result) => {
            presenter.spinner_success("Analysis complete");
            if json {
                match serde_json::to_string_pretty(&result) {
                    Ok(body) => presenter.output(&body),
                    Err(e) => {
                        presenter.error(&format!("Failed to serialize result: {}", e));
                        return ExitCode::from(EXIT_ERROR);
                    }
                }
            } else {
                presenter.render_analysis(&result);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail("Analysis failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run the analyze command against local files
pub async fn run_analyze(files: Vec<PathBuf>, remote: Option<String>, json: bool) -> ExitCode {
    let mut presenter = Presenter::new();

    let submission = match submission_from_files(&files).await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let analyzer = select_analyzer(remote).await;
    analyze_and_render(analyzer, submission, &mut presenter, json).await
}

/// Run the record command: capture until Ctrl+C or the duration cap, then
/// finalize and analyze the take.
pub async fn run_record(
    remote: Option<String>,
    save: Option<PathBuf>,
    json: bool,
) -> ExitCode {
    let mut presenter = Presenter::new();

    let mut session = RecordingSession::new(CpalCapture::new(), FlacWavCodec::new());

    if let Err(e) = session.start().await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    presenter.start_spinner("Recording... press Ctrl+C to stop");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = interval(TokioDuration::from_millis(250));

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = ticker.tick() => {
                let progress = presenter.format_recording_progress(session.elapsed_secs());
                presenter.update_spinner(&format!("Recording... {} (Ctrl+C to stop)", progress));
                if session.cap_reached() {
                    break;
                }
            }
        }
    }

    presenter.update_spinner("Finalizing recording...");

    let finalized = match session.stop().await {
        Ok(f) => f,
        Err(e) => {
            presenter.spinner_fail("Recording failed");
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.spinner_success("Recording complete");

    if let FinalizedRecording::NativeFallback { ref audio, ref reason } = finalized {
        presenter.warn(&format!(
            "WAV conversion unavailable ({}); submitting {} as captured",
            reason,
            audio.file_name()
        ));
    }

    let submission = finalized.into_submission();

    if let Some(path) = save {
        if let Err(e) = write_recording(&path, &submission).await {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
        presenter.info(&format!("Saved recording to {}", path.display()));
    }

    let analyzer = select_analyzer(remote).await;
    analyze_and_render(analyzer, submission, &mut presenter, json).await
}

async fn write_recording(path: &Path, submission: &AudioSubmission) -> Result<(), String> {
    tokio::fs::write(path, submission.data())
        .await
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

/// Run the analysis HTTP server
pub async fn run_serve(listen: Option<String>) -> ExitCode {
    let presenter = Presenter::new();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("beat_scope=info")),
        )
        .init();

    let config = load_merged_config().await;
    let addr = listen.unwrap_or_else(|| config.listen_or_default());

    if addr.parse::<std::net::SocketAddr>().is_err() {
        presenter.error(&format!("Invalid listen address: {}", addr));
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    if config.api_key_for_backend().is_none() {
        presenter.warn(&format!(
            "No API key configured for backend '{}'; /api/analyze will return errors",
            config.backend_or_default()
        ));
    }

    let analyzer = build_analyzer(&config);
    presenter.info(&format!(
        "Serving beat analysis on http://{} (backend: {})",
        addr,
        config.backend_or_default()
    ));

    match run_server(&addr, analyzer).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Handle the config subcommand with the default store
pub async fn run_config(action: super::args::ConfigAction) -> ExitCode {
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();

    match super::config_cmd::handle_config_command(action, &store, &presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
