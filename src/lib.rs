pub mod models;
pub mod services;

use anyhow::{bail, Context};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use models::{DetectionResult, SessionReview, SessionSubmission};
use services::answer_loader::load_answer_text;
use services::answer_review::review_session;
use services::config_store::{AppConfig, ConfigStore};
use services::detection::Detector;
use services::text_processor::preview;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_PREFIX: &str = "examGuard_";
const LOG_KEEP: usize = 30;

const USAGE: &str = "Usage:
  examGuard <path|-> [--session] [--out <json_path>] [--min-length <n>] [--marker-override]
  examGuard --init-config

Notes:
  - `-` reads the answer (or session JSON) from stdin.
  - Supported answer files: .txt, .md, .docx, .pdf
  - `--session` treats the input as a session submission JSON and reviews every answer.
  - `--init-config` writes the effective config (defaults filled in) and backs up the previous file.
  - Config is read from EXAMGUARD_CONFIG_DIR or the platform config dir (examGuard/config.json).";

fn env_flag(key: &str) -> bool {
    matches!(std::env::var(key).as_deref(), Ok("1") | Ok("true") | Ok("TRUE"))
}

/// Initialize logging system with timestamped log files
fn init_logging() {
    let disable_file_log = env_flag("EXAMGUARD_DISABLE_FILE_LOG");
    let disable_cleanup = env_flag("EXAMGUARD_DISABLE_LOG_CLEANUP");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if disable_file_log {
        init_console_only_logging(env_filter);
        info!("File logging disabled via EXAMGUARD_DISABLE_FILE_LOG");
        return;
    }

    let logs_dir = match std::env::var("EXAMGUARD_LOG_DIR") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => get_logs_dir(),
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Failed to create logs directory: {}", e);
        init_console_only_logging(env_filter);
        info!("Falling back to console-only logging (log dir not writable)");
        return;
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("{}{}.log", LOG_PREFIX, timestamp);

    // One file per run; writes are non-blocking.
    let file_appender = rolling::never(&logs_dir, &log_filename);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(file_guard);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    #[cfg(debug_assertions)]
    {
        // stdout carries the report, so the console layer stays on stderr
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .init();
    }

    info!("=== examGuard Started ===");
    info!("Log file: {}/{}", logs_dir.display(), log_filename);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if !disable_cleanup {
        std::thread::spawn(move || {
            cleanup_old_logs(&logs_dir, LOG_KEEP);
        });
    }
}

/// Get the logs directory path
fn get_logs_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("logs")
    }

    #[cfg(not(debug_assertions))]
    {
        if let Some(data_dir) = dirs::data_local_dir() {
            return data_dir.join("examGuard").join("logs");
        }
        PathBuf::from("logs")
    }
}

fn cleanup_old_logs(logs_dir: &Path, keep: usize) {
    let mut entries: Vec<_> = match fs::read_dir(logs_dir) {
        Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
        Err(_) => return,
    };

    entries.retain(|e| {
        let name = e.file_name().to_string_lossy().to_string();
        name.starts_with(LOG_PREFIX) && name.ends_with(".log")
    });

    if entries.len() <= keep {
        return;
    }

    entries.sort_by_key(|e| {
        e.metadata()
            .and_then(|m| m.modified())
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
    });

    let remove_count = entries.len().saturating_sub(keep);
    for entry in entries.into_iter().take(remove_count) {
        let _ = fs::remove_file(entry.path());
    }
}

fn init_console_only_logging(env_filter: EnvFilter) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn load_config() -> anyhow::Result<AppConfig> {
    let Some(dir) = ConfigStore::default_config_dir() else {
        return Ok(AppConfig::default());
    };
    let store = ConfigStore::new(dir);
    store
        .load()
        .with_context(|| format!("loading config from {}", store.config_file().display()))
}

/// Write the effective config back to disk; an existing file is backed up first.
fn init_config(store: &ConfigStore) -> anyhow::Result<AppConfig> {
    let mut config = store
        .load()
        .with_context(|| format!("loading config from {}", store.config_file().display()))?;
    if config.version.is_empty() {
        config.version = env!("CARGO_PKG_VERSION").to_string();
    }
    store
        .save(&config)
        .with_context(|| format!("writing config to {}", store.config_file().display()))?;
    info!(path = %store.config_file().display(), "config.initialized");
    Ok(config)
}

fn read_input(path: &str) -> anyhow::Result<(String, Vec<u8>)> {
    if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        return Ok(("stdin.txt".to_string(), buf));
    }

    let bytes = fs::read(path).with_context(|| format!("reading {}", path))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());
    Ok((file_name, bytes))
}

fn print_detection(source: &str, text: &str, result: &DetectionResult) {
    println!("Source: {}", source);
    println!("Text: {}", preview(text.trim(), 80));
    println!("Label: {} ({})", result.label, result.label.description());
    println!("Confidence: {:.2} (raw score {})", result.confidence_score, result.raw_score);
    if !result.matched_patterns.is_empty() {
        println!("Patterns: {}", result.matched_patterns.join(", "));
    }
    for reason in &result.reasons {
        println!("  - {}", reason);
    }
}

fn print_review(review: &SessionReview) {
    let s = &review.summary;
    println!("Session: {} (review {})", review.session_id, review.review_id);
    println!(
        "Checked: {} | Suspected: {} (likely {}, possibly {})",
        s.checked, s.suspected, s.likely_ai, s.possibly_ai
    );
    println!("Confidence: max {:.2}, avg {:.2}", s.max_confidence, s.avg_confidence);
    for item in &review.items {
        match &item.detection {
            Some(d) => println!(
                "  #{} [{}] {} {:.2}",
                item.question_id, item.question_type, d.label, d.confidence_score
            ),
            None => println!("  #{} [{}] skipped", item.question_id, item.question_type),
        }
    }
}

fn write_json<T: serde::Serialize>(path: &str, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing result")?;
    fs::write(path, json).with_context(|| format!("writing {}", path))?;
    println!("Wrote: {}", path);
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let started = Instant::now();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || has_flag(&args, "--help") || has_flag(&args, "-h") {
        eprintln!("{}", USAGE);
        return Ok(());
    }

    init_logging();

    if has_flag(&args, "--init-config") {
        let dir = ConfigStore::default_config_dir().context("no config directory available on this platform")?;
        let store = ConfigStore::new(dir);
        init_config(&store)?;
        println!("Config: {}", store.config_file().display());
        return Ok(());
    }

    let config = load_config()?;
    let mut options = config.detection.to_options();
    if let Some(raw) = parse_arg_value(&args, "--min-length") {
        options.min_length = raw
            .parse()
            .with_context(|| format!("--min-length expects a non-negative integer, got {:?}", raw))?;
    }
    if has_flag(&args, "--marker-override") {
        options.explicit_marker_override = true;
    }
    let detector = Detector::new(options);

    let path = args[1].clone();
    if path.starts_with("--") {
        bail!("missing input path\n\n{}", USAGE);
    }
    let out_path = parse_arg_value(&args, "--out");
    let (file_name, bytes) = read_input(&path)?;

    if has_flag(&args, "--session") {
        let submission: SessionSubmission =
            serde_json::from_slice(&bytes).with_context(|| format!("parsing session submission {}", path))?;
        let review = review_session(&submission, &detector, &config.review);
        print_review(&review);
        if let Some(out) = out_path {
            write_json(&out, &review)?;
        }
    } else {
        let text = load_answer_text(&file_name, &bytes).with_context(|| format!("loading answer {}", path))?;
        let result = detector.detect_text(&text);
        print_detection(&path, &text, &result);
        if let Some(out) = out_path {
            write_json(&out, &result)?;
        }
    }

    info!(elapsed_ms = started.elapsed().as_millis(), "run.completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_arg_value() {
        let a = args(&["examGuard", "essay.txt", "--out", "r.json", "--min-length", "50"]);
        assert_eq!(parse_arg_value(&a, "--out").as_deref(), Some("r.json"));
        assert_eq!(parse_arg_value(&a, "--min-length").as_deref(), Some("50"));
        assert_eq!(parse_arg_value(&a, "--missing"), None);

        let dangling = args(&["examGuard", "essay.txt", "--out"]);
        assert_eq!(parse_arg_value(&dangling, "--out"), None);
    }

    #[test]
    fn test_has_flag() {
        let a = args(&["examGuard", "-", "--session"]);
        assert!(has_flag(&a, "--session"));
        assert!(!has_flag(&a, "--marker-override"));
    }

    #[test]
    fn test_init_config_writes_defaults_and_backs_up() {
        let dir = std::env::temp_dir().join(format!("examguard-init-{}", uuid::Uuid::new_v4()));
        let store = ConfigStore::new(dir.clone());

        let written = init_config(&store).unwrap();
        assert_eq!(written.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(written.detection, AppConfig::default().detection);
        assert_eq!(store.load().unwrap(), written);
        assert!(!dir.join("backups").exists());

        init_config(&store).unwrap();
        assert_eq!(fs::read_dir(dir.join("backups")).unwrap().count(), 1);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_cleanup_old_logs_keeps_newest() {
        let dir = std::env::temp_dir().join(format!("examguard-logs-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        for i in 0..5 {
            fs::write(dir.join(format!("{}{}.log", LOG_PREFIX, i)), "x").unwrap();
        }
        fs::write(dir.join("other.log"), "x").unwrap();

        cleanup_old_logs(&dir, 2);

        let remaining = fs::read_dir(&dir).unwrap().count();
        assert_eq!(remaining, 3);
        assert!(dir.join("other.log").exists());
        let _ = fs::remove_dir_all(dir);
    }
}
