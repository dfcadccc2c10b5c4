use anyhow::Result;
/// Logging helpers
///
/// Subscriber setup plus the banner/stat formatting used by the batch
/// processor.
use std::fs;
use tracing::info;

/// Initialize the tracing subscriber
///
/// Honors `RUST_LOG`; defaults to `info` for this crate.
pub fn init() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("medquest_admin=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

/// Write the session log-file header
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\nexam processing log - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// Startup banner
pub fn log_startup(input_folder: &str, publish_enabled: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 exam batch processing started");
    info!("📁 input folder: {}", input_folder);
    info!(
        "📤 publishing: {}",
        if publish_enabled { "enabled" } else { "disabled" }
    );
    info!("{}", "=".repeat(60));
}

/// Batch size banner
pub fn log_exams_loaded(total: usize) {
    info!("✓ found {} exam file(s) to process\n", total);
}

/// Final statistics banner
pub fn print_final_stats(success: usize, failed: usize, total: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 batch complete");
    info!(
        "finished at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ succeeded: {}/{}", success, total);
    info!("❌ failed: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\nlog written to: {}", log_file_path);
}

/// Truncate long text for log previews
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
