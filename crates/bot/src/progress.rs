//! Single-status-message progress rendering.
//!
//! One message per render job, edited in place as the pipeline reports
//! coarse stage events. Edit failures are swallowed; progress must never
//! break the operation itself.

use std::time::{Duration, Instant};

use teloxide::prelude::*;
use teloxide::types::MessageId;
use tokio::sync::mpsc;

use suto_core::RenderProgress;

const BAR_SIZE: usize = 20;

/// `1536` -> `"1.50 KB"`.
pub fn human_bytes(size: u64) -> String {
    let units = ["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit = 0;
    while size > 1024.0 && unit < units.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, units[unit])
}

/// `90s` -> `"1m, 30s"`.
pub fn format_duration(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    let (minutes, sec) = (seconds / 60, seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    let (days, hours) = (hours / 24, hours % 24);

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if sec > 0 || parts.is_empty() {
        parts.push(format!("{sec}s"));
    }
    parts.join(", ")
}

/// 20-slot bar, `0.5` -> `"■■■■■■■■■■□□□□□□□□□□"`.
pub fn progress_bar(fraction: f64) -> String {
    let filled = ((BAR_SIZE as f64) * fraction.clamp(0.0, 1.0)).round() as usize;
    format!("{}{}", "■".repeat(filled), "□".repeat(BAR_SIZE - filled))
}

/// Label and bar fraction for an in-flight stage. Terminal events return
/// `None`; the caller writes the final message itself.
fn stage(progress: &RenderProgress) -> Option<(&'static str, f64)> {
    match progress {
        RenderProgress::Downloading => Some(("Downloading...", 0.15)),
        RenderProgress::WritingMetadata => Some(("Writing metadata...", 0.55)),
        RenderProgress::Uploading => Some(("Uploading...", 0.80)),
        RenderProgress::Completed | RenderProgress::Failed => None,
    }
}

fn status_text(
    file_name: &str,
    file_size: Option<u64>,
    label: &str,
    fraction: f64,
    started: Instant,
) -> String {
    let mut text = format!(
        "{label}\n[{}]\nFile: {file_name}",
        progress_bar(fraction)
    );
    if let Some(size) = file_size {
        text.push_str(&format!("\nSize: {}", human_bytes(size)));
    }
    text.push_str(&format!(
        "\nElapsed: {}",
        format_duration(started.elapsed())
    ));
    text
}

/// Consumes stage events and keeps the status message current. Returns
/// when the channel closes or a terminal event arrives.
pub async fn drive_status_message(
    bot: Bot,
    chat: ChatId,
    status: MessageId,
    file_name: String,
    file_size: Option<u64>,
    mut events: mpsc::UnboundedReceiver<RenderProgress>,
) {
    let started = Instant::now();
    while let Some(event) = events.recv().await {
        let Some((label, fraction)) = stage(&event) else {
            return;
        };
        let text = status_text(&file_name, file_size, label, fraction, started);
        let _ = bot.edit_message_text(chat, status, text).await;
    }
}
