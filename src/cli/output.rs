//! CLI output formatting

use crate::{core::ExecutionStatus, execution::ExecutionEvent};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Spinner shown while an agent is working
pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    // the template is a literal, so this only fails on a typo
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name,
            total_tasks,
        } => format!(
            "{} Starting {} with {} agents ({})",
            ROCKET,
            style(pipeline_name).bold(),
            total_tasks,
            style(short_id(execution_id)).dim()
        ),
        ExecutionEvent::TaskStarted {
            task_id,
            role,
            index,
            total,
        } => format!(
            "{} [{}/{}] {} working on {}",
            SPINNER,
            index + 1,
            total,
            style(role).cyan(),
            style(task_id).dim()
        ),
        ExecutionEvent::TaskCompleted { task_id, output_chars } => format!(
            "{} {} ({} chars)",
            CHECK,
            style(task_id).green(),
            output_chars
        ),
        ExecutionEvent::TaskFailed { task_id, error } => {
            format!("{} {}: {}", CROSS, style(task_id).red(), style(error).dim())
        }
        ExecutionEvent::PipelineCompleted { execution_id, status } => format!(
            "{} Run ({}) {}",
            INFO,
            style(short_id(execution_id)).dim(),
            format_status(*status)
        ),
    }
}

/// Human-readable elapsed time
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3723)), "1h 2m 3s");
    }

    #[test]
    fn test_task_started_is_one_based() {
        let line = format_execution_event(&ExecutionEvent::TaskStarted {
            task_id: "write".to_string(),
            role: "Writer".to_string(),
            index: 1,
            total: 3,
        });
        assert!(line.contains("[2/3]"));
        assert!(line.contains("Writer"));
    }
}
