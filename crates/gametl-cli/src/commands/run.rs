use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use colored::Colorize;
use gametl_core::progress::{ProgressAggregator, STATUS_MARKER, ThreadState, WorkerId};
use gametl_core::selection::FileSelection;
use gametl_interaction::engine::JOB_THREAD;

use crate::app::AppState;

const REFRESH_INTERVAL: Duration = Duration::from_millis(500);
const BAR_WIDTH: usize = 20;
const NO_LOGS: &str = "No logs yet...";

/// Starts a job on the selected file and renders progress until it resolves.
///
/// Ctrl-C requests a stop; the job then resolves with a cancelled report.
pub async fn run(state: &AppState, file: Option<PathBuf>, show_logs: bool) -> Result<()> {
    if let Some(file) = file {
        let candidate = std::fs::canonicalize(&file).ok();
        if !state.config.select_file(&FileSelection::from_candidate(candidate)) {
            bail!("Cannot select {} (expected an existing .txt or .csv file)", file.display());
        }
    }

    let config = state.config.get();
    let jobs = Arc::clone(&state.jobs);
    let mut job = tokio::spawn(async move { jobs.start(&config, &config.last_file).await });

    let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
    let mut last_frame = String::new();
    let mut stop_requested = false;

    let joined = loop {
        tokio::select! {
            joined = &mut job => break joined,
            _ = tokio::signal::ctrl_c(), if !stop_requested => {
                match state.jobs.stop().await {
                    Ok(()) => {
                        stop_requested = true;
                        println!("{}", "Stopping...".yellow());
                    }
                    Err(e) => tracing::warn!("Stop request rejected: {}", e),
                }
            }
            _ = ticker.tick() => {
                let frame = render_frame(&*state.progress.read().await);
                if !frame.is_empty() && frame != last_frame {
                    println!("{}", frame);
                    last_frame = frame;
                }
            }
        }
    };

    // The pump may still hold the last few events.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let frame = render_frame(&*state.progress.read().await);
    if !frame.is_empty() && frame != last_frame {
        println!("{}", frame);
    }

    let outcome = joined?;

    if show_logs {
        print_logs(&*state.progress.read().await);
    }

    match outcome {
        Ok(summary) => {
            println!("{}", summary.notice().green().bold());
            let seconds = summary.elapsed().num_milliseconds() as f64 / 1000.0;
            let report = &summary.report;
            println!(
                "{} batches of {} in {:.1}s",
                report.completed_batches, report.total_batches, seconds
            );
            match &report.output_path {
                Some(path) => println!("Output: {}", path.display()),
                None => println!("{}", "Stopped before completion; no output written.".yellow()),
            }
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Job failed: {}", e);
            bail!("{}", e.to_string().red())
        }
    }
}

fn thread_label(thread_id: WorkerId) -> String {
    if thread_id == JOB_THREAD {
        "Job".to_string()
    } else {
        format!("Thread {}", thread_id)
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Most recent status line of a worker's log, without its marker.
fn last_status(state: &ThreadState) -> Option<&str> {
    state
        .log
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix(STATUS_MARKER))
}

/// One line per worker: label, bar, percentage and latest status.
fn render_frame(progress: &ProgressAggregator) -> String {
    progress
        .threads()
        .map(|(id, state)| {
            let percent = state.percentage();
            format!(
                "{:<10} {} {:>3}%  {}",
                thread_label(id),
                progress_bar(percent),
                percent,
                last_status(state).unwrap_or_default()
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_logs(progress: &ProgressAggregator) {
    if progress.is_empty() {
        println!("{}", NO_LOGS);
        return;
    }
    for (id, state) in progress.threads() {
        println!("{}", format!("== {} ==", thread_label(id)).bright_blue());
        if state.log.trim().is_empty() {
            println!("{}", NO_LOGS);
        } else {
            println!("{}", state.log.trim_start_matches('\n'));
        }
    }
}
