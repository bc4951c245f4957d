//! Batch worker pool translating an `ID:::text` file.
//!
//! A run reads the input file, splits its records into batches and hands
//! each batch to one of `threads` worker slots. Workers share a single
//! [`RateLimiter`], publish progress through the [`ProgressEmitter`] and
//! merge their results into one output buffer that is mirrored to the temp
//! file after every batch. The final file is written only when the run was
//! not stopped.

use std::path::{Path, PathBuf};
use std::sync::{Arc, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use gametl_core::config::TranslatorConfig;
use gametl_core::job::{TranslationEngine, TranslationReport};
use gametl_core::progress::{ProgressEmitter, ProgressEvent, RunId, WorkerId};
use gametl_core::{GametlError, Result};
use gametl_infrastructure::GametlPaths;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::chat_client::ChatClient;
use crate::line_format::{build_prompt, merge_translation, parse_input, record_id};
use crate::rate_limiter::RateLimiter;

/// Worker id used for job-level status lines.
pub const JOB_THREAD: WorkerId = 0;

pub const KILLED_MESSAGE: &str = "⛔ KILLED.";

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Files written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkFiles {
    pub output_file: PathBuf,
    pub temp_file: PathBuf,
    pub thread_log_file: PathBuf,
}

impl WorkFiles {
    pub fn from_paths(paths: &GametlPaths) -> Self {
        Self {
            output_file: paths.output_file(),
            temp_file: paths.temp_file(),
            thread_log_file: paths.thread_log_file(),
        }
    }
}

struct ActiveRun {
    run_id: Option<RunId>,
    token: CancellationToken,
    /// `start_translation` has picked up this run's token.
    started: bool,
}

/// [`TranslationEngine`] backed by an OpenAI-compatible chat endpoint.
pub struct BatchTranslationEngine {
    emitter: Arc<dyn ProgressEmitter>,
    chat: ChatClient,
    rate_limiter: Arc<RateLimiter>,
    files: WorkFiles,
    active: std::sync::Mutex<ActiveRun>,
    retry_delay: Duration,
}

impl BatchTranslationEngine {
    pub fn new(emitter: Arc<dyn ProgressEmitter>, files: WorkFiles) -> Self {
        Self {
            emitter,
            chat: ChatClient::new(),
            rate_limiter: Arc::new(RateLimiter::new()),
            files,
            active: std::sync::Mutex::new(ActiveRun {
                run_id: None,
                token: CancellationToken::new(),
                started: false,
            }),
            retry_delay: RETRY_DELAY,
        }
    }

    pub fn with_chat_client(mut self, chat: ChatClient) -> Self {
        self.chat = chat;
        self
    }

    /// Pause before a failed batch is sent again.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn files(&self) -> &WorkFiles {
        &self.files
    }

    fn active(&self) -> MutexGuard<'_, ActiveRun> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Token of `run_id`: the one registered by `prepare_run` (possibly
    /// already cancelled), or a fresh one replacing the previous run's.
    fn begin(&self, run_id: RunId) -> CancellationToken {
        let mut active = self.active();
        if active.run_id == Some(run_id) && !active.started {
            active.started = true;
            return active.token.clone();
        }
        let token = CancellationToken::new();
        *active = ActiveRun {
            run_id: Some(run_id),
            token: token.clone(),
            started: true,
        };
        token
    }

    async fn reset_thread_log(&self) -> Result<()> {
        if let Some(parent) = self.files.thread_log_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.files.thread_log_file, "").await?;
        Ok(())
    }

    async fn log_dispatch(&self, slot: WorkerId, batch: &Batch) {
        let line = format!("Thread {}: {}-{}\n", slot, batch.first_id(), batch.last_id());
        let written = async {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.files.thread_log_file)
                .await?;
            file.write_all(line.as_bytes()).await
        }
        .await;
        if let Err(e) = written {
            tracing::warn!(
                "Failed to append to {}: {}",
                self.files.thread_log_file.display(),
                e
            );
        }
    }
}

#[async_trait]
impl TranslationEngine for BatchTranslationEngine {
    async fn start_translation(
        &self,
        config: &TranslatorConfig,
        file_path: &Path,
        run_id: RunId,
    ) -> Result<TranslationReport> {
        config.validate()?;
        let token = self.begin(run_id);
        self.reset_thread_log().await?;

        let content = tokio::fs::read_to_string(file_path).await.map_err(|e| {
            GametlError::io(format!("Failed to read {}: {}", file_path.display(), e))
        })?;
        let parsed = parse_input(&content);

        let batches: Vec<Batch> = parsed
            .work_items
            .chunks(config.batch_size.max(1))
            .map(|items| Batch {
                items: items.to_vec(),
            })
            .collect();
        let total_batches = batches.len();
        let threads = config.threads.max(1);

        tracing::info!(
            "Starting {} on {}: {} batches, {} threads",
            run_id,
            file_path.display(),
            total_batches,
            threads
        );

        let ctx = Arc::new(RunContext {
            run_id,
            config: config.clone(),
            token: token.clone(),
            emitter: Arc::clone(&self.emitter),
            chat: self.chat.clone(),
            rate_limiter: Arc::clone(&self.rate_limiter),
            output: Mutex::new(parsed.initial_output),
            temp_file: self.files.temp_file.clone(),
            finished: AtomicUsize::new(0),
            total_batches,
            retry_delay: self.retry_delay,
        });

        ctx.emit(ProgressEvent::status(
            JOB_THREAD,
            0,
            total_batches,
            format!("Started. {} Batches.", total_batches),
        ));

        let (release, mut free_slots) = mpsc::unbounded_channel();
        for slot in 1..=threads {
            let _ = release.send(slot);
        }

        let mut workers = JoinSet::new();
        for batch in batches {
            let slot = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                slot = free_slots.recv() => match slot {
                    Some(slot) => slot,
                    None => break,
                },
            };

            self.log_dispatch(slot, &batch).await;

            let guard = WorkerSlot {
                id: slot,
                release: release.clone(),
            };
            let ctx = Arc::clone(&ctx);
            workers.spawn(async move {
                let _guard = guard;
                ctx.run_batch(slot, batch).await
            });
        }

        let mut fatal = None;
        while let Some(joined) = workers.join_next().await {
            let outcome = joined
                .map_err(|e| GametlError::engine(format!("Worker task failed: {}", e)))
                .and_then(|result| result);
            if let Err(e) = outcome {
                fatal.get_or_insert(e);
            }
        }

        if let Some(err) = fatal {
            tracing::error!("{} failed: {}", run_id, err);
            return Err(err);
        }

        let mut report = TranslationReport {
            total_batches,
            completed_batches: ctx.finished.load(Ordering::SeqCst),
            cancelled: token.is_cancelled(),
            output_path: None,
        };

        if report.cancelled {
            tracing::info!(
                "{} stopped after {}/{} batches",
                run_id,
                report.completed_batches,
                total_batches
            );
            return Ok(report);
        }

        {
            let output = ctx.output.lock().await;
            write_output(&self.files.output_file, &output)
                .await
                .map_err(|e| {
                    GametlError::engine(format!(
                        "Failed to write {}: {}",
                        self.files.output_file.display(),
                        e
                    ))
                })?;
        }
        report.output_path = Some(self.files.output_file.clone());

        ctx.emit(ProgressEvent::status(
            JOB_THREAD,
            total_batches,
            total_batches,
            "Finished.",
        ));
        tracing::info!(
            "{} finished, output written to {}",
            run_id,
            self.files.output_file.display()
        );
        Ok(report)
    }

    fn prepare_run(&self, run_id: RunId) {
        let mut active = self.active();
        *active = ActiveRun {
            run_id: Some(run_id),
            token: CancellationToken::new(),
            started: false,
        };
    }

    async fn stop_translation(&self) -> Result<()> {
        let run_id = {
            let active = self.active();
            active.token.cancel();
            active.run_id
        };

        let mut event = ProgressEvent::status(JOB_THREAD, 0, 0, KILLED_MESSAGE);
        if let Some(run_id) = run_id {
            tracing::info!("Stop requested for {}", run_id);
            event = event.with_run(run_id);
        }
        self.emitter.emit(event);
        Ok(())
    }
}

/// One batch of `(line index, original line)` records.
struct Batch {
    items: Vec<(usize, String)>,
}

impl Batch {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn first_id(&self) -> &str {
        self.items.first().map(|(_, line)| record_id(line)).unwrap_or("?")
    }

    fn last_id(&self) -> &str {
        self.items.last().map(|(_, line)| record_id(line)).unwrap_or("?")
    }

    fn lines(&self) -> Vec<String> {
        self.items.iter().map(|(_, line)| line.clone()).collect()
    }
}

/// Hands the slot back to the dispatcher when the worker ends, even on panic.
struct WorkerSlot {
    id: WorkerId,
    release: mpsc::UnboundedSender<WorkerId>,
}

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        let _ = self.release.send(self.id);
    }
}

/// State shared by the workers of one run.
struct RunContext {
    run_id: RunId,
    config: TranslatorConfig,
    token: CancellationToken,
    emitter: Arc<dyn ProgressEmitter>,
    chat: ChatClient,
    rate_limiter: Arc<RateLimiter>,
    output: Mutex<Vec<String>>,
    temp_file: PathBuf,
    finished: AtomicUsize,
    total_batches: usize,
    retry_delay: Duration,
}

impl RunContext {
    fn emit(&self, event: ProgressEvent) {
        self.emitter.emit(event.with_run(self.run_id));
    }

    /// Translates one batch, retrying until it succeeds, the run is
    /// cancelled, or the endpoint rejects the credentials.
    async fn run_batch(&self, slot: WorkerId, batch: Batch) -> Result<()> {
        if self.token.is_cancelled() {
            return Ok(());
        }

        let len = batch.len();
        self.emit(ProgressEvent::status(
            slot,
            0,
            len,
            format!("Processing {}-{}", batch.first_id(), batch.last_id()),
        ));

        let lines = batch.lines();
        let prompt = build_prompt(&lines);

        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => return Ok(()),
                _ = self.rate_limiter.wait(self.config.delay) => {}
            }

            let result = tokio::select! {
                biased;
                _ = self.token.cancelled() => return Ok(()),
                result = self.request(slot, len, &prompt) => result,
            };

            match result {
                Ok(response) => {
                    self.commit(slot, &batch, &lines, &response).await;
                    return Ok(());
                }
                Err(err) if !err.is_retryable() => {
                    self.emit(ProgressEvent::chunk(slot, 0, len, format!("Error: {}.", err)));
                    self.token.cancel();
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(
                        "Batch {}-{} on thread {} failed, retrying: {}",
                        batch.first_id(),
                        batch.last_id(),
                        slot,
                        err
                    );
                    self.emit(ProgressEvent::chunk(
                        slot,
                        0,
                        len,
                        format!("Error: {}. Retrying...", err),
                    ));
                    tokio::select! {
                        biased;
                        _ = self.token.cancelled() => return Ok(()),
                        _ = tokio::time::sleep(self.retry_delay) => {}
                    }
                }
            }
        }
    }

    async fn request(&self, slot: WorkerId, len: usize, prompt: &str) -> Result<String> {
        let mut on_delta = |delta: &str| self.emit(ProgressEvent::chunk(slot, 0, len, delta));
        let content = self
            .chat
            .complete(&self.config, prompt, &mut on_delta)
            .await?;

        if !self.config.stream {
            self.emit(ProgressEvent::chunk(
                slot,
                0,
                len,
                format!("Received {} chars", content.len()),
            ));
        }
        Ok(content)
    }

    async fn commit(&self, slot: WorkerId, batch: &Batch, lines: &[String], response: &str) {
        let merged = merge_translation(lines, response);
        {
            let mut output = self.output.lock().await;
            for ((index, _), line) in batch.items.iter().zip(merged) {
                if let Some(entry) = output.get_mut(*index) {
                    *entry = line;
                }
            }
            if let Err(e) = tokio::fs::write(&self.temp_file, output.join("\n")).await {
                tracing::warn!("Failed to write {}: {}", self.temp_file.display(), e);
            }
        }

        let len = batch.len();
        self.emit(ProgressEvent::status(slot, len, len, "Done."));

        let finished = self.finished.fetch_add(1, Ordering::SeqCst) + 1;
        self.emit(ProgressEvent::status(
            JOB_THREAD,
            finished,
            self.total_batches,
            format!("Progress: {}/{} Batches", finished, self.total_batches),
        ));
    }
}

async fn write_output(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}
