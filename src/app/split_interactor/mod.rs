// Split interactor - Orchestrates the acquire, probe and chunk use case

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::app::fetch_interactor::FetchInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the split use case
pub struct SplitInteractor {
    fetch: Arc<FetchInteractor>,
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl SplitInteractor {
    /// Create new split interactor with injected ports
    pub fn new(
        fetch: Arc<FetchInteractor>,
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            fetch,
            probe_port,
            execute_port,
            fs_port,
            log_port,
        }
    }

    /// Split the requested source into clips, advancing `progress` once per
    /// chunk. Chunks are extracted strictly one after another.
    pub async fn execute(
        &self,
        request: &SplitRequest,
        progress: &dyn ProgressPort,
    ) -> Result<SplitReport, DomainError> {
        let started = Instant::now();

        // Output directory is checked before anything is downloaded or spawned
        if !self.fs_port.directory_exists(&request.output_dir).await? {
            return Err(DomainError::InvalidOutputDir(format!(
                "{} does not exist or is not a directory",
                request.output_dir.display()
            )));
        }

        let source_path = self.fetch.resolve(&request.source, &request.output_dir).await?;

        let duration = self.probe_port.probe_duration(&source_path).await?;
        let plan = ChunkPlanner::plan(duration, request.chunk_duration, request.tail_policy)?;
        self.log_port
            .info(&format!(
                "Source {} lasts {}, splitting into {} x {}s {} clips",
                source_path.display(),
                plan.total_duration,
                plan.len(),
                request.chunk_duration,
                request.format
            ))
            .await;

        if plan.is_empty() {
            return Err(DomainError::NoClips(format!(
                "chunk duration {}s is longer than the video ({})",
                request.chunk_duration, plan.total_duration
            )));
        }

        self.check_existing_outputs(request, &plan).await?;

        progress.begin(plan.len() as u64);

        let mut clips = Vec::with_capacity(plan.len());
        let mut failures = Vec::new();

        for span in &plan.spans {
            let output = request.clip_path(span.index);
            let label = chunk_file_name(span.index, request.format);

            match self.extract_chunk(request, &source_path, span, output.clone()).await {
                Ok(path) => {
                    let file_size = self.fs_port.get_file_size(&path).await.ok();
                    clips.push(ClipRecord {
                        index: span.index,
                        path,
                        start: span.start,
                        duration: span.duration,
                        file_size,
                    });
                    progress.advance(&label);
                }
                Err(e) => match request.failure_policy {
                    FailurePolicy::Abort => {
                        progress.abandon(&format!("failed at {}", label));
                        self.log_port
                            .error(&format!("Stopping after failure on {}: {}", label, e))
                            .await;
                        return Err(e);
                    }
                    FailurePolicy::KeepGoing => {
                        self.log_port
                            .warn(&format!("Skipping {}: {}", label, e))
                            .await;
                        failures.push(ChunkFailure {
                            index: span.index,
                            path: output,
                            kind: e.kind().to_string(),
                            message: e.to_string(),
                        });
                        progress.advance(&format!("{} failed", label));
                    }
                },
            }
        }

        let summary = format!("Generated {} clips", clips.len());
        progress.finish(&summary);
        if failures.is_empty() {
            self.log_port.info(&summary).await;
        } else {
            self.log_port
                .warn(&format!("{}, {} failed", summary, failures.len()))
                .await;
        }

        Ok(SplitReport {
            source: source_path,
            output_dir: request.output_dir.clone(),
            format: request.format,
            total_duration: plan.total_duration,
            chunk_duration: request.chunk_duration,
            clips,
            failures,
            elapsed_secs: started.elapsed().as_secs_f64(),
            generated_at: Utc::now(),
        })
    }

    /// Refuse the whole run up front when any planned clip already exists
    /// and overwriting is off
    async fn check_existing_outputs(
        &self,
        request: &SplitRequest,
        plan: &ChunkPlan,
    ) -> Result<(), DomainError> {
        if request.overwrite == OverwritePolicy::Always {
            return Ok(());
        }

        for span in &plan.spans {
            let output = request.clip_path(span.index);
            let exists = self.fs_port.file_exists(&output).await?;
            OverwriteGuard::check(request.overwrite, exists, &output.display().to_string())?;
        }

        Ok(())
    }

    /// Extract one chunk
    async fn extract_chunk(
        &self,
        request: &SplitRequest,
        source_path: &Path,
        span: &ChunkSpan,
        output: PathBuf,
    ) -> Result<PathBuf, DomainError> {
        let job = ChunkJob {
            input: source_path.to_path_buf(),
            output,
            span: span.clone(),
            scale: request.scale.clone(),
            format: request.format,
            overwrite: request.overwrite,
        };

        self.log_port
            .debug(&format!(
                "Extracting chunk {:03}: {} - {}",
                span.index,
                span.start,
                span.end()
            ))
            .await;

        self.execute_port
            .extract(&job)
            .await
            .map_err(|e| match e {
                DomainError::ExecFail(msg) => {
                    DomainError::ExecFail(format!("chunk {:03}: {}", span.index, msg))
                }
                other => other,
            })
    }
}
