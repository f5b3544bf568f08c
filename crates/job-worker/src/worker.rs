//! The sequential build loop: poll, claim, build, export, upload, resolve.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use construction_engine::construct_part;
use geom_kernel::TruckKernel;
use part_export::export_artifacts;
use part_types::PartDefinition;
use tracing::{error, info, warn};

use crate::client::{Job, JobClient, TaskState};
use crate::config::WorkerConfig;
use crate::error::WorkerError;

/// Name of the task this worker owns on the job server.
pub const BUILD_TASK: &str = "build";

/// Upload attempts per artifact before the job fails.
const UPLOAD_ATTEMPTS: u32 = 3;
/// Pause between upload attempts.
const UPLOAD_RETRY_PAUSE: Duration = Duration::from_secs(3);
/// Consecutive polling failures tolerated before the worker gives up.
const MAX_POLL_FAILURES: u32 = 5;

pub struct Worker {
    client: JobClient,
    config: WorkerConfig,
}

impl Worker {
    pub fn new(config: WorkerConfig) -> Self {
        Self {
            client: JobClient::new(&config.server_url),
            config,
        }
    }

    /// Poll the job server and build parts until the build budget is spent.
    ///
    /// At most one build is in flight at a time; queue exclusivity across
    /// worker instances is the server's responsibility.
    pub fn run(&self) -> Result<(), WorkerError> {
        let mut built = 0u32;
        let mut poll_failures = 0u32;

        loop {
            if built >= self.config.max_builds {
                info!("build budget spent; exiting so the service manager can restart us");
                return Ok(());
            }

            let jobs = match self.client.list_jobs() {
                Ok(jobs) => {
                    poll_failures = 0;
                    jobs
                }
                Err(e) => {
                    poll_failures += 1;
                    if poll_failures >= MAX_POLL_FAILURES {
                        return Err(e);
                    }
                    warn!(attempt = poll_failures, "job polling failed: {e}");
                    thread::sleep(self.config.poll_interval);
                    continue;
                }
            };

            let Some(job) = JobClient::next_ready(&jobs) else {
                thread::sleep(self.config.poll_interval);
                continue;
            };

            match self.process(job) {
                Ok(()) => info!(job = %job.id, "job completed"),
                Err(e) => error!(job = %job.id, "job failed: {e}"),
            }
            built += 1;
        }
    }

    /// Claim one job, build it in a scratch directory, and resolve its
    /// task state either way.
    fn process(&self, job: &Job) -> Result<(), WorkerError> {
        self.client
            .set_task_state(&job.id, BUILD_TASK, TaskState::Running)?;

        let result = self.build_and_upload(job);
        let final_state = final_state(&result);
        if let Err(e) = self.client.set_task_state(&job.id, BUILD_TASK, final_state) {
            warn!(job = %job.id, "could not report {final_state:?}: {e}");
        }
        result
    }

    fn build_and_upload(&self, job: &Job) -> Result<(), WorkerError> {
        let definition = self.client.fetch_spec(&job.id)?;
        let scratch = scratch_dir()?;
        let result = self.build_into(&definition, &scratch).and_then(|files| {
            for file in &files {
                self.upload_with_retry(&job.id, file)?;
            }
            Ok(())
        });
        if let Err(e) = fs::remove_dir_all(&scratch) {
            warn!("could not remove scratch dir {}: {e}", scratch.display());
        }
        result
    }

    /// Construct the part with a fresh kernel and export all artifacts.
    fn build_into(
        &self,
        definition: &PartDefinition,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, WorkerError> {
        info!(part = %definition.display_name(), "definition loaded");
        let started = Instant::now();

        let mut kernel = TruckKernel::new();
        let solid = construct_part(&mut kernel, definition)?;
        let files = export_artifacts(&mut kernel, &solid, definition, dir, &self.config.formats)?;

        info!(
            part = %definition.display_name(),
            seconds = started.elapsed().as_secs_f64(),
            artifacts = files.len(),
            "part built"
        );
        Ok(files)
    }

    fn upload_with_retry(&self, job_id: &str, file: &Path) -> Result<(), WorkerError> {
        let mut last_error = String::new();
        for attempt in 1..=UPLOAD_ATTEMPTS {
            match self.client.upload_artifact(job_id, file) {
                Ok(()) => {
                    info!(job = %job_id, file = %file.display(), "artifact uploaded");
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        job = %job_id,
                        file = %file.display(),
                        attempt,
                        "upload failed: {e}"
                    );
                    last_error = e.to_string();
                    if attempt < UPLOAD_ATTEMPTS {
                        thread::sleep(UPLOAD_RETRY_PAUSE);
                    }
                }
            }
        }
        Err(WorkerError::UploadExhausted {
            attempts: UPLOAD_ATTEMPTS,
            reason: last_error,
        })
    }
}

/// Task state reported back for a finished job. Failed builds become
/// FAILED instead of lingering at RUNNING.
fn final_state(result: &Result<(), WorkerError>) -> TaskState {
    if result.is_ok() {
        TaskState::Completed
    } else {
        TaskState::Failed
    }
}

/// Fresh per-build scratch directory under the system temp dir.
fn scratch_dir() -> Result<PathBuf, WorkerError> {
    let dir = std::env::temp_dir().join(format!("partwright-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
