//! Blocking job-server client: job polling, spec fetch, task-state
//! transitions, and multipart artifact upload.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;

use part_types::PartDefinition;

use crate::error::WorkerError;

/// Request timeout for every server call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Lifecycle states of a job task on the server. FAILED is reported by this
/// worker whenever a build or export errors, so no job is left RUNNING
/// forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Created,
    Running,
    Completed,
    Failed,
}

/// Task states of one job, as reported by `GET /jobs/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobState {
    /// Overall job state.
    #[serde(default)]
    pub job: Option<TaskState>,
    /// Per-task states, keyed by task name.
    #[serde(default)]
    pub tasks: HashMap<String, TaskState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobAttributes {
    #[serde(default)]
    pub state: JobState,
}

/// One job listed by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub attributes: JobAttributes,
}

impl Job {
    /// A job is ready for this worker while its overall state is CREATED.
    pub fn is_ready(&self) -> bool {
        self.attributes.state.job == Some(TaskState::Created)
    }
}

#[derive(Debug, Deserialize)]
struct ListReply {
    #[serde(default)]
    data: Vec<Job>,
}

#[derive(Debug, Deserialize)]
struct SpecReply {
    data: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct TaskTransition<'a> {
    name: &'a str,
    state: TaskState,
}

/// Blocking HTTP client for the job server.
pub struct JobClient {
    agent: Agent,
    base: String,
}

impl JobClient {
    pub fn new(server_url: &str) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        Self {
            agent: config.into(),
            base: server_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /jobs/`: all jobs currently known to the server.
    pub fn list_jobs(&self) -> Result<Vec<Job>, WorkerError> {
        let url = format!("{}/jobs/", self.base);
        let response = self.agent.get(&url).call()?;
        let reply: ListReply = response.into_body().read_json()?;
        Ok(reply.data)
    }

    /// First listed job that is ready to build.
    pub fn next_ready(jobs: &[Job]) -> Option<&Job> {
        jobs.iter().find(|job| job.is_ready())
    }

    /// `GET /jobs/{id}/spec`: the part definition for a job.
    pub fn fetch_spec(&self, job_id: &str) -> Result<PartDefinition, WorkerError> {
        let url = format!("{}/jobs/{}/spec", self.base, job_id);
        let response = self.agent.get(&url).call()?;
        let reply: SpecReply = response.into_body().read_json()?;
        let definition: PartDefinition =
            serde_json::from_value(reply.data).map_err(part_types::DefinitionError::Parse)?;
        Ok(definition)
    }

    /// `POST /jobs/{id}/tasks`: transition one named task.
    pub fn set_task_state(
        &self,
        job_id: &str,
        task: &str,
        state: TaskState,
    ) -> Result<(), WorkerError> {
        let url = format!("{}/jobs/{}/tasks", self.base, job_id);
        self.agent
            .post(&url)
            .send_json(TaskTransition { name: task, state })?;
        Ok(())
    }

    /// `POST /jobs/{id}/artifacts`: multipart upload of one produced file.
    pub fn upload_artifact(&self, job_id: &str, file: &Path) -> Result<(), WorkerError> {
        let filename = file
            .file_name()
            .ok_or_else(|| WorkerError::Protocol {
                reason: format!("artifact path has no file name: {}", file.display()),
            })?
            .to_string_lossy()
            .into_owned();
        let bytes = std::fs::read(file)?;

        let boundary = format!("----partwright-{}", uuid::Uuid::new_v4());
        let body = multipart_body(&boundary, &filename, &bytes);

        let url = format!("{}/jobs/{}/artifacts", self.base, job_id);
        self.agent
            .post(&url)
            .header(
                "content-type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .send(&body[..])?;
        Ok(())
    }
}

/// Assemble a multipart/form-data body with a `filename` field and an
/// `upload_file` file part.
pub fn multipart_body(boundary: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + 512);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"filename\"\r\n\r\n{filename}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"upload_file\"; filename=\"{filename}\"\r\ncontent-type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_list_reply_parses_and_filters_ready_jobs() {
        let reply: ListReply = serde_json::from_str(
            r#"{"data":[
                {"id":"a","attributes":{"state":{"job":"COMPLETED","tasks":{"build":"COMPLETED"}}}},
                {"id":"b","attributes":{"state":{"job":"CREATED","tasks":{"build":"CREATED"}}}},
                {"id":"c","attributes":{}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(reply.data.len(), 3);
        let ready = JobClient::next_ready(&reply.data).unwrap();
        assert_eq!(ready.id, "b");
    }

    #[test]
    fn missing_state_means_not_ready() {
        let job: Job = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(!job.is_ready());
    }

    #[test]
    fn task_transition_serializes_name_and_state() {
        let body = serde_json::to_value(TaskTransition {
            name: "build",
            state: TaskState::Running,
        })
        .unwrap();
        assert_eq!(body["name"], "build");
        assert_eq!(body["state"], "RUNNING");
    }

    #[test]
    fn task_state_uses_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskState::Failed).unwrap(),
            "\"FAILED\""
        );
        let state: TaskState = serde_json::from_str("\"CREATED\"").unwrap();
        assert_eq!(state, TaskState::Created);
    }

    #[test]
    fn multipart_body_carries_both_parts() {
        let body = multipart_body("----b", "part.stl", b"solid");
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("name=\"filename\"\r\n\r\npart.stl"));
        assert!(text.contains("name=\"upload_file\"; filename=\"part.stl\""));
        assert!(text.ends_with("------b--\r\n"));
    }
}
