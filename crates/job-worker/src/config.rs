use std::env;
use std::time::Duration;

use part_export::{parse_formats, OutputFormat};

use crate::error::WorkerError;

/// Worker configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Job-server base URL, without a trailing slash.
    pub server_url: String,
    /// How long to sleep when no job is ready.
    pub poll_interval: Duration,
    /// Builds to perform before exiting; a service manager restarts the
    /// worker, which keeps long-running kernel state from accumulating.
    pub max_builds: u32,
    /// Artifact formats produced per job.
    pub formats: Vec<OutputFormat>,
}

impl WorkerConfig {
    pub const DEFAULT_POLL_SECONDS: u64 = 2;
    pub const DEFAULT_MAX_BUILDS: u32 = 5;
    pub const DEFAULT_FORMATS: &'static str = "PNG,STL,DXF";

    /// Read configuration from `PARTWRIGHT_*` environment variables.
    /// Only the server address is required.
    pub fn from_env() -> Result<Self, WorkerError> {
        let server = env::var("PARTWRIGHT_SERVER").map_err(|_| WorkerError::Config {
            reason: "PARTWRIGHT_SERVER environment variable is not set".to_string(),
        })?;
        let server_url = server.trim().trim_end_matches('/').to_string();
        if server_url.is_empty() {
            return Err(WorkerError::Config {
                reason: "PARTWRIGHT_SERVER is empty".to_string(),
            });
        }

        let poll_seconds = match env::var("PARTWRIGHT_POLL_SECONDS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| WorkerError::Config {
                reason: format!("PARTWRIGHT_POLL_SECONDS is not a number: {raw}"),
            })?,
            Err(_) => Self::DEFAULT_POLL_SECONDS,
        };

        let max_builds = match env::var("PARTWRIGHT_MAX_BUILDS") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| WorkerError::Config {
                reason: format!("PARTWRIGHT_MAX_BUILDS is not a number: {raw}"),
            })?,
            Err(_) => Self::DEFAULT_MAX_BUILDS,
        };

        let formats_raw =
            env::var("PARTWRIGHT_FORMATS").unwrap_or_else(|_| Self::DEFAULT_FORMATS.to_string());
        let formats = parse_formats(&formats_raw)?;

        Ok(Self {
            server_url,
            poll_interval: Duration::from_secs(poll_seconds),
            max_builds,
            formats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_formats_parse() {
        let formats = parse_formats(WorkerConfig::DEFAULT_FORMATS).unwrap();
        assert_eq!(
            formats,
            vec![OutputFormat::Png, OutputFormat::Stl, OutputFormat::Dxf]
        );
    }
}
