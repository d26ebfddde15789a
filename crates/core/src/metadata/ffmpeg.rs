//! FFmpeg-based metadata writer implementation.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use super::config::MetadataConfig;
use super::error::MetadataError;
use super::traits::{MetadataJob, MetadataWriter};

/// Rewrites container metadata with a stream copy: no re-encode, just
/// `-map 0 -c copy` plus title and encoder tags.
pub struct FfmpegMetadataWriter {
    config: MetadataConfig,
}

impl FfmpegMetadataWriter {
    /// Creates a new writer with the given configuration.
    pub fn new(config: MetadataConfig) -> Self {
        Self { config }
    }

    /// Creates a writer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MetadataConfig::default())
    }

    fn title_for(job: &MetadataJob) -> String {
        job.title.clone().unwrap_or_else(|| {
            job.output
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }

    /// Builds the ffmpeg argument list for a rewrite job.
    fn build_args(&self, job: &MetadataJob) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
            "-y".to_string(),
            "-i".to_string(),
            job.input.to_string_lossy().to_string(),
            "-map".to_string(),
            "0".to_string(),
            "-c".to_string(),
            "copy".to_string(),
            "-metadata".to_string(),
            format!("title={}", Self::title_for(job)),
            "-metadata".to_string(),
            format!("encoder={}", self.config.encoder_tag),
            job.output.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl MetadataWriter for FfmpegMetadataWriter {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn write(&self, job: MetadataJob) -> Result<(), MetadataError> {
        if !job.input.exists() {
            return Err(MetadataError::InputNotFound {
                path: job.input.clone(),
            });
        }

        let args = self.build_args(&job);
        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    MetadataError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    MetadataError::Io(e)
                }
            })?;

        // Drain stderr in a task so a chatty ffmpeg can't block on a
        // full pipe while we wait on the exit status.
        let stderr_task = child.stderr.take().map(|mut pipe| {
            tokio::spawn(async move {
                let mut buf = String::new();
                let _ = pipe.read_to_string(&mut buf).await;
                buf
            })
        });

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let status = match timeout(timeout_duration, child.wait()).await {
            Ok(result) => result.map_err(MetadataError::Io)?,
            Err(_) => {
                let _ = child.kill().await;
                return Err(MetadataError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        };

        if !status.success() {
            let stderr = match stderr_task {
                Some(task) => task.await.unwrap_or_default(),
                None => String::new(),
            };
            return Err(MetadataError::failed(
                format!("ffmpeg exited with code: {:?}", status.code()),
                if stderr.is_empty() { None } else { Some(stderr) },
            ));
        }

        // Verify the output actually materialized.
        tokio::fs::metadata(&job.output)
            .await
            .map_err(|_| MetadataError::failed("output file not created", None))?;

        Ok(())
    }

    async fn validate(&self) -> Result<(), MetadataError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .output()
            .await;

        if let Err(e) = result {
            if e.kind() == std::io::ErrorKind::NotFound {
                return Err(MetadataError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                });
            }
            return Err(MetadataError::Io(e));
        }

        Ok(())
    }
}
