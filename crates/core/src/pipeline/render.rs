//! The render pipeline itself: one job end to end.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::locks::UserLocks;
use crate::media::{ChannelId, UserId};
use crate::metadata::{MetadataJob, MetadataWriter};
use crate::naming::{ensure_extension, parse_filename, render, safe_filename};
use crate::profile::ProfileStore;

use super::error::RenderError;
use super::traits::{DeliveredMessage, Delivery, MediaTransport};
use super::types::{NamingSource, RenderOutcome, RenderProgress, RenderRequest};

/// Drives a single media file through download, metadata rewrite,
/// thumbnail resolution, upload and the optional log-channel mirror.
///
/// One job per user at a time; a second request while the first is in
/// flight is rejected with [`RenderError::Busy`], not queued.
pub struct RenderPipeline {
    workdir: PathBuf,
    log_channel: Option<ChannelId>,
    transport: Arc<dyn MediaTransport>,
    metadata: Arc<dyn MetadataWriter>,
    profiles: Arc<dyn ProfileStore>,
    locks: UserLocks,
}

impl RenderPipeline {
    pub fn new(
        workdir: impl Into<PathBuf>,
        log_channel: Option<ChannelId>,
        transport: Arc<dyn MediaTransport>,
        metadata: Arc<dyn MetadataWriter>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            workdir: workdir.into(),
            log_channel,
            transport,
            metadata,
            profiles,
            locks: UserLocks::new(),
        }
    }

    /// Whether a render is currently in flight for `user`.
    pub fn is_busy(&self, user: UserId) -> bool {
        self.locks.is_busy(user)
    }

    /// Runs one render job. Progress events, when a sender is given, are
    /// emitted in order; send failures are ignored.
    pub async fn run(
        &self,
        request: RenderRequest,
        progress: Option<mpsc::UnboundedSender<RenderProgress>>,
    ) -> Result<RenderOutcome, RenderError> {
        let _guard = self
            .locks
            .try_acquire(request.user)
            .ok_or(RenderError::Busy)?;

        let original_name = request.media.base_name();
        let output_name = self.output_name(&request.source, &original_name);
        info!(
            user = request.user.0,
            from = %original_name,
            to = %output_name,
            "starting render"
        );

        let scratch = self.workdir.join(request.user.0.to_string());
        tokio::fs::create_dir_all(&scratch).await?;
        let job_id = Uuid::new_v4();
        let downloaded = scratch.join(format!("dl_{job_id}_{output_name}"));
        let finished = scratch.join(format!("meta_{job_id}_{output_name}"));

        let result = self
            .run_inner(&request, &output_name, &downloaded, &finished, &progress)
            .await;

        // Scratch files go away no matter how the job ended.
        let _ = tokio::fs::remove_file(&downloaded).await;
        let _ = tokio::fs::remove_file(&finished).await;

        match &result {
            Ok(_) => emit(&progress, RenderProgress::Completed),
            Err(e) => {
                warn!(user = request.user.0, error = %e, "render failed");
                emit(&progress, RenderProgress::Failed);
            }
        }
        result
    }

    async fn run_inner(
        &self,
        request: &RenderRequest,
        output_name: &str,
        downloaded: &std::path::Path,
        finished: &std::path::Path,
        progress: &Option<mpsc::UnboundedSender<RenderProgress>>,
    ) -> Result<RenderOutcome, RenderError> {
        emit(progress, RenderProgress::Downloading);
        self.transport
            .download(&request.media.file_id, downloaded)
            .await
            .map_err(RenderError::Download)?;

        emit(progress, RenderProgress::WritingMetadata);
        self.write_metadata(request, downloaded, finished).await?;

        emit(progress, RenderProgress::Uploading);
        let delivery = Delivery {
            chat: request.chat,
            path: finished.to_path_buf(),
            file_name: output_name.to_string(),
            kind: request.media.kind,
            thumbnail: self.resolve_thumbnail(request).await,
        };
        let delivered = self
            .transport
            .deliver(delivery)
            .await
            .map_err(RenderError::Upload)?;

        let mirrored = self.mirror(&delivered).await;

        Ok(RenderOutcome {
            output_name: output_name.to_string(),
            delivered,
            mirrored,
        })
    }

    fn output_name(&self, source: &NamingSource, original_name: &str) -> String {
        let base = match source {
            NamingSource::Rule(rule) => render(&rule.format, &parse_filename(original_name)),
            NamingSource::Manual(name) => name.clone(),
        };
        ensure_extension(&safe_filename(&base), original_name)
    }

    /// Metadata rewrite with fallback: if the writer fails for any
    /// reason the file is passed through as a plain copy.
    async fn write_metadata(
        &self,
        request: &RenderRequest,
        input: &std::path::Path,
        output: &std::path::Path,
    ) -> Result<(), RenderError> {
        let title = match self.profiles.title(request.user) {
            Ok(title) => title,
            Err(e) => {
                warn!(user = request.user.0, error = %e, "title lookup failed");
                None
            }
        };
        let job = MetadataJob {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            title,
        };
        if let Err(e) = self.metadata.write(job).await {
            warn!(
                user = request.user.0,
                writer = self.metadata.name(),
                error = %e,
                "metadata rewrite failed, copying as-is"
            );
            tokio::fs::copy(input, output).await?;
        }
        Ok(())
    }

    /// Rule thumbnail wins over the profile default; either way the
    /// backing file must still exist on disk.
    async fn resolve_thumbnail(&self, request: &RenderRequest) -> Option<PathBuf> {
        let rule_thumb = match &request.source {
            NamingSource::Rule(rule) => rule.thumb_path.clone(),
            NamingSource::Manual(_) => None,
        };
        let candidate = match rule_thumb {
            Some(path) => Some(path),
            None => match self.profiles.thumbnail(request.user) {
                Ok(path) => path,
                Err(e) => {
                    warn!(user = request.user.0, error = %e, "thumbnail lookup failed");
                    None
                }
            },
        }?;
        match tokio::fs::try_exists(&candidate).await {
            Ok(true) => Some(candidate),
            _ => {
                debug!(path = %candidate.display(), "thumbnail file missing, skipping");
                None
            }
        }
    }

    /// Best effort: a mirror failure never fails the job.
    async fn mirror(&self, delivered: &DeliveredMessage) -> bool {
        let Some(log_channel) = self.log_channel else {
            return false;
        };
        match self.transport.mirror(delivered, log_channel).await {
            Ok(()) => true,
            Err(e) => {
                warn!(channel = log_channel.0, error = %e, "log channel mirror failed");
                false
            }
        }
    }
}

fn emit(progress: &Option<mpsc::UnboundedSender<RenderProgress>>, event: RenderProgress) {
    if let Some(tx) = progress {
        let _ = tx.send(event);
    }
}
