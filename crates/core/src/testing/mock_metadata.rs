//! Mock metadata writer for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::metadata::{MetadataError, MetadataJob, MetadataWriter};

/// Mock implementation of the MetadataWriter trait.
///
/// Records submitted jobs and, on success, copies the input file to the
/// output path so the pipeline has a real file to upload. The fail
/// switch simulates a broken ffmpeg installation.
#[derive(Debug, Default)]
pub struct MockMetadataWriter {
    jobs: Mutex<Vec<MetadataJob>>,
    fail_writes: AtomicBool,
}

impl MockMetadataWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes all subsequent writes fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Jobs that were submitted, including failed ones.
    pub fn jobs(&self) -> Vec<MetadataJob> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataWriter for MockMetadataWriter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn write(&self, job: MetadataJob) -> Result<(), MetadataError> {
        self.jobs.lock().unwrap().push(job.clone());
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(MetadataError::failed("mock metadata failure", None));
        }
        tokio::fs::copy(&job.input, &job.output).await?;
        Ok(())
    }

    async fn validate(&self) -> Result<(), MetadataError> {
        Ok(())
    }
}
