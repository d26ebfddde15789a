//! Mock transport for testing.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::media::ChannelId;
use crate::pipeline::{DeliveredMessage, Delivery, MediaTransport, TransportError};

/// Mock implementation of the MediaTransport trait.
///
/// Provides controllable behavior for testing:
/// - Records downloads, deliveries and mirrors for assertions
/// - Simulates failures per operation
/// - Optional artificial download delay for concurrency tests
///
/// A successful download writes a small stub file to the destination so
/// downstream file operations have something to work with.
#[derive(Debug, Default)]
pub struct MockTransport {
    downloads: Mutex<Vec<String>>,
    deliveries: Mutex<Vec<Delivery>>,
    mirrors: Mutex<Vec<(DeliveredMessage, ChannelId)>>,
    fail_downloads: AtomicBool,
    fail_uploads: AtomicBool,
    fail_mirrors: AtomicBool,
    download_delay: Mutex<Option<Duration>>,
    next_message_id: AtomicI32,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes all subsequent downloads fail.
    pub fn fail_downloads(&self) {
        self.fail_downloads.store(true, Ordering::SeqCst);
    }

    /// Makes all subsequent deliveries fail.
    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    /// Makes all subsequent mirrors fail.
    pub fn fail_mirrors(&self) {
        self.fail_mirrors.store(true, Ordering::SeqCst);
    }

    /// Adds an artificial delay to every download.
    pub fn delay_downloads(&self, delay: Duration) {
        *self.download_delay.lock().unwrap() = Some(delay);
    }

    /// File ids that were downloaded.
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }

    /// Deliveries that were made.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Mirror calls that were made.
    pub fn mirrors(&self) -> Vec<(DeliveredMessage, ChannelId)> {
        self.mirrors.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaTransport for MockTransport {
    async fn download(&self, file_id: &str, dest: &Path) -> Result<(), TransportError> {
        let delay = *self.download_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_downloads.load(Ordering::SeqCst) {
            return Err(TransportError::Download("mock download failure".into()));
        }
        tokio::fs::write(dest, b"mock media bytes").await?;
        self.downloads.lock().unwrap().push(file_id.to_string());
        Ok(())
    }

    async fn deliver(&self, delivery: Delivery) -> Result<DeliveredMessage, TransportError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(TransportError::Upload("mock upload failure".into()));
        }
        let chat = delivery.chat;
        self.deliveries.lock().unwrap().push(delivery);
        Ok(DeliveredMessage {
            chat,
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1,
        })
    }

    async fn mirror(
        &self,
        message: &DeliveredMessage,
        dest: ChannelId,
    ) -> Result<(), TransportError> {
        if self.fail_mirrors.load(Ordering::SeqCst) {
            return Err(TransportError::Mirror("mock mirror failure".into()));
        }
        self.mirrors.lock().unwrap().push((*message, dest));
        Ok(())
    }
}
