//! Bot API implementation of the pipeline's transport seam.

use async_trait::async_trait;
use std::path::Path;

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId};

use suto_core::pipeline::{DeliveredMessage, Delivery, MediaTransport, TransportError};
use suto_core::{ChannelId, MediaKind};

pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MediaTransport for TelegramTransport {
    async fn download(&self, file_id: &str, dest: &Path) -> Result<(), TransportError> {
        let file = self
            .bot
            .get_file(file_id.to_string())
            .await
            .map_err(|e| TransportError::Download(e.to_string()))?;
        let mut out = tokio::fs::File::create(dest).await?;
        self.bot
            .download_file(&file.path, &mut out)
            .await
            .map_err(|e| TransportError::Download(e.to_string()))?;
        Ok(())
    }

    async fn deliver(&self, delivery: Delivery) -> Result<DeliveredMessage, TransportError> {
        let chat = ChatId(delivery.chat.0);
        let input = InputFile::file(&delivery.path).file_name(delivery.file_name.clone());
        let thumbnail = delivery.thumbnail.as_ref().map(InputFile::file);

        let message = match delivery.kind {
            MediaKind::Video => {
                let mut request = self
                    .bot
                    .send_video(chat, input)
                    .caption(delivery.file_name.clone())
                    .supports_streaming(true);
                if let Some(thumb) = thumbnail {
                    request = request.thumbnail(thumb);
                }
                request.await
            }
            MediaKind::Audio => {
                let mut request = self
                    .bot
                    .send_audio(chat, input)
                    .caption(delivery.file_name.clone());
                if let Some(thumb) = thumbnail {
                    request = request.thumbnail(thumb);
                }
                request.await
            }
            MediaKind::Document => {
                let mut request = self
                    .bot
                    .send_document(chat, input)
                    .caption(delivery.file_name.clone());
                if let Some(thumb) = thumbnail {
                    request = request.thumbnail(thumb);
                }
                request.await
            }
        }
        .map_err(|e| TransportError::Upload(e.to_string()))?;

        Ok(DeliveredMessage {
            chat: delivery.chat,
            message_id: message.id.0,
        })
    }

    async fn mirror(
        &self,
        message: &DeliveredMessage,
        dest: ChannelId,
    ) -> Result<(), TransportError> {
        self.bot
            .copy_message(
                ChatId(dest.0),
                ChatId(message.chat.0),
                MessageId(message.message_id),
            )
            .await
            .map_err(|e| TransportError::Mirror(e.to_string()))?;
        Ok(())
    }
}
