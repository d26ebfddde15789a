//! Media ingress: projecting messages into pipeline requests and driving
//! renders end to end.

use std::path::PathBuf;
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::MessageOrigin;
use tokio::sync::mpsc;
use tracing::{debug, error};

use suto_core::pipeline::TransportError;
use suto_core::rules::find_match;
use suto_core::{ChannelId, IncomingMedia, MediaKind, NamingSource, RenderRequest, UserId};

use crate::progress;
use crate::state::AppState;

/// Projects the message's media into the pipeline's shape, if any.
pub fn extract_media(msg: &Message) -> Option<IncomingMedia> {
    let origin_channel = forwarded_channel(msg);
    if let Some(video) = msg.video() {
        return Some(IncomingMedia {
            kind: MediaKind::Video,
            file_id: video.file.id.clone(),
            file_name: video.file_name.clone(),
            file_size: Some(video.file.size as u64),
            origin_channel,
        });
    }
    if let Some(document) = msg.document() {
        return Some(IncomingMedia {
            kind: MediaKind::Document,
            file_id: document.file.id.clone(),
            file_name: document.file_name.clone(),
            file_size: Some(document.file.size as u64),
            origin_channel,
        });
    }
    if let Some(audio) = msg.audio() {
        return Some(IncomingMedia {
            kind: MediaKind::Audio,
            file_id: audio.file.id.clone(),
            file_name: audio.file_name.clone(),
            file_size: Some(audio.file.size as u64),
            origin_channel,
        });
    }
    None
}

/// Channel identity when the message was forwarded from one.
pub fn forwarded_channel(msg: &Message) -> Option<ChannelId> {
    match msg.forward_origin()? {
        MessageOrigin::Channel { chat, .. } => Some(ChannelId(chat.id.0)),
        _ => None,
    }
}

/// File id of the message's thumbnail candidate: the largest size of a
/// photo, or a document carrying an image mime type.
pub fn thumbnail_file_id(msg: &Message) -> Option<String> {
    if let Some(photos) = msg.photo() {
        return photos.last().map(|p| p.file.id.clone());
    }
    let document = msg.document()?;
    let is_image = document
        .mime_type
        .as_ref()
        .is_some_and(|m| m.essence_str().starts_with("image/"));
    is_image.then(|| document.file.id.clone())
}

/// Downloads a thumbnail candidate to `dest`.
pub async fn save_thumbnail(
    state: &AppState,
    file_id: &str,
    dest: PathBuf,
) -> Result<PathBuf, TransportError> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    state.transport.download(file_id, &dest).await?;
    Ok(dest)
}

/// A media message outside any configuration dialog: match it against
/// the user's rules and auto-rename on a hit. No match means no action,
/// the manual `/rename` path stays available.
pub async fn on_media(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    user: UserId,
    media: IncomingMedia,
) -> ResponseResult<()> {
    let rules = match state.rules.list_all(user) {
        Ok(rules) => rules,
        Err(e) => {
            error!(%user, error = %e, "rule lookup failed");
            bot.send_message(msg.chat.id, "Something went wrong, try again later.")
                .await?;
            return Ok(());
        }
    };

    let name = media.base_name();
    match find_match(&rules, &name, media.origin_channel) {
        Some(rule) => {
            let source = NamingSource::Rule(rule.clone());
            run_render(bot, state, msg.chat.id, user, media, source).await
        }
        None => {
            debug!(%user, file = %name, "no rule matched");
            Ok(())
        }
    }
}

/// Drives one render with a live status message.
pub async fn run_render(
    bot: Bot,
    state: Arc<AppState>,
    chat: ChatId,
    user: UserId,
    media: IncomingMedia,
    source: NamingSource,
) -> ResponseResult<()> {
    let original_name = media.base_name();
    let status = bot
        .send_message(chat, format!("Processing {original_name}..."))
        .await?;

    let (tx, rx) = mpsc::unbounded_channel();
    let reporter = tokio::spawn(progress::drive_status_message(
        bot.clone(),
        chat,
        status.id,
        original_name,
        media.file_size,
        rx,
    ));

    let request = RenderRequest {
        user,
        chat: ChannelId(chat.0),
        media,
        source,
    };
    let result = state.pipeline.run(request, Some(tx)).await;
    let _ = reporter.await;

    let text = match result {
        Ok(outcome) => format!("Saved as {}", outcome.output_name),
        Err(e) => e.user_message(),
    };
    bot.edit_message_text(chat, status.id, text).await?;
    Ok(())
}
