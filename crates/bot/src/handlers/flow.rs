//! The free-form message path: configuration dialog inputs and media
//! uploads that arrive outside any command.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::error;

use suto_core::session::{SessionEvent, SessionInput, SessionState};
use suto_core::{ChannelId, UserId};

use super::ingress;
use crate::state::AppState;

pub async fn on_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user = UserId(from.id.0 as i64);

    if let Some(session_state) = state.sessions.state(user) {
        return on_session_message(bot, msg, state, user, session_state).await;
    }

    if let Some(media) = ingress::extract_media(&msg) {
        return ingress::on_media(bot, msg, state, user, media).await;
    }

    Ok(())
}

/// What a free-form message means to the dialog, in precedence order.
/// While a thumbnail is awaited the image wins over its forward origin,
/// so a photo forwarded from a channel still lands as the thumbnail.
#[derive(Debug)]
enum DialogInput {
    Thumbnail(String),
    Forwarded(ChannelId),
    Text(String),
    Other,
}

fn classify(msg: &Message, session_state: SessionState) -> DialogInput {
    if matches!(session_state, SessionState::AwaitingThumbnail) {
        if let Some(file_id) = ingress::thumbnail_file_id(msg) {
            return DialogInput::Thumbnail(file_id);
        }
    }
    if let Some(channel) = ingress::forwarded_channel(msg) {
        return DialogInput::Forwarded(channel);
    }
    if let Some(text) = msg.text() {
        return DialogInput::Text(text.to_string());
    }
    DialogInput::Other
}

/// Classifies the message for the dialog and feeds it in.
async fn on_session_message(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    user: UserId,
    session_state: SessionState,
) -> ResponseResult<()> {
    let input = match classify(&msg, session_state) {
        DialogInput::Thumbnail(file_id) => {
            let dest = state.thumb_dir.join(format!(
                "rule_{}_{}.jpg",
                user,
                chrono::Utc::now().timestamp_millis()
            ));
            match ingress::save_thumbnail(&state, &file_id, dest).await {
                Ok(path) => SessionInput::Image(path),
                Err(e) => {
                    error!(%user, error = %e, "rule thumbnail download failed");
                    bot.send_message(msg.chat.id, "Couldn't save that photo, send it again.")
                        .await?;
                    return Ok(());
                }
            }
        }
        DialogInput::Forwarded(channel) => SessionInput::ForwardedChannel(channel),
        DialogInput::Text(text) => SessionInput::Text(text),
        DialogInput::Other => {
            bot.send_message(msg.chat.id, prompt(session_state)).await?;
            return Ok(());
        }
    };

    apply_input(&bot, msg.chat.id, &state, user, input).await
}

/// Feeds one classified input into the user's session and replies with
/// the matching prompt. Also the back end of `/no` and `/done`.
pub async fn apply_input(
    bot: &Bot,
    chat: ChatId,
    state: &AppState,
    user: UserId,
    input: SessionInput,
) -> ResponseResult<()> {
    let text = match state.sessions.advance(user, input) {
        Ok(event) => event_text(event),
        Err(e) => {
            error!(%user, error = %e, "failed to persist rule");
            "Couldn't save the rule just now. Send /no or a photo to try again.".to_string()
        }
    };
    bot.send_message(chat, text).await?;
    Ok(())
}

pub fn prompt(state: SessionState) -> &'static str {
    match state {
        SessionState::AwaitingFormat => {
            "Send the new filename format. Use {ep}, {Sn} and {quality} as placeholders, \
             e.g. My Show S{Sn}E{ep} {quality}"
        }
        SessionState::AwaitingTrigger => {
            "Now send the trigger word. Files whose name contains it will be renamed \
             with this format."
        }
        SessionState::AwaitingTargetChannels => {
            "Forward a message from each channel this rule should be limited to, then \
             send /done. Send /no to match files from anywhere."
        }
        SessionState::AwaitingThumbnail => {
            "Send a photo to use as this rule's thumbnail, or /no to skip."
        }
    }
}

fn event_text(event: SessionEvent) -> String {
    match event {
        SessionEvent::NoSession => {
            "No configuration in progress. Send /autorename to start one.".to_string()
        }
        SessionEvent::Prompt(state) => prompt(state).to_string(),
        SessionEvent::Rejected(state) => format!("That doesn't fit here. {}", prompt(state)),
        SessionEvent::ChannelAdded { channel, total } => format!(
            "Added channel {channel} ({total} so far). Forward more or send /done."
        ),
        SessionEvent::Saved(rule) => format!(
            "Rule saved. Files containing \"{}\" will be renamed with \"{}\".",
            rule.trigger, rule.format
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(extra: &str) -> Message {
        let json = format!(
            r#"{{
                "message_id": 1,
                "date": 1700000000,
                "chat": {{"id": 10, "type": "private", "first_name": "A"}},
                "from": {{"id": 10, "is_bot": false, "first_name": "A"}},
                {extra}
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    const FORWARD_ORIGIN: &str = r#""forward_origin": {
        "type": "channel",
        "chat": {"id": -100123, "type": "channel", "title": "C"},
        "message_id": 5,
        "date": 1700000000
    }"#;

    #[test]
    fn test_forwarded_photo_is_a_thumbnail_in_the_thumbnail_step() {
        let msg = message(&format!(
            r#"{FORWARD_ORIGIN},
            "photo": [{{"file_id": "ph1", "file_unique_id": "u1", "width": 90, "height": 90, "file_size": 100}}]"#
        ));
        let input = classify(&msg, SessionState::AwaitingThumbnail);
        assert!(matches!(input, DialogInput::Thumbnail(id) if id == "ph1"));
    }

    #[test]
    fn test_forwarded_photo_is_a_channel_in_the_channel_step() {
        let msg = message(&format!(
            r#"{FORWARD_ORIGIN},
            "photo": [{{"file_id": "ph1", "file_unique_id": "u1", "width": 90, "height": 90, "file_size": 100}}]"#
        ));
        let input = classify(&msg, SessionState::AwaitingTargetChannels);
        assert!(matches!(input, DialogInput::Forwarded(ChannelId(-100123))));
    }

    #[test]
    fn test_image_document_is_a_thumbnail() {
        let msg = message(
            r#""document": {"file_id": "doc1", "file_unique_id": "u2",
                "file_name": "thumb.png", "mime_type": "image/png", "file_size": 5}"#,
        );
        let input = classify(&msg, SessionState::AwaitingThumbnail);
        assert!(matches!(input, DialogInput::Thumbnail(id) if id == "doc1"));
    }

    #[test]
    fn test_non_image_document_does_not_count_as_thumbnail() {
        let msg = message(
            r#""document": {"file_id": "doc2", "file_unique_id": "u3",
                "file_name": "ep.mkv", "mime_type": "video/x-matroska", "file_size": 5}"#,
        );
        let input = classify(&msg, SessionState::AwaitingThumbnail);
        assert!(matches!(input, DialogInput::Other));
    }
}
