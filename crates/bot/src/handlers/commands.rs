//! Command surface.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::InputFile;
use teloxide::utils::command::BotCommands;
use tracing::error;

use suto_core::session::SessionInput;
use suto_core::{NamingSource, UserId};

use super::{flow, ingress};
use crate::state::AppState;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Suto Rename Bot commands:")]
pub enum Command {
    #[command(description = "start the bot")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "reply to a photo to save it as your default thumbnail")]
    Addthumbnail,
    #[command(description = "delete your saved thumbnail")]
    Delthumbnail,
    #[command(description = "show your saved thumbnail")]
    Showthumbnail,
    #[command(description = "set the metadata title, or show the current one")]
    Settitle(String),
    #[command(description = "reply to a file with the new name")]
    Rename(String),
    #[command(description = "configure an auto-rename rule")]
    Autorename,
    #[command(description = "cancel the rule configuration")]
    Cancel,
    #[command(description = "list your saved rules")]
    Seeformat,
    #[command(description = "delete all your saved rules")]
    Delformat,
    #[command(description = "skip the current configuration step")]
    No,
    #[command(description = "finish adding target channels")]
    Done,
}

const START_TEXT: &str = "Hi! Send me a video, document or audio file and I'll rename it.\n\
    Reply to a file with /rename NewName to rename it by hand, or set up \
    an auto-rename rule with /autorename.\n\nSend /help for all commands.";

pub async fn handle(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user = UserId(from.id.0 as i64);
    let chat = msg.chat.id;

    match cmd {
        Command::Start => {
            bot.send_message(chat, START_TEXT).await?;
        }
        Command::Help => {
            bot.send_message(chat, Command::descriptions().to_string())
                .await?;
        }
        Command::Addthumbnail => {
            let file_id = msg
                .reply_to_message()
                .and_then(ingress::thumbnail_file_id);
            let Some(file_id) = file_id else {
                bot.send_message(chat, "Reply /addthumbnail to the photo you want to use.")
                    .await?;
                return Ok(());
            };
            let dest = state.thumb_dir.join(format!("user_{user}.jpg"));
            match ingress::save_thumbnail(&state, &file_id, dest).await {
                Ok(path) => match state.profiles.set_thumbnail(user, &path) {
                    Ok(()) => {
                        bot.send_message(chat, "Thumbnail saved.").await?;
                    }
                    Err(e) => {
                        error!(%user, error = %e, "failed to store thumbnail");
                        bot.send_message(chat, "Couldn't save the thumbnail, try again.")
                            .await?;
                    }
                },
                Err(e) => {
                    error!(%user, error = %e, "thumbnail download failed");
                    bot.send_message(chat, "Couldn't download that photo, try again.")
                        .await?;
                }
            }
        }
        Command::Delthumbnail => {
            let text = match state.profiles.clear_thumbnail(user) {
                Ok(Some(path)) => {
                    let _ = tokio::fs::remove_file(&path).await;
                    "Thumbnail deleted."
                }
                Ok(None) => "You have no saved thumbnail.",
                Err(e) => {
                    error!(%user, error = %e, "failed to clear thumbnail");
                    "Something went wrong, try again later."
                }
            };
            bot.send_message(chat, text).await?;
        }
        Command::Showthumbnail => match state.profiles.thumbnail(user) {
            Ok(Some(path)) if path.exists() => {
                bot.send_photo(chat, InputFile::file(path)).await?;
            }
            Ok(_) => {
                bot.send_message(chat, "You have no saved thumbnail. Reply /addthumbnail to a photo to set one.")
                    .await?;
            }
            Err(e) => {
                error!(%user, error = %e, "failed to read thumbnail");
                bot.send_message(chat, "Something went wrong, try again later.")
                    .await?;
            }
        },
        Command::Settitle(title) => {
            let title = title.trim();
            let text = if title.is_empty() {
                match state.profiles.title(user) {
                    Ok(Some(current)) => format!("Current metadata title: {current}"),
                    Ok(None) => {
                        "No metadata title set; the filename is used. Send /settitle Your Title to set one."
                            .to_string()
                    }
                    Err(e) => {
                        error!(%user, error = %e, "failed to read title");
                        "Something went wrong, try again later.".to_string()
                    }
                }
            } else {
                match state.profiles.set_title(user, title) {
                    Ok(()) => format!("Metadata title set to: {title}"),
                    Err(e) => {
                        error!(%user, error = %e, "failed to store title");
                        "Couldn't save the title, try again.".to_string()
                    }
                }
            };
            bot.send_message(chat, text).await?;
        }
        Command::Rename(name) => {
            let name = name.trim().to_string();
            let media = msg.reply_to_message().and_then(ingress::extract_media);
            match (name.is_empty(), media) {
                (false, Some(media)) => {
                    return ingress::run_render(
                        bot,
                        state,
                        chat,
                        user,
                        media,
                        NamingSource::Manual(name),
                    )
                    .await;
                }
                _ => {
                    bot.send_message(
                        chat,
                        "Reply to a file with /rename NewName to rename it.",
                    )
                    .await?;
                }
            }
        }
        Command::Autorename => {
            state.sessions.start(user);
            bot.send_message(
                chat,
                flow::prompt(suto_core::session::SessionState::AwaitingFormat),
            )
            .await?;
        }
        Command::Cancel => {
            let text = if state.sessions.cancel(user) {
                "Configuration cancelled."
            } else {
                "No configuration in progress."
            };
            bot.send_message(chat, text).await?;
        }
        Command::Seeformat => {
            let text = match state.rules.list_all(user) {
                Ok(rules) if rules.is_empty() => {
                    "You have no rules yet. Send /autorename to create one.".to_string()
                }
                Ok(rules) => {
                    let mut lines = vec!["Your auto-rename rules:".to_string()];
                    for (i, rule) in rules.iter().enumerate() {
                        let channels = if rule.is_channel_scoped() {
                            rule.channels
                                .iter()
                                .map(|c| c.to_string())
                                .collect::<Vec<_>>()
                                .join(", ")
                        } else {
                            "any".to_string()
                        };
                        let thumb = if rule.thumb_path.is_some() { "yes" } else { "no" };
                        lines.push(format!(
                            "{}. \"{}\" when name contains \"{}\" (channels: {}, thumbnail: {})",
                            i + 1,
                            rule.format,
                            rule.trigger,
                            channels,
                            thumb
                        ));
                    }
                    lines.join("\n")
                }
                Err(e) => {
                    error!(%user, error = %e, "rule listing failed");
                    "Something went wrong, try again later.".to_string()
                }
            };
            bot.send_message(chat, text).await?;
        }
        Command::Delformat => {
            let text = match state.rules.clear(user) {
                Ok(0) => "You had no rules to delete.".to_string(),
                Ok(n) => format!("Deleted {n} rule(s)."),
                Err(e) => {
                    error!(%user, error = %e, "rule clearing failed");
                    "Something went wrong, try again later.".to_string()
                }
            };
            bot.send_message(chat, text).await?;
        }
        Command::No => {
            return flow::apply_input(&bot, chat, &state, user, SessionInput::Skip).await;
        }
        Command::Done => {
            return flow::apply_input(&bot, chat, &state, user, SessionInput::Done).await;
        }
    }
    Ok(())
}
