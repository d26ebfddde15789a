//! Update routing: access gate, commands, then the free-form flow.

mod commands;
mod flow;
mod ingress;

pub use commands::Command;

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use crate::state::AppState;

pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .branch(
            dptree::filter(|msg: Message, state: Arc<AppState>| {
                msg.from
                    .as_ref()
                    .map(|user| !state.is_allowed(user.id.0 as i64))
                    .unwrap_or(true)
            })
            .endpoint(deny),
        )
        .branch(teloxide::filter_command::<Command, _>().endpoint(commands::handle))
        .branch(dptree::endpoint(flow::on_message))
}

async fn deny(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, "Sorry, this bot is private.")
        .await?;
    Ok(())
}
