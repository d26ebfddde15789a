use std::path::PathBuf;
use std::sync::Arc;

use suto_core::config::BotConfig;
use suto_core::pipeline::MediaTransport;
use suto_core::profile::ProfileStore;
use suto_core::rules::RuleStore;
use suto_core::session::SessionManager;
use suto_core::RenderPipeline;

/// Shared application state, one instance behind an `Arc` in the
/// dispatcher's dependency map.
pub struct AppState {
    pub bot_config: BotConfig,
    pub sessions: SessionManager,
    pub pipeline: Arc<RenderPipeline>,
    pub rules: Arc<dyn RuleStore>,
    pub profiles: Arc<dyn ProfileStore>,
    /// Used directly for thumbnail photo downloads; the pipeline holds
    /// its own handle for media files.
    pub transport: Arc<dyn MediaTransport>,
    /// Directory thumbnail photos are downloaded into.
    pub thumb_dir: PathBuf,
}

impl AppState {
    /// Whether this user may talk to the bot at all.
    pub fn is_allowed(&self, user_id: i64) -> bool {
        self.bot_config.is_allowed(user_id)
    }
}
