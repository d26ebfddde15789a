pub mod config;
pub mod locks;
pub mod media;
pub mod metadata;
pub mod naming;
pub mod pipeline;
pub mod profile;
pub mod rules;
pub mod session;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, StorageBackend,
};
pub use media::{ChannelId, IncomingMedia, MediaKind, UserId};
pub use pipeline::{
    MediaTransport, NamingSource, RenderError, RenderOutcome, RenderPipeline, RenderProgress,
    RenderRequest,
};
