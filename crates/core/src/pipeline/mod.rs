//! Render pipeline: download, metadata rewrite, thumbnail, upload, mirror.

mod error;
mod render;
mod traits;
mod types;

pub use error::RenderError;
pub use render::RenderPipeline;
pub use traits::{DeliveredMessage, Delivery, MediaTransport, TransportError};
pub use types::{NamingSource, RenderOutcome, RenderProgress, RenderRequest};
