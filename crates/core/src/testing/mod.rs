//! Mock implementations of the pipeline's external seams.
//!
//! These let the render pipeline be exercised end to end without a real
//! chat platform or an ffmpeg installation.

mod mock_metadata;
mod mock_transport;

pub use mock_metadata::MockMetadataWriter;
pub use mock_transport::MockTransport;
