//! Per-user profile: default thumbnail and metadata title.

mod memory;
mod sqlite;
mod store;

pub use memory::MemoryProfileStore;
pub use sqlite::SqliteProfileStore;
pub use store::{ProfileError, ProfileStore};
