//! Auto-rename rules: storage and matching.

mod matcher;
mod memory;
mod sqlite;
mod store;
mod types;

pub use matcher::find_match;
pub use memory::MemoryRuleStore;
pub use sqlite::SqliteRuleStore;
pub use store::{RuleError, RuleStore};
pub use types::Rule;
