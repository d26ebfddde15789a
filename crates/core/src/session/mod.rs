//! Multi-step auto-rename configuration dialog.

mod machine;
mod types;

pub use machine::{SessionEvent, SessionManager};
pub use types::{Advance, Session, SessionInput, SessionState};
