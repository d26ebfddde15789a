//! Filename token extraction and template rendering.

mod parser;
mod template;

pub use parser::{ensure_extension, parse_filename, safe_filename, ParsedName};
pub use template::{render, EPISODE_TOKEN, QUALITY_TOKEN, SEASON_TOKEN};
