//! Release descriptors and the title parser that produces them.

mod title_parser;
mod types;

pub use title_parser::{parse_release_title, SceneTitleParser, TitleParser};
pub use types::*;
