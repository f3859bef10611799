mod cli;
mod derive;
mod tokens;
mod types;

pub use derive::derive_args;
pub use tokens::{config_tokens, normalize_go_style_flags};
pub use types::ParsedArgs;
