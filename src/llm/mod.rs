// Upstream model access: prompt construction, the completion call and
// validation of what comes back.

mod client;
mod prompt;
mod validate;

pub use client::{CompletionClient, CompletionError, OpenAiClient};
pub use prompt::build_hashtag_prompt;
pub use validate::{ValidateError, parse_suggestions};
