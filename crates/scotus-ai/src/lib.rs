//! Research layer: prompt construction, response cleanup, and the Anthropic Messages API client.

pub mod anthropic;
pub mod prompt;
pub mod response;

pub use anthropic::{AnthropicClient, ResearchClient, ResearchError};
pub use prompt::{SYSTEM_PROMPT, build_user_prompt};
pub use response::strip_code_fences;
