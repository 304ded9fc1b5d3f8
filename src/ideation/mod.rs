//! Request/stream core: provider requests, the capability retry, and the
//! incremental decoder for both streaming dialects.

mod cards;
mod classifier;
mod client;
mod driver;
mod error;
mod frame;
mod line_buffer;
mod models;
mod prompt;
mod provider;

pub use cards::{IdeaCard, split_cards};
pub use classifier::{ParsedEvent, classify};
pub use client::IdeationClient;
pub use driver::{Accumulator, StreamEvent, StreamSink, event_stream, run_stream};
pub use error::{AttemptFailure, ErrorBody, IdeationError, THINKING_UNSUPPORTED};
pub use frame::{DATA_PREFIX, DONE_SENTINEL, Frame, MalformedLine, parse_line};
pub use line_buffer::LineBuffer;
pub use models::list_models;
pub use prompt::{
    Complexity, IDEA_PROMPT_TEMPLATE, IdeaParams, MARKET_PROMPT_TEMPLATE, build_idea_prompt,
    build_market_prompt,
};
pub use provider::{HOSTED_ENDPOINT, Provider, ProviderKind, RequestSpec};
