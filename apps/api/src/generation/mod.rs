// Cover-letter generation: request validation, prompt composition, and the
// linear Loader → Composer → Client → Renderer pipeline.
// All model calls go through llm_client.

pub mod composer;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod request;
