//! Adapters implementing application ports

mod openai_completion_adapter;

pub use openai_completion_adapter::OpenAiCompletionAdapter;
