//! Feedback — AI evaluation of a mock interview transcript.
//!
//! Flow: format_transcript → fixed evaluation prompt → LLM structured output →
//!       validate five-category schema → persist to the feedback collection.

pub mod handlers;
pub mod prompts;
pub mod schema;
pub mod service;
