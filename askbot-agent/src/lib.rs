//! Question answering for askbot
//!
//! This crate provides the Q/A prompt template, answer extraction and the
//! [`Chatbot`] that ties a text generator to the conversation history.

pub mod chatbot;
pub mod extract;

pub use chatbot::{generation_options, Chatbot, GENERATION_FAILURE_PREFIX};
pub use extract::{build_prompt, extract_answer, ANSWER_MARKER};
