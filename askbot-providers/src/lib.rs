//! Text generation backends for askbot
//!
//! The chatbot only ever sees the [`TextGenerator`] trait; the pre-trained
//! model itself is hosted elsewhere and reached through [`CompletionClient`].

pub mod base;
pub mod completion;

pub use base::{
    GeneratedSequence, GenerationOptions, ProviderError, ProviderResult, TextGenerator,
};
pub use completion::CompletionClient;
