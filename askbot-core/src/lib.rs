//! Core types for askbot
//!
//! This crate provides the error type, configuration, logging setup and
//! the in-memory conversation session shared by the other askbot crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;

pub use error::{Error, Result};
