//! Completion service access.

pub mod client;
pub mod generate;

pub use client::CompletionClient;
pub use generate::HttpCompletionClient;
