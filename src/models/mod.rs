pub mod message;
pub mod input;
pub mod options;
pub mod pipeline;

// Re-export the message types for convenience
pub use message::{CompletionRequest, CompletionResult, Message, Role, Usage};
