//! Built-in agent implementations for the medical text tasks.

pub mod base;
pub mod retry;
pub mod summarizer;
pub mod writer;
pub mod refiner;
pub mod sanitizer;
pub mod validator;
pub mod verdict;

pub use base::{Agent, AgentCore};
pub use retry::{RetryPolicy, RetryStrategy};
pub use summarizer::SummarizeAgent;
pub use writer::WriteArticleAgent;
pub use refiner::RefinerAgent;
pub use sanitizer::SanitizerAgent;
pub use validator::{ValidationTarget, ValidatorAgent};
pub use verdict::{ValidationReport, Verdict};
