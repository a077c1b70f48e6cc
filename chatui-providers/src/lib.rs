//! LLM backend clients for chatui
//!
//! `ChatProvider` is the seam between the session controller and the
//! backend; `OllamaClient` is the HTTP implementation.

pub mod base;
pub mod ollama;

pub use base::{ChatProvider, ProviderError, ProviderResult};
pub use ollama::OllamaClient;
