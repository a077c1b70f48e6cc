//! Core types and utilities for chatui
//!
//! This crate provides the transcript data model, durable transcript
//! storage, configuration, and logging used by the other chatui crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod transcript;

pub use error::{Error, Result};
