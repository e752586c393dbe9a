//! Prompt Processing API
//!
//! A minimal web service that accepts a text prompt, validates it, runs it
//! through a prompt processor, and returns the processed result.
//!
//! - [`domain`]: request/response records and prompt validation
//! - [`infrastructure`]: configuration, cancellation, the processor
//! - [`api`]: handlers, error mapping, routing

pub mod api;
pub mod domain;
pub mod infrastructure;
