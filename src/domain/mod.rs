//! Domain layer for prompt processing.
//!
//! Holds the request/response records and the prompt validation rules.
//! Nothing here performs I/O.

pub mod processing;

pub use processing::{
    ProcessingRequest, ProcessingResponse, PromptPolicy, PromptViolation, RESULT_PREFIX,
    validate_prompt,
};
