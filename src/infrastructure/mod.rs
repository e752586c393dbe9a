//! Infrastructure layer.
//!
//! Configuration, cancellation plumbing, and the prompt processor.

pub mod cancellation;
pub mod config;
pub mod processor;

pub use cancellation::{CancelOnDrop, CancellationSignal, CancellationSource};
pub use config::{AppConfig, ConfigError, EnvParseError};
pub use processor::{
    DEFAULT_PROCESSING_DELAY, ProcessingError, PromptProcessor, SimulatedProcessor,
};
