//! sdkgen-core - Command metadata extraction and SDK stub generation
//!
//! This crate provides:
//! - The command data model (parameters, positional bindings)
//! - The header extractor that recovers that model from source text
//! - The documentation macro table
//! - Per-language stub generators
//! - Tree scanning with a configurable failure policy
//! - Layered configuration

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod extract;
pub mod macros;
pub mod model;
pub mod output_format;
pub mod scan;
pub mod target;

pub use config::{Config, FailurePolicy};
pub use error::{Error, ExtractError, ExtractErrorKind, Result};
pub use extract::Extractor;
pub use model::{Command, Parameter, ParameterDefinition, PositionalArg};
pub use output_format::OutputFormat;
pub use scan::{FileFailure, ScanReport};
pub use target::{generate, Target, TargetLanguage};
